use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The hub's three presentation modes. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKey {
    #[default]
    Cards,
    Dark,
    Steps,
}

impl ThemeKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "cards" => Some(Self::Cards),
            "dark" => Some(Self::Dark),
            "steps" => Some(Self::Steps),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Dark => "dark",
            Self::Steps => "steps",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cards => "Cards",
            Self::Dark => "Dark",
            Self::Steps => "Steps",
        }
    }

    /// Class applied to `<body>` while this theme is active.
    pub fn body_class(&self) -> &'static str {
        match self {
            Self::Cards => "theme-cards",
            Self::Dark => "theme-dark",
            Self::Steps => "theme-steps",
        }
    }

    /// Id of the preview panel shown for this theme; the other panels stay hidden.
    pub fn panel_id(&self) -> &'static str {
        match self {
            Self::Cards => "mock-cards",
            Self::Dark => "mock-dark",
            Self::Steps => "mock-steps",
        }
    }

    pub fn all() -> [ThemeKey; 3] {
        [Self::Cards, Self::Dark, Self::Steps]
    }
}

/// Holds the active theme. Last selection wins, regardless of who made it.
#[derive(Clone)]
pub struct ThemeSwitcher {
    current: Arc<Mutex<ThemeKey>>,
}

impl ThemeSwitcher {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(ThemeKey::default())),
        }
    }

    pub async fn select(&self, theme: ThemeKey) -> ThemeKey {
        *self.current.lock().await = theme;
        theme
    }

    pub async fn current(&self) -> ThemeKey {
        *self.current.lock().await
    }
}

impl Default for ThemeSwitcher {
    fn default() -> Self {
        Self::new()
    }
}
