use minijinja::{Environment, context};
use serde::Serialize;
use std::sync::OnceLock;
use tunnelhub::theme::ThemeKey;

#[derive(Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: Option<String>,
}

#[derive(Serialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub key: String,
}

pub fn breadcrumb(label: &str, href: Option<String>) -> Breadcrumb {
    Breadcrumb {
        label: label.to_string(),
        href,
    }
}

pub fn render_layout(
    title: &str,
    active: &str,
    theme: ThemeKey,
    breadcrumbs: Vec<Breadcrumb>,
    content: &str,
) -> String {
    let nav_items = vec![
        NavItem { label: "Hub".to_string(), href: "/".to_string(), key: "hub".to_string() },
        NavItem { label: "Ajustes".to_string(), href: "/settings".to_string(), key: "settings".to_string() },
    ];

    let env = template_env();
    let context = context! {
        title => title,
        active => active,
        body_class => theme.body_class(),
        nav_items => nav_items,
        breadcrumbs => breadcrumbs,
        content => content,
    };

    env.get_template("layouts/base.html")
        .and_then(|template| template.render(context))
        .unwrap_or_else(|err| format!("Template error: {err}"))
}

pub fn template_env() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir()));
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::Html);
        env
    })
}

fn templates_dir() -> String {
    std::env::var("TUNNELHUB_TEMPLATES_DIR").unwrap_or_else(|_| {
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("templates")
            .to_string_lossy()
            .to_string()
    })
}
