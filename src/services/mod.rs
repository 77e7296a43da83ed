/// Splits the túneles textarea into candidate URLs. Lines and commas both
/// separate entries; blanks are dropped, order is preserved.
pub fn parse_tunnel_input(input: &str) -> Vec<String> {
    input
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the target only when it is an absolute http(s) URL. Anything else
/// renders as a disabled link instead of a clickable one.
pub fn safe_link(href: Option<&str>) -> Option<&str> {
    let href = href?;
    let re = regex::Regex::new(r"(?i)^https?://").ok()?;
    if re.is_match(href) {
        Some(href)
    } else {
        None
    }
}

pub fn format_checked_at(seconds: i64) -> String {
    let format = match time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
    {
        Ok(format) => format,
        Err(_) => return "n/a".to_string(),
    };
    time::OffsetDateTime::from_unix_timestamp(seconds)
        .ok()
        .and_then(|timestamp| timestamp.format(&format).ok())
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn current_datetime() -> String {
    let format = match time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
    {
        Ok(format) => format,
        Err(_) => return "n/a".to_string(),
    };
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    now.format(&format).unwrap_or_else(|_| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tunnel_input_splits_on_lines_and_commas() {
        let input = "https://a.trycloudflare.com\nhttps://b.trycloudflare.com, https://c.trycloudflare.com\n\n  ";
        assert_eq!(
            parse_tunnel_input(input),
            vec![
                "https://a.trycloudflare.com",
                "https://b.trycloudflare.com",
                "https://c.trycloudflare.com",
            ]
        );
    }

    #[test]
    fn tunnel_input_preserves_order() {
        let input = "https://z.example.com\nhttps://a.example.com";
        assert_eq!(
            parse_tunnel_input(input),
            vec!["https://z.example.com", "https://a.example.com"]
        );
    }

    #[test]
    fn safe_link_accepts_only_absolute_http() {
        assert_eq!(
            safe_link(Some("https://demo.trycloudflare.com")),
            Some("https://demo.trycloudflare.com")
        );
        assert_eq!(safe_link(Some("HTTP://UPPER.example")), Some("HTTP://UPPER.example"));
        assert_eq!(safe_link(Some("ftp://files.example")), None);
        assert_eq!(safe_link(Some("javascript:alert(1)")), None);
        assert_eq!(safe_link(Some("/relative/path")), None);
        assert_eq!(safe_link(None), None);
    }

    #[test]
    fn checked_at_formats_epoch_seconds() {
        assert_eq!(format_checked_at(1_700_000_000), "2023-11-14 22:13:20");
    }
}
