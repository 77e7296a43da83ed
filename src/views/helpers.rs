pub fn hidden_field(name: &str, value: &str) -> String {
    format!(
        r#"<input type="hidden" name="{name}" value="{value}">"#,
        name = html_escape::encode_double_quoted_attribute(name),
        value = html_escape::encode_double_quoted_attribute(value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_attribute_values() {
        let html = hidden_field("action", r#"retry" onload="x"#);
        assert!(html.contains("&quot;"));
        assert!(!html.contains(r#"onload="x"#));
    }
}
