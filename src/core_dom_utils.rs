use super::*;

impl Element {
    pub(crate) fn class_names(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .map(String::as_str)
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub(crate) fn has_class_name(&self, class_name: &str) -> bool {
        self.class_names().any(|name| name == class_name)
    }

    /// Rewrites the `class` attribute; an empty list removes it.
    pub(crate) fn set_class_names(&mut self, names: &[String]) {
        if names.is_empty() {
            self.attrs.remove("class");
        } else {
            self.attrs.insert("class".into(), names.join(" "));
        }
    }
}

/// Escapes `&`, `<` and `>`, and also `"` when `in_attribute` is set.
pub(crate) fn escape_markup(value: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Characters removed by `String.prototype.trim`: Unicode `White_Space`
/// except NEL, plus the byte order mark.
fn is_trim_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{0085}') || ch == '\u{FEFF}'
}

pub(crate) fn trim_page_whitespace(value: &str) -> &str {
    value.trim_matches(is_trim_whitespace)
}

/// Keeps the first `max_chars` characters, marking a cut with `...`.
pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}
