// quickmagick/src/command/escape.rs

/// Quotes `raw` for the shell unless it is made only of word characters and
/// dots. Embedded double quotes are not escaped.
pub fn escape(raw: &str) -> String {
    if !raw.is_empty() && raw.chars().all(is_plain) {
        raw.to_string()
    } else {
        format!("\"{}\"", raw)
    }
}

fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
