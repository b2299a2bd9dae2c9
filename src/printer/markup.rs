//! Small HTML markup helpers shared by the document printer

/// Wrap content in a single table-cell fragment
///
/// Repeating the output of `cell("")` N times yields N empty cells.
pub fn cell(content: &str) -> String {
    format!("<td>{}</td>", content)
}

/// HTML-escape text for safe embedding in the document
///
/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
