//! Small text helpers shared by the render and filter layers.

/// Escape a string for safe interpolation into an HTML fragment.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Shorten a long opaque identifier with a middle ellipsis, keeping both
/// ends recognizable. Identifiers at or under `max` chars pass through.
pub fn truncate_id(id: &str, max: usize) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= max || max < 5 {
        return id.to_string();
    }
    let keep = max - 1;
    let head = keep / 2;
    let tail = keep - head;
    let mut out: String = chars[..head].iter().collect();
    out.push('…');
    out.extend(&chars[chars.len() - tail..]);
    out
}

/// The server's `filter_counts` key for a term list: joined by `,`, then
/// lowercased. Must byte-match the backend's normalization or lookups
/// silently read zero.
pub fn terms_key(terms: &[String]) -> String {
    terms.join(",").to_lowercase()
}
