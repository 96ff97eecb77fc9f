use mailsift_core::text::escape_html;
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z][^>]*>").expect("static regex"));

// One pass over the plain-text body: inline-image placeholders first so
// their URLs are not re-matched as bare links.
static PLAIN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[image:\s*(?P<image>[^\]]+)\]|(?P<url>https?://[^\s<]+)").expect("static regex")
});

/// Whether a body should be treated as HTML rather than plain text. The
/// backend does not label bodies, so the presence of any element-looking
/// tag decides.
pub fn looks_like_html(body: &str) -> bool {
    TAG_RE.is_match(body)
}

/// Render an email body to a safe HTML fragment.
///
/// HTML bodies are sanitized with `ammonia` unless they carry `[image:`
/// placeholders, which only appear in extracted plain text; those take the
/// plain path so the placeholders become links instead of being eaten by
/// the sanitizer. Plain bodies are escaped and URLs are turned into
/// anchors.
pub fn render_body(body: &str) -> String {
    if looks_like_html(body) && !body.contains("[image:") {
        ammonia::clean(body)
    } else {
        linkify_plain(body)
    }
}

fn linkify_plain(body: &str) -> String {
    let escaped = escape_html(body);
    PLAIN_LINK_RE
        .replace_all(&escaped, |caps: &regex::Captures<'_>| {
            if let Some(image) = caps.name("image") {
                let url = image.as_str().trim();
                format!("<a href=\"{url}\" target=\"_blank\" rel=\"noopener\">[imagen]</a>")
            } else {
                let url = &caps["url"];
                format!("<a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{url}</a>")
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_escaped() {
        assert_eq!(render_body("2 < 3 & 4"), "2 &lt; 3 &amp; 4");
    }

    #[test]
    fn html_is_sanitized_not_escaped() {
        let out = render_body("<p onclick=\"x()\">hola <b>mundo</b></p><script>evil()</script>");
        assert!(out.contains("<b>mundo</b>"));
        assert!(!out.contains("script"));
        assert!(!out.contains("onclick"));
    }

    #[test]
    fn iframes_are_stripped() {
        let out = render_body("<div><iframe src=\"https://x.es\"></iframe>ok</div>");
        assert!(!out.contains("iframe"));
        assert!(out.contains("ok"));
    }

    #[test]
    fn bare_urls_become_anchors() {
        let out = render_body("ver https://example.es/f?a=1 ahora");
        assert_eq!(
            out,
            "ver <a href=\"https://example.es/f?a=1\" target=\"_blank\" rel=\"noopener\">https://example.es/f?a=1</a> ahora"
        );
    }

    #[test]
    fn image_placeholders_become_links_even_next_to_tags() {
        // The placeholder forces the plain-text path even though a tag is present.
        let out = render_body("<p>adjunto</p> [image: https://cdn.es/a.png]");
        assert!(out.contains("&lt;p&gt;adjunto&lt;/p&gt;"));
        assert!(out.contains("<a href=\"https://cdn.es/a.png\""));
        assert!(out.contains(">[imagen]</a>"));
    }

    #[test]
    fn placeholder_url_is_not_double_linked() {
        let out = render_body("[image: https://cdn.es/a.png]");
        assert_eq!(out.matches("<a ").count(), 1);
    }

    #[test]
    fn tag_detection() {
        assert!(looks_like_html("<p>hola</p>"));
        assert!(looks_like_html("texto <br> más"));
        assert!(!looks_like_html("a < b y b > c"));
        assert!(!looks_like_html("sin etiquetas"));
    }
}
