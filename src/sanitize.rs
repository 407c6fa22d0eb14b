//! Sanitization of administrator-authored markup and URLs.
//!
//! Every string that ends up inside `PreEscaped` goes through
//! [`sanitize_html`] first. The transform only removes things, it never
//! rejects input:
//!
//! - `<script>` blocks are dropped together with their content (non-greedy,
//!   across lines). Stray opening or closing script tags are dropped too.
//! - Inside every tag, attributes whose name starts with `on` are dropped,
//!   whatever their quoting and whether or not whitespace precedes them.
//!   Text between tags is never touched.
//!
//! Removal can glue fragments into a new tag (`<scr<script>ipt>`), so the
//! passes repeat until the output stops changing. Markup that is still
//! changing after [`MAX_PASSES`] is escaped wholesale.
//!
//! URL checks reject schemes that execute in the page
//! (`javascript:`, `vbscript:`, `data:text/html`).

use log::warn;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));

static SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?script\b[^>]*>?").expect("valid regex"));

/// Opening or closing tag: slash, name, raw attribute text, terminator.
/// The terminator is optional so a tag cut off by `<` or end of input still
/// gets its attributes checked.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:"[^"]*"|'[^']*'|[^<>])*)(>?)"#)
        .expect("valid regex")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*))?"#).expect("valid regex")
});

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9-]*(?:\s[^<>]*)?/?>").expect("valid regex"));

const DANGEROUS_ATTR_PREFIXES: [&str; 1] = ["on"];

const DANGEROUS_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:text/html"];

pub const MAX_PASSES: usize = 8;

/// Strip scripts and inline event handlers from `html`.
pub fn sanitize_html(html: &str) -> String {
    let mut current = html.to_string();
    for _ in 0..MAX_PASSES {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
    warn!("markup still changing after {MAX_PASSES} sanitizer passes, escaping it");
    current
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn strip_once(html: &str) -> String {
    let without_blocks = SCRIPT_BLOCK.replace_all(html, "");
    TAG.replace_all(&without_blocks, |caps: &Captures| clean_tag(caps))
        .into_owned()
}

fn clean_tag(caps: &Captures) -> String {
    let name = &caps[2];
    if name.eq_ignore_ascii_case("script") {
        return String::new();
    }
    let raw_attrs = &caps[3];
    let mut kept = Vec::new();
    let mut dropped = false;
    for attr in ATTRIBUTE.find_iter(raw_attrs).map(|m| m.as_str()) {
        if is_dangerous_attribute(attr) {
            dropped = true;
        } else {
            kept.push(attr);
        }
    }
    if !dropped {
        return caps[0].to_string();
    }

    let mut tag = format!("<{}{name}", &caps[1]);
    for attr in kept {
        tag.push(' ');
        tag.push_str(attr);
    }
    if raw_attrs.trim_end().ends_with('/') {
        tag.push_str(" /");
    }
    tag.push_str(&caps[4]);
    tag
}

fn is_dangerous_attribute(attr: &str) -> bool {
    let name = attr
        .split_once('=')
        .map_or(attr, |(name, _)| name)
        .trim()
        .to_ascii_lowercase();
    DANGEROUS_ATTR_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
        || SCRIPT_TAG.is_match(attr)
}

/// Whether `text` contains something shaped like an HTML tag.
pub fn looks_like_html(text: &str) -> bool {
    HTML_TAG.is_match(text)
}

/// Whether `href` is safe to put in an `href`/`src` attribute.
///
/// Relative URLs, hash targets and ordinary schemes pass. Control characters
/// and whitespace are ignored when detecting the scheme, as browsers do.
pub fn is_safe_url(href: &str) -> bool {
    let compact: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect();
    !DANGEROUS_SCHEMES
        .iter()
        .any(|scheme| compact.starts_with(scheme))
}

/// Whether a media URL should be treated as a PDF document.
///
/// Explicit MIME type wins; otherwise the path, query or fragment ending in
/// `.pdf` counts.
pub fn is_pdf(src: &str, mime: Option<&str>) -> bool {
    if let Some(mime) = mime.map(str::trim).filter(|m| !m.is_empty()) {
        return mime.eq_ignore_ascii_case("application/pdf");
    }
    let lower = src.to_ascii_lowercase();
    let (before_fragment, fragment) = lower.split_once('#').unwrap_or((lower.as_str(), ""));
    let (path, query) = before_fragment.split_once('?').unwrap_or((before_fragment, ""));
    [path, query, fragment].iter().any(|part| part.ends_with(".pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_block_and_keeps_markup() {
        let input = "<p>Hi <b>there</b></p><script>alert('x')</script><em>ok</em>";
        let out = sanitize_html(input);
        assert_eq!(out, "<p>Hi <b>there</b></p><em>ok</em>");
    }

    #[test]
    fn strips_multiline_script_non_greedy() {
        let input = "<script type=\"text/javascript\">\nlet a = 1;\n</script><p>keep</p><SCRIPT>\nb()\n</SCRIPT >";
        let out = sanitize_html(input);
        assert!(!out.to_lowercase().contains("<script"));
        assert!(out.contains("<p>keep</p>"));
    }

    #[test]
    fn strips_unterminated_script_tag() {
        let out = sanitize_html("<p>a</p><script src=x.js>");
        assert!(!out.contains("<script"));
        assert!(out.contains("<p>a</p>"));
    }

    #[test]
    fn strips_event_handlers_in_every_quoting_style() {
        let input = r#"<img src="a.png" onerror="steal()"><a href="/" onclick='go()'>x</a><div onmouseover=run()>y</div>"#;
        let out = sanitize_html(input);
        let handler = Regex::new(r"(?i)on[a-z]+=").unwrap();
        assert!(!handler.is_match(&out), "handlers left in {out}");
        assert!(out.contains(r#"<img src="a.png">"#));
        assert!(out.contains(r#"<a href="/">x</a>"#));
        assert!(out.contains("<div>y</div>"));
    }

    #[test]
    fn handler_after_slash_is_stripped() {
        let out = sanitize_html("<svg/onload=alert(1)>");
        assert!(!out.contains("onload"));
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(sanitize_html("online = yes"), "online = yes");
    }

    #[test]
    fn handler_text_between_tags_is_untouched() {
        let input = "<p>we are online =yes</p>";
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn handler_glued_to_quoted_value_is_stripped() {
        let out = sanitize_html(r#"<img src="x"onerror="alert(1)">"#);
        assert_eq!(out, r#"<img src="x">"#);
    }

    #[test]
    fn self_closing_slash_survives_handler_removal() {
        let out = sanitize_html(r#"<img src="x" onload="y()" />"#);
        assert_eq!(out, r#"<img src="x" />"#);
    }

    #[test]
    fn script_glued_back_together_is_removed() {
        let out = sanitize_html("<scr<script>ipt>alert(1)</scr<script>ipt><p>ok</p>");
        assert!(!out.to_lowercase().contains("<script"), "script left in {out}");
        assert_eq!(out, "<p>ok</p>");
    }

    #[test]
    fn handler_split_inside_tag_name_is_removed() {
        let out = sanitize_html("<scr onx=''ipt>alert(1)</scr onx=''ipt>");
        let handler = Regex::new(r"(?i)on[a-z]+=").unwrap();
        assert!(!out.to_lowercase().contains("<script"), "script left in {out}");
        assert!(!handler.is_match(&out), "handlers left in {out}");
    }

    #[test]
    fn nested_gluing_converges() {
        let out = sanitize_html("<scr<scr<script>ipt>ipt>alert(1)</script>");
        assert!(!out.to_lowercase().contains("<script"), "script left in {out}");
    }

    #[test]
    fn detects_html_markup() {
        assert!(looks_like_html("Hello <strong>world</strong>"));
        assert!(looks_like_html("line<br/>break"));
        assert!(looks_like_html("<p class=\"x\">para</p>"));
        assert!(!looks_like_html("1 < 2 and 3 > 2"));
        assert!(!looks_like_html("مرحبا"));
    }

    #[test]
    fn rejects_script_schemes() {
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("  JavaScript:alert(1)"));
        assert!(!is_safe_url("java\tscript:alert(1)"));
        assert!(!is_safe_url("data:text/html;base64,xx"));
        assert!(!is_safe_url("vbscript:msgbox"));
    }

    #[test]
    fn accepts_ordinary_urls() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("#contact"));
        assert!(is_safe_url("/pages/about"));
        assert!(is_safe_url("mailto:hi@example.com"));
        assert!(is_safe_url("data:image/png;base64,xx"));
    }

    #[test]
    fn pdf_detection() {
        assert!(is_pdf("files/brochure.PDF", None));
        assert!(is_pdf("https://cdn/x?file=brochure.pdf", None));
        assert!(is_pdf("https://cdn/x#doc.pdf", None));
        assert!(is_pdf("https://cdn/brochure.pdf?v=2", None));
        assert!(is_pdf("https://cdn/blob", Some("application/pdf")));
        assert!(!is_pdf("https://cdn/photo.jpg", None));
        assert!(!is_pdf("brochure.pdf", Some("image/png")));
    }
}
