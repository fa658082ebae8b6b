//! Markup cleanup for KanjiVG-style SVG files.
//!
//! The files start with an XML declaration, a licence comment and a DOCTYPE whose internal subset
//! declares the `kvg:` attributes. Inlined as-is, those leak into the page as stray text (the
//! classic visible `]>`), so they are stripped before the document is parsed or displayed.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Namespace URI of KanjiVG's `kvg:` attributes.
pub const KVG_NAMESPACE: &str = "http://kanjivg.tagaini.net";

static XML_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\?xml[\s\S]*?\?>").expect("valid xml declaration regex"));
// The bracketed alternative must come first; otherwise `[^>]*>` stops at the first `>` inside the
// internal subset and leaves `]>` behind.
static DOCTYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!DOCTYPE[^\[>]*\[[\s\S]*?\]\s*>|<!DOCTYPE[^>]*>").expect("valid doctype regex")
});
static LEADING_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:<!--[\s\S]*?-->\s*)+").expect("valid comment regex"));
static SVG_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<svg\b[^>]*>").expect("valid svg tag regex"));

/// Strip the XML prolog, the DOCTYPE (with or without internal subset) and any leading comments.
///
/// Also declares the `kvg:` namespace on the root element when the prefix is used but was only
/// declared inside the removed DOCTYPE. Idempotent, and never fails: markup without a prolog or
/// DOCTYPE passes through unchanged apart from leading whitespace.
pub fn sanitize_svg_markup(raw: &str) -> String {
    let s = XML_DECL.replace(raw, "");
    let s = DOCTYPE.replace(&s, "").into_owned();
    let s = LEADING_COMMENTS.replace(&s, "").into_owned();
    declare_kvg_namespace(s.trim_start()).into_owned()
}

fn declare_kvg_namespace(markup: &str) -> Cow<'_, str> {
    if !markup.contains("kvg:") {
        return Cow::Borrowed(markup);
    }
    let Some(open) = SVG_OPEN.find(markup) else {
        return Cow::Borrowed(markup);
    };
    if open.as_str().contains("xmlns:kvg") {
        return Cow::Borrowed(markup);
    }

    let insert_at = open.start() + "<svg".len();
    let mut out = String::with_capacity(markup.len() + KVG_NAMESPACE.len() + 16);
    out.push_str(&markup[..insert_at]);
    out.push_str(" xmlns:kvg=\"");
    out.push_str(KVG_NAMESPACE);
    out.push('"');
    out.push_str(&markup[insert_at..]);
    Cow::Owned(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sanitize.rs"]
mod tests;
