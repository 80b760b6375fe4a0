//! XML output helpers shared by the feed emitters.
//!
//! - `escape_xml()` - entity escaping for attribute values
//! - `normalize_xml()` - canonical whitespace (no trailing spaces, no
//!   blank lines, single trailing newline)
//! - `finalize_document()` - exactly one XML declaration plus the
//!   optional stylesheet instruction

use std::borrow::Cow;

/// The declaration every emitted feed document starts with.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

/// Canonicalize document whitespace.
///
/// Right-trims every line, drops blank lines and ends the document with
/// a single trailing newline. Line breaks themselves are kept so
/// multi-line escaped content stays multi-line.
pub fn normalize_xml(content: &str) -> String {
    let mut result = content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    result.push('\n');
    result
}

/// Assemble the final feed document.
///
/// Any declaration the serializer produced is replaced with the
/// canonical one, the stylesheet instruction is inserted when a
/// stylesheet is present, and whitespace is normalized.
pub fn finalize_document(xml: &str, stylesheet_href: Option<&str>) -> String {
    let body = strip_declaration(xml);

    let mut doc = String::with_capacity(body.len() + 128);
    doc.push_str(XML_DECLARATION);
    doc.push('\n');
    if let Some(href) = stylesheet_href {
        doc.push_str("<?xml-stylesheet type=\"text/xml\" href=\"");
        doc.push_str(&escape_xml(href));
        doc.push_str("\"?>\n");
    }
    doc.push_str(body);

    normalize_xml(&doc)
}

/// Drop a leading `<?xml version=...?>` declaration if present.
fn strip_declaration(xml: &str) -> &str {
    let trimmed = xml.trim_start();
    if trimmed.starts_with("<?xml version") {
        if let Some(end) = trimmed.find("?>") {
            return trimmed[end + 2..].trim_start();
        }
    }
    trimmed
}
