//! Text transforms applied to titles and body content.
//!
//! - `smartify()` - typographic quotes, dashes and ellipses
//! - `strip_html()` - plain text from an HTML fragment
//! - `capitalize_words()` - first-letter capitalization per word
//! - `normalize_whitespace()` - collapse whitespace runs

use std::borrow::Cow;

// =============================================================================
// Smart Punctuation
// =============================================================================

/// Replace straight quotes, dash runs and `...` with typographic forms.
///
/// Text inside `<...>` tags is copied through untouched so the transform
/// can run before `strip_html()`.
///
/// # Example
/// ```ignore
/// assert_eq!(smartify(r#""Hello" -- it's here..."#), "\u{201C}Hello\u{201D} \u{2013} it\u{2019}s here\u{2026}");
/// assert_eq!(smartify("plain title"), "plain title"); // No allocation
/// ```
pub fn smartify(s: &str) -> Cow<'_, str> {
    if !s.contains(['"', '\'', '-', '.']) {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + 8);
    let mut i = 0;
    let mut prev: Option<char> = None;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => {
                // Copy a tag verbatim; quote context carries across it
                if let Some(end) = s[i..].find('>') {
                    result.push_str(&s[i..=i + end]);
                    i += end + 1;
                } else {
                    result.push('<');
                    prev = Some('<');
                    i += 1;
                }
            }
            b'-' => {
                let (c, len) = if s[i..].starts_with("---") {
                    ('\u{2014}', 3)
                } else if s[i..].starts_with("--") {
                    ('\u{2013}', 2)
                } else {
                    ('-', 1)
                };
                result.push(c);
                prev = Some(c);
                i += len;
            }
            b'.' => {
                if s[i..].starts_with("...") {
                    result.push('\u{2026}');
                    prev = Some('\u{2026}');
                    i += 3;
                } else {
                    result.push('.');
                    prev = Some('.');
                    i += 1;
                }
            }
            b'"' => {
                let c = if opens_quote(prev) {
                    '\u{201C}'
                } else {
                    '\u{201D}'
                };
                result.push(c);
                prev = Some(c);
                i += 1;
            }
            b'\'' => {
                let c = if opens_quote(prev) {
                    '\u{2018}'
                } else {
                    '\u{2019}'
                };
                result.push(c);
                prev = Some(c);
                i += 1;
            }
            _ => {
                let c = s[i..].chars().next().unwrap_or('\0');
                result.push(c);
                prev = Some(c);
                i += c.len_utf8();
            }
        }
    }

    Cow::Owned(result)
}

/// A quote opens after start-of-text, whitespace, an open bracket,
/// another opening quote, or a dash.
#[inline]
fn opens_quote(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => {
            c.is_whitespace()
                || matches!(
                    c,
                    '(' | '[' | '{' | '\u{201C}' | '\u{2018}' | '\u{2013}' | '\u{2014}'
                )
        }
    }
}

// =============================================================================
// HTML Stripping
// =============================================================================

/// Extract the plain text content of an HTML fragment.
///
/// Tags are dropped, `script`/`style` blocks and comments are removed
/// entirely. If the fragment does not parse, it is returned as-is.
pub fn strip_html(input: &str) -> String {
    if !input.contains('<') {
        return input.to_string();
    }

    let Ok(dom) = tl::parse(input, tl::ParserOptions::default()) else {
        return input.to_string();
    };

    let parser = dom.parser();
    let mut text = String::with_capacity(input.len());
    for handle in dom.children() {
        collect_text(*handle, parser, &mut text);
    }
    text
}

fn collect_text(handle: tl::NodeHandle, parser: &tl::Parser, out: &mut String) {
    let Some(node) = handle.get(parser) else {
        return;
    };

    match node {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str();
            if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
                return;
            }
            for child in tag.children().top().iter() {
                collect_text(*child, parser, out);
            }
        }
        tl::Node::Raw(bytes) => out.push_str(&bytes.as_utf8_str()),
        tl::Node::Comment(_) => {}
    }
}

// =============================================================================
// Casing and Whitespace
// =============================================================================

/// Uppercase the first letter of each word, lowercase the rest.
///
/// Words are delimited by spaces, hyphens and underscores; the
/// delimiters themselves are preserved.
///
/// # Example
/// ```ignore
/// assert_eq!(capitalize_words("release-notes"), "Release-Notes");
/// ```
pub fn capitalize_words(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut word_start = true;

    for c in s.chars() {
        if matches!(c, ' ' | '-' | '_') {
            result.push(c);
            word_start = true;
        } else if word_start {
            result.extend(c.to_uppercase());
            word_start = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }

    result
}

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !result.is_empty() {
                result.push(' ');
            }
            pending_space = false;
            result.push(c);
        }
    }

    result
}

// =============================================================================
// Tests
// =============================================================================
