//! Escaping for HTML and XML output.
//!
//! Text content takes a `memchr` fast path: input without any escapable
//! byte is copied in one go. Attribute values (class names) are short and
//! rare, so they go through `html-escape`.

use memchr::{memchr, memchr3};

/// Bytes that must be escaped in element content.
const TEXT_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table
};

/// Escape element content into an output buffer.
///
/// # Example
/// ```
/// use deflist::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, b"a < b");
/// assert_eq!(out, b"a &lt; b");
/// ```
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    let Some(mut pos) = first_text_escape(input) else {
        out.extend_from_slice(input);
        return;
    };
    out.extend_from_slice(&input[..pos]);

    while pos < input.len() {
        let run_start = pos;
        while pos < input.len() && !TEXT_ESCAPE_TABLE[input[pos] as usize] {
            pos += 1;
        }
        out.extend_from_slice(&input[run_start..pos]);

        if let Some(&b) = input.get(pos) {
            out.extend_from_slice(match b {
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                b'&' => b"&amp;",
                _ => b"&quot;",
            });
            pos += 1;
        }
    }
}

/// Escape a double-quoted attribute value into an output buffer.
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, value: &str) {
    out.extend_from_slice(html_escape::encode_double_quoted_attribute(value).as_bytes());
}

#[inline]
fn first_text_escape(input: &[u8]) -> Option<usize> {
    let markup = memchr3(b'<', b'>', b'&', input);
    let quote = memchr(b'"', input);
    match (markup, quote) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
