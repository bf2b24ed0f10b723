//! Response body decoding
//!
//! The charset comes from the `Content-Type` header when present, otherwise
//! from a `<meta charset>` / `http-equiv` declaration near the top of the
//! document. UTF-8 is the last resort.

use encoding_rs::{Encoding, UTF_8};

/// How far into the body a meta declaration is searched for
const META_SNIFF_BYTES: usize = 1024;

/// `charset` parameter of a `Content-Type` value
pub(super) fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Charset named by a `<meta>` tag in the head of `body`
pub(super) fn charset_from_meta(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let mut rest = head.as_str();
    while let Some(idx) = rest.find("<meta") {
        rest = &rest[idx + 5..];
        let tag = &rest[..rest.find('>').unwrap_or(rest.len())];
        if let Some(pos) = tag.find("charset=") {
            let value = tag[pos + 8..].trim_start_matches(['"', '\'', ' ']);
            let label: String = value
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
                .collect();
            if !label.is_empty() {
                return Some(label);
            }
        }
    }
    None
}

/// Decode `body`, preferring `header_charset`, then a meta declaration.
///
/// A byte-order mark overrides both.
pub(super) fn decode_body(body: &[u8], header_charset: Option<&str>) -> String {
    let encoding = header_charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| charset_from_meta(body).and_then(|l| Encoding::for_label(l.as_bytes())))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}
