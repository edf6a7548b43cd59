//! Hand-off to an external link-shortening service.
//!
//! The shortener is never called directly; the generated link is passed
//! to its creation page as a query parameter and the user finishes there.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except what `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use as a single query component.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// URL of the shortener's creation page with `link` pre-filled.
pub fn shortener_handoff_url(service_url: &str, link: &str) -> String {
    let separator = if service_url.contains('?') { '&' } else { '?' };
    format!("{service_url}{separator}url={}", encode_uri_component(link))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_reserved_characters() {
        assert_eq!(
            encode_uri_component("https://a.example/s.html?url=ab+c$d"),
            "https%3A%2F%2Fa.example%2Fs.html%3Furl%3Dab%2Bc%24d"
        );
    }

    #[test]
    fn test_leaves_unreserved_marks() {
        assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
        assert_eq!(encode_uri_component("a b"), "a%20b");
    }

    #[test]
    fn test_handoff_url() {
        assert_eq!(
            shortener_handoff_url("https://tinyurl.com/create.php", "https://x.example/?u=1"),
            "https://tinyurl.com/create.php?url=https%3A%2F%2Fx.example%2F%3Fu%3D1"
        );
        assert_eq!(
            shortener_handoff_url("https://short.example/new?lang=en", "https://x.example/"),
            "https://short.example/new?lang=en&url=https%3A%2F%2Fx.example%2F"
        );
    }
}
