//! Text neutralization helpers for markup built from server data.
//!
//! Every free-text field that ends up inside card HTML goes through
//! `html_escape` (or `escape_multiline`) before any formatting is
//! applied. The escape must run before line-break conversion.

/// Escape characters that are significant in HTML content or attributes.
/// Total: always returns a string, empty in means empty out.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a multi-line value, then turn line breaks into `<br>` tags.
/// The escape runs first so the inserted tags are the only live markup.
pub fn escape_multiline(s: &str) -> String {
    html_escape(s).replace('\n', "<br>")
}

/// RFC 3986 percent-encoding, unreserved set left intact.
/// Used for download-path filename segments and query values.
pub fn percent_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", b));
            }
        }
    }
    result
}

/// Encode a whole URI for interpolation into an href: reserved
/// characters, the unreserved set and `%` pass through, everything
/// else (spaces, control bytes, non-ASCII) is percent-encoded. An
/// already-encoded URL comes back unchanged. No further validation is
/// done here.
pub fn encode_uri(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => result.push(b as char),
            b'-' | b'_' | b'.' | b'~' | b'!' | b'*' | b'\'' | b'(' | b')' | b';' | b',' | b'/'
            | b'?' | b':' | b'@' | b'&' | b'=' | b'+' | b'$' | b'#' | b'%' => result.push(b as char),
            _ => result.push_str(&format!("%{:02X}", b)),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(
            html_escape(r#"<script>alert("x")</script> & co"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; co"
        );
    }

    #[test]
    fn test_escape_empty_is_empty() {
        assert_eq!(html_escape(""), "");
    }

    #[test]
    fn test_multiline_escapes_before_breaking() {
        // A literal "<br>" in the input must stay escaped; only the
        // newline becomes a real tag.
        assert_eq!(
            escape_multiline("a<br>b\nc"),
            "a&lt;br&gt;b<br>c"
        );
    }

    #[test]
    fn test_percent_encode_unreserved_untouched() {
        assert_eq!(percent_encode("report-v1.2_final~draft"), "report-v1.2_final~draft");
    }

    #[test]
    fn test_percent_encode_specials() {
        assert_eq!(percent_encode("my file (2).pdf"), "my%20file%20%282%29.pdf");
        assert_eq!(percent_encode("a/b?c=d"), "a%2Fb%3Fc%3Dd");
    }

    #[test]
    fn test_encode_uri_keeps_structure() {
        assert_eq!(
            encode_uri("https://example.com/path?x=1&y=two words"),
            "https://example.com/path?x=1&y=two%20words"
        );
    }

    #[test]
    fn test_encode_uri_preserves_existing_escapes() {
        assert_eq!(
            encode_uri("https://example.com/a%20b"),
            "https://example.com/a%20b"
        );
    }
}
