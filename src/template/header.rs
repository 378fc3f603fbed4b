//! Header media URL validation

use url::Url;

/// Returns true when the trimmed value is an absolute `https` URL.
#[must_use]
pub fn is_valid_https_url(value: &str) -> bool {
    Url::parse(value.trim()).is_ok_and(|url| url.scheme() == "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url_accepted() {
        assert!(is_valid_https_url("https://example.com/x"));
        assert!(is_valid_https_url("  https://cdn.example.com/a.png?x=1  "));
    }

    #[test]
    fn test_http_url_rejected() {
        assert!(!is_valid_https_url("http://example.com"));
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(!is_valid_https_url("ftp://example.com/file.pdf"));
        assert!(!is_valid_https_url("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(!is_valid_https_url("not a url"));
        assert!(!is_valid_https_url(""));
        assert!(!is_valid_https_url("   "));
        assert!(!is_valid_https_url("/relative/path.png"));
    }
}
