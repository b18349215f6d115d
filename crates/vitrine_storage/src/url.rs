//! URL shape helpers shared by the object store scanner and reference matching.

/// Host of an absolute http(s) URL, lower-cased, without port or userinfo.
///
/// ```
/// use vitrine_storage::url_host;
///
/// assert_eq!(url_host("https://Store.Example.com:443/a.png").as_deref(), Some("store.example.com"));
/// assert_eq!(url_host("/media/a.png"), None);
/// ```
pub fn url_host(url: &str) -> Option<String> {
    let rest = strip_scheme(url)?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit('@').next()?.split(':').next()?;
    if host.is_empty() {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

/// Path of an absolute http(s) URL without the leading slash, query, or fragment.
pub fn url_key(url: &str) -> Option<&str> {
    let rest = strip_scheme(url)?;
    let (_, path) = rest.split_once('/')?;
    path.split(['?', '#']).next()
}

/// `url` with any query string or fragment removed.
pub fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// Whether `host` is `domain` or one of its subdomains.
pub fn host_matches(host: &str, domain: &str) -> bool {
    !domain.is_empty() && (host == domain || host.ends_with(&format!(".{}", domain)))
}

/// Percent-encode one path segment for publishing.
///
/// ```
/// use vitrine_storage::{decode_segment, encode_segment};
///
/// assert_eq!(encode_segment("my photo.png"), "my%20photo.png");
/// assert_eq!(decode_segment("my%20photo.png"), "my photo.png");
/// ```
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Percent-decode one path segment. Malformed escapes leave it unchanged.
pub fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn strip_scheme(url: &str) -> Option<&str> {
    let lower = url.get(..8).map(str::to_ascii_lowercase).unwrap_or_default();
    if lower.starts_with("https://") {
        url.get(8..)
    } else if lower.starts_with("http://") {
        url.get(7..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_excludes_query_and_fragment() {
        assert_eq!(
            url_key("https://x.example.com/pages/a.png?download=1#top"),
            Some("pages/a.png")
        );
        assert_eq!(url_key("https://x.example.com"), None);
    }

    #[test]
    fn test_subdomains_match_but_lookalikes_do_not() {
        assert!(host_matches("abc.blob.example.com", "blob.example.com"));
        assert!(host_matches("blob.example.com", "blob.example.com"));
        assert!(!host_matches("evilblob.example.com", "blob.example.com"));
        assert!(!host_matches("blob.example.com", ""));
    }

    #[test]
    fn test_invalid_escape_decodes_to_itself() {
        assert_eq!(decode_segment("a%ZZ.png"), "a%ZZ.png");
        assert_eq!(decode_segment("%FF.png"), "%FF.png");
        assert_eq!(decode_segment("plain.png"), "plain.png");
    }
}
