//! Splitting of request URLs into host and path.
//!
//! # Design
//! No validation happens here. The scheme is dropped, the authority becomes
//! the host, and everything from the first `/` on (query included) becomes
//! the path. Whatever the transport cannot make sense of surfaces later as a
//! transport error.

/// Host and path of a request URL. The scheme is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    pub host: String,
    /// Always starts with `/`.
    pub path: String,
}

impl RequestUrl {
    pub fn decompose(url: &str) -> Self {
        let rest = match url.find("://") {
            Some(pos) => &url[pos + 3..],
            None => url,
        };
        match rest.find('/') {
            Some(pos) => Self {
                host: rest[..pos].to_string(),
                path: rest[pos..].to_string(),
            },
            None => Self {
                host: rest.to_string(),
                path: "/".to_string(),
            },
        }
    }
}

/// Shorthand for [`RequestUrl::decompose`].
pub fn decompose(url: &str) -> RequestUrl {
    RequestUrl::decompose(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_host_and_path() {
        let url = decompose("https://host/a/b");
        assert_eq!(url.host, "host");
        assert_eq!(url.path, "/a/b");
    }

    #[test]
    fn bare_host_gets_root_path() {
        let url = decompose("host");
        assert_eq!(url.host, "host");
        assert_eq!(url.path, "/");
    }

    #[test]
    fn scheme_without_path_gets_root_path() {
        let url = decompose("scheme://host");
        assert_eq!(url.host, "host");
        assert_eq!(url.path, "/");
    }

    #[test]
    fn query_stays_in_path() {
        let url = decompose("http://example.com:8080/search?q=a/b&x=1");
        assert_eq!(url.host, "example.com:8080");
        assert_eq!(url.path, "/search?q=a/b&x=1");
    }

    #[test]
    fn only_first_scheme_separator_is_stripped() {
        let url = decompose("http://proxy/http://inner/x");
        assert_eq!(url.host, "proxy");
        assert_eq!(url.path, "/http://inner/x");
    }

    #[test]
    fn empty_input() {
        let url = decompose("");
        assert_eq!(url.host, "");
        assert_eq!(url.path, "/");
    }

    #[test]
    fn trailing_slash_is_kept() {
        let url = decompose("http://host/");
        assert_eq!(url.host, "host");
        assert_eq!(url.path, "/");
    }
}
