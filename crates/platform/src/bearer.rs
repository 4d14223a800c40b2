//! Bearer Token Extraction
//!
//! Pulls the credential out of an `Authorization: Bearer <token>` header.

use http::{HeaderMap, header};

/// Extract a bearer token from request headers
///
/// Returns `None` for a missing header, a non-Bearer scheme, or an empty
/// token. The scheme comparison is case-insensitive per RFC 9110.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extracts_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let headers = headers_with("bearer abc");
        assert_eq!(extract_bearer(&headers), Some("abc"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer(&headers), None);
    }

    #[test]
    fn test_rejects_missing_or_empty() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer")), None);
    }
}
