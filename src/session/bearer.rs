//! Bearer token extraction

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of an `Authorization` header value.
///
/// The `Bearer ` prefix is matched exactly (case and single space).
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix(BEARER_PREFIX).map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc123")), Some("abc123"));
        assert_eq!(extract_bearer_token(Some("Bearer   abc  ")), Some("abc"));
        assert_eq!(extract_bearer_token(Some("Bearer ")), Some(""));
        assert_eq!(extract_bearer_token(Some("bearer abc")), None);
        assert_eq!(extract_bearer_token(Some("Basic dXNlcg==")), None);
        assert_eq!(extract_bearer_token(None), None);
    }
}
