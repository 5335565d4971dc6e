//! Content field validation
//!
//! Titles, comments and URLs submitted with sources and posts. Sanitizing only
//! trims and truncates; escaping for storage or rendering happens downstream.

use url::{ParseError, Url};

use crate::error::ValidationError;
use crate::validate::results::{FieldKind, ValidatedField};

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MIN_TITLE_LENGTH: usize = 3;
pub const MAX_COMMENT_LENGTH: usize = 5000;
pub const MIN_COMMENT_LENGTH: usize = 10;
pub const MAX_URL_LENGTH: usize = 2048;

/// Trim, then hard-truncate to at most `max_len` characters
pub fn sanitize(text: &str, max_len: usize) -> String {
    text.trim().chars().take(max_len).collect()
}

/// Required title, returned sanitized.
/// The minimum length is checked after truncation.
pub fn validate_title(title: Option<&str>) -> Result<ValidatedField, ValidationError> {
    validate_text(
        FieldKind::Title,
        title,
        MIN_TITLE_LENGTH,
        MAX_TITLE_LENGTH,
    )
}

/// Required comment, returned sanitized.
/// The minimum length is checked after truncation.
pub fn validate_comment(comment: Option<&str>) -> Result<ValidatedField, ValidationError> {
    validate_text(
        FieldKind::Comment,
        comment,
        MIN_COMMENT_LENGTH,
        MAX_COMMENT_LENGTH,
    )
}

/// Optional title attached to a new source: sanitized when present, no minimum
pub fn sanitize_optional_title(title: Option<&str>) -> Option<ValidatedField> {
    title.map(|t| ValidatedField::new(FieldKind::Title, sanitize(t, MAX_TITLE_LENGTH)))
}

/// Required absolute `http`/`https` URL of at most 2048 characters
pub fn validate_url(url: Option<&str>) -> Result<ValidatedField, ValidationError> {
    let url = match url {
        Some(u) if !u.trim().is_empty() => u,
        _ => return Err(ValidationError::Required(FieldKind::Url)),
    };

    if url.chars().count() > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong(FieldKind::Url));
    }

    // The parser would quietly percent-encode or strip these; reject them.
    if url.chars().any(is_forbidden_in_uri) || !has_valid_percent_escapes(url) {
        return Err(ValidationError::InvalidFormat(FieldKind::Url));
    }

    match Url::parse(url) {
        // Scheme is normalised to lower case by the parser.
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            Ok(ValidatedField::new(FieldKind::Url, url))
        }
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => Err(ValidationError::UnsupportedScheme),
        Err(_) => Err(ValidationError::InvalidFormat(FieldKind::Url)),
    }
}

/// Whitespace, controls and the ASCII characters RFC 3986 never allows
fn is_forbidden_in_uri(c: char) -> bool {
    c.is_whitespace() || c.is_control() || "<>\"{}|\\^`".contains(c)
}

/// Every `%` must start a two-hex-digit escape
fn has_valid_percent_escapes(url: &str) -> bool {
    let bytes = url.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit))
    })
}

fn validate_text(
    kind: FieldKind,
    text: Option<&str>,
    min_len: usize,
    max_len: usize,
) -> Result<ValidatedField, ValidationError> {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(ValidationError::Required(kind)),
    };

    let sanitized = sanitize(text, max_len);
    if sanitized.chars().count() < min_len {
        return Err(ValidationError::TooShort {
            field: kind,
            min: min_len,
        });
    }
    Ok(ValidatedField::new(kind, sanitized))
}
