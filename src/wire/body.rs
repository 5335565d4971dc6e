//! Request body reading
//!
//! Enforces the configured size limit before any decoding happens.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{CoreError, WireError};

/// Accept an already-buffered body if it fits within `max_body_bytes`.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_body(bytes: &[u8], max_body_bytes: usize) -> Result<String, WireError> {
    if bytes.len() > max_body_bytes {
        return Err(WireError::BodyTooLarge {
            limit: max_body_bytes,
        });
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Read a body from a stream, never buffering more than one byte past the limit
pub async fn read_body_from<R>(reader: R, max_body_bytes: usize) -> Result<String, CoreError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let limit = u64::try_from(max_body_bytes)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    reader.take(limit).read_to_end(&mut buf).await?;
    Ok(read_body(&buf, max_body_bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_within_limit() {
        assert_eq!(read_body(b"{\"a\":\"b\"}", 16).unwrap(), "{\"a\":\"b\"}");
        assert_eq!(read_body(b"", 0).unwrap(), "");
    }

    #[test]
    fn test_body_over_limit() {
        let err = read_body(&[b'x'; 11], 10).unwrap_err();
        assert_eq!(err, WireError::BodyTooLarge { limit: 10 });
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let body = read_body(&[b'a', 0xff, b'b'], 8).unwrap();
        assert_eq!(body, "a\u{fffd}b");
    }

    #[tokio::test]
    async fn test_stream_limit() {
        let ok = read_body_from(&b"0123456789"[..], 10).await.unwrap();
        assert_eq!(ok, "0123456789");

        let err = read_body_from(&b"0123456789A"[..], 10).await.unwrap_err();
        assert_eq!(err, CoreError::Wire(WireError::BodyTooLarge { limit: 10 }));
    }
}
