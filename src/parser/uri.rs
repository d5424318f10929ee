//! Data URI decoding for inline buffers and images.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;

use crate::error::{ExtractError, Result};

/// Check whether a URI carries its payload inline.
pub fn is_data_uri(uri: &str) -> bool {
    uri.starts_with("data:")
}

/// Decode a base64 `data:` URI.
///
/// Any other URI points at an external resource, which is reported as
/// unsupported rather than fetched.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    if !is_data_uri(uri) {
        return Err(ExtractError::UnsupportedReference {
            uri: uri.to_string(),
        });
    }

    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| ExtractError::InvalidDataUri {
            message: "missing ',' separator".to_string(),
        })?;

    if !header.ends_with(";base64") {
        return Err(ExtractError::InvalidDataUri {
            message: format!("unsupported encoding in '{}'", header),
        });
    }

    BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| ExtractError::InvalidDataUri {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_decode_octet_stream() {
        let bytes = decode_data_uri("data:application/octet-stream;base64,AQID").unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_image_uri() {
        let bytes = decode_data_uri("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_external_uri_unsupported() {
        let err = decode_data_uri("textures/wood.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedReference);
        let err = decode_data_uri("https://example.com/a.bin").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedReference);
    }

    #[test]
    fn test_missing_separator() {
        let err = decode_data_uri("data:image/png;base64").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_not_base64_encoded() {
        let err = decode_data_uri("data:text/plain,hello").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode_data_uri("data:application/octet-stream;base64,@@@@").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
