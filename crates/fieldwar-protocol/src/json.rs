//! JSON encoding helpers shared by the transport and storage layers.
//!
//! Thin wrappers over `serde_json` that tag failures with the direction
//! they happened in ([`ProtocolError::Encode`] vs [`ProtocolError::Decode`]),
//! so a caller seeing a `ProtocolError` knows whether the request or the
//! response was malformed.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ProtocolError;

/// Serializes a value into a JSON byte buffer.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(value).map_err(ProtocolError::Encode)
}

/// Serializes a value into indented JSON, for files people may open.
pub fn encode_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec_pretty(value).map_err(ProtocolError::Encode)
}

/// Parses a JSON byte buffer into a value.
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, ProtocolError> {
    serde_json::from_slice(data).map_err(ProtocolError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mode, TokenResponse};

    #[test]
    fn test_decode_token_response() {
        let resp: TokenResponse = decode(br#"{"token": "T"}"#).unwrap();
        assert_eq!(resp.token.as_str(), "T");
    }

    #[test]
    fn test_decode_html_body_returns_decode_error() {
        let result = decode::<TokenResponse>(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_pretty_is_readable() {
        let bytes = encode_pretty(&serde_json::json!({ "currentType": Mode::Graphql }))
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"graphql\""));
    }
}
