//! Account-address and timestamp codecs.
//!
//! Initia addresses travel as `init1`-prefixed strings whose remainder is a
//! base64 payload; Aptos expects raw bytes rendered as `0x`-prefixed
//! lowercase hex. Timestamps arrive as RFC 3339 strings and leave as
//! microseconds-since-epoch decimal strings.

use base64::Engine;
use chrono::DateTime;
use thiserror::Error;

/// The Aptos zero account address, used wherever the source chain carries no
/// usable account identity (metadata proposer, senderless transactions).
pub const ZERO_ADDRESS: &str = "0x0";

/// Human-readable prefix of Initia account addresses.
const ACCOUNT_PREFIX: &str = "init1";

/// A source address that could not be decoded into bytes.
#[derive(Debug, Error)]
pub enum AddressDecodeError {
    #[error("address '{0}' lacks the 'init1' prefix")]
    MissingPrefix(String),
    #[error("address payload is not valid base64: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}

/// Decode an Initia account address into the Aptos hex representation.
///
/// The prefix-strip + base64 scheme is the canonical one; the full bech32
/// 5-bit regrouping seen in older deployments is not supported.
pub fn to_aptos_address(source: &str) -> Result<String, AddressDecodeError> {
    let payload = source
        .strip_prefix(ACCOUNT_PREFIX)
        .ok_or_else(|| AddressDecodeError::MissingPrefix(source.to_string()))?;

    let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Convert an RFC 3339 timestamp to microseconds since the Unix epoch,
/// rendered as a decimal string.
pub fn to_micro_timestamp(timestamp: &str) -> Result<String, chrono::ParseError> {
    let parsed = DateTime::parse_from_rfc3339(timestamp)?;
    Ok(parsed.timestamp_micros().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_aptos_address() {
        // base64 "YW5lcg==" decodes to the bytes of "aner".
        let addr = to_aptos_address("init1YW5lcg==").unwrap();
        assert_eq!(addr, "0x616e6572");
    }

    #[test]
    fn test_address_codec_is_idempotent() {
        let first = to_aptos_address("init1YW5lcg==").unwrap();
        let second = to_aptos_address("init1YW5lcg==").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_address_missing_prefix() {
        let err = to_aptos_address("cosmos1YW5lcg==").unwrap_err();
        assert!(matches!(err, AddressDecodeError::MissingPrefix(_)));
    }

    #[test]
    fn test_address_bad_payload() {
        let err = to_aptos_address("init1!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, AddressDecodeError::InvalidPayload(_)));
    }

    #[test]
    fn test_to_micro_timestamp() {
        let micros = to_micro_timestamp("2023-01-01T12:00:00.000Z").unwrap();
        assert_eq!(micros, "1672574400000000");
    }

    #[test]
    fn test_to_micro_timestamp_keeps_sub_second_precision() {
        let micros = to_micro_timestamp("2023-01-01T12:00:00.123456Z").unwrap();
        assert_eq!(micros, "1672574400123456");
    }

    #[test]
    fn test_to_micro_timestamp_rejects_garbage() {
        assert!(to_micro_timestamp("not-a-timestamp").is_err());
    }
}
