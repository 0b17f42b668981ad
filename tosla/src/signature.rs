use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, FixedOffset, Utc};
use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use crate::config::Credentials;

/// Gateway clock offset, UTC+03:00 year-round.
const GATEWAY_UTC_OFFSET_SECS: i32 = 3 * 60 * 60;
const TIME_SPAN_FORMAT: &str = "%Y%m%d%H%M%S";
const RND_MAX: u32 = 1_000_000;

/// base64(SHA-512(parts joined without separators)).
fn hash_parts(parts: &[&str]) -> String {
    let mut hasher = Sha512::new();

    for part in parts {
        hasher.update(part.as_bytes());
    }

    STANDARD.encode(hasher.finalize())
}

/**
Authentication fields merged into every JSON request body.
 */
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    #[serde(rename = "clientId")]
    pub client_id: String,

    #[serde(rename = "apiUser")]
    pub api_user: String,

    /**
    Random decimal integer in 1..=1000000
     */
    pub rnd: String,

    /**
    yyyyMMddHHmmss in UTC+03:00
     */
    #[serde(rename = "timeSpan")]
    pub time_span: String,

    pub hash: String,
}

impl SignedEnvelope {
    /// Builds an envelope with a fresh nonce and the current gateway time.
    pub fn sign(credentials: &Credentials) -> Self {
        let rnd = rand::rng().random_range(1..=RND_MAX).to_string();
        let time_span = gateway_time_span(Utc::now());

        Self::sign_at(credentials, rnd, time_span)
    }

    pub fn sign_at(
        credentials: &Credentials,
        rnd: impl Into<String>,
        time_span: impl Into<String>,
    ) -> Self {
        let rnd = rnd.into();
        let time_span = time_span.into();

        let hash = hash_parts(&[
            credentials.api_pass(),
            credentials.client_id(),
            credentials.api_user(),
            &rnd,
            &time_span,
        ]);

        Self {
            client_id: credentials.client_id().to_string(),
            api_user: credentials.api_user().to_string(),
            rnd,
            time_span,
            hash,
        }
    }
}

pub fn gateway_offset() -> FixedOffset {
    FixedOffset::east_opt(GATEWAY_UTC_OFFSET_SECS).expect("UTC+03:00 is a valid offset")
}

pub fn gateway_time_span(now: DateTime<Utc>) -> String {
    now.with_timezone(&gateway_offset())
        .format(TIME_SPAN_FORMAT)
        .to_string()
}

/// Digest the gateway attaches to a 3-D Secure callback.
pub fn callback_hash(
    credentials: &Credentials,
    order_id: &str,
    md_status: &str,
    bank_response_code: &str,
    bank_response_message: &str,
    request_status: &str,
) -> String {
    hash_parts(&[
        credentials.api_pass(),
        credentials.client_id(),
        credentials.api_user(),
        order_id,
        md_status,
        bank_response_code,
        bank_response_message,
        request_status,
    ])
}

/// Digest comparison runs in constant time over the provided signature.
pub fn validate_callback_signature(
    provided_signature: &str,
    credentials: &Credentials,
    order_id: &str,
    md_status: &str,
    bank_response_code: &str,
    bank_response_message: &str,
    request_status: &str,
) -> bool {
    let expected = callback_hash(
        credentials,
        order_id,
        md_status,
        bank_response_code,
        bank_response_message,
        request_status,
    );

    expected.as_bytes().ct_eq(provided_signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("POS_ENT_Test_001", "POS_ENT_Test_001!*!*", "1000000494")
    }

    #[test]
    fn test_hash_is_sha512_base64_of_concatenation() {
        // SHA-512("abc") from FIPS 180-2
        let expected = STANDARD.encode(
            hex_to_bytes(
                "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                 2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
            ),
        );

        assert_eq!(hash_parts(&["a", "b", "c"]), expected);
        assert_eq!(hash_parts(&["abc"]), expected);
        assert_eq!(expected.len(), 88);
    }

    fn hex_to_bytes(hex: &str) -> Vec<u8> {
        (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn test_sign_at_is_deterministic() {
        let a = SignedEnvelope::sign_at(&credentials(), "4821", "20240301120000");
        let b = SignedEnvelope::sign_at(&credentials(), "4821", "20240301120000");

        assert_eq!(a, b);
        assert_eq!(a.client_id, "1000000494");
        assert_eq!(a.api_user, "POS_ENT_Test_001");
    }

    #[test]
    fn test_sign_at_hash_order() {
        let envelope = SignedEnvelope::sign_at(&credentials(), "4821", "20240301120000");

        let expected = hash_parts(&[
            "POS_ENT_Test_001!*!*1000000494POS_ENT_Test_001482120240301120000",
        ]);
        assert_eq!(envelope.hash, expected);
    }

    #[test]
    fn test_any_input_change_changes_hash() {
        let base = SignedEnvelope::sign_at(&credentials(), "4821", "20240301120000").hash;

        let other_rnd = SignedEnvelope::sign_at(&credentials(), "4822", "20240301120000").hash;
        let other_time = SignedEnvelope::sign_at(&credentials(), "4821", "20240301120001").hash;
        let other_pass = SignedEnvelope::sign_at(
            &Credentials::new("POS_ENT_Test_001", "POS_ENT_Test_001!*!#", "1000000494"),
            "4821",
            "20240301120000",
        )
        .hash;

        assert_ne!(base, other_rnd);
        assert_ne!(base, other_time);
        assert_ne!(base, other_pass);
    }

    #[test]
    fn test_fresh_envelope_shape() {
        let envelope = SignedEnvelope::sign(&credentials());

        let rnd: u32 = envelope.rnd.parse().unwrap();
        assert!((1..=RND_MAX).contains(&rnd));

        assert_eq!(envelope.time_span.len(), 14);
        assert!(envelope.time_span.chars().all(|c| c.is_ascii_digit()));

        let recomputed =
            SignedEnvelope::sign_at(&credentials(), envelope.rnd.clone(), envelope.time_span.clone());
        assert_eq!(envelope, recomputed);
    }

    #[test]
    fn test_time_span_uses_fixed_offset() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 22, 30, 5).unwrap();

        assert_eq!(gateway_time_span(now), "20250101013005");
    }

    #[test]
    fn test_time_span_ignores_dst() {
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap();

        assert_eq!(gateway_time_span(summer), "20240715120000");
    }

    #[test]
    fn test_envelope_wire_names() {
        let envelope = SignedEnvelope::sign_at(&credentials(), "1", "20240301120000");
        let value = serde_json::to_value(&envelope).unwrap();
        let map = value.as_object().unwrap();

        let mut keys: Vec<_> = map.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["apiUser", "clientId", "hash", "rnd", "timeSpan"]);
    }

    #[test]
    fn test_callback_signature_validation() {
        let creds = credentials();
        let hash = callback_hash(&creds, "ORD-1", "1", "00", "Approved", "1");

        assert!(validate_callback_signature(
            &hash, &creds, "ORD-1", "1", "00", "Approved", "1"
        ));
        assert!(!validate_callback_signature(
            &hash, &creds, "ORD-2", "1", "00", "Approved", "1"
        ));
        assert!(!validate_callback_signature(
            &hash, &creds, "ORD-1", "1", "05", "Approved", "1"
        ));
        assert!(!validate_callback_signature(
            "", &creds, "ORD-1", "1", "00", "Approved", "1"
        ));
    }

    #[test]
    fn test_callback_signature_length_mismatch() {
        let creds = credentials();
        let hash = callback_hash(&creds, "ORD-1", "1", "00", "Approved", "1");
        let truncated = &hash[..hash.len() - 1];
        let extended = format!("{hash}=");

        assert!(!validate_callback_signature(
            truncated, &creds, "ORD-1", "1", "00", "Approved", "1"
        ));
        assert!(!validate_callback_signature(
            &extended, &creds, "ORD-1", "1", "00", "Approved", "1"
        ));
    }
}
