//! Request authentication using Ed25519.
//!
//! Discord signs every interaction it delivers. The signature covers the
//! bytes of the `X-Signature-Timestamp` header followed immediately by the
//! raw request body, and is sent hex-encoded in `X-Signature-Ed25519`. The
//! application's public key comes from the developer portal.

use ed25519_dalek::{Signature, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Header carrying the hex-encoded signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";

/// Header carrying the signed timestamp.
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// A configured public key that failed to parse.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("public key is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("public key must be 32 bytes, got {0}")]
    Length(usize),
    #[error("public key is not a valid Ed25519 point: {0}")]
    Point(#[from] ed25519_dalek::SignatureError),
}

/// The application's Ed25519 public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Parse the hex form shown in the developer portal.
    pub fn from_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_key.trim())?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::Length(bytes.len()))?;

        Ok(Self(VerifyingKey::from_bytes(&bytes)?))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key)
    }
}

/// Outcome of checking a request's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Authorized,
    Unauthorized,
}

impl Verification {
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Check `signature_hex` over `timestamp || body`.
///
/// With no key, every request is [`Verification::Authorized`]. That mode
/// exists for local testing only; the server refuses to start without a
/// key unless told to skip verification explicitly.
///
/// Malformed hex, a signature of the wrong length, and a signature that
/// doesn't match all yield [`Verification::Unauthorized`].
pub fn verify(
    key: Option<&PublicKey>,
    timestamp: &[u8],
    body: &[u8],
    signature_hex: &str,
) -> Verification {
    let Some(key) = key else {
        return Verification::Authorized;
    };

    let signature = match parse_signature(signature_hex) {
        Some(signature) => signature,
        None => {
            tracing::debug!("signature header is not {SIGNATURE_LENGTH} hex-encoded bytes");
            return Verification::Unauthorized;
        }
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp);
    message.extend_from_slice(body);

    match key.0.verify(&message, &signature) {
        Ok(()) => Verification::Authorized,
        Err(e) => {
            tracing::debug!(error = %e, "Ed25519 signature verification failed");
            Verification::Unauthorized
        }
    }
}

/// [`verify`] with the key given as hex.
///
/// An empty key means "no key". A key that doesn't parse rejects every
/// request.
pub fn verify_hex(public_key_hex: &str, timestamp: &[u8], body: &[u8], signature_hex: &str) -> bool {
    if public_key_hex.is_empty() {
        return verify(None, timestamp, body, signature_hex).is_authorized();
    }

    match PublicKey::from_hex(public_key_hex) {
        Ok(key) => verify(Some(&key), timestamp, body, signature_hex).is_authorized(),
        Err(e) => {
            tracing::warn!(error = %e, "rejecting request: configured public key is invalid");
            false
        }
    }
}

fn parse_signature(signature_hex: &str) -> Option<Signature> {
    let bytes = hex::decode(signature_hex).ok()?;
    let bytes: [u8; SIGNATURE_LENGTH] = bytes.try_into().ok()?;
    Some(Signature::from_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    const TIMESTAMP: &[u8] = b"1700000000";
    const BODY: &[u8] = br#"{"type":1,"id":"1","application_id":"1","token":"t","version":1}"#;

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7; 32])
    }

    fn public_key() -> PublicKey {
        signing_key().verifying_key().into()
    }

    fn sign(timestamp: &[u8], body: &[u8]) -> String {
        let message = [timestamp, body].concat();
        hex::encode(signing_key().sign(&message).to_bytes())
    }

    #[test]
    fn valid_signature_is_authorized() {
        let signature = sign(TIMESTAMP, BODY);
        assert_eq!(
            verify(Some(&public_key()), TIMESTAMP, BODY, &signature),
            Verification::Authorized
        );
    }

    #[test]
    fn any_flipped_byte_is_unauthorized() {
        let key = public_key();
        let signature = sign(TIMESTAMP, BODY);

        for index in 0..BODY.len() {
            let mut body = BODY.to_vec();
            body[index] ^= 0x01;
            assert_eq!(
                verify(Some(&key), TIMESTAMP, &body, &signature),
                Verification::Unauthorized,
                "body byte {index}"
            );
        }

        for index in 0..TIMESTAMP.len() {
            let mut timestamp = TIMESTAMP.to_vec();
            timestamp[index] ^= 0x01;
            assert_eq!(
                verify(Some(&key), &timestamp, BODY, &signature),
                Verification::Unauthorized,
                "timestamp byte {index}"
            );
        }

        let raw = hex::decode(&signature).unwrap();
        for index in 0..raw.len() {
            let mut tampered = raw.clone();
            tampered[index] ^= 0x01;
            assert_eq!(
                verify(Some(&key), TIMESTAMP, BODY, &hex::encode(tampered)),
                Verification::Unauthorized,
                "signature byte {index}"
            );
        }
    }

    #[test]
    fn boundary_between_timestamp_and_body_is_signed_as_is() {
        // Moving a byte across the boundary keeps the concatenation, and
        // with it the signature, valid.
        let signature = sign(b"17000000001", b"23");
        assert!(verify(Some(&public_key()), b"1700000000", b"123", &signature).is_authorized());
    }

    #[test]
    fn malformed_signatures_are_unauthorized() {
        let key = public_key();
        for signature in ["", "zz", "abcd", "0".repeat(130).as_str()] {
            assert_eq!(
                verify(Some(&key), TIMESTAMP, BODY, signature),
                Verification::Unauthorized
            );
        }
    }

    #[test]
    fn no_key_skips_verification() {
        assert!(verify(None, TIMESTAMP, BODY, "").is_authorized());
        assert!(verify_hex("", TIMESTAMP, BODY, "not hex"));
    }

    #[test]
    fn hex_entry_point() {
        let key_hex = hex::encode(public_key().as_bytes());
        let signature = sign(TIMESTAMP, BODY);
        assert!(verify_hex(&key_hex, TIMESTAMP, BODY, &signature));
        assert!(!verify_hex(&key_hex, TIMESTAMP, b"{}", &signature));
        assert!(!verify_hex("nothex", TIMESTAMP, BODY, &signature));
    }

    #[test]
    fn key_parsing_errors() {
        assert!(matches!(PublicKey::from_hex("xyz"), Err(KeyError::Hex(_))));
        assert!(matches!(PublicKey::from_hex("abcd"), Err(KeyError::Length(2))));

        let key_hex = hex::encode(public_key().as_bytes());
        assert_eq!(PublicKey::from_hex(&format!(" {key_hex}\n")).unwrap(), public_key());
    }
}
