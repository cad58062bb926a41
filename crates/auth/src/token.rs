//! Signed session tokens.
//!
//! A token is `<payload>.<signature>` where the signature is an
//! HMAC-SHA256 over the payload bytes, encoded as URL-safe base64 without
//! padding. Payloads may contain `.`, so verification always splits at the
//! last separator.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '.';

/// URL-safe alphabet, no padding on encode, padding tolerated on decode.
const SIGNATURE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Signs and verifies tokens under a single server secret.
///
/// The keyed MAC state is derived once in [`TokenCodec::new`] and cloned for
/// every operation, so a codec can be shared across concurrent requests.
#[derive(Clone)]
pub struct TokenCodec {
    mac: HmacSha256,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        // HMAC accepts keys of any length, including empty ones.
        let mac = <HmacSha256 as Mac>::new_from_slice(secret.as_ref())
            .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts keys of any length"));

        Self { mac }
    }

    /// Returns `<payload>.<signature>`. Deterministic for a given payload and secret.
    pub fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        let signature = SIGNATURE_ENGINE.encode(mac.finalize().into_bytes());

        format!("{payload}{SEPARATOR}{signature}")
    }

    /// Returns the payload of a correctly signed token.
    ///
    /// Every failure (no separator, bad base64, wrong length, wrong
    /// signature) collapses to `None`.
    pub fn verify<'a>(&self, token: &'a str) -> Option<&'a str> {
        let (payload, signature) = token.rsplit_once(SEPARATOR)?;
        let signature = SIGNATURE_ENGINE.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());

        // verify_slice compares in constant time
        mac.verify_slice(&signature).ok().map(|_| payload)
    }
}

/// Signs `payload` under `secret`.
pub fn sign(payload: &str, secret: impl AsRef<[u8]>) -> String {
    TokenCodec::new(secret).sign(payload)
}

/// Verifies `token` under `secret` and returns its payload.
pub fn verify(token: &str, secret: impl AsRef<[u8]>) -> Option<String> {
    TokenCodec::new(secret).verify(token).map(str::to_owned)
}
