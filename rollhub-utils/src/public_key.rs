//! Self-describing public key envelopes for sequencer identities.
//!
//! A [`KeyEnvelope`] carries a key-type tag alongside base64 key material.
//! Decoding resolves the tag against the closed set of supported algorithms
//! and checks the payload shape; the key bytes stay opaque to the registry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ED25519_KEY_TYPE: &str = "ed25519";
pub const SECP256K1_KEY_TYPE: &str = "secp256k1";

pub const ED25519_KEY_LENGTH: usize = 32;
pub const SECP256K1_KEY_LENGTH: usize = 33;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("expecting a public key, got {actual}")]
    UnrecognizedKeyType { actual: String },

    #[error("invalid base64 key material: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("{key_type} public keys must be {expected} bytes, got {actual}")]
    InvalidKeyLength {
        key_type: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Type-tagged public key as carried inside registration requests and
/// sequencer records.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KeyEnvelope {
    pub key_type: String,
    pub key: String,
}

/// A decoded public key capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKey {
    Ed25519(Vec<u8>),
    Secp256k1(Vec<u8>),
}

impl KeyEnvelope {
    pub fn new(key_type: &str, key: &str) -> Self {
        Self {
            key_type: key_type.to_string(),
            key: key.to_string(),
        }
    }

    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self {
            key_type: public_key.algorithm().to_string(),
            key: base64::encode(public_key.as_bytes()),
        }
    }

    /// Resolve the envelope into a public key capability.
    ///
    /// Fails on a tag outside the supported set, on undecodable base64, or
    /// on key material of the wrong length for the tagged algorithm.
    pub fn decode(&self) -> Result<PublicKey, KeyError> {
        match self.key_type.as_str() {
            ED25519_KEY_TYPE => {
                let bytes = Self::decode_key_bytes(&self.key, ED25519_KEY_TYPE, ED25519_KEY_LENGTH)?;
                Ok(PublicKey::Ed25519(bytes))
            }
            SECP256K1_KEY_TYPE => {
                let bytes =
                    Self::decode_key_bytes(&self.key, SECP256K1_KEY_TYPE, SECP256K1_KEY_LENGTH)?;
                Ok(PublicKey::Secp256k1(bytes))
            }
            other => Err(KeyError::UnrecognizedKeyType {
                actual: other.to_string(),
            }),
        }
    }

    fn decode_key_bytes(
        key: &str,
        key_type: &'static str,
        expected: usize,
    ) -> Result<Vec<u8>, KeyError> {
        let bytes = base64::decode(key)?;
        if bytes.len() != expected {
            return Err(KeyError::InvalidKeyLength {
                key_type,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }
}

impl PublicKey {
    pub fn algorithm(&self) -> &'static str {
        match self {
            PublicKey::Ed25519(_) => ED25519_KEY_TYPE,
            PublicKey::Secp256k1(_) => SECP256K1_KEY_TYPE,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(bytes) => bytes,
            PublicKey::Secp256k1(bytes) => bytes,
        }
    }
}
