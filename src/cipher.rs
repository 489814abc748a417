//! Algorithm selection and dispatch for the envelope ciphers.
//!
//! The wire formats are self-describing except for algorithm identity,
//! which both parties must know out-of-band. An AEAD envelope fed to
//! the legacy path (or vice versa) fails cleanly; it never decodes to
//! garbage accepted as plaintext.

use crate::error::{Result, SealboxError};
use crate::key::KeyMaterial;
use crate::{aead, legacy};

/// Closed enumeration of cipher generations
///
/// Unknown identifiers fail at parse time with `InvalidParameter`;
/// there is no silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    /// AES-GCM envelope: `nonce(12) ‖ ciphertext ‖ tag(16)`
    AesGcm,
    /// Legacy MAC-then-CBC envelope: `iv(16) ‖ cbc(mac(32) ‖ plaintext)`
    AesCbc,
}

impl CipherAlgorithm {
    /// Parse a boundary identifier
    ///
    /// "aes" selects the current generation (AES-GCM); "aes/cbc" selects
    /// the legacy format for reading pre-AEAD data.
    pub fn parse(id: &str) -> Result<Self> {
        match id {
            "aes" | "aes/gcm" => Ok(CipherAlgorithm::AesGcm),
            "aes/cbc" => Ok(CipherAlgorithm::AesCbc),
            other => Err(SealboxError::InvalidParameter(format!(
                "Unknown cipher algorithm: {}",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CipherAlgorithm::AesGcm => "aes/gcm",
            CipherAlgorithm::AesCbc => "aes/cbc",
        }
    }

    /// Encrypt a buffer into this algorithm's envelope format
    pub fn encrypt(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
        match self {
            CipherAlgorithm::AesGcm => aead::encrypt(plaintext, key),
            CipherAlgorithm::AesCbc => legacy::encrypt(plaintext, key),
        }
    }

    /// Encrypt with a caller-supplied nonce
    ///
    /// Only the AEAD generation accepts a predefined nonce; the legacy
    /// cipher always generates its IV per call.
    pub fn encrypt_with_nonce(
        &self,
        plaintext: &[u8],
        key: &KeyMaterial,
        nonce: &[u8],
    ) -> Result<Vec<u8>> {
        match self {
            CipherAlgorithm::AesGcm => aead::encrypt_with_nonce(plaintext, key, nonce),
            CipherAlgorithm::AesCbc => Err(SealboxError::InvalidParameter(
                "Predefined IV is not supported by the legacy cipher".to_string(),
            )),
        }
    }

    /// Decrypt an envelope in this algorithm's format
    pub fn decrypt(&self, envelope: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
        match self {
            CipherAlgorithm::AesGcm => aead::decrypt(envelope, key),
            CipherAlgorithm::AesCbc => legacy::decrypt(envelope, key),
        }
    }
}
