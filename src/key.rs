use crate::error::{Result, SealboxError};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key lengths in bytes accepted by the configured ciphers (AES-128/192/256)
pub const SUPPORTED_KEY_SIZES: [usize; 3] = [16, 24, 32];

/// A secret key wrapper that:
/// - Zeroes memory on drop
/// - Prevents cloning to reduce copies
/// - Prevents debug printing to avoid logs
/// - Provides controlled access via closures
///
/// Immutable once created: key material is supplied to cipher calls
/// by reference and never modified in place.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    data: Vec<u8>,
}

impl KeyMaterial {
    /// Create key material from a byte vector
    ///
    /// SECURITY: The input vector is consumed and zeroized when the
    /// KeyMaterial is dropped.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Create key material from a byte slice (copies data)
    pub fn from_slice(slice: &[u8]) -> Self {
        Self {
            data: slice.to_vec(),
        }
    }

    /// Length of the key in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the key is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Access the key bytes through a closure
    ///
    /// SECURITY: This is the ONLY way to read the key. The bytes are
    /// exposed only within the closure scope to minimize exposure time.
    pub fn expose<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(&self.data)
    }
}

// SECURITY: Do NOT implement Clone to prevent accidental copies
// that could leave sensitive data in memory.

// SECURITY: Do NOT derive Debug to prevent key bytes from
// appearing in logs, panic messages, or debug output.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("data", &"<redacted>")
            .finish()
    }
}

/// Generate a fresh secret key from the OS secure random source
///
/// `bits` must be a multiple of 8 and one of the supported AES sizes
/// (128, 192, 256). Consumes entropy; no other side effects.
pub fn generate(bits: usize) -> Result<KeyMaterial> {
    if bits == 0 || bits % 8 != 0 {
        return Err(SealboxError::InvalidParameter(format!(
            "Key length must be a positive multiple of 8 bits, got {}",
            bits
        )));
    }

    let len = bits / 8;
    if !SUPPORTED_KEY_SIZES.contains(&len) {
        return Err(SealboxError::InvalidParameter(format!(
            "Unsupported key length: {} bits (expected 128, 192 or 256)",
            bits
        )));
    }

    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    Ok(KeyMaterial::new(bytes))
}
