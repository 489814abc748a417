//! Public operation surface.
//!
//! One synchronous function per boundary operation, taking decoded
//! byte buffers and returning either a value or a classified error.
//! A method-channel (or any other transport) layer on top of this
//! module only marshals arguments and forwards the (kind, message)
//! pair from [`SealboxError`]; it never interprets wire formats.

use crate::cipher::CipherAlgorithm;
use crate::digest::{self, HashAlgorithm};
use crate::error::Result;
use crate::key::{self, KeyMaterial};
use crate::stream::{self, LocalFiles};
use crate::{kdf, legacy};
use std::path::Path;
use tracing::debug;

/// Hash a byte buffer
pub fn digest(data: &[u8], algorithm: HashAlgorithm) -> Result<Vec<u8>> {
    Ok(digest::hash(algorithm, data))
}

/// Keyed-hash message authentication code
pub fn hmac(data: &[u8], key: &[u8], algorithm: HashAlgorithm) -> Result<Vec<u8>> {
    digest::hmac(algorithm, key, data)
}

/// Generate a secret key of `bits_count` bits from the OS CSPRNG
///
/// The returned bytes cross the boundary to the caller, who becomes
/// responsible for their disposal.
pub fn generate_secret_key(bits_count: usize) -> Result<Vec<u8>> {
    let key = key::generate(bits_count)?;
    Ok(key.expose(|k| k.to_vec()))
}

/// Derive key bytes from a password with PBKDF2-HMAC
pub fn pbkdf2(
    password: &[u8],
    salt: &[u8],
    key_length: usize,
    iterations: u32,
    algorithm: HashAlgorithm,
) -> Result<Vec<u8>> {
    let key = kdf::derive(password, salt, key_length, iterations, algorithm)?;
    Ok(key.expose(|k| k.to_vec()))
}

/// Encrypt a buffer into the selected algorithm's envelope format
pub fn encrypt(plaintext: &[u8], key: &[u8], algorithm: CipherAlgorithm) -> Result<Vec<u8>> {
    let key = KeyMaterial::from_slice(key);
    algorithm.encrypt(plaintext, &key)
}

/// Encrypt a buffer with a caller-supplied nonce (AEAD only)
pub fn encrypt_with_iv(
    plaintext: &[u8],
    iv: &[u8],
    key: &[u8],
    algorithm: CipherAlgorithm,
) -> Result<Vec<u8>> {
    let key = KeyMaterial::from_slice(key);
    algorithm.encrypt_with_nonce(plaintext, &key, iv)
}

/// Decrypt an envelope in the selected algorithm's format
pub fn decrypt(envelope: &[u8], key: &[u8], algorithm: CipherAlgorithm) -> Result<Vec<u8>> {
    let key = KeyMaterial::from_slice(key);
    algorithm.decrypt(envelope, &key)
}

/// Encrypt a local file; see [`stream::encrypt_file`] for the
/// partial-output policy
pub fn encrypt_file(
    input: &Path,
    output: &Path,
    key: &[u8],
    algorithm: CipherAlgorithm,
    iv: Option<&[u8]>,
) -> Result<()> {
    debug!(
        input = %input.display(),
        output = %output.display(),
        algorithm = algorithm.name(),
        "encrypt file"
    );
    let key = KeyMaterial::from_slice(key);
    stream::encrypt_file(&LocalFiles, input, output, &key, algorithm, iv)
}

/// Decrypt a local file; see [`stream::decrypt_file`] for the
/// partial-output policy
pub fn decrypt_file(
    input: &Path,
    output: &Path,
    key: &[u8],
    algorithm: CipherAlgorithm,
) -> Result<()> {
    debug!(
        input = %input.display(),
        output = %output.display(),
        algorithm = algorithm.name(),
        "decrypt file"
    );
    let key = KeyMaterial::from_slice(key);
    stream::decrypt_file(&LocalFiles, input, output, &key, algorithm)
}

/// Decrypt a legacy envelope directly (compatibility path for data
/// written before AEAD adoption)
pub fn decrypt_legacy(envelope: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let key = KeyMaterial::from_slice(key);
    legacy::decrypt(envelope, &key)
}
