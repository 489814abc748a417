//! Legacy MAC-then-CBC envelope cipher, kept for backward
//! compatibility with data written before AEAD adoption.
//!
//! Wire format: `iv(16) ‖ ciphertext(n)`, where the CBC input is
//! `mac(32) ‖ plaintext` and `mac = SHA256(key ‖ plaintext)`.
//! New data should use the AEAD envelope in `aead` instead.

use crate::error::{Result, SealboxError};
use crate::key::KeyMaterial;
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// CBC initialization vector length in bytes
pub const IV_LEN: usize = 16;

/// Length of the SHA-256 MAC prepended to the plaintext
pub const MAC_LEN: usize = 32;

/// AES block size; the CBC ciphertext is always a multiple of this
pub const BLOCK_LEN: usize = 16;

/// Compute `SHA256(key ‖ plaintext)`
fn keyed_mac(key: &KeyMaterial, plaintext: &[u8]) -> [u8; MAC_LEN] {
    let mut hasher = Sha256::new();
    key.expose(|k| hasher.update(k));
    hasher.update(plaintext);
    hasher.finalize().into()
}

fn cbc_encrypt(key: &KeyMaterial, iv: &[u8; IV_LEN], data: &[u8]) -> Result<Vec<u8>> {
    let key_err =
        |e: aes::cipher::InvalidLength| SealboxError::InvalidKey(format!("CBC key setup failed: {}", e));

    key.expose(|k| match k.len() {
        16 => Ok(Aes128CbcEnc::new_from_slices(k, iv)
            .map_err(key_err)?
            .encrypt_padded_vec_mut::<Pkcs7>(data)),
        24 => Ok(Aes192CbcEnc::new_from_slices(k, iv)
            .map_err(key_err)?
            .encrypt_padded_vec_mut::<Pkcs7>(data)),
        32 => Ok(Aes256CbcEnc::new_from_slices(k, iv)
            .map_err(key_err)?
            .encrypt_padded_vec_mut::<Pkcs7>(data)),
        n => Err(SealboxError::InvalidKeySize(format!(
            "AES key must be 16, 24 or 32 bytes, got {}",
            n
        ))),
    })
}

fn cbc_decrypt(key: &KeyMaterial, iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let key_err =
        |e: aes::cipher::InvalidLength| SealboxError::InvalidKey(format!("CBC key setup failed: {}", e));
    // Padding failures are reported the same way as MAC failures so the
    // two cases cannot be told apart by the caller.
    let pad_err =
        |_| SealboxError::AuthenticationFailure("Wrong key or corrupted data".to_string());

    key.expose(|k| match k.len() {
        16 => Aes128CbcDec::new_from_slices(k, iv)
            .map_err(key_err)?
            .decrypt_padded_vec_mut::<Pkcs7>(data)
            .map_err(pad_err),
        24 => Aes192CbcDec::new_from_slices(k, iv)
            .map_err(key_err)?
            .decrypt_padded_vec_mut::<Pkcs7>(data)
            .map_err(pad_err),
        32 => Aes256CbcDec::new_from_slices(k, iv)
            .map_err(key_err)?
            .decrypt_padded_vec_mut::<Pkcs7>(data)
            .map_err(pad_err),
        n => Err(SealboxError::InvalidKeySize(format!(
            "AES key must be 16, 24 or 32 bytes, got {}",
            n
        ))),
    })
}

/// Encrypt a buffer into the legacy `iv ‖ ciphertext` envelope
pub fn encrypt(plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    let mac = keyed_mac(key, plaintext);

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let mut padded_input = Vec::with_capacity(MAC_LEN + plaintext.len());
    padded_input.extend_from_slice(&mac);
    padded_input.extend_from_slice(plaintext);

    let ciphertext = cbc_encrypt(key, &iv, &padded_input);
    padded_input.zeroize();
    let ciphertext = ciphertext?;

    let mut envelope = Vec::with_capacity(IV_LEN + ciphertext.len());
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&ciphertext);
    Ok(envelope)
}

/// Decrypt a legacy `iv ‖ ciphertext` envelope
///
/// The embedded MAC is recomputed over the recovered plaintext and
/// compared in constant time. On mismatch the recovered bytes are
/// zeroized and discarded; mismatched data is never returned.
pub fn decrypt(envelope: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    // Minimum: IV plus one ciphertext block holding MAC start + padding
    if envelope.len() < IV_LEN + BLOCK_LEN {
        return Err(SealboxError::InvalidParameter(format!(
            "Envelope too short: {} bytes (minimum {})",
            envelope.len(),
            IV_LEN + BLOCK_LEN
        )));
    }

    let (iv, ciphertext) = envelope.split_at(IV_LEN);
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(SealboxError::InvalidParameter(format!(
            "Ciphertext length {} is not a multiple of the block size",
            ciphertext.len()
        )));
    }

    let mut recovered = cbc_decrypt(key, iv, ciphertext)?;
    if recovered.len() < MAC_LEN {
        recovered.zeroize();
        return Err(SealboxError::AuthenticationFailure(
            "Wrong key or corrupted data".to_string(),
        ));
    }

    let plaintext = recovered.split_off(MAC_LEN);
    let mac = recovered; // first MAC_LEN bytes

    let verification_mac = keyed_mac(key, &plaintext);
    if !bool::from(mac.as_slice().ct_eq(&verification_mac)) {
        let mut plaintext = plaintext;
        plaintext.zeroize();
        return Err(SealboxError::AuthenticationFailure(
            "MAC mismatch - wrong key or corrupted data".to_string(),
        ));
    }

    Ok(plaintext)
}
