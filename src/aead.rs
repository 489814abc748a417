//! AES-GCM envelope cipher.
//!
//! Wire format: `nonce(12) ‖ ciphertext(n) ‖ tag(16)`, a single
//! self-describing byte sequence. The same framing is used by the
//! buffer operations here and by the file cipher in `stream`, so the
//! two surfaces interoperate byte-for-byte.

use crate::error::{Result, SealboxError};
use crate::key::KeyMaterial;
use aes::Aes192;
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

/// AES-192-GCM with the standard 96-bit nonce
pub type Aes192Gcm = AesGcm<Aes192, U12>;

/// Nonce length in bytes (96-bit, standard for GCM)
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// Smallest valid envelope: empty plaintext still carries nonce and tag
pub const MIN_ENVELOPE_LEN: usize = NONCE_LEN + TAG_LEN;

/// Generate a fresh random nonce from the OS secure random source
fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Seal plaintext under (key, nonce), producing `ciphertext ‖ tag`
fn seal(key: &KeyMaterial, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    key.expose(|k| match k.len() {
        16 => {
            let cipher = Aes128Gcm::new_from_slice(k)
                .map_err(|e| SealboxError::InvalidKey(format!("AES-128 key setup failed: {}", e)))?;
            cipher
                .encrypt(Nonce::from_slice(nonce), plaintext)
                .map_err(|_| SealboxError::Cipher("AES-GCM seal failed".to_string()))
        }
        24 => {
            let cipher = Aes192Gcm::new_from_slice(k)
                .map_err(|e| SealboxError::InvalidKey(format!("AES-192 key setup failed: {}", e)))?;
            cipher
                .encrypt(Nonce::from_slice(nonce), plaintext)
                .map_err(|_| SealboxError::Cipher("AES-GCM seal failed".to_string()))
        }
        32 => {
            let cipher = Aes256Gcm::new_from_slice(k)
                .map_err(|e| SealboxError::InvalidKey(format!("AES-256 key setup failed: {}", e)))?;
            cipher
                .encrypt(Nonce::from_slice(nonce), plaintext)
                .map_err(|_| SealboxError::Cipher("AES-GCM seal failed".to_string()))
        }
        n => Err(SealboxError::InvalidKeySize(format!(
            "AES key must be 16, 24 or 32 bytes, got {}",
            n
        ))),
    })
}

/// Open `ciphertext ‖ tag` under (key, nonce)
fn open(key: &KeyMaterial, nonce: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    // Tag mismatch and wrong key are indistinguishable by design;
    // never return partially decrypted data.
    let auth_err =
        || SealboxError::AuthenticationFailure("AEAD tag mismatch or wrong key".to_string());

    key.expose(|k| match k.len() {
        16 => {
            let cipher = Aes128Gcm::new_from_slice(k)
                .map_err(|e| SealboxError::InvalidKey(format!("AES-128 key setup failed: {}", e)))?;
            cipher
                .decrypt(Nonce::from_slice(nonce), payload)
                .map_err(|_| auth_err())
        }
        24 => {
            let cipher = Aes192Gcm::new_from_slice(k)
                .map_err(|e| SealboxError::InvalidKey(format!("AES-192 key setup failed: {}", e)))?;
            cipher
                .decrypt(Nonce::from_slice(nonce), payload)
                .map_err(|_| auth_err())
        }
        32 => {
            let cipher = Aes256Gcm::new_from_slice(k)
                .map_err(|e| SealboxError::InvalidKey(format!("AES-256 key setup failed: {}", e)))?;
            cipher
                .decrypt(Nonce::from_slice(nonce), payload)
                .map_err(|_| auth_err())
        }
        n => Err(SealboxError::InvalidKeySize(format!(
            "AES key must be 16, 24 or 32 bytes, got {}",
            n
        ))),
    })
}

/// Encrypt a buffer into the `nonce ‖ ciphertext ‖ tag` envelope,
/// generating a fresh random nonce
pub fn encrypt(plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    let nonce = generate_nonce();
    let payload = seal(key, &nonce, plaintext)?;

    let mut envelope = Vec::with_capacity(NONCE_LEN + payload.len());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&payload);
    Ok(envelope)
}

/// Encrypt a buffer with a caller-supplied nonce
///
/// The caller must not reuse a nonce across messages under the same
/// key; this entry point exists for deterministic re-encryption and
/// cross-platform test vectors. The nonce must be exactly 12 bytes.
pub fn encrypt_with_nonce(plaintext: &[u8], key: &KeyMaterial, nonce: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(SealboxError::InvalidParameter(format!(
            "Nonce must be {} bytes, got {}",
            NONCE_LEN,
            nonce.len()
        )));
    }

    let payload = seal(key, nonce, plaintext)?;

    let mut envelope = Vec::with_capacity(NONCE_LEN + payload.len());
    envelope.extend_from_slice(nonce);
    envelope.extend_from_slice(&payload);
    Ok(envelope)
}

/// Encrypt a buffer, returning `(nonce, ciphertext ‖ tag)` as two
/// separate byte sequences instead of one concatenated envelope
pub fn encrypt_detached(plaintext: &[u8], key: &KeyMaterial) -> Result<(Vec<u8>, Vec<u8>)> {
    let nonce = generate_nonce();
    let payload = seal(key, &nonce, plaintext)?;
    Ok((nonce.to_vec(), payload))
}

/// Decrypt a `nonce ‖ ciphertext ‖ tag` envelope
pub fn decrypt(envelope: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    if envelope.len() < MIN_ENVELOPE_LEN {
        return Err(SealboxError::InvalidParameter(format!(
            "Envelope too short: {} bytes (minimum {})",
            envelope.len(),
            MIN_ENVELOPE_LEN
        )));
    }

    let (nonce, payload) = envelope.split_at(NONCE_LEN);
    open(key, nonce, payload)
}

/// Decrypt from the detached `(nonce, ciphertext ‖ tag)` shape
pub fn decrypt_detached(nonce: &[u8], payload: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(SealboxError::InvalidParameter(format!(
            "Nonce must be {} bytes, got {}",
            NONCE_LEN,
            nonce.len()
        )));
    }
    if payload.len() < TAG_LEN {
        return Err(SealboxError::InvalidParameter(format!(
            "Payload too short: {} bytes (minimum {})",
            payload.len(),
            TAG_LEN
        )));
    }

    open(key, nonce, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn key_of(len: usize) -> KeyMaterial {
        KeyMaterial::new((0..len as u8).collect())
    }

    #[test]
    fn test_roundtrip_all_key_sizes_and_lengths() {
        for key_len in [16, 24, 32] {
            let key = key_of(key_len);
            for msg_len in [0usize, 1, 16, 1000, 1 << 20] {
                let plaintext = vec![0xA5u8; msg_len];
                let envelope = encrypt(&plaintext, &key).unwrap();
                assert_eq!(envelope.len(), NONCE_LEN + msg_len + TAG_LEN);
                let recovered = decrypt(&envelope, &key).unwrap();
                assert_eq!(recovered, plaintext);
            }
        }
    }

    #[test]
    fn test_predefined_nonce_is_deterministic() {
        let key = key_of(32);
        let nonce = [7u8; NONCE_LEN];
        let e1 = encrypt_with_nonce(b"payload", &key, &nonce).unwrap();
        let e2 = encrypt_with_nonce(b"payload", &key, &nonce).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(&e1[..NONCE_LEN], &nonce);
    }

    #[test]
    fn test_nonce_length_validated() {
        let key = key_of(32);
        for bad in [0usize, 11, 13, 16] {
            let result = encrypt_with_nonce(b"data", &key, &vec![0u8; bad]);
            assert!(matches!(
                result.unwrap_err(),
                SealboxError::InvalidParameter(_)
            ));
        }
    }

    #[test]
    fn test_known_vectors_aes128() {
        // McGrew/Viega GCM test vectors 1 and 2: zero key, zero nonce
        let key = KeyMaterial::new(vec![0u8; 16]);
        let nonce = [0u8; NONCE_LEN];

        let envelope = encrypt_with_nonce(b"", &key, &nonce).unwrap();
        assert_eq!(
            hex::encode(&envelope[NONCE_LEN..]),
            "58e2fccefa7e3061367f1d57a4e7455a"
        );

        let envelope = encrypt_with_nonce(&[0u8; 16], &key, &nonce).unwrap();
        assert_eq!(
            hex::encode(&envelope[NONCE_LEN..]),
            "0388dace60b6a392f328c2b971b2fe78ab6e47d42cec13bdf53a67b21257bddf"
        );
    }

    #[test]
    fn test_known_vectors_aes256() {
        let key = KeyMaterial::new(vec![0u8; 32]);
        let nonce = [0u8; NONCE_LEN];

        let envelope = encrypt_with_nonce(b"", &key, &nonce).unwrap();
        assert_eq!(
            hex::encode(&envelope[NONCE_LEN..]),
            "530f8afbc74536b9a963b4f1c4cb738b"
        );

        let envelope = encrypt_with_nonce(&[0u8; 16], &key, &nonce).unwrap();
        assert_eq!(
            hex::encode(&envelope[NONCE_LEN..]),
            "cea7403d4d606b6e074ec5d3baf39d18d0d1c8a799996bf0265b98b5d48ab919"
        );
    }

    #[test]
    fn test_detached_and_combined_agree() {
        let key = key_of(32);
        let (nonce, payload) = encrypt_detached(b"two-part envelope", &key).unwrap();
        assert_eq!(nonce.len(), NONCE_LEN);

        // The combined form is just the concatenation of the parts
        let mut envelope = nonce.clone();
        envelope.extend_from_slice(&payload);
        assert_eq!(decrypt(&envelope, &key).unwrap(), b"two-part envelope");
        assert_eq!(
            decrypt_detached(&nonce, &payload, &key).unwrap(),
            b"two-part envelope"
        );
    }

    #[test]
    fn test_tamper_detection_every_byte() {
        let key = key_of(32);
        let envelope = encrypt(b"tamper me!", &key).unwrap();

        // Flipping any single bit in the ciphertext or tag region must fail
        for pos in NONCE_LEN..envelope.len() {
            let mut tampered = envelope.clone();
            tampered[pos] ^= 1;
            let result = decrypt(&tampered, &key);
            assert!(
                matches!(
                    result.unwrap_err(),
                    SealboxError::AuthenticationFailure(_)
                ),
                "bit flip at byte {} must be detected",
                pos
            );
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = key_of(32);
        let envelope = encrypt(b"secret", &key).unwrap();

        let mut wrong = vec![0u8; 32];
        wrong[0] = 0xFF;
        let result = decrypt(&envelope, &KeyMaterial::new(wrong));
        assert!(matches!(
            result.unwrap_err(),
            SealboxError::AuthenticationFailure(_)
        ));
    }

    #[test]
    fn test_unsupported_key_size_rejected() {
        let key = key_of(20);
        let result = encrypt(b"data", &key);
        assert!(matches!(
            result.unwrap_err(),
            SealboxError::InvalidKeySize(_)
        ));
    }

    #[test]
    fn test_short_envelope_rejected() {
        let key = key_of(32);
        for len in [0usize, 1, 12, 27] {
            let result = decrypt(&vec![0u8; len], &key);
            assert!(
                matches!(result.unwrap_err(), SealboxError::InvalidParameter(_)),
                "{}-byte envelope should be rejected before decryption",
                len
            );
        }
    }

    #[test]
    fn test_generated_nonces_do_not_repeat() {
        let key = key_of(16);
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let envelope = encrypt(b"x", &key).unwrap();
            let mut nonce = [0u8; NONCE_LEN];
            nonce.copy_from_slice(&envelope[..NONCE_LEN]);
            assert!(seen.insert(nonce), "nonce repeated");
        }
    }
}
