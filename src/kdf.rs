use crate::digest::HashAlgorithm;
use crate::error::{Result, SealboxError};
use crate::key::KeyMaterial;
use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha384, Sha512};

/// Documented minimum for interactive password hashing
///
/// The core does not enforce this; choosing a cost is a caller policy.
pub const RECOMMENDED_MIN_ITERATIONS: u32 = 100_000;

/// Derive a key from a password and salt using PBKDF2-HMAC
///
/// Deterministic: identical inputs always produce identical output
/// bytes. `key_length` bytes are produced regardless of the underlying
/// digest size (PBKDF2 concatenates as many HMAC blocks as needed).
pub fn derive(
    password: &[u8],
    salt: &[u8],
    key_length: usize,
    iterations: u32,
    algorithm: HashAlgorithm,
) -> Result<KeyMaterial> {
    if password.is_empty() {
        return Err(SealboxError::InvalidParameter(
            "Password must not be empty".to_string(),
        ));
    }
    if salt.is_empty() {
        return Err(SealboxError::InvalidParameter(
            "Salt must not be empty".to_string(),
        ));
    }
    if key_length == 0 {
        return Err(SealboxError::InvalidParameter(
            "Key length must be at least 1 byte".to_string(),
        ));
    }
    if iterations == 0 {
        return Err(SealboxError::InvalidParameter(
            "Iteration count must be at least 1".to_string(),
        ));
    }

    let mut output = vec![0u8; key_length];
    match algorithm {
        HashAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut output),
        HashAlgorithm::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, iterations, &mut output),
        HashAlgorithm::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut output),
    }

    Ok(KeyMaterial::new(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_known_vector_sha256() {
        // RFC 7914 §11 PBKDF2-HMAC-SHA256 test vector (P="passwd", S="salt", c=1, dkLen=64)
        let key = derive(b"passwd", b"salt", 64, 1, HashAlgorithm::Sha256).unwrap();
        let expected = hex::decode(
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc\
             49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783",
        )
        .unwrap();
        key.expose(|k| assert_eq!(k, &expected[..]));
    }

    #[test]
    fn test_derive_deterministic() {
        let k1 = derive(b"password", b"salt", 32, 1000, HashAlgorithm::Sha256).unwrap();
        let k2 = derive(b"password", b"salt", 32, 1000, HashAlgorithm::Sha256).unwrap();
        assert_eq!(k1.len(), 32);
        let equal = k1.expose(|a| k2.expose(|b| a == b));
        assert!(equal);
    }

    #[test]
    fn test_derive_iteration_count_changes_output() {
        let k1 = derive(b"password", b"salt", 32, 1000, HashAlgorithm::Sha256).unwrap();
        let k2 = derive(b"password", b"salt", 32, 1001, HashAlgorithm::Sha256).unwrap();
        let equal = k1.expose(|a| k2.expose(|b| a == b));
        assert!(!equal);
    }

    #[test]
    fn test_derive_output_length_exceeds_digest_size() {
        // 64-byte output from a 32-byte digest exercises multi-block extension
        let key = derive(b"password", b"salt", 64, 10, HashAlgorithm::Sha256).unwrap();
        assert_eq!(key.len(), 64);
    }

    #[test]
    fn test_derive_hash_algorithms_disagree() {
        let k1 = derive(b"password", b"salt", 32, 10, HashAlgorithm::Sha256).unwrap();
        let k2 = derive(b"password", b"salt", 32, 10, HashAlgorithm::Sha512).unwrap();
        let equal = k1.expose(|a| k2.expose(|b| a == b));
        assert!(!equal);
    }

    #[test]
    fn test_derive_rejects_empty_inputs() {
        for (password, salt) in [(&b""[..], &b"salt"[..]), (&b"pw"[..], &b""[..])] {
            let result = derive(password, salt, 32, 1000, HashAlgorithm::Sha256);
            assert!(matches!(
                result.unwrap_err(),
                SealboxError::InvalidParameter(_)
            ));
        }
    }

    #[test]
    fn test_derive_rejects_zero_iterations() {
        let result = derive(b"password", b"salt", 32, 0, HashAlgorithm::Sha256);
        assert!(matches!(
            result.unwrap_err(),
            SealboxError::InvalidParameter(_)
        ));
    }

    #[test]
    fn test_derive_rejects_zero_length() {
        let result = derive(b"password", b"salt", 0, 1000, HashAlgorithm::Sha256);
        assert!(matches!(
            result.unwrap_err(),
            SealboxError::InvalidParameter(_)
        ));
    }
}
