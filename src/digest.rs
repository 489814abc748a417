use crate::error::{Result, SealboxError};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Closed enumeration of supported hash algorithms
///
/// Unknown identifiers fail at parse time with `InvalidParameter`;
/// there is no silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Parse a boundary identifier ("sha256", "sha384", "sha512")
    pub fn parse(id: &str) -> Result<Self> {
        match id {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(SealboxError::InvalidParameter(format!(
                "Unknown hash algorithm: {}",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Digest output length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

/// Hash a byte buffer with the selected algorithm
pub fn hash(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Keyed-hash message authentication code over a byte buffer
///
/// Any key length is accepted (HMAC pads or hashes the key as needed).
pub fn hmac(algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let setup_err =
        |e: hmac::digest::InvalidLength| SealboxError::Digest(format!("HMAC key setup failed: {}", e));

    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(setup_err)?;
            mac.update(data);
            Ok(mac.finalize().into_bytes().to_vec())
        }
        HashAlgorithm::Sha384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(key).map_err(setup_err)?;
            mac.update(data);
            Ok(mac.finalize().into_bytes().to_vec())
        }
        HashAlgorithm::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(setup_err)?;
            mac.update(data);
            Ok(mac.finalize().into_bytes().to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_identifiers() {
        assert_eq!(HashAlgorithm::parse("sha256").unwrap(), HashAlgorithm::Sha256);
        assert_eq!(HashAlgorithm::parse("sha384").unwrap(), HashAlgorithm::Sha384);
        assert_eq!(HashAlgorithm::parse("sha512").unwrap(), HashAlgorithm::Sha512);
    }

    #[test]
    fn test_parse_unknown_identifier_fails() {
        for id in ["md5", "sha1", "SHA256", ""] {
            let result = HashAlgorithm::parse(id);
            assert!(
                matches!(result.unwrap_err(), SealboxError::InvalidParameter(_)),
                "{:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn test_sha256_known_vector() {
        // FIPS 180-2 test vector for "abc"
        let digest = hash(HashAlgorithm::Sha256, b"abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(hash(HashAlgorithm::Sha256, b"x").len(), 32);
        assert_eq!(hash(HashAlgorithm::Sha384, b"x").len(), 48);
        assert_eq!(hash(HashAlgorithm::Sha512, b"x").len(), 64);
    }

    #[test]
    fn test_hmac_sha256_known_vector() {
        let tag = hmac(
            HashAlgorithm::Sha256,
            b"key",
            b"The quick brown fox jumps over the lazy dog",
        )
        .unwrap();
        assert_eq!(
            hex::encode(tag),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_hmac_lengths_match_digest() {
        for algorithm in [
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            let tag = hmac(algorithm, b"key", b"data").unwrap();
            assert_eq!(tag.len(), algorithm.digest_len());
        }
    }
}
