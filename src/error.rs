use thiserror::Error;

/// Core error types for the sealbox encryption engine
///
/// Every public operation settles into exactly one of these kinds.
/// Messages are human-readable and never contain key material,
/// passwords, or plaintext.
#[derive(Debug, Error)]
pub enum SealboxError {
    /// Key bytes are malformed or unusable for the selected cipher
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key length does not match any supported size for the algorithm
    #[error("Invalid key size: {0}")]
    InvalidKeySize(String),

    /// Invalid argument (bad length, unknown identifier, zero iterations, ...)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Authentication failure (AEAD tag mismatch, MAC mismatch, wrong key)
    #[error("Authentication failed: {0}")]
    AuthenticationFailure(String),

    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cipher primitive failure during encryption
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// Hash or HMAC primitive failure
    #[error("Digest error: {0}")]
    Digest(String),

    /// Key derivation failure
    #[error("Key derivation error: {0}")]
    Kdf(String),

    /// Unclassified failure
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl SealboxError {
    /// Stable machine-readable kind name, for callers that forward a
    /// (kind, message) pair across a plugin boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            SealboxError::InvalidKey(_) => "invalid_key",
            SealboxError::InvalidKeySize(_) => "invalid_key_size",
            SealboxError::InvalidParameter(_) => "invalid_parameter",
            SealboxError::AuthenticationFailure(_) => "authentication_failure",
            SealboxError::Io(_) => "io_error",
            SealboxError::Cipher(_) => "cipher_error",
            SealboxError::Digest(_) => "digest_error",
            SealboxError::Kdf(_) => "kdf_error",
            SealboxError::Unknown(_) => "unknown_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, SealboxError>;
