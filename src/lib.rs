//! sealbox - Symmetric Authenticated-Encryption Core
//!
//! The cryptographic core shared by independently built platform
//! front-ends: key generation and derivation, authenticated ciphertext
//! envelopes, and chunked file ciphers, with a bit-exact wire format
//! on every platform.
//!
//! Formats:
//! - AEAD envelope (current): `nonce(12) ‖ ciphertext ‖ tag(16)`, AES-GCM
//! - Legacy envelope (compatibility): `iv(16) ‖ cbc(mac(32) ‖ plaintext)`,
//!   `mac = SHA256(key ‖ plaintext)`, constant-time verified
//!
//! # Security Features
//! - Key material zeroized on drop, never cloned, never logged
//! - Fresh OS-CSPRNG nonce/IV per call unless explicitly predefined
//! - Decryption never yields unauthenticated plaintext
//!
//! # Architecture
//! - `error`: error taxonomy and result alias
//! - `key`: key material wrapper and key generation
//! - `digest`: hash and HMAC provider
//! - `kdf`: PBKDF2 key derivation
//! - `aead` / `legacy`: the two envelope cipher generations
//! - `cipher`: closed algorithm enumeration and dispatch
//! - `stream`: chunked file cipher over injectable file streams
//! - `ops`: one function per boundary operation
//!
//! # Example
//! ```rust,ignore
//! use sealbox::{ops, CipherAlgorithm};
//!
//! let key = ops::generate_secret_key(256)?;
//! let envelope = ops::encrypt(b"hello", &key, CipherAlgorithm::AesGcm)?;
//! let plaintext = ops::decrypt(&envelope, &key, CipherAlgorithm::AesGcm)?;
//! ```
//!
//! All operations are synchronous and CPU-bound; callers on UI-bound
//! threads are expected to dispatch them onto a worker. Cipher state is
//! constructed fresh per call, so the free functions are safe to invoke
//! from multiple threads at once.

pub mod aead;
pub mod cipher;
pub mod digest;
pub mod error;
pub mod kdf;
pub mod key;
pub mod legacy;
pub mod ops;
pub mod stream;

// Re-export commonly used types
pub use cipher::CipherAlgorithm;
pub use digest::HashAlgorithm;
pub use error::{Result, SealboxError};
pub use key::KeyMaterial;
pub use stream::{FileStreamProvider, LocalFiles, CHUNK_SIZE};
