//! Chunked file encryption and decryption.
//!
//! Drives the envelope ciphers through file-like streams: input is read
//! in fixed-size chunks, the nonce/IV header is written before any
//! ciphertext, and output is written in chunks. Authenticity applies to
//! the whole file; no unauthenticated plaintext is ever written to the
//! output stream during decryption.
//!
//! Storage access goes through [`FileStreamProvider`], so callers on
//! sandboxed platforms can substitute a content-resolver-backed
//! implementation without touching the cipher logic.

use crate::cipher::CipherAlgorithm;
use crate::error::{Result, SealboxError};
use crate::key::KeyMaterial;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Chunk size for stream reads and writes
pub const CHUNK_SIZE: usize = 8192;

/// Resolves a path into a readable or writable byte stream
///
/// The core never embeds storage-permission logic; platform fallbacks
/// (content resolvers, document providers) live behind this seam.
pub trait FileStreamProvider {
    type Reader: Read;
    type Writer: Write;

    /// Open a readable stream for the given path
    fn open_input(&self, path: &Path) -> Result<Self::Reader>;

    /// Create a writable stream for the given path, truncating any
    /// existing content
    fn create_output(&self, path: &Path) -> Result<Self::Writer>;

    /// Remove a previously created output after a failed operation
    fn discard_output(&self, path: &Path) -> Result<()>;
}

/// Direct local-filesystem provider
pub struct LocalFiles;

impl FileStreamProvider for LocalFiles {
    type Reader = BufReader<File>;
    type Writer = BufWriter<File>;

    fn open_input(&self, path: &Path) -> Result<Self::Reader> {
        let file = File::open(path).map_err(|e| {
            SealboxError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open input file: {}", e),
            ))
        })?;
        Ok(BufReader::new(file))
    }

    fn create_output(&self, path: &Path) -> Result<Self::Writer> {
        let file = File::create(path).map_err(|e| {
            SealboxError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create output file: {}", e),
            ))
        })?;
        Ok(BufWriter::new(file))
    }

    fn discard_output(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path)?;
        Ok(())
    }
}

/// Read a stream to completion in `CHUNK_SIZE` steps
fn read_chunked<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        data.extend_from_slice(&buffer[..bytes_read]);
    }
    Ok(data)
}

/// Write a buffer to a stream in `CHUNK_SIZE` steps and flush
fn write_chunked<W: Write>(writer: &mut W, data: &[u8]) -> Result<()> {
    for chunk in data.chunks(CHUNK_SIZE) {
        writer.write_all(chunk)?;
    }
    writer.flush()?;
    Ok(())
}

/// Encrypt a readable stream into a writable stream
///
/// The envelope begins with the nonce/IV header, so the header reaches
/// the output before any ciphertext bytes. `nonce` is only accepted by
/// the AEAD generation; see [`CipherAlgorithm::encrypt_with_nonce`].
///
/// The whole message is sealed under a single authentication tag, so
/// the output is byte-identical to a buffer `encrypt` of the same
/// content under the same key and nonce.
pub fn encrypt_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    key: &KeyMaterial,
    algorithm: CipherAlgorithm,
    nonce: Option<&[u8]>,
) -> Result<()> {
    let plaintext = read_chunked(reader)?;
    debug!(
        bytes = plaintext.len(),
        algorithm = algorithm.name(),
        "encrypting stream"
    );

    let envelope = match nonce {
        Some(nonce) => algorithm.encrypt_with_nonce(&plaintext, key, nonce)?,
        None => algorithm.encrypt(&plaintext, key)?,
    };

    write_chunked(writer, &envelope)
}

/// Decrypt a readable stream into a writable stream
///
/// The ciphertext is read to completion and authenticated before any
/// plaintext is written; on tag or MAC mismatch nothing reaches the
/// output stream.
pub fn decrypt_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    key: &KeyMaterial,
    algorithm: CipherAlgorithm,
) -> Result<()> {
    let envelope = read_chunked(reader)?;
    debug!(
        bytes = envelope.len(),
        algorithm = algorithm.name(),
        "decrypting stream"
    );

    let plaintext = algorithm.decrypt(&envelope, key)?;
    write_chunked(writer, &plaintext)
}

/// Encrypt a file, resolving paths through the given provider
///
/// On failure after the output was created, the partial output is
/// removed (best effort) and must be treated as invalid either way.
pub fn encrypt_file<P: FileStreamProvider>(
    provider: &P,
    input: &Path,
    output: &Path,
    key: &KeyMaterial,
    algorithm: CipherAlgorithm,
    nonce: Option<&[u8]>,
) -> Result<()> {
    let mut reader = provider.open_input(input)?;
    let status = {
        let mut writer = provider.create_output(output)?;
        encrypt_stream(&mut reader, &mut writer, key, algorithm, nonce)
    };

    if let Err(err) = status {
        remove_partial_output(provider, output);
        return Err(err);
    }
    Ok(())
}

/// Decrypt a file, resolving paths through the given provider
///
/// Same partial-output policy as [`encrypt_file`].
pub fn decrypt_file<P: FileStreamProvider>(
    provider: &P,
    input: &Path,
    output: &Path,
    key: &KeyMaterial,
    algorithm: CipherAlgorithm,
) -> Result<()> {
    let mut reader = provider.open_input(input)?;
    let status = {
        let mut writer = provider.create_output(output)?;
        decrypt_stream(&mut reader, &mut writer, key, algorithm)
    };

    if let Err(err) = status {
        remove_partial_output(provider, output);
        return Err(err);
    }
    Ok(())
}

fn remove_partial_output<P: FileStreamProvider>(provider: &P, output: &Path) {
    if let Err(cleanup_err) = provider.discard_output(output) {
        warn!(
            path = %output.display(),
            error = %cleanup_err,
            "failed to remove partial output file"
        );
    }
}
