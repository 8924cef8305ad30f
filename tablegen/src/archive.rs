//! Zip packaging of generated files
//!
//! Archives are built completely in memory before anything reaches the
//! destination, so a failing entry never leaves a truncated archive behind.
//! Entry metadata is fixed (timestamp 1980-01-01, mode `0644`) and entries are
//! written in file-set order, which makes the output byte-identical for
//! identical input.

use std::io::{Cursor, Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::Result;
use crate::file_set::GeneratedFileSet;

/// MIME type of packaged archives
pub const ARCHIVE_MIME_TYPE: &str = "application/zip";

/// Entry compression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Deflate every entry
    #[default]
    Deflated,
    /// Store entries uncompressed
    Stored,
}

impl From<Compression> for CompressionMethod {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Deflated => Self::Deflated,
            Compression::Stored => Self::Stored,
        }
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "deflated" => Ok(Self::Deflated),
            "stored" => Ok(Self::Stored),
            other => Err(format!("unknown compression '{other}', expected deflated or stored")),
        }
    }
}

/// Packs generated file sets into zip archives
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchivePackager {
    compression: Compression,
}

impl ArchivePackager {
    /// Create a packager using `compression` for every entry
    #[must_use]
    pub const fn new(compression: Compression) -> Self {
        Self { compression }
    }

    /// Pack a file set into archive bytes
    ///
    /// Entry names equal the file-set paths and entry contents are the exact
    /// UTF-8 bytes of each file. An empty set yields a valid empty archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be written.
    pub fn pack(&self, files: &GeneratedFileSet) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default()
            .compression_method(self.compression.into())
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, content) in files.iter() {
            zip.start_file(path, options)?;
            zip.write_all(content.as_bytes())?;
        }
        let bytes = zip.finish()?.into_inner();

        tracing::debug!(
            entries = files.len(),
            bytes = bytes.len(),
            compression = ?self.compression,
            "packed archive"
        );
        Ok(bytes)
    }

    /// Pack a file set and write it to `writer` in one operation
    ///
    /// Nothing is written unless packing succeeded. Returns the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if packing fails or the writer fails.
    pub async fn write<W>(&self, files: &GeneratedFileSet, writer: &mut W) -> Result<usize>
    where
        W: AsyncWrite + Unpin,
    {
        let bytes = self.pack(files)?;
        writer.write_all(&bytes).await?;
        writer.flush().await?;
        Ok(bytes.len())
    }
}

/// Pack a file set with default compression
///
/// # Errors
///
/// Returns an error if the archive cannot be written.
pub fn pack(files: &GeneratedFileSet) -> Result<Vec<u8>> {
    ArchivePackager::default().pack(files)
}

/// Pack a file set with default compression and write it to `writer`
///
/// # Errors
///
/// Returns an error if packing fails or the writer fails.
pub async fn write_archive<W>(files: &GeneratedFileSet, writer: &mut W) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    ArchivePackager::default().write(files, writer).await
}

/// Read an archive back into a file set, in entry order
///
/// Directory entries are skipped.
///
/// # Errors
///
/// Returns an error if the bytes are not a zip archive or an entry is not
/// valid UTF-8.
pub fn unpack(bytes: &[u8]) -> Result<GeneratedFileSet> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut files = GeneratedFileSet::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        files.insert(entry.name(), content);
    }

    Ok(files)
}
