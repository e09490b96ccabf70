//! In-memory OPC package (zip) writer.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Collects package parts into a zip archive held in memory.
pub struct PackageWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    parts: usize,
}

impl PackageWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            parts: 0,
        }
    }

    /// Add a part; `name` is the zip entry name without a leading slash.
    pub fn add_part(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.zip
            .start_file(name, self.options)
            .with_context(|| format!("failed to start package part {name}"))?;
        self.zip
            .write_all(data)
            .with_context(|| format!("failed to write package part {name}"))?;
        self.parts += 1;
        Ok(())
    }

    pub fn part_count(&self) -> usize {
        self.parts
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .context("failed to finalize presentation package")?;
        Ok(cursor.into_inner())
    }
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}
