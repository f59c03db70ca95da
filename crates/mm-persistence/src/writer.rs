//! Flush-per-write CSV file writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::PersistenceResult;

/// Append-only CSV sink.
///
/// Creates the file with a header row, then appends one row per write and
/// flushes immediately so every record survives a crash of the next cycle.
#[derive(Debug)]
pub struct CsvWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CsvWriter {
    /// Create the file (truncating an existing one) and write the header.
    pub fn create(path: impl AsRef<Path>, header: &str) -> PersistenceResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "opening CSV log");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{header}")?;
        writer.flush()?;

        Ok(Self { path, writer })
    }

    /// Append one row and flush to disk.
    pub fn write_row(&mut self, row: &str) -> PersistenceResult<()> {
        writeln!(self.writer, "{row}")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CsvWriter {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!(?e, path = %self.path.display(), "failed to flush CSV log on drop");
        }
    }
}
