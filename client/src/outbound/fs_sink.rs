//! Capability-scoped directory sink for downloaded payloads.
//!
//! Writes go through a `cap_std::fs::Dir` handle opened per save, so the sink
//! can never escape its configured directory.

use std::io::Write;
use std::path::PathBuf;

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{FilePayload, FileSink, FileSinkError};

/// File sink that writes each payload into one directory, overwriting any
/// previous file of the same name.
pub struct DirFileSink {
    directory: PathBuf,
}

impl DirFileSink {
    /// Create a sink rooted at `directory`.
    ///
    /// The directory is opened on each save, so it may be created after the
    /// sink is built.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn saved_path(&self, payload: &FilePayload) -> String {
        self.directory.join(&payload.filename).display().to_string()
    }
}

impl FileSink for DirFileSink {
    fn save(&self, payload: &FilePayload) -> Result<(), FileSinkError> {
        let directory =
            Dir::open_ambient_dir(&self.directory, ambient_authority()).map_err(|error| {
                FileSinkError::write(format!(
                    "open output directory '{}': {error}",
                    self.directory.display()
                ))
            })?;
        let mut file = directory.create(&payload.filename).map_err(|error| {
            FileSinkError::write(format!("create '{}': {error}", self.saved_path(payload)))
        })?;
        file.write_all(&payload.bytes).map_err(|error| {
            FileSinkError::write(format!("write '{}': {error}", self.saved_path(payload)))
        })?;
        file.flush().map_err(|error| {
            FileSinkError::write(format!("flush '{}': {error}", self.saved_path(payload)))
        })
    }
}
