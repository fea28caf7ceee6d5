use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use log::debug;

use super::error::ArchiveError;

/// `strftime` pattern of archive file stems
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes raw batch uploads to timestamp-named files.
#[derive(Debug, Clone)]
pub struct ArchiveWriter {
    directory: PathBuf,
    extension: String,
}

impl ArchiveWriter {
    /// Archive into `directory` with the `csv` extension
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_extension(directory, "csv")
    }

    /// Archive into `directory` with a custom file extension
    pub fn with_extension(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    /// Archive directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path a batch received at `received_at` is archived under
    pub fn path_for(&self, received_at: DateTime<Local>) -> PathBuf {
        let stem = received_at.format(ARCHIVE_TIMESTAMP_FORMAT);
        self.directory.join(format!("{}.{}", stem, self.extension))
    }

    /// Archive `raw` under the current wall-clock time
    pub fn write(&self, raw: &str) -> Result<PathBuf, ArchiveError> {
        self.write_at(raw, Local::now())
    }

    /// Archive `raw` under `received_at`, replacing any file of the same name.
    pub fn write_at(&self, raw: &str, received_at: DateTime<Local>) -> Result<PathBuf, ArchiveError> {
        fs::create_dir_all(&self.directory).map_err(|source| ArchiveError::CreateDir {
            path: self.directory.clone(),
            source,
        })?;

        let path = self.path_for(received_at);
        fs::write(&path, raw).map_err(|source| ArchiveError::Write {
            path: path.clone(),
            source,
        })?;

        debug!("Archived {} bytes to {}", raw.len(), path.display());
        Ok(path)
    }

    /// List archived batches in chronological order.
    ///
    /// Files whose stem is not an archive timestamp are ignored.
    pub fn list(&self) -> Result<Vec<(DateTime<Local>, PathBuf)>, ArchiveError> {
        let entries = fs::read_dir(&self.directory).map_err(|source| ArchiveError::Read {
            path: self.directory.clone(),
            source,
        })?;

        let mut batches = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| ArchiveError::Read {
                    path: self.directory.clone(),
                    source,
                })?
                .path();

            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(received_at) = Self::received_at(&path) {
                batches.push((received_at, path));
            }
        }

        batches.sort();
        Ok(batches)
    }

    /// Receipt time encoded in an archive file name
    pub fn received_at(path: &Path) -> Option<DateTime<Local>> {
        let stem = path.file_stem()?.to_str()?;
        let naive = NaiveDateTime::parse_from_str(stem, ARCHIVE_TIMESTAMP_FORMAT).ok()?;
        Local.from_local_datetime(&naive).earliest()
    }
}
