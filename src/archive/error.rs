use std::path::PathBuf;

/// Errors from the raw batch archive
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The archive directory could not be created
    #[error("failed to create archive directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A batch file could not be written
    #[error("failed to write archive file {}: {source}", path.display())]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The archive directory could not be listed or a file could not be read
    #[error("failed to read archive {}: {source}", path.display())]
    Read {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
