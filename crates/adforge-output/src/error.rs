//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Export operation error.
///
/// Declined confirmations, cancellation and empty spaces are not errors;
/// they are reported through [`crate::ExportOutcome`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// The save port rejected a file.
    #[error("Failed to save {filename}")]
    Save {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// Building the zip archive failed.
    #[error("Failed to build archive")]
    Archive(#[from] zip::result::ZipError),

    /// Writing an entry into an in-memory buffer failed.
    #[error("Failed to write archive entry {entry}")]
    Entry {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be prepared.
    #[error("Failed to prepare output directory: {path}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Save { filename, source } => {
                format!("Could not save '{filename}': {source}")
            }
            Self::Archive(error) => format!("Could not build the zip archive: {error}"),
            Self::Entry { entry, .. } => format!("Could not add '{entry}' to the archive"),
            Self::OutputDir { path, .. } => format!(
                "Could not create the output folder {}. Check permissions and disk space.",
                path.display()
            ),
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
