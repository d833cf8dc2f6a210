/*!
 * Error types for the papersort application.
 *
 * Template rejections live in `validation::verdict`; this module holds the
 * errors raised around them: reading the document, moving it into place,
 * and the application-level wrapper that the controller turns into
 * user-facing messages.
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::Rejection;

/// Errors that can occur while reading the first page of a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// The document has no pages or cannot be parsed
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),
}

/// Errors that can occur when relocating a document
#[derive(Error, Debug)]
pub enum FileError {
    /// The underlying filesystem operation failed
    #[error("Failed to move {source_path:?} into {target_dir:?}: {reason}")]
    MoveFailed {
        /// File that was being moved
        source_path: PathBuf,
        /// Directory it was being moved into
        target_dir: PathBuf,
        /// Description of the filesystem failure
        reason: String,
    },
}

impl FileError {
    pub(crate) fn move_failed(
        source_path: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        Self::MoveFailed {
            source_path: source_path.into(),
            target_dir: target_dir.into(),
            reason: reason.to_string(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The document was refused at the intake boundary
    #[error("Only .{allowed} files are accepted: {path:?}")]
    DisallowedExtension {
        path: PathBuf,
        allowed: String,
    },

    /// The first page could not be read
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The first page does not match the template
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The document could not be moved into its folder
    #[error(transparent)]
    File(#[from] FileError),
}
