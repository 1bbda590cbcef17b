//! Per-file ingestion state machine
//!
//! A record starts in `Uploading` and can only move forward:
//! `Uploading -> Processing -> Completed`, or from either active state to
//! `Error`. Progress is cosmetic and never changes the status by itself.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Identifier of a file record within a session
pub type FileId = u64;

/// Opaque reference to a user-selected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub path: Option<PathBuf>,
    pub size_bytes: Option<u64>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            size_bytes: None,
        }
    }

    /// Build a handle from a path on disk, reading its size when available
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let size_bytes = std::fs::metadata(&path).ok().map(|m| m.len());
        Self {
            name,
            path: Some(path),
            size_bytes,
        }
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Lowercased extension taken from the file name
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Lifecycle status of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

impl FileStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, FileStatus::Completed | FileStatus::Error)
    }

    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FileStatus::Uploading => "uploading",
            FileStatus::Processing => "processing",
            FileStatus::Completed => "completed",
            FileStatus::Error => "error",
        };
        f.write_str(text)
    }
}

/// Tracked state of one uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub file: FileHandle,
    status: FileStatus,
    progress: u8,
    error: Option<String>,
}

impl FileRecord {
    /// A freshly selected file, `Uploading` at 0%
    pub fn new(id: FileId, file: FileHandle) -> Self {
        Self {
            id,
            file,
            status: FileStatus::Uploading,
            progress: 0,
            error: None,
        }
    }

    pub fn status(&self) -> FileStatus {
        self.status
    }

    /// Progress percentage; only meaningful while the record is active
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Advance cosmetic progress, clamped at 100
    pub fn advance(&mut self, step: u8) -> Result<(), SessionError> {
        if self.status.is_terminal() {
            return Err(self.invalid(self.status));
        }
        self.progress = self.progress.saturating_add(step).min(100);
        Ok(())
    }

    /// Upload phase finished: `Uploading -> Processing`, progress back to 0
    pub fn begin_processing(&mut self) -> Result<(), SessionError> {
        if self.status != FileStatus::Uploading {
            return Err(self.invalid(FileStatus::Processing));
        }
        self.status = FileStatus::Processing;
        self.progress = 0;
        Ok(())
    }

    /// Processing phase finished: `Processing -> Completed`
    pub fn complete(&mut self) -> Result<(), SessionError> {
        if self.status != FileStatus::Processing {
            return Err(self.invalid(FileStatus::Completed));
        }
        self.status = FileStatus::Completed;
        Ok(())
    }

    /// Fail an active record with a reason
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), SessionError> {
        if self.status.is_terminal() {
            return Err(self.invalid(FileStatus::Error));
        }
        self.status = FileStatus::Error;
        self.error = Some(reason.into());
        Ok(())
    }

    fn invalid(&self, to: FileStatus) -> SessionError {
        SessionError::InvalidTransition {
            from: self.status,
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FileRecord {
        FileRecord::new(1, FileHandle::new("resume.pdf"))
    }

    #[test]
    fn test_happy_path() {
        let mut rec = record();
        assert_eq!(rec.status(), FileStatus::Uploading);
        assert_eq!(rec.progress(), 0);

        rec.advance(10).unwrap();
        rec.advance(10).unwrap();
        assert_eq!(rec.progress(), 20);

        rec.begin_processing().unwrap();
        assert_eq!(rec.status(), FileStatus::Processing);
        assert_eq!(rec.progress(), 0);

        rec.advance(20).unwrap();
        rec.complete().unwrap();
        assert_eq!(rec.status(), FileStatus::Completed);
    }

    #[test]
    fn test_progress_never_changes_status() {
        let mut rec = record();
        for _ in 0..30 {
            rec.advance(10).unwrap();
        }
        assert_eq!(rec.progress(), 100);
        assert_eq!(rec.status(), FileStatus::Uploading);
    }

    #[test]
    fn test_skipping_processing_is_rejected() {
        let mut rec = record();
        let err = rec.complete().unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                from: FileStatus::Uploading,
                to: FileStatus::Completed
            }
        );
    }

    #[test]
    fn test_error_from_either_active_state() {
        let mut uploading = record();
        uploading.fail("too large").unwrap();
        assert_eq!(uploading.status(), FileStatus::Error);
        assert_eq!(uploading.error(), Some("too large"));

        let mut processing = record();
        processing.begin_processing().unwrap();
        processing.fail("unreadable").unwrap();
        assert_eq!(processing.status(), FileStatus::Error);
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut done = record();
        done.begin_processing().unwrap();
        done.complete().unwrap();
        assert!(done.advance(10).is_err());
        assert!(done.fail("late").is_err());
        assert!(done.begin_processing().is_err());

        let mut failed = record();
        failed.fail("bad").unwrap();
        assert!(failed.begin_processing().is_err());
        assert!(failed.complete().is_err());
        assert!(failed.fail("again").is_err());
        assert_eq!(failed.error(), Some("bad"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(FileHandle::new("Review_Q3.DOCX").extension().as_deref(), Some("docx"));
        assert_eq!(FileHandle::new("notes").extension(), None);
        assert_eq!(FileHandle::new(".bashrc").extension(), None);
    }
}
