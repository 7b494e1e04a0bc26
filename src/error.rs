//! Error taxonomy shared by every core operation.

use std::path::PathBuf;

use crate::state::AnnotationId;

/// Coarse classification used by the shell to pick a notification style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file or video resource could not be opened, read or written.
    Io,
    /// User input failed a precondition.
    Validation,
    /// A single frame failed to decode.
    Decode,
    /// The referenced annotation does not exist.
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum AnnotatorError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load video {}: {reason}", path.display())]
    VideoOpen { path: PathBuf, reason: String },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{0}")]
    Validation(String),

    #[error("Frame {index} could not be decoded: {reason}")]
    Decode { index: u64, reason: String },

    #[error("Annotation {0} not found")]
    NotFound(AnnotationId),
}

impl AnnotatorError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::VideoOpen { .. } | Self::Csv { .. } => ErrorKind::Io,
            Self::MissingColumns(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_names_columns() {
        let err = AnnotatorError::MissingColumns(vec!["Category".into(), "Comment".into()]);
        assert_eq!(
            err.to_string(),
            "CSV file is missing required columns: Category, Comment"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_kinds() {
        let io = AnnotatorError::VideoOpen {
            path: PathBuf::from("a.mp4"),
            reason: "nope".into(),
        };
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(AnnotatorError::NotFound(AnnotationId(3)).kind(), ErrorKind::NotFound);
        assert_eq!(
            AnnotatorError::Decode { index: 1, reason: "eof".into() }.kind(),
            ErrorKind::Decode
        );
    }
}
