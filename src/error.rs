use std::path::PathBuf;
use thiserror::Error;

/// The main error type for yolotidy operations.
#[derive(Debug, Error)]
pub enum YolotidyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read label list from {path}: {source}")]
    LabelListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source path {path} is not a directory")]
    SourceDirInvalid { path: PathBuf },

    #[error("Failed to read annotation file {path}: {source}")]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write annotation file {path}: {source}")]
    AnnotationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {from} to {to}: {source}")]
    PairMove {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported output mode: {0}")]
    UnsupportedOutput(String),
}
