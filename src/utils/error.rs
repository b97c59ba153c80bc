// src/utils/error.rs
use crate::extractors::DocumentKind;
use thiserror::Error;

// Specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported file type '{0}'. Please provide a PDF or DOCX file.")]
    UnsupportedFormat(String),

    #[error("{kind} text extraction is unavailable: {reason}")]
    ExtractionUnavailable { kind: DocumentKind, reason: String },

    #[error("{kind} text extraction failed: {message}")]
    ExtractionFailed { kind: DocumentKind, message: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("File already exists: {0}")]
    FileExists(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No questions were parsed from {0}. Check the file formatting.")]
    NoQuestionsFound(String),

    #[error("Processing failed: {0}")]
    Processing(String),
}
