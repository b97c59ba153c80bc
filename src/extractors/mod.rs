// src/extractors/mod.rs

// --- Imports ---
use crate::models::QuestionRecord;
use crate::parser;
use crate::utils::error::ExtractError;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "docx")]
pub mod docx;
#[cfg(feature = "pdf")]
pub mod pdf;

// --- Data Structures ---
/// Document formats with a text-extraction collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Infers the kind from a file name's extension.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

impl FromStr for DocumentKind {
    type Err = ExtractError;

    /// Accepts "pdf" / "docx" in any case, with or without a leading dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match kind.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            _ => Err(ExtractError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
        })
    }
}

// --- Extraction Collaborator ---
/// Converts a binary document into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Dispatches documents to their extraction collaborator and parses the result.
pub struct DocumentParser {
    pdf: Option<Box<dyn TextExtractor>>,
    docx: Option<Box<dyn TextExtractor>>,
}

impl DocumentParser {
    /// Registers every collaborator compiled into this build.
    #[allow(unused_mut)]
    pub fn new() -> Self {
        let mut parser = Self::empty();
        #[cfg(feature = "pdf")]
        {
            parser.pdf = Some(Box::new(pdf::PdfTextExtractor));
        }
        #[cfg(feature = "docx")]
        {
            parser.docx = Some(Box::new(docx::DocxTextExtractor));
        }
        parser
    }

    /// A parser with no collaborators; every document is `ExtractionUnavailable`.
    pub fn empty() -> Self {
        Self { pdf: None, docx: None }
    }

    pub fn with_pdf(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.pdf = Some(extractor);
        self
    }

    pub fn with_docx(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.docx = Some(extractor);
        self
    }

    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.extractor_for(kind).is_some()
    }

    /// Extracts the text of a document of the declared kind.
    pub fn extract_text(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
        let extractor = self.extractor_for(kind).ok_or_else(|| {
            tracing::warn!("No {} extractor registered", kind);
            ExtractError::ExtractionUnavailable {
                kind,
                reason: format!("rebuild with the `{}` feature or register an extractor", kind.as_str()),
            }
        })?;

        // Some backends (pdf-extract in particular) panic on malformed input instead of
        // returning an error; that must not take down a multi-document run.
        let text = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract_text(bytes))).map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::error!("{} extractor panicked: {}", kind, message);
            ExtractError::ExtractionFailed {
                kind,
                message: format!("extractor panicked: {}", message),
            }
        })??;
        tracing::info!("Extracted {} characters from {} document ({} bytes)", text.chars().count(), kind, bytes.len());
        Ok(text)
    }

    /// Extracts and parses a document whose kind is declared by the caller.
    pub fn parse_document(&self, bytes: &[u8], declared_kind: &str) -> Result<Vec<QuestionRecord>, ExtractError> {
        let kind: DocumentKind = declared_kind.parse()?;
        let text = self.extract_text(bytes, kind)?;
        Ok(parser::parse(&text))
    }

    /// Like `parse_document`, inferring the kind from the file name.
    pub fn parse_file(&self, filename: &str, bytes: &[u8]) -> Result<Vec<QuestionRecord>, ExtractError> {
        let kind = DocumentKind::from_filename(filename)?;
        tracing::info!("Parsing {} as {}", filename, kind);
        let text = self.extract_text(bytes, kind)?;
        Ok(parser::parse(&text))
    }

    fn extractor_for(&self, kind: DocumentKind) -> Option<&dyn TextExtractor> {
        match kind {
            DocumentKind::Pdf => self.pdf.as_deref(),
            DocumentKind::Docx => self.docx.as_deref(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}
