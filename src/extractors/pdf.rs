// src/extractors/pdf.rs
use super::{DocumentKind, TextExtractor};
use crate::utils::error::ExtractError;

/// PDF text layer extraction backed by `pdf-extract`.
///
/// Scanned PDFs without a text layer come back (nearly) empty; there is no OCR.
/// Panics raised inside `pdf-extract` are caught by `DocumentParser::extract_text`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::ExtractionFailed {
            kind: DocumentKind::Pdf,
            message: e.to_string(),
        })
    }
}
