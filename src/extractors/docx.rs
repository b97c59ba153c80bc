// src/extractors/docx.rs

// --- Imports ---
use super::{DocumentKind, TextExtractor};
use crate::utils::error::ExtractError;
use roxmltree::{Document, Node};
use std::io::{Cursor, Read};

// --- Constants ---
const DOCUMENT_PART: &str = "word/document.xml";
const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// DOCX text extraction straight from the OOXML package.
///
/// Output is every non-empty body paragraph, then every non-empty table cell
/// (row-major, one per line), joined by newlines.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let xml = read_document_part(bytes)?;
        let document = Document::parse(&xml).map_err(|e| failed(format!("{} is not valid XML: {}", DOCUMENT_PART, e)))?;

        let body = document
            .root_element()
            .children()
            .find(|n| is_w(n, "body"))
            .ok_or_else(|| failed(format!("{} has no w:body element", DOCUMENT_PART)))?;

        let mut parts: Vec<String> = body
            .children()
            .filter(|n| is_w(n, "p"))
            .map(paragraph_text)
            .filter(|text| !text.is_empty())
            .collect();

        for table in body.children().filter(|n| is_w(n, "tbl")) {
            for row in table.children().filter(|n| is_w(n, "tr")) {
                for cell in row.children().filter(|n| is_w(n, "tc")) {
                    let text = cell_text(cell);
                    let text = text.trim();
                    if !text.is_empty() {
                        parts.push(text.to_string());
                    }
                }
            }
        }

        tracing::debug!("DOCX body yielded {} text parts", parts.len());
        Ok(parts.join("\n"))
    }
}

/// Reads `word/document.xml` out of the zip container.
fn read_document_part(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| failed(format!("not a DOCX (zip) container: {}", e)))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| failed(format!("missing {}: {}", DOCUMENT_PART, e)))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| failed(format!("could not read {}: {}", DOCUMENT_PART, e)))?;
    Ok(xml)
}

/// Text of one paragraph: its runs concatenated, tabs and breaks kept.
fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    for node in paragraph.descendants().filter(Node::is_element) {
        if node.tag_name().namespace() != Some(WORDML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "t" => text.push_str(node.text().unwrap_or_default()),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
    text
}

/// Text of one table cell: its paragraphs joined by newlines.
fn cell_text(cell: Node) -> String {
    cell.descendants()
        .filter(|n| is_w(n, "p"))
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_w(node: &Node, name: &str) -> bool {
    node.is_element() && node.has_tag_name((WORDML_NS, name))
}

fn failed(message: String) -> ExtractError {
    ExtractError::ExtractionFailed { kind: DocumentKind::Docx, message }
}
