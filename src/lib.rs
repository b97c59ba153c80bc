// src/lib.rs
//! Extracts multiple-choice questions from text pulled out of PDF and DOCX files.
//!
//! Pipeline: document bytes -> [`extractors`] -> raw text -> [`parser::normalize`]
//! -> marker scan -> block walk -> option cleanup -> records sorted by number.

pub mod cache;
pub mod extractors;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

pub use cache::{DocumentKey, ParseCache};
pub use extractors::{DocumentKind, DocumentParser, TextExtractor};
pub use models::{OptionLabel, QuestionRecord};
pub use parser::{normalize, parse};
pub use utils::{AppError, ExtractError, StorageError};
