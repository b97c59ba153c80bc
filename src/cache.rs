// src/cache.rs
use std::collections::HashMap;
use std::path::Path;

use crate::models::QuestionRecord;

/// Identity of an uploaded document: its name plus byte length.
///
/// `name` may be a bare file name or a full path. Callers reading from disk
/// should pass the path, so same-named files in different folders stay apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub name: String,
    pub len: usize,
}

impl DocumentKey {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self { name: name.into(), len }
    }

    pub fn for_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(name, bytes.len())
    }

    /// Stable id such as `exam.pdf_48213`, built from the file name only.
    pub fn file_id(&self) -> String {
        let file_name = Path::new(&self.name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(self.name.as_str());
        format!("{}_{}", file_name, self.len)
    }
}

/// Memoized parse results, owned by the caller. Parsing is pure, so a hit is
/// always identical to a fresh parse of the same document.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<DocumentKey, Vec<QuestionRecord>>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DocumentKey) -> Option<&[QuestionRecord]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns the cached records for `key`, running `parse` on a miss.
    /// Errors are returned as-is and nothing is cached for them.
    pub fn get_or_parse<E, F>(&mut self, key: &DocumentKey, parse: F) -> Result<&[QuestionRecord], E>
    where
        F: FnOnce() -> Result<Vec<QuestionRecord>, E>,
    {
        if !self.entries.contains_key(key) {
            let records = parse()?;
            tracing::debug!("Caching {} questions for {}", records.len(), key.file_id());
            self.entries.insert(key.clone(), records);
        } else {
            tracing::debug!("Parse cache hit for {}", key.file_id());
        }
        Ok(self.entries.get(key).map(Vec::as_slice).unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
