// src/storage/mod.rs
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cache::DocumentKey;
use crate::extractors::DocumentKind;
use crate::models::QuestionRecord;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
    written: RefCell<HashSet<PathBuf>>, // Question exports written by this manager
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path, written: RefCell::new(HashSet::new()) })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves the parsed questions as a pretty-printed JSON array, named after
    /// the source's stem and extension (`exam.pdf` -> `exam_pdf_questions.json`).
    /// Non-ASCII text is written as-is, not escaped.
    ///
    /// Files from earlier runs are overwritten, but a second source mapping to
    /// an export this manager already wrote is refused with `FileExists`.
    pub fn save_questions(&self, source_name: &str, questions: &[QuestionRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_questions.json", export_stem(source_name)));
        if !self.written.borrow_mut().insert(file_path.clone()) {
            tracing::warn!("{} would overwrite an export from this run", source_name);
            return Err(StorageError::FileExists(file_path.display().to_string()));
        }

        let json = to_json(questions)?;
        let mut file = fs::File::create(&file_path).map_err(StorageError::IoError)?;
        file.write_all(json.as_bytes()).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} questions to {}", questions.len(), file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about a parse run in JSON format
    pub fn save_metadata(
        &self,
        key: &DocumentKey,
        kind: DocumentKind,
        questions: &[QuestionRecord],
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_questions_meta.json", export_stem(&key.name)));

        let metadata = serde_json::json!({
            "source_file": key.name,
            "file_id": key.file_id(),
            "byte_length": key.len,
            "document_kind": kind.as_str(),
            "question_count": questions.len(),
            "first_number": questions.first().map(|q| q.number),
            "last_number": questions.last().map(|q| q.number),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }

    /// Reads a question export back, e.g. for a quiz front end.
    pub fn load_questions<P: AsRef<Path>>(&self, path: P) -> Result<Vec<QuestionRecord>, StorageError> {
        let path = path.as_ref();
        let full_path = if path.is_absolute() { path.to_path_buf() } else { self.base_dir.join(path) };

        let content = fs::read_to_string(&full_path).map_err(StorageError::IoError)?;
        let questions: Vec<QuestionRecord> = serde_json::from_str(&content)
            .map_err(|e| StorageError::SerializationError(format!("{}: {}", full_path.display(), e)))?;

        tracing::debug!("Loaded {} questions from {}", questions.len(), full_path.display());
        Ok(questions)
    }
}

/// Serializes records as a pretty-printed JSON array.
pub fn to_json(questions: &[QuestionRecord]) -> Result<String, StorageError> {
    serde_json::to_string_pretty(questions).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Base name for files derived from a source: stem plus lowercased extension,
/// e.g. `exam_pdf` for `uploads/exam.PDF`, or "document" if there is no stem.
pub fn export_stem(source_name: &str) -> String {
    let path = Path::new(source_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("document");

    match path.extension().and_then(|e| e.to_str()).filter(|e| !e.is_empty()) {
        Some(extension) => format!("{}_{}", stem, extension.to_ascii_lowercase()),
        None => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const SOURCE: &str = "QUESTION:2 Wie heißt die Hauptstadt?\nOption A: Berlin\nOption B: Köln\nOption C: München\nOption D: Hamburg\nCorrect Answer: A\nExplanation/Reference: Seit 1990.\nQUESTION:1 2+2?\nOption A: 3\nOption B: 4\nOption C: 5\nOption D: 6\nCorrect Answer: B\nExplanation/Reference: Arithmetik.";

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mcq_storage_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn test_export_preserves_non_ascii_and_order() {
        let json = to_json(&parse(SOURCE)).unwrap();
        assert!(json.contains("Köln"), "Non-ASCII should not be escaped: {}", json);
        assert!(json.find("\"number\": 1").unwrap() < json.find("\"number\": 2").unwrap());
    }

    #[test]
    fn test_save_and_load_questions() {
        let dir = temp_dir("roundtrip");
        let storage = StorageManager::new(&dir).unwrap();
        let questions = parse(SOURCE);

        let path = storage.save_questions("uploads/exam.pdf", &questions).unwrap();
        assert_eq!(path.file_name().unwrap(), "exam_pdf_questions.json");
        assert_eq!(storage.load_questions("exam_pdf_questions.json").unwrap(), questions);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_metadata() {
        let dir = temp_dir("meta");
        let storage = StorageManager::new(&dir).unwrap();
        let questions = parse(SOURCE);
        let key = DocumentKey::new("uploads/exam.docx", 2048);

        let path = storage.save_metadata(&key, DocumentKind::Docx, &questions).unwrap();
        assert_eq!(path.file_name().unwrap(), "exam_docx_questions_meta.json");
        let meta: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(meta["file_id"], "exam.docx_2048");
        assert_eq!(meta["document_kind"], "docx");
        assert_eq!(meta["question_count"], 2);
        assert_eq!(meta["first_number"], 1);
        assert_eq!(meta["last_number"], 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_names_do_not_collide() {
        let dir = temp_dir("collide");
        let storage = StorageManager::new(&dir).unwrap();
        let questions = parse(SOURCE);

        let pdf = storage.save_questions("a/exam.pdf", &questions).unwrap();
        let docx = storage.save_questions("a/exam.docx", &questions).unwrap();
        assert_ne!(pdf, docx);

        let err = storage.save_questions("b/exam.pdf", &questions).unwrap_err();
        assert!(matches!(err, StorageError::FileExists(_)), "Got {:?}", err);
        assert_eq!(storage.load_questions(&pdf).unwrap(), questions);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_stem() {
        assert_eq!(export_stem("uploads/Exam Dump.PDF"), "Exam Dump_pdf");
        assert_eq!(export_stem("notes"), "notes");
        assert_eq!(export_stem(""), "document");
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = temp_dir("bad");
        let storage = StorageManager::new(&dir).unwrap();
        fs::write(dir.join("broken.json"), "[{\"number\": 1}]").unwrap();
        assert!(matches!(
            storage.load_questions("broken.json"),
            Err(StorageError::SerializationError(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
