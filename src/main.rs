// src/main.rs
use std::path::{Path, PathBuf};

use clap::Parser;
use mcq_extractor::storage::{export_stem, to_json, StorageManager};
use mcq_extractor::utils::{self, marker_debug, AppError};
use mcq_extractor::{normalize, DocumentKey, DocumentKind, DocumentParser, ParseCache};

/// Command Line Interface for the MCQ extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PDF or DOCX files to parse
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Declared document kind (pdf or docx); inferred from each file's extension if omitted
    #[arg(short, long)]
    kind: Option<String>,

    /// Output directory for the exported questions
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Print the questions as JSON to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Debug mode - save normalized text and a marker report per document
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting processing for args: {:?}", args);

    // Validate a declared kind once, up front.
    let declared_kind = args
        .kind
        .as_deref()
        .map(str::parse::<DocumentKind>)
        .transpose()?;

    // 3. Initialize storage (not needed when streaming to stdout)
    let storage = if args.stdout { None } else { Some(StorageManager::new(&args.output_dir)?) };

    // 4. Initialize the document parser with every compiled-in extractor
    let document_parser = DocumentParser::new();
    let mut cache = ParseCache::new();

    // 5. Process each input
    let mut success_count = 0;
    let mut failure_count = 0;

    for input in &args.inputs {
        match process_input(input, declared_kind, &document_parser, &mut cache, storage.as_ref(), &args) {
            Ok(count) => {
                tracing::info!("Parsed {} questions from {}", count, input.display());
                success_count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", input.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!("Failed to parse questions from any of {} files", failure_count)));
    }

    Ok(())
}

fn process_input(
    input: &Path,
    declared_kind: Option<DocumentKind>,
    document_parser: &DocumentParser,
    cache: &mut ParseCache,
    storage: Option<&StorageManager>,
    args: &Args,
) -> Result<usize, AppError> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::Config(format!("Input path has no usable file name: {}", input.display())))?;
    let kind = match declared_kind {
        Some(kind) => kind,
        None => DocumentKind::from_filename(name)?,
    };

    let bytes = std::fs::read(input)?;
    tracing::info!("Read {} ({} bytes)", input.display(), bytes.len());
    // Keyed on the full path: same-named files in different folders are different documents.
    let key = DocumentKey::for_bytes(input.to_string_lossy(), &bytes);

    let questions = cache
        .get_or_parse(&key, || {
            let text = document_parser.extract_text(&bytes, kind)?;
            if args.debug {
                let debug_dir = Path::new(&args.output_dir).join("debug");
                if let Err(e) = marker_debug::save_debug_text(&normalize(&text), &debug_dir, &export_stem(name)) {
                    tracing::warn!("Failed to save debug text: {}", e);
                }
            }
            Ok::<_, AppError>(mcq_extractor::parse(&text))
        })?
        .to_vec();

    if questions.is_empty() {
        return Err(AppError::NoQuestionsFound(name.to_string()));
    }

    match storage {
        Some(storage) => {
            storage.save_questions(name, &questions)?;
            if let Err(e) = storage.save_metadata(&key, kind, &questions) {
                tracing::error!("Failed to save metadata: {}", e);
            }
        }
        None => println!("{}", to_json(&questions)?),
    }

    Ok(questions.len())
}
