// src/utils/marker_debug.rs
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::markers::{scan_markers, Marker, MarkerKind};
use crate::utils::error::AppError;

/// Normalized text with every recognized marker wrapped in `[[...]]`.
pub fn annotate_markers(normalized: &str) -> String {
    let markers = scan_markers(normalized);
    let mut out = String::with_capacity(normalized.len() + markers.len() * 4);
    let mut last_pos = 0;

    for marker in &markers {
        out.push_str(&normalized[last_pos..marker.start]);
        out.push_str("[[");
        out.push_str(&normalized[marker.start..marker.end]);
        out.push_str("]]");
        last_pos = marker.end;
    }
    out.push_str(&normalized[last_pos..]);
    out
}

/// One line per marker: line number, byte offset, kind and the matched text.
pub fn marker_report(normalized: &str) -> String {
    let markers = scan_markers(normalized);
    let mut report = format!("{} markers\n", markers.len());

    for marker in &markers {
        let line = normalized[..marker.start].matches('\n').count() + 1;
        // Writing to a String cannot fail.
        let _ = writeln!(
            report,
            "{:>6} {:>9}  {:<16} {}",
            line,
            marker.start,
            describe(marker),
            normalized[marker.start..marker.end].replace('\n', " ")
        );
    }
    report
}

/// Writes the normalized text, its annotated copy and the marker report into `debug_dir`.
pub fn save_debug_text(normalized: &str, debug_dir: &Path, stem: &str) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(debug_dir)?;

    let outputs = [
        (format!("{}_normalized.txt", stem), normalized.to_string()),
        (format!("{}_annotated.txt", stem), annotate_markers(normalized)),
        (format!("{}_markers.txt", stem), marker_report(normalized)),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (name, content) in outputs {
        let path = debug_dir.join(name);
        fs::write(&path, content)?;
        tracing::info!("Saved debug text to {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn describe(marker: &Marker) -> String {
    match marker.kind {
        MarkerKind::Question(n) => format!("question {}", n),
        MarkerKind::Option(label) => format!("option {}", label),
        MarkerKind::CorrectAnswer(label) => format!("answer {}", label),
        MarkerKind::Explanation => "explanation".to_string(),
    }
}
