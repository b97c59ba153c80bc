// src/parser/markers.rs

// --- Imports ---
use crate::models::OptionLabel;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// One alternation per marker kind, scanned in a single left-to-right pass.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)",
        r"(?P<question>QUESTION\s*[:：]?\s*(?P<number>[0-9]+))",
        r"|(?P<option>Option\s*(?P<label>[ABCD])\s*[:：])",
        r"|(?P<answer>Correct\s*Answer\s*[:：]\s*(?P<letter>[ABCD]))",
        r"|(?P<explanation>Explanation/Reference\s*[:：])",
    ))
    .expect("Failed to compile MARKER_RE")
});

// Looser than a QUESTION marker: "Q12", "q: 3". Only used to end an explanation.
static QUESTION_LIKE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bQ(?:UESTION)?\s*[:：]?\s*[0-9]+").expect("Failed to compile QUESTION_LIKE_RE")
});

// --- Data Structures ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Question(u32),
    Option(OptionLabel),
    CorrectAnswer(OptionLabel),
    Explanation,
}

/// A marker occurrence in normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub start: usize, // Byte offset of the keyword
    pub end: usize,   // Byte offset just past the marker; field text begins here
}

impl Marker {
    pub fn is_question(&self) -> bool {
        matches!(self.kind, MarkerKind::Question(_))
    }
}

/// Finds every marker in `text`, in document order.
///
/// A QUESTION marker whose number does not fit in `u32` is dropped; its text is
/// left to whichever field surrounds it.
pub fn scan_markers(text: &str) -> Vec<Marker> {
    let markers: Vec<Marker> = MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = if let Some(number) = caps.name("number") {
                match number.as_str().parse::<u32>() {
                    Ok(n) => MarkerKind::Question(n),
                    Err(e) => {
                        tracing::trace!("Ignoring QUESTION marker at {} ({}): {}", whole.start(), number.as_str(), e);
                        return None;
                    }
                }
            } else if let Some(label) = caps.name("label") {
                MarkerKind::Option(label_of(label.as_str())?)
            } else if let Some(letter) = caps.name("letter") {
                MarkerKind::CorrectAnswer(label_of(letter.as_str())?)
            } else {
                MarkerKind::Explanation
            };
            Some(Marker { kind, start: whole.start(), end: whole.end() })
        })
        .collect();

    tracing::trace!("Scanned {} markers", markers.len());
    markers
}

/// Offset of the first QUESTION-like token in `text`, if any.
pub fn find_question_like(text: &str) -> Option<usize> {
    QUESTION_LIKE_RE.find(text).map(|m| m.start())
}

fn label_of(s: &str) -> Option<OptionLabel> {
    s.chars().next().and_then(OptionLabel::from_letter)
}
