// src/models/question.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the four fixed option labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in block order.
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    /// Case-insensitive conversion from a single letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single parsed multiple-choice question.
///
/// Records are built once per recognized block and never mutated afterwards;
/// answer state belongs to whoever renders the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Ordinal as declared in the source document.
    pub number: u32,
    /// Stem text, may be empty.
    pub question: String,
    /// A..D; a label may be missing.
    pub options: BTreeMap<OptionLabel, String>,
    pub answer: OptionLabel,
    /// Free text, may be empty.
    pub explanation: String,
}

impl QuestionRecord {
    /// Text of the option for `label`, or "" when the source omitted it.
    pub fn option(&self, label: OptionLabel) -> &str {
        self.options.get(&label).map(String::as_str).unwrap_or("")
    }

    /// Text of the correct option.
    pub fn answer_text(&self) -> &str {
        self.option(self.answer)
    }

    /// Options that actually carry text, in label order.
    pub fn present_options(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        self.options
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(label, text)| (*label, text.as_str()))
    }
}
