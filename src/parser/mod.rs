// src/parser/mod.rs
pub mod blocks;
pub mod markers;
pub mod normalize;
pub mod sanitize;

use crate::models::{OptionLabel, QuestionRecord};
use blocks::RawBlock;

pub use normalize::normalize;

/// Parses raw extracted text into question records sorted by question number.
///
/// Pure: the same input always yields the same output. Malformed blocks are
/// skipped; text without any well-formed block yields an empty vector.
pub fn parse(raw: &str) -> Vec<QuestionRecord> {
    let normalized = normalize(raw);
    let mut records: Vec<QuestionRecord> = blocks::scan_blocks(&normalized)
        .into_iter()
        .map(build_record)
        .collect();

    // Stable, so duplicate numbers keep document order.
    records.sort_by_key(|record| record.number);

    tracing::debug!("Parsed {} questions from {} bytes of text", records.len(), raw.len());
    records
}

fn build_record(block: RawBlock<'_>) -> QuestionRecord {
    let options = OptionLabel::ALL
        .into_iter()
        .zip(block.options)
        .map(|(label, text)| (label, sanitize::sanitize_option(&sanitize::clean_field(text))))
        .collect();

    QuestionRecord {
        number: block.number,
        question: sanitize::clean_field(block.stem),
        options,
        answer: block.answer,
        explanation: sanitize::clean_field(block.explanation),
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "QUESTION:1 What is 2+2?\nOption A: 3\nOption B: 4\nOption C: 5\nOption D: 6\nCorrect Answer: B\nExplanation/Reference: Basic arithmetic.";

    fn options_of(record: &QuestionRecord) -> Vec<&str> {
        OptionLabel::ALL.iter().map(|l| record.option(*l)).collect()
    }

    #[test]
    fn test_minimal_block() {
        let records = parse(MINIMAL);
        assert_eq!(records.len(), 1);
        let q = &records[0];
        assert_eq!(q.number, 1);
        assert_eq!(q.question, "What is 2+2?");
        assert_eq!(options_of(q), vec!["3", "4", "5", "6"]);
        assert_eq!(q.answer, OptionLabel::B);
        assert_eq!(q.explanation, "Basic arithmetic.");
    }

    #[test]
    fn test_glued_markers() {
        let raw = "QUESTION:1 What is 2+2? 4 is the answer.Option A: 3Option B: 4Option C: 5Option D: 6Correct Answer: BExplanation/Reference: text QUESTION:2 Capital of France?Option A: BerlinOption B: ParisOption C: RomeOption D: MadridCorrect Answer: bExplanation/Reference: Paris is the capital.";
        let records = parse(raw);
        assert_eq!(records.len(), 2, "Expected two records, got {:?}", records);

        assert_eq!(records[0].question, "What is 2+2? 4 is the answer.");
        assert_eq!(options_of(&records[0]), vec!["3", "4", "5", "6"]);
        assert_eq!(records[0].answer, OptionLabel::B);
        assert_eq!(records[0].explanation, "text");

        assert_eq!(records[1].number, 2);
        assert_eq!(records[1].question, "Capital of France?");
        assert_eq!(options_of(&records[1]), vec!["Berlin", "Paris", "Rome", "Madrid"]);
        assert_eq!(records[1].answer, OptionLabel::B);
        assert_eq!(records[1].explanation, "Paris is the capital.");
    }

    #[test]
    fn test_sorted_by_number() {
        let raw = MINIMAL.replace("QUESTION:1", "QUESTION:30")
            + "\n"
            + &MINIMAL.replace("QUESTION:1", "QUESTION:4")
            + "\n"
            + &MINIMAL.replace("QUESTION:1", "QUESTION:17");
        let numbers: Vec<u32> = parse(&raw).iter().map(|q| q.number).collect();
        assert_eq!(numbers, vec![4, 17, 30]);
    }

    #[test]
    fn test_option_trailing_url_removed() {
        let raw = MINIMAL.replace("Option B: 4", "Option B: 4 https://example.com/ref");
        let records = parse(&raw);
        assert_eq!(records[0].option(OptionLabel::B), "4");
    }

    #[test]
    fn test_empty_stem() {
        let raw = "QUESTION:5\nOption A: x\nOption B: y\nOption C: z\nOption D: w\nCorrect Answer: D\nExplanation/Reference: none";
        let records = parse(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].number, 5);
        assert_eq!(records[0].question, "");
        assert_eq!(records[0].answer, OptionLabel::D);
    }

    #[test]
    fn test_terminal_explanation_runs_to_end() {
        let raw = format!("{}\nSee chapter 4,\nparagraph two.", MINIMAL);
        let records = parse(&raw);
        assert_eq!(records[0].explanation, "Basic arithmetic.\nSee chapter 4,\nparagraph two.");
    }

    #[test]
    fn test_no_markers() {
        assert!(parse("Lorem ipsum dolor sit amet.\nNothing to see.").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_idempotent_over_normalize() {
        let raw = "noise\x0cQUESTION 2 Pick one Select one: Option A: a Option B: b\nhttps://ref.example\nOption C: cOption D: d Correct Answer: AExplanation/Reference: e\nQUESTION:1\nOption A: 1Option B: 2Option C: 3Option D: 4Correct Answer: DExplanation/Reference: last https://x.io";
        let once = normalize(raw);
        let twice = normalize(&once);
        assert_eq!(parse(&once), parse(&twice));
        assert_eq!(parse(&once).len(), 2);
    }

    #[test]
    fn test_select_one_inside_block() {
        let raw = "QUESTION:8 Which?\nSelect one:\nOption A: a\nOption B: b\nOption C: c\nOption D: d\nCorrect Answer: C\nExplanation/Reference: because";
        let records = parse(raw);
        assert_eq!(records[0].question, "Which?");
    }

    #[test]
    fn test_stray_answer_in_option_d_stripped() {
        let raw = "QUESTION:6 s\nOption A: a\nOption B: b\nOption C: c\nOption D: None of these Correct Answer: A\nCorrect Answer: C\nExplanation/Reference: e";
        let records = parse(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].option(OptionLabel::D), "None of these");
        assert_eq!(records[0].answer, OptionLabel::C);
    }

    #[test]
    fn test_unexpected_markers_stay_in_fields() {
        let raw = "QUESTION:2 Given Option B: from earlier, pick\nOption A: a\nOption B: see Explanation/Reference: x\nOption C: c\nOption D: Both\nOption A: and C\nCorrect Answer: D\nExplanation/Reference: e";
        let records = parse(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Given \nOption B: from earlier, pick");
        assert_eq!(records[0].option(OptionLabel::B), "see \nExplanation/Reference: x");
        assert_eq!(records[0].option(OptionLabel::D), "Both\nOption A: and C");
        assert_eq!(records[0].answer, OptionLabel::D);
    }

    #[test]
    fn test_full_width_and_lowercase_markers() {
        let raw = "question：3 多少？\noption a：一\noption b：二\noption c：三\noption d：四\ncorrect answer：a\nexplanation/reference：因为";
        let records = parse(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "多少？");
        assert_eq!(records[0].option(OptionLabel::A), "一");
        assert_eq!(records[0].answer, OptionLabel::A);
        assert_eq!(records[0].explanation, "因为");
    }
}
