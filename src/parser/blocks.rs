// src/parser/blocks.rs

// --- Imports ---
use crate::models::OptionLabel;
use crate::parser::markers::{find_question_like, scan_markers, Marker, MarkerKind};

// --- Data Structures ---
/// Field spans of one well-formed block, borrowed from the normalized text.
/// Nothing here is trimmed or sanitized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub number: u32,
    pub stem: &'a str,
    pub options: [&'a str; 4], // In A..D order
    pub answer: OptionLabel,
    pub explanation: &'a str,
}

/// Walks the marker sequence of `text` and returns every well-formed block.
///
/// A block is QUESTION, Option A..D, Correct Answer, then Explanation/Reference.
/// Each field runs up to the next marker the block expects; any other marker on
/// the way is field text. Only a QUESTION marker or the end of input can cut a
/// block short, in which case it is dropped and scanning resumes at that
/// QUESTION, so no partial block ever comes out.
pub fn scan_blocks(text: &str) -> Vec<RawBlock<'_>> {
    let markers = scan_markers(text);
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while cursor < markers.len() {
        if !markers[cursor].is_question() {
            cursor += 1;
            continue;
        }

        match read_block(text, &markers, cursor) {
            Ok((block, next)) => {
                tracing::trace!("Block for question {} ends at marker #{}", block.number, next);
                blocks.push(block);
                cursor = next;
            }
            Err(stop) => {
                tracing::trace!(
                    "Skipping incomplete block at byte {}: cut short at marker #{}",
                    markers[cursor].start,
                    stop
                );
                cursor = stop.max(cursor + 1);
            }
        }
    }

    tracing::debug!("Found {} well-formed blocks among {} markers", blocks.len(), markers.len());
    blocks
}

/// Reads the block opened by `markers[start]`.
///
/// On success returns the block and the index of the next unread marker. On
/// failure returns the index of the QUESTION marker (or `markers.len()`) that
/// arrived before the block was complete.
fn read_block<'a>(
    text: &'a str,
    markers: &[Marker],
    start: usize,
) -> Result<(RawBlock<'a>, usize), usize> {
    let opening = markers[start];
    let MarkerKind::Question(number) = opening.kind else {
        return Err(start + 1);
    };

    let mut cursor = start + 1;
    let mut field_start = opening.end;

    // Each option marker closes the previous field: the stem, then A, B and C.
    let mut fields = [""; 4];
    for (slot, label) in OptionLabel::ALL.into_iter().enumerate() {
        let (index, ()) = find_next(markers, cursor, |i| {
            (markers[i].kind == MarkerKind::Option(label)).then_some(())
        })?;
        fields[slot] = &text[field_start..markers[index].start];
        field_start = markers[index].end;
        cursor = index + 1;
    }
    let [stem, option_a, option_b, option_c] = fields;

    // Option D runs to the first Correct Answer that sits right before the explanation.
    let (answer_index, answer) = find_next(markers, cursor, |i| answer_before_explanation(text, markers, i))?;
    let option_d = &text[field_start..markers[answer_index].start];
    let explanation_marker = markers[answer_index + 1];
    cursor = answer_index + 2;

    // The explanation swallows any non-QUESTION markers up to the next block or end of input.
    let next_question = markers[cursor..]
        .iter()
        .position(Marker::is_question)
        .map(|offset| cursor + offset);
    let span_end = next_question.map_or(text.len(), |i| markers[i].start);
    let span = &text[explanation_marker.end..span_end];
    let explanation = match find_question_like(span) {
        Some(cut) => &span[..cut],
        None => span,
    };

    let block = RawBlock {
        number,
        stem,
        options: [option_a, option_b, option_c, option_d],
        answer,
        explanation,
    };
    Ok((block, next_question.unwrap_or(markers.len())))
}

/// First marker at or after `from` accepted by `accept`, stopping at a QUESTION.
fn find_next<T>(
    markers: &[Marker],
    from: usize,
    mut accept: impl FnMut(usize) -> Option<T>,
) -> Result<(usize, T), usize> {
    for index in from..markers.len() {
        if markers[index].is_question() {
            return Err(index);
        }
        if let Some(found) = accept(index) {
            return Ok((index, found));
        }
    }
    Err(markers.len())
}

/// The answer letter if `markers[index]` is a Correct Answer followed by nothing
/// but whitespace and then Explanation/Reference.
fn answer_before_explanation(text: &str, markers: &[Marker], index: usize) -> Option<OptionLabel> {
    let MarkerKind::CorrectAnswer(label) = markers[index].kind else {
        return None;
    };
    let next = markers.get(index + 1)?;
    let adjacent = next.kind == MarkerKind::Explanation && text[markers[index].end..next.start].trim().is_empty();
    adjacent.then_some(label)
}
