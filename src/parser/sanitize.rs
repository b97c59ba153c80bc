// src/parser/sanitize.rs
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_ANSWER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*Correct\s*Answer\s*[:：]\s*[ABCD]\s*$").expect("Failed to compile TRAILING_ANSWER_RE")
});

static TRAILING_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://\S+\s*$").expect("Failed to compile TRAILING_URL_RE")
});

/// Drops carriage returns and surrounding whitespace. Applied to every field.
pub fn clean_field(text: &str) -> String {
    text.replace('\r', "").trim().to_string()
}

/// Second pass over an option's text: strips a trailing `Correct Answer: X`
/// fragment, then a trailing URL, trimming after each.
///
/// An option that legitimately ends in that phrase loses it too.
pub fn sanitize_option(text: &str) -> String {
    let without_answer = TRAILING_ANSWER_RE.replace(text, "");
    let without_url = TRAILING_URL_RE.replace(without_answer.trim(), "");
    without_url.trim().to_string()
}
