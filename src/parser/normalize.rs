// src/parser/normalize.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// "Select one:" prompts can sit in the middle of a block and split a field in two.
static SELECT_ONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bSelect\s*one\s*[:：]\s*").expect("Failed to compile SELECT_ONE_RE")
});

// Every structural marker, each of which must begin its own line after normalization.
static MARKER_START_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)QUESTION\s*[:：]?\s*[0-9]+",
        r"(?i)Option\s*A\s*[:：]",
        r"(?i)Option\s*B\s*[:：]",
        r"(?i)Option\s*C\s*[:：]",
        r"(?i)Option\s*D\s*[:：]",
        r"(?i)Correct\s*Answer\s*[:：]\s*[ABCD]",
        r"(?i)Explanation/Reference\s*[:：]",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]+").expect("Failed to compile SPACE_RUN_RE")
});

// A URL that starts a line. Whether the line holds nothing else is decided in `strip_url_lines`.
static URL_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\nhttps?://\S+").expect("Failed to compile URL_LINE_RE")
});

static TRAILING_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://\S+\s*\z").expect("Failed to compile TRAILING_URL_RE")
});

/// Rewrites raw extracted text so that every marker is line-anchored.
///
/// Steps, in order:
/// 1. form feeds become newlines,
/// 2. "Select one:" prompts are dropped,
/// 3. a newline is inserted before any marker not already at a line start,
/// 4. runs of spaces/tabs collapse to one space (newlines are kept),
/// 5. URL-only lines and URLs trailing the whole text are removed.
///
/// Applying it to its own output changes nothing.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace('\x0c', "\n");
    let mut text = SELECT_ONE_RE.replace_all(&text, "").into_owned();

    for marker_re in MARKER_START_RE.iter() {
        text = break_before_matches(&text, marker_re);
    }

    let text = SPACE_RUN_RE.replace_all(&text, " ");
    let mut text = strip_url_lines(&text);
    strip_trailing_urls(&mut text);

    tracing::trace!("Normalized {} bytes of raw text into {} bytes", raw.len(), text.len());
    text
}

/// Inserts `\n` in front of every match of `re` that does not already start a line.
fn break_before_matches(text: &str, re: &Regex) -> String {
    let mut out = String::with_capacity(text.len() + 64);
    let mut copied = 0;

    for mat in re.find_iter(text) {
        out.push_str(&text[copied..mat.start()]);
        if mat.start() > 0 && !text[..mat.start()].ends_with('\n') {
            out.push('\n');
        }
        copied = mat.start();
    }

    out.push_str(&text[copied..]);
    out
}

/// Drops lines consisting of a single URL token.
///
/// Whitespace after the URL is consumed up to (not including) the last newline
/// of that run, so blank lines trailing a removed URL collapse as well.
fn strip_url_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(mat) = URL_LINE_RE.find_at(text, search_from) {
        let rest = &text[mat.end()..];
        let whitespace = &rest[..rest.len() - rest.trim_start().len()];

        match whitespace.rfind('\n') {
            Some(last_newline) => {
                out.push_str(&text[copied..mat.start()]);
                out.push('\n');
                // Resume on the kept newline: it may open another URL line.
                copied = mat.end() + last_newline;
                search_from = copied;
            }
            // Something else follows on the same line (or the text ends here).
            None => search_from = mat.end(),
        }
    }

    out.push_str(&text[copied..]);
    out
}

/// Removes URL tokens glued to the very end of the text.
fn strip_trailing_urls(text: &mut String) {
    while let Some(start) = TRAILING_URL_RE.find(text).map(|m| m.start()) {
        text.truncate(start);
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_feed_becomes_newline() {
        let out = normalize("page one\x0cpage two");
        assert_eq!(out, "page one\npage two");
    }

    #[test]
    fn test_select_one_prompts_removed() {
        let out = normalize("Pick the best fit. Select one: \nOption A: x");
        assert!(!out.to_lowercase().contains("select one"), "Prompt survived: {:?}", out);

        let full_width = normalize("Stem SELECT ONE： rest");
        assert_eq!(full_width, "Stem rest");
    }

    #[test]
    fn test_glued_markers_get_own_line() {
        let out = normalize("stem textOption A: 3Option B: 4option c：5Option D:6Correct Answer: BExplanation/Reference: why");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "stem text",
                "Option A: 3",
                "Option B: 4",
                "option c：5",
                "Option D:6",
                "Correct Answer: B",
                "Explanation/Reference: why",
            ]
        );
    }

    #[test]
    fn test_question_marker_without_colon() {
        let out = normalize("end of last explanation QUESTION 12 Next stem");
        assert_eq!(out, "end of last explanation \nQUESTION 12 Next stem");
    }

    #[test]
    fn test_marker_at_start_not_prefixed() {
        let out = normalize("QUESTION:1 stem");
        assert_eq!(out, "QUESTION:1 stem");
    }

    #[test]
    fn test_space_runs_collapse_but_newlines_survive() {
        let out = normalize("a   b\t\tc\n\n  d");
        assert_eq!(out, "a b c\n\n d");
    }

    #[test]
    fn test_url_only_lines_removed() {
        let out = normalize("Explanation/Reference: see docs\nhttps://example.com/a\nQUESTION:2 next");
        assert_eq!(out, "Explanation/Reference: see docs\n\nQUESTION:2 next");
    }

    #[test]
    fn test_consecutive_url_lines_removed() {
        let out = normalize("text\nhttp://one.example\nHTTPS://two.example\nmore");
        assert!(!out.contains("example"), "URL lines survived: {:?}", out);
        assert!(out.starts_with("text\n") && out.ends_with("\nmore"));
    }

    #[test]
    fn test_url_followed_by_text_kept() {
        let out = normalize("text\nhttps://example.com is cited here\nmore");
        assert!(out.contains("https://example.com is cited here"));
    }

    #[test]
    fn test_trailing_url_removed() {
        let out = normalize("Explanation/Reference: final words https://example.com/ref  \n");
        assert_eq!(out, "Explanation/Reference: final words ");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = "QUESTION:1 stemOption A: a Select one: Option B:  b\x0cOption C: c\nhttps://x.io\nOption D: dCorrect Answer: aExplanation/Reference: e https://y.io https://z.io";
        let once = normalize(raw);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }
}
