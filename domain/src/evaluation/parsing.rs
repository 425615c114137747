//! Judge reply parsing.
//!
//! Extracts a [`ParsedJudgment`] from the free-form text returned by the
//! judge model. The reply is asked to follow an `Evaluation:` /
//! `Total Rating:` template, but nothing binds the model to it, so parsing is
//! a tolerant marker search rather than a grammar:
//!
//! | Marker | Label (case-insensitive) | Priority |
//! |--------|--------------------------|----------|
//! | Feedback | `Evaluation:` / `Feedback:` (optional `*` around the colon) | n/a |
//! | Rating | `Total Rating` (space, `_` or `-` between words) | 1 |
//! | Rating | `Rating` | 2 |
//! | Rating | `Score` | 3 |
//!
//! A rating label is the word followed by a colon (`Rating:`, `**Score:**`),
//! or the word opening a line, optionally behind `#` or `*` (`### Score 4`).
//! The same word inside a sentence is prose, not a label.
//!
//! The rating is the first run of ASCII digits on the label's line, provided
//! no letter comes before it. Labels are tried in priority order and in
//! reading order within a priority; a label with no such value falls through
//! to the next one.
//!
//! Pure text in, struct out: no I/O and no hidden state.

use super::judgment::ParsedJudgment;
use regex::Regex;
use std::sync::LazyLock;

static FEEDBACK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:evaluation|feedback)\b[ \t*]*:[ \t*]*").expect("valid feedback marker")
});

static RATING_LABELS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        rating_label(r"total[ \t_-]*rating"),
        rating_label("rating"),
        rating_label("score"),
    ]
});

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid integer pattern"));

/// A label is the word at line start (after `#`/`*`/blanks, separator
/// optional) or anywhere when a colon follows it. The value may sit on the
/// next line.
fn rating_label(word: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)(?:^[ \t#*]*{word}\b[ \t*]*[:=-]?|\b{word}\b[ \t*]*:)[ \t*]*(?:\r?\n[ \t*]*)?"
    ))
    .expect("valid rating label")
}

/// Parse a judge reply into feedback and an optional rating.
///
/// - No rating label: the whole trimmed reply is the feedback and the
///   rating is absent.
/// - Rating label present: the rating is the value of the first label that
///   carries one (absent if none does, or it overflows `i64`). Out-of-range
///   values such as `7` are returned unchanged.
/// - Feedback marker present: the feedback is the text after it, up to the
///   next rating label.
/// - Feedback marker absent: the feedback is the text before the first
///   rating label.
///
/// # Examples
///
/// ```
/// use judge_domain::evaluation::parsing::parse_judge_response;
///
/// let judgment = parse_judge_response("Evaluation: Good answer.\nTotal rating: 3");
/// assert_eq!(judgment.feedback, "Good answer.");
/// assert_eq!(judgment.rating, Some(3));
/// ```
pub fn parse_judge_response(raw: &str) -> ParsedJudgment {
    let Some(first_label) = next_label_start(raw, 0) else {
        return ParsedJudgment::new(raw.trim(), None);
    };

    let feedback = match FEEDBACK_MARKER.find(raw) {
        Some(marker) => {
            let end = next_label_start(raw, marker.end()).unwrap_or(raw.len());
            &raw[marker.end()..end]
        }
        None => &raw[..first_label],
    };

    ParsedJudgment::new(clean_feedback(feedback), find_rating(raw))
}

/// Start of the earliest rating label of any priority at or after `from`.
fn next_label_start(raw: &str, from: usize) -> Option<usize> {
    RATING_LABELS
        .iter()
        .filter_map(|pattern| pattern.find_at(raw, from))
        .map(|label| label.start())
        .min()
}

fn find_rating(raw: &str) -> Option<i64> {
    RATING_LABELS.iter().find_map(|pattern| {
        pattern
            .find_iter(raw)
            .find_map(|label| label_value(&raw[label.end()..]))
    })
}

fn label_value(after_label: &str) -> Option<i64> {
    let line = after_label.lines().next()?;
    let digits = INTEGER.find(line)?;
    if line[..digits.start()].chars().any(char::is_alphabetic) {
        return None;
    }
    digits.as_str().parse::<i64>().ok()
}

/// Strip whitespace and leftover markdown emphasis/heading characters.
fn clean_feedback(span: &str) -> &str {
    span.trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '#')
}
