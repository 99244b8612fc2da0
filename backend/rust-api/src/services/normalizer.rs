use crate::error::HuntError;
use crate::models::answer::Submission;

/// Submission after normalization; the only form the answer checker accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedAnswer {
    Text(String),
    Choice(usize),
}

/// Canonical form used on both sides of every keyword comparison.
///
/// Trims, lowercases (Unicode aware, accents are kept), collapses internal
/// whitespace runs to one space and folds typographic apostrophes to `'`.
/// Applying it twice yields the same string.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| match c {
                    '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
                    other => other,
                })
                .collect::<String>()
                .to_lowercase()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validates and normalizes a raw submission.
///
/// Blank text is rejected so it never reaches the checker nor counts as an
/// attempt.
pub fn prepare(submission: Submission) -> Result<NormalizedAnswer, HuntError> {
    match submission {
        Submission::Text(raw) => {
            let text = normalize(&raw);
            if text.is_empty() {
                return Err(HuntError::InvalidInput("answer is empty".to_string()));
            }
            Ok(NormalizedAnswer::Text(text))
        }
        Submission::Choice(index) => Ok(NormalizedAnswer::Choice(index)),
    }
}
