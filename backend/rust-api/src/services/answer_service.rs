use std::collections::BTreeSet;

use crate::models::answer::ValidationResult;
use crate::models::{AnswerRule, Hunt};

use super::normalizer::{normalize, NormalizedAnswer};

/// Judges a normalized answer against the rule of `step_id`.
///
/// Pure: no state is read or written. An unknown step or a mismatched
/// answer kind is simply incorrect.
pub fn check_answer(hunt: &Hunt, step_id: u32, answer: &NormalizedAnswer) -> ValidationResult {
    let Some(step) = hunt.step(step_id) else {
        tracing::debug!("Answer checked against unknown step {} of {}", step_id, hunt.id);
        return ValidationResult::INCORRECT;
    };

    if rule_matches(&step.enigma.answer, answer) {
        ValidationResult {
            correct: true,
            points_awarded: step.enigma.points,
        }
    } else {
        ValidationResult::INCORRECT
    }
}

pub fn rule_matches(rule: &AnswerRule, answer: &NormalizedAnswer) -> bool {
    match (rule, answer) {
        (AnswerRule::MultipleChoice { correct_option }, NormalizedAnswer::Choice(index)) => {
            index == correct_option
        }
        (AnswerRule::MultipleChoice { .. }, NormalizedAnswer::Text(_)) => false,
        (_, NormalizedAnswer::Choice(_)) => false,
        (_, NormalizedAnswer::Text(text)) if text.is_empty() => false,
        (AnswerRule::AnyKeyword { keywords }, NormalizedAnswer::Text(text)) => keywords
            .iter()
            .filter_map(|k| non_empty(normalize(k)))
            .any(|k| text.contains(&k) || k.contains(text.as_str())),
        (
            AnswerRule::MinimumKeywords {
                keywords,
                min_matches,
            },
            NormalizedAnswer::Text(text),
        ) => {
            let matched = distinct_keywords(keywords)
                .iter()
                .filter(|k| text.contains(k.as_str()))
                .count();
            matched >= *min_matches
        }
        (AnswerRule::Conjunctive { groups }, NormalizedAnswer::Text(text)) => {
            !groups.is_empty()
                && groups.iter().all(|group| {
                    group
                        .iter()
                        .filter_map(|k| non_empty(normalize(k)))
                        .any(|k| text.contains(&k))
                })
        }
    }
}

/// Normalized, non-blank keywords with duplicates folded together.
pub fn distinct_keywords(keywords: &[String]) -> BTreeSet<String> {
    keywords
        .iter()
        .filter_map(|k| non_empty(normalize(k)))
        .collect()
}

// An empty keyword would be contained in every answer.
fn non_empty(keyword: String) -> Option<String> {
    (!keyword.is_empty()).then_some(keyword)
}
