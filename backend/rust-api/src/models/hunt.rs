use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Audio/video/AR references. Opaque to the engine, handed to the client as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MiniGame {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: usize,
}

/// Declarative acceptance rule attached to an enigma.
///
/// Keywords are compared after normalization on both sides, so catalog
/// authors may write them with any casing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerRule {
    /// Answer contains a keyword, or is contained by one (partial typing).
    AnyKeyword { keywords: Vec<String> },
    /// Answer contains at least `min_matches` distinct keywords of the set.
    MinimumKeywords {
        keywords: Vec<String>,
        min_matches: usize,
    },
    /// Answer contains at least one keyword from every group.
    Conjunctive { groups: Vec<Vec<String>> },
    /// Selected option index equals the stored one. Free text never matches.
    MultipleChoice { correct_option: usize },
}

impl AnswerRule {
    pub fn kind(&self) -> &'static str {
        match self {
            AnswerRule::AnyKeyword { .. } => "any_keyword",
            AnswerRule::MinimumKeywords { .. } => "minimum_keywords",
            AnswerRule::Conjunctive { .. } => "conjunctive",
            AnswerRule::MultipleChoice { .. } => "multiple_choice",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enigma {
    pub question: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_hints: Option<MediaHints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_game: Option<MiniGame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    pub answer: AnswerRule,
    /// Advisory only; exceeding it never fails the step.
    pub time_limit_minutes: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    pub id: u32,
    pub location: String,
    pub puzzle: String,
    pub enigma: Enigma,
    pub required_item: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hunt {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub steps: Vec<Step>,
}

impl Hunt {
    pub fn step(&self, step_id: u32) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn position_of(&self, step_id: u32) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step_id)
    }

    pub fn max_score(&self) -> u32 {
        self.steps
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.enigma.points))
    }
}

// Public projections: never carry answer rules or the mini-game solution.

#[derive(Debug, Clone, Serialize)]
pub struct HuntSummaryView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub step_count: usize,
    pub max_score: u32,
}

impl From<&Hunt> for HuntSummaryView {
    fn from(hunt: &Hunt) -> Self {
        Self {
            id: hunt.id.clone(),
            title: hunt.title.clone(),
            description: hunt.description.clone(),
            difficulty: hunt.difficulty,
            duration: hunt.duration.clone(),
            step_count: hunt.steps.len(),
            max_score: hunt.max_score(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MiniGameView {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub id: u32,
    pub location: String,
    pub puzzle: String,
    pub question: String,
    pub required_item: String,
    pub coordinates: Coordinates,
    pub hint_count: usize,
    pub time_limit_minutes: u32,
    pub points: u32,
    pub answer_kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_hints: Option<MediaHints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mini_game: Option<MiniGameView>,
    pub has_qr_code: bool,
}

impl From<&Step> for StepView {
    fn from(step: &Step) -> Self {
        let enigma = &step.enigma;
        Self {
            id: step.id,
            location: step.location.clone(),
            puzzle: step.puzzle.clone(),
            question: enigma.question.clone(),
            required_item: step.required_item.clone(),
            coordinates: step.coordinates,
            hint_count: enigma.hints.len(),
            time_limit_minutes: enigma.time_limit_minutes,
            points: enigma.points,
            answer_kind: enigma.answer.kind(),
            media_hints: enigma.media_hints.clone(),
            mini_game: enigma.mini_game.as_ref().map(|g| MiniGameView {
                question: g.question.clone(),
                options: g.options.clone(),
            }),
            has_qr_code: enigma.qr_code.is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HuntDetailView {
    #[serde(flatten)]
    pub summary: HuntSummaryView,
    pub steps: Vec<StepView>,
}

impl From<&Hunt> for HuntDetailView {
    fn from(hunt: &Hunt) -> Self {
        Self {
            summary: HuntSummaryView::from(hunt),
            steps: hunt.steps.iter().map(StepView::from).collect(),
        }
    }
}
