use anyhow::{bail, ensure, Context, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::HuntError;
use crate::models::{AnswerRule, Hunt};

use super::answer_service::distinct_keywords;
use super::normalizer::normalize;
use super::seeds::builtin_hunts;

/// Read-only hunt definitions, validated once at load time.
#[derive(Debug, Clone)]
pub struct HuntCatalog {
    hunts: BTreeMap<String, Hunt>,
}

impl HuntCatalog {
    pub fn new(hunts: Vec<Hunt>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for hunt in hunts {
            validate_hunt(&hunt).with_context(|| format!("Invalid hunt '{}'", hunt.id))?;
            if by_id.contains_key(&hunt.id) {
                bail!("Duplicate hunt id '{}'", hunt.id);
            }
            by_id.insert(hunt.id.clone(), hunt);
        }
        ensure!(!by_id.is_empty(), "Catalog contains no hunts");

        Ok(Self { hunts: by_id })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(builtin_hunts())
    }

    /// Loads a JSON array of hunts.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let hunts: Vec<Hunt> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        Self::new(hunts)
    }

    pub fn get(&self, hunt_id: &str) -> Result<&Hunt, HuntError> {
        self.hunts
            .get(hunt_id)
            .ok_or_else(|| HuntError::not_found("Hunt", hunt_id))
    }

    pub fn list(&self) -> impl Iterator<Item = &Hunt> {
        self.hunts.values()
    }

    pub fn len(&self) -> usize {
        self.hunts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hunts.is_empty()
    }
}

fn validate_hunt(hunt: &Hunt) -> Result<()> {
    ensure!(!hunt.id.trim().is_empty(), "hunt id is empty");
    ensure!(!hunt.steps.is_empty(), "hunt has no steps");

    let mut seen = HashSet::new();
    let mut total_points: u32 = 0;
    for step in &hunt.steps {
        ensure!(seen.insert(step.id), "duplicate step id {}", step.id);
        total_points = total_points
            .checked_add(step.enigma.points)
            .with_context(|| format!("step {} pushes the hunt score past {}", step.id, u32::MAX))?;
        let enigma = &step.enigma;
        ensure!(
            enigma.time_limit_minutes > 0,
            "step {} has no time limit",
            step.id
        );

        if let Some(game) = &enigma.mini_game {
            ensure!(
                game.correct_option < game.options.len(),
                "step {} mini-game answer is out of range",
                step.id
            );
        }

        match &enigma.answer {
            AnswerRule::AnyKeyword { keywords } => {
                ensure!(
                    keywords.iter().any(|k| !normalize(k).is_empty()),
                    "step {} has no keywords",
                    step.id
                );
            }
            AnswerRule::MinimumKeywords {
                keywords,
                min_matches,
            } => {
                let distinct = distinct_keywords(keywords).len();
                ensure!(
                    *min_matches >= 1 && *min_matches <= distinct,
                    "step {} needs between 1 and {} keyword matches",
                    step.id,
                    distinct
                );
            }
            AnswerRule::Conjunctive { groups } => {
                ensure!(
                    !groups.is_empty()
                        && groups
                            .iter()
                            .all(|g| g.iter().any(|k| !normalize(k).is_empty())),
                    "step {} has an empty keyword group",
                    step.id
                );
            }
            AnswerRule::MultipleChoice { correct_option } => {
                let options = enigma.mini_game.as_ref().map_or(0, |g| g.options.len());
                ensure!(
                    *correct_option < options,
                    "step {} multiple choice answer is out of range",
                    step.id
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seeds::MEDINA_HUNT_ID;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = HuntCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 1);

        let hunt = catalog.get(MEDINA_HUNT_ID).unwrap();
        assert_eq!(hunt.steps.len(), 7);
        assert_eq!(hunt.max_score(), 910);
        let ids: Vec<u32> = hunt.steps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn unknown_hunt_is_not_found() {
        let catalog = HuntCatalog::builtin().unwrap();
        assert!(matches!(
            catalog.get("atlas-trek"),
            Err(HuntError::NotFound { kind: "Hunt", .. })
        ));
    }

    #[test]
    fn rejects_duplicate_step_ids() {
        let mut hunt = builtin_hunts().remove(0);
        hunt.steps[1].id = 1;
        let err = HuntCatalog::new(vec![hunt]).unwrap_err();
        assert!(format!("{:#}", err).contains("duplicate step id 1"));
    }

    #[test]
    fn rejects_impossible_minimum() {
        let mut hunt = builtin_hunts().remove(0);
        hunt.steps[3].enigma.answer = AnswerRule::MinimumKeywords {
            keywords: vec!["miel".into()],
            min_matches: 2,
        };
        assert!(HuntCatalog::new(vec![hunt]).is_err());
    }

    #[test]
    fn minimum_counts_distinct_non_blank_keywords() {
        let mut hunt = builtin_hunts().remove(0);
        hunt.steps[3].enigma.answer = AnswerRule::MinimumKeywords {
            keywords: vec!["miel".into(), "miel".into(), "sésame".into()],
            min_matches: 3,
        };
        assert!(HuntCatalog::new(vec![hunt.clone()]).is_err());

        hunt.steps[3].enigma.answer = AnswerRule::MinimumKeywords {
            keywords: vec!["miel".into(), "   ".into()],
            min_matches: 2,
        };
        assert!(HuntCatalog::new(vec![hunt.clone()]).is_err());

        hunt.steps[3].enigma.answer = AnswerRule::MinimumKeywords {
            keywords: vec!["miel".into(), "MIEL".into(), "sésame".into()],
            min_matches: 2,
        };
        assert!(HuntCatalog::new(vec![hunt]).is_ok());
    }

    #[test]
    fn rejects_points_that_overflow_the_total() {
        let mut hunt = builtin_hunts().remove(0);
        for step in &mut hunt.steps {
            step.enigma.points = u32::MAX;
        }
        let err = HuntCatalog::new(vec![hunt.clone()]).unwrap_err();
        assert!(format!("{:#}", err).contains("pushes the hunt score"));

        // A single huge step is still fine as long as the sum fits.
        for step in &mut hunt.steps {
            step.enigma.points = 0;
        }
        hunt.steps[0].enigma.points = u32::MAX;
        let catalog = HuntCatalog::new(vec![hunt]).unwrap();
        assert_eq!(catalog.list().next().unwrap().max_score(), u32::MAX);
    }

    #[test]
    fn multiple_choice_needs_a_matching_mini_game() {
        let mut hunt = builtin_hunts().remove(0);
        hunt.steps[6].enigma.answer = AnswerRule::MultipleChoice { correct_option: 0 };
        assert!(HuntCatalog::new(vec![hunt.clone()]).is_ok());

        hunt.steps[0].enigma.answer = AnswerRule::MultipleChoice { correct_option: 0 };
        assert!(HuntCatalog::new(vec![hunt]).is_err());
    }

    #[test]
    fn loads_json_catalog_from_disk() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, serde_json::to_string(&builtin_hunts()).unwrap()).unwrap();

        let catalog = HuntCatalog::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(catalog.get(MEDINA_HUNT_ID).is_ok());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(HuntCatalog::new(Vec::new()).is_err());
    }
}
