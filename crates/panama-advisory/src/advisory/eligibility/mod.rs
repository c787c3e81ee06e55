mod criteria;
mod guidance;
mod scoring;
mod wizard;

pub use criteria::{max_score, Criterion, CriterionCategory, CriterionId, CRITERIA, QUALIFYING_SCORE};
pub use wizard::{AssessmentWizard, WizardStep};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers captured so far, keyed by criterion. Unanswered criteria are
/// treated as not met when scoring outside the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: BTreeMap<CriterionId, bool>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, criterion: CriterionId, met: bool) {
        self.answers.insert(criterion, met);
    }

    pub fn get(&self, criterion: CriterionId) -> Option<bool> {
        self.answers.get(&criterion).copied()
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        CRITERIA
            .iter()
            .all(|criterion| self.answers.contains_key(&criterion.id))
    }
}

impl FromIterator<(CriterionId, bool)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (CriterionId, bool)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

/// Discrete contribution to an assessment, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: CriterionId,
    pub category: CriterionCategory,
    pub required: bool,
    pub weight: u16,
    pub met: bool,
    pub points_awarded: u16,
}

/// Assessment output describing the verdict, score, and guidance trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub eligible: bool,
    pub score: u16,
    pub max_score: u16,
    pub breakdown: Vec<CriterionScore>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Stateless engine applying the Qualified Investor Visa rubric to a set of
/// screening answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEngine;

impl EligibilityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, responses: &ResponseSet) -> AssessmentOutcome {
        let (breakdown, score, signals) = scoring::score_responses(responses);
        let eligible = signals.unmet_required.is_empty() && score >= QUALIFYING_SCORE;
        let (recommendations, next_steps) = guidance::build_guidance(&signals.unmet_required);

        AssessmentOutcome {
            eligible,
            score,
            max_score: max_score(),
            breakdown,
            recommendations,
            next_steps,
        }
    }
}
