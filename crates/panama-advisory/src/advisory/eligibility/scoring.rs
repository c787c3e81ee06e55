use super::criteria::{CriterionId, CRITERIA};
use super::{CriterionScore, ResponseSet};

/// Signals the verdict step needs beyond the raw score.
pub(crate) struct ScoreSignals {
    pub unmet_required: Vec<CriterionId>,
}

pub(crate) fn score_responses(responses: &ResponseSet) -> (Vec<CriterionScore>, u16, ScoreSignals) {
    let mut breakdown = Vec::with_capacity(CRITERIA.len());
    let mut total_score: u16 = 0;
    let mut unmet_required = Vec::new();

    for criterion in &CRITERIA {
        let met = responses.get(criterion.id).unwrap_or(false);
        let points_awarded = if met { criterion.weight } else { 0 };
        total_score += points_awarded;

        if criterion.required && !met {
            unmet_required.push(criterion.id);
        }

        breakdown.push(CriterionScore {
            criterion: criterion.id,
            category: criterion.category,
            required: criterion.required,
            weight: criterion.weight,
            met,
            points_awarded,
        });
    }

    (breakdown, total_score, ScoreSignals { unmet_required })
}
