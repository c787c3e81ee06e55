//! End-to-end specifications for the Qualified Investor Visa screening
//! rubric: exhaustive verdict coverage, the documented scoring scenarios,
//! and the wizard session behavior.

use panama_advisory::advisory::eligibility::{
    AssessmentWizard, CriterionId, EligibilityEngine, ResponseSet, CRITERIA,
};

fn responses(bits: [bool; 6]) -> ResponseSet {
    CRITERIA
        .iter()
        .zip(bits)
        .map(|(criterion, met)| (criterion.id, met))
        .collect()
}

#[test]
fn verdict_reduces_to_the_four_required_criteria() {
    // With required weights summing to exactly the qualifying score, every
    // one of the 64 answer vectors must qualify iff all required answers are
    // true.
    let engine = EligibilityEngine::new();
    for vector in 0u8..64 {
        let bits: [bool; 6] = std::array::from_fn(|index| vector >> index & 1 == 1);
        let outcome = engine.assess(&responses(bits));

        let all_required_met = CRITERIA
            .iter()
            .zip(bits)
            .filter(|(criterion, _)| criterion.required)
            .all(|(_, met)| met);

        assert_eq!(
            outcome.eligible, all_required_met,
            "vector {vector:#08b} produced the wrong verdict"
        );
    }
}

#[test]
fn score_accumulates_the_weight_table() {
    let engine = EligibilityEngine::new();
    for vector in 0u8..64 {
        let bits: [bool; 6] = std::array::from_fn(|index| vector >> index & 1 == 1);
        let outcome = engine.assess(&responses(bits));

        let expected: u16 = CRITERIA
            .iter()
            .zip(bits)
            .filter(|(_, met)| *met)
            .map(|(criterion, _)| criterion.weight)
            .sum();

        assert_eq!(outcome.score, expected);
        assert_eq!(outcome.max_score, 100);
        assert_eq!(outcome.breakdown.len(), 6);
    }
}

#[test]
fn documented_scenario_scores_eighty_five_and_qualifies() {
    let outcome =
        EligibilityEngine::new().assess(&responses([true, true, true, true, false, false]));
    assert!(outcome.eligible);
    assert_eq!(outcome.score, 85);
    // Nothing unmet among the required criteria, so only the generic pair.
    assert_eq!(outcome.recommendations.len(), 1);
    assert_eq!(outcome.next_steps.len(), 1);
}

#[test]
fn missing_source_of_funds_scores_sixty_five_with_remediation() {
    let outcome =
        EligibilityEngine::new().assess(&responses([true, true, false, true, false, false]));
    assert!(!outcome.eligible);
    assert_eq!(outcome.score, 65);
    assert_eq!(outcome.recommendations.len(), 1);
    assert!(outcome
        .recommendations
        .iter()
        .any(|line| line.to_lowercase().contains("provenance")));
    assert!(outcome
        .next_steps
        .iter()
        .any(|line| line.to_lowercase().contains("bank statements")));
}

#[test]
fn each_unmet_required_criterion_contributes_one_pair() {
    let outcome =
        EligibilityEngine::new().assess(&responses([false, false, false, false, true, true]));
    assert!(!outcome.eligible);
    assert_eq!(outcome.score, 15);
    assert_eq!(outcome.recommendations.len(), 4);
    assert_eq!(outcome.next_steps.len(), 4);
}

#[test]
fn unmet_optional_criteria_produce_no_guidance() {
    let outcome =
        EligibilityEngine::new().assess(&responses([true, true, true, true, false, false]));
    assert!(outcome
        .recommendations
        .iter()
        .all(|line| !line.contains("dependent")));
}

#[test]
fn wizard_walkthrough_matches_direct_engine_assessment() {
    let answers = [true, true, true, true, false, true];

    let mut wizard = AssessmentWizard::new();
    for answer in answers {
        wizard.answer(answer);
    }
    let via_wizard = wizard.outcome().expect("complete session");
    let direct = EligibilityEngine::new().assess(&responses(answers));
    assert_eq!(via_wizard, direct);
}

#[test]
fn revisited_answers_overwrite_without_losing_the_rest() {
    let mut wizard = AssessmentWizard::new();
    for answer in [true, true, false, true, true, true] {
        wizard.answer(answer);
    }
    assert!(!wizard.outcome().expect("complete").eligible);

    // Walk back to the source-of-funds question and correct it.
    wizard.back();
    wizard.back();
    wizard.back();
    wizard.back();
    let step = wizard.current_step().expect("revisited step");
    assert_eq!(step.criterion.id, CriterionId::SourceOfFunds);
    wizard.answer(true);

    // The later answers were preserved, so the session is still complete.
    let outcome = wizard.outcome().expect("still complete");
    assert!(outcome.eligible);
    assert_eq!(outcome.score, 100);
}
