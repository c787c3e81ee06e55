use super::criteria::{Criterion, CRITERIA};
use super::{AssessmentOutcome, EligibilityEngine, ResponseSet};
use serde::Serialize;

/// One visible step of the screening wizard.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WizardStep {
    pub index: usize,
    pub total: usize,
    pub criterion: Criterion,
    /// Present when the applicant stepped back to a question they already
    /// answered.
    pub previous_answer: Option<bool>,
}

/// Sequential screening session: one question at a time, answers preserved
/// when stepping backwards, resettable on demand.
#[derive(Debug, Clone, Default)]
pub struct AssessmentWizard {
    responses: ResponseSet,
    cursor: usize,
}

impl AssessmentWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> Option<WizardStep> {
        let criterion = CRITERIA.get(self.cursor)?;
        Some(WizardStep {
            index: self.cursor,
            total: CRITERIA.len(),
            criterion: *criterion,
            previous_answer: self.responses.get(criterion.id),
        })
    }

    /// Record the answer for the visible question and advance. Answering a
    /// revisited question overwrites only that answer; later answers stay.
    pub fn answer(&mut self, met: bool) {
        if let Some(criterion) = CRITERIA.get(self.cursor) {
            self.responses.record(criterion.id, met);
            self.cursor += 1;
        }
    }

    /// Step back one question without discarding anything.
    pub fn back(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn answered(&self) -> usize {
        self.responses.answered()
    }

    pub fn is_complete(&self) -> bool {
        self.responses.is_complete()
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    /// Score the session once every question has an answer.
    pub fn outcome(&self) -> Option<AssessmentOutcome> {
        if !self.is_complete() {
            return None;
        }
        Some(EligibilityEngine::new().assess(&self.responses))
    }
}

#[cfg(test)]
mod tests {
    use super::super::CriterionId;
    use super::*;

    #[test]
    fn walks_questions_in_rubric_order() {
        let mut wizard = AssessmentWizard::new();
        let first = wizard.current_step().expect("first step");
        assert_eq!(first.criterion.id, CriterionId::InvestmentAmount);
        assert_eq!(first.total, 6);

        wizard.answer(true);
        let second = wizard.current_step().expect("second step");
        assert_eq!(second.criterion.id, CriterionId::CriminalRecord);
    }

    #[test]
    fn stepping_back_preserves_earlier_answers() {
        let mut wizard = AssessmentWizard::new();
        wizard.answer(true);
        wizard.answer(false);
        wizard.back();

        let revisited = wizard.current_step().expect("revisited step");
        assert_eq!(revisited.criterion.id, CriterionId::CriminalRecord);
        assert_eq!(revisited.previous_answer, Some(false));
        assert_eq!(wizard.responses().get(CriterionId::InvestmentAmount), Some(true));

        wizard.answer(true);
        assert_eq!(wizard.responses().get(CriterionId::CriminalRecord), Some(true));
    }

    #[test]
    fn outcome_requires_all_six_answers() {
        let mut wizard = AssessmentWizard::new();
        for _ in 0..5 {
            wizard.answer(true);
        }
        assert!(wizard.outcome().is_none());

        wizard.answer(false);
        let outcome = wizard.outcome().expect("complete session scores");
        assert!(outcome.eligible);
        assert_eq!(outcome.score, 95);
        assert!(wizard.current_step().is_none());
    }

    #[test]
    fn reset_returns_to_the_first_question() {
        let mut wizard = AssessmentWizard::new();
        wizard.answer(true);
        wizard.answer(true);
        wizard.reset();
        assert_eq!(wizard.answered(), 0);
        let step = wizard.current_step().expect("first step");
        assert_eq!(step.index, 0);
        assert_eq!(step.previous_answer, None);
    }
}
