use serde::{Deserialize, Serialize};

/// Identifier for a screening criterion. Declaration order is the order the
/// wizard walks the questions in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CriterionId {
    InvestmentAmount,
    CriminalRecord,
    SourceOfFunds,
    PassportValidity,
    Age,
    Dependents,
}

impl CriterionId {
    pub const fn label(self) -> &'static str {
        match self {
            CriterionId::InvestmentAmount => "investment_amount",
            CriterionId::CriminalRecord => "criminal_record",
            CriterionId::SourceOfFunds => "source_of_funds",
            CriterionId::PassportValidity => "passport_validity",
            CriterionId::Age => "age",
            CriterionId::Dependents => "dependents",
        }
    }

    /// Question shown for this step of the screening wizard.
    pub const fn prompt(self) -> &'static str {
        match self {
            CriterionId::InvestmentAmount => {
                "Can you commit at least USD 300,000 to a qualifying investment?"
            }
            CriterionId::CriminalRecord => {
                "Do you have a clean criminal record in every country of residence?"
            }
            CriterionId::SourceOfFunds => {
                "Can you document a lawful source for the invested funds?"
            }
            CriterionId::PassportValidity => {
                "Is your passport valid for at least six more months?"
            }
            CriterionId::Age => "Are you between 18 and 75 years old?",
            CriterionId::Dependents => {
                "Will fewer than five dependents be included in the application?"
            }
        }
    }
}

/// Grouping used when presenting the criteria catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionCategory {
    Financial,
    Legal,
    Personal,
}

/// One entry of the fixed screening rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub category: CriterionCategory,
    pub required: bool,
    pub weight: u16,
}

/// Score a candidate must reach on top of meeting every required criterion.
pub const QUALIFYING_SCORE: u16 = 50;

/// The Qualified Investor Visa rubric. Weights sum to 100 and the required
/// entries alone sum to exactly [`QUALIFYING_SCORE`]; both facts gate who
/// qualifies, so treat the table as immutable policy.
pub const CRITERIA: [Criterion; 6] = [
    Criterion {
        id: CriterionId::InvestmentAmount,
        category: CriterionCategory::Financial,
        required: true,
        weight: 30,
    },
    Criterion {
        id: CriterionId::CriminalRecord,
        category: CriterionCategory::Legal,
        required: true,
        weight: 25,
    },
    Criterion {
        id: CriterionId::SourceOfFunds,
        category: CriterionCategory::Financial,
        required: true,
        weight: 20,
    },
    Criterion {
        id: CriterionId::PassportValidity,
        category: CriterionCategory::Legal,
        required: true,
        weight: 10,
    },
    Criterion {
        id: CriterionId::Age,
        category: CriterionCategory::Personal,
        required: false,
        weight: 10,
    },
    Criterion {
        id: CriterionId::Dependents,
        category: CriterionCategory::Personal,
        required: false,
        weight: 5,
    },
];

pub const fn max_score() -> u16 {
    let mut total = 0;
    let mut index = 0;
    while index < CRITERIA.len() {
        total += CRITERIA[index].weight;
        index += 1;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one_hundred() {
        assert_eq!(max_score(), 100);
    }

    #[test]
    fn required_weights_cover_the_qualifying_score_exactly() {
        let required: u16 = CRITERIA
            .iter()
            .filter(|criterion| criterion.required)
            .map(|criterion| criterion.weight)
            .sum();
        assert_eq!(required, QUALIFYING_SCORE);
    }
}
