mod currency;

pub use currency::{Currency, CNY_PER_USD};

use serde::{Deserialize, Serialize};

/// Yearly growth applied to the nominal contribution when summing
/// `total_investment`. Product behavior carried over from the original
/// calculator; see DESIGN.md before touching it.
const CONTRIBUTION_GROWTH: f64 = 1.02;

pub const MIN_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 20;
pub const MIN_ROI_PERCENT: f64 = 1.0;
pub const MAX_ROI_PERCENT: f64 = 15.0;

/// Investment program the projection is run for. Each kind carries the
/// program's minimum ticket and the default ROI the input form falls back to
/// when the kind changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentKind {
    Residency,
    RealEstate,
    Medical,
    Infrastructure,
}

impl InvestmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            InvestmentKind::Residency => "Qualified Investor Visa",
            InvestmentKind::RealEstate => "Real Estate",
            InvestmentKind::Medical => "Medical Tourism",
            InvestmentKind::Infrastructure => "Infrastructure",
        }
    }

    pub const fn minimum_investment(self) -> f64 {
        match self {
            InvestmentKind::Residency => 300_000.0,
            InvestmentKind::RealEstate => 250_000.0,
            InvestmentKind::Medical => 50_000.0,
            InvestmentKind::Infrastructure => 100_000.0,
        }
    }

    pub const fn default_roi_percent(self) -> f64 {
        match self {
            InvestmentKind::Residency => 5.0,
            InvestmentKind::RealEstate => 7.0,
            InvestmentKind::Medical => 6.0,
            InvestmentKind::Infrastructure => 8.0,
        }
    }
}

/// Inputs to one projection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub kind: InvestmentKind,
    pub amount: f64,
    pub years: u32,
    pub expected_roi_percent: f64,
    #[serde(default)]
    pub currency: Currency,
}

impl ProjectionRequest {
    /// A request pre-filled with the kind's default ROI, mirroring how the
    /// input form repopulates the ROI field on a kind change.
    pub fn with_defaults(kind: InvestmentKind, amount: f64, years: u32) -> Self {
        Self {
            kind,
            amount,
            years,
            expected_roi_percent: kind.default_roi_percent(),
            currency: Currency::default(),
        }
    }

    fn validate(&self) -> Result<(), ProjectionError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ProjectionError::AmountNotPositive {
                amount: self.amount,
            });
        }
        if !(MIN_YEARS..=MAX_YEARS).contains(&self.years) {
            return Err(ProjectionError::YearsOutOfRange { years: self.years });
        }
        if !self.expected_roi_percent.is_finite()
            || !(MIN_ROI_PERCENT..=MAX_ROI_PERCENT).contains(&self.expected_roi_percent)
        {
            return Err(ProjectionError::RoiOutOfRange {
                roi_percent: self.expected_roi_percent,
            });
        }
        Ok(())
    }
}

/// Validation failures for projection inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error("investment amount must be a positive number, got {amount}")]
    AmountNotPositive { amount: f64 },
    #[error("projection horizon must be between {} and {} years, got {years}", MIN_YEARS, MAX_YEARS)]
    YearsOutOfRange { years: u32 },
    #[error(
        "expected ROI must be between {}% and {}%, got {roi_percent}%",
        MIN_ROI_PERCENT,
        MAX_ROI_PERCENT
    )]
    RoiOutOfRange { roi_percent: f64 },
}

/// Residency side-channel reported when projecting the residency program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidencyQualification {
    pub qualifies: bool,
    pub minimum_investment: f64,
}

/// Projection figures, all in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOutcome {
    pub total_investment: f64,
    pub total_return: f64,
    pub total_profit: f64,
    pub annual_return: f64,
    /// First year cumulative returns cover the original amount; absent when
    /// the horizon is too short.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residency_qualification: Option<ResidencyQualification>,
}

impl ProjectionOutcome {
    pub fn display_in(&self, currency: Currency) -> ProjectionDisplay {
        ProjectionDisplay {
            total_investment: currency.format_usd(self.total_investment),
            total_return: currency.format_usd(self.total_return),
            total_profit: currency.format_usd(self.total_profit),
            annual_return: currency.format_usd(self.annual_return),
        }
    }
}

/// Figures rendered in the requested display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionDisplay {
    pub total_investment: String,
    pub total_return: String,
    pub total_profit: String,
    pub annual_return: String,
}

/// Run the projection. Pure over the request; the arithmetic (including the
/// differing bases of `total_investment` and `total_return`) matches the
/// shipped calculator exactly.
pub fn project(request: &ProjectionRequest) -> Result<ProjectionOutcome, ProjectionError> {
    request.validate()?;

    let amount = request.amount;
    let rate = request.expected_roi_percent / 100.0;

    let mut total_investment = 0.0;
    for year in 1..=request.years {
        total_investment += amount * CONTRIBUTION_GROWTH.powi(year as i32 - 1);
    }

    let total_return = amount * (1.0 + rate).powi(request.years as i32);
    let total_profit = total_return - amount;
    let annual_return = total_profit / request.years as f64;

    let mut break_even_year = None;
    let mut cumulative_return = 0.0;
    for year in 1..=request.years {
        cumulative_return += amount * rate * (1.0 + rate).powi(year as i32 - 1);
        if cumulative_return >= amount {
            break_even_year = Some(year);
            break;
        }
    }

    let residency_qualification = match request.kind {
        InvestmentKind::Residency => Some(ResidencyQualification {
            qualifies: amount >= InvestmentKind::Residency.minimum_investment(),
            minimum_investment: InvestmentKind::Residency.minimum_investment(),
        }),
        _ => None,
    };

    Ok(ProjectionOutcome {
        total_investment,
        total_return,
        total_profit,
        annual_return,
        break_even_year,
        residency_qualification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residency_request() -> ProjectionRequest {
        ProjectionRequest {
            kind: InvestmentKind::Residency,
            amount: 300_000.0,
            years: 5,
            expected_roi_percent: 5.0,
            currency: Currency::Usd,
        }
    }

    #[test]
    fn qualified_investor_scenario_matches_published_figures() {
        let outcome = project(&residency_request()).expect("valid inputs");
        assert!((outcome.total_return - 382_884.47).abs() < 0.5);
        assert!((outcome.total_profit - 82_884.47).abs() < 0.5);
        assert!((outcome.annual_return - 16_576.89).abs() < 0.5);
        let qualification = outcome.residency_qualification.expect("residency kind");
        assert!(qualification.qualifies);
    }

    #[test]
    fn profit_is_exactly_return_minus_amount() {
        for roi in [1.0, 7.5, 15.0] {
            for years in [1, 10, 20] {
                let request = ProjectionRequest {
                    kind: InvestmentKind::RealEstate,
                    amount: 250_000.0,
                    years,
                    expected_roi_percent: roi,
                    currency: Currency::Usd,
                };
                let outcome = project(&request).expect("valid inputs");
                assert_eq!(outcome.total_profit, outcome.total_return - request.amount);
            }
        }
    }

    #[test]
    fn break_even_year_stays_in_range_and_shrinks_with_roi() {
        let mut previous_break_even = u32::MAX;
        for roi in [5.0, 8.0, 12.0, 15.0] {
            let request = ProjectionRequest {
                kind: InvestmentKind::Infrastructure,
                amount: 100_000.0,
                years: 20,
                expected_roi_percent: roi,
                currency: Currency::Usd,
            };
            let outcome = project(&request).expect("valid inputs");
            let year = outcome.break_even_year.expect("20y horizon reaches break-even");
            assert!((1..=20).contains(&year));
            assert!(year <= previous_break_even);
            previous_break_even = year;
        }
    }

    #[test]
    fn short_horizon_never_breaks_even() {
        let request = ProjectionRequest {
            kind: InvestmentKind::Medical,
            amount: 50_000.0,
            years: 3,
            expected_roi_percent: 6.0,
            currency: Currency::Usd,
        };
        let outcome = project(&request).expect("valid inputs");
        assert_eq!(outcome.break_even_year, None);
    }

    #[test]
    fn below_threshold_residency_amount_does_not_qualify() {
        let mut request = residency_request();
        request.amount = 200_000.0;
        let outcome = project(&request).expect("valid inputs");
        let qualification = outcome.residency_qualification.expect("residency kind");
        assert!(!qualification.qualifies);
    }

    #[test]
    fn non_residency_kinds_skip_the_side_channel() {
        let request = ProjectionRequest {
            kind: InvestmentKind::RealEstate,
            amount: 400_000.0,
            years: 5,
            expected_roi_percent: 7.0,
            currency: Currency::Usd,
        };
        let outcome = project(&request).expect("valid inputs");
        assert!(outcome.residency_qualification.is_none());
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        let mut request = residency_request();
        request.years = 0;
        assert!(matches!(
            project(&request),
            Err(ProjectionError::YearsOutOfRange { .. })
        ));

        let mut request = residency_request();
        request.years = 21;
        assert!(matches!(
            project(&request),
            Err(ProjectionError::YearsOutOfRange { .. })
        ));

        let mut request = residency_request();
        request.expected_roi_percent = 0.5;
        assert!(matches!(
            project(&request),
            Err(ProjectionError::RoiOutOfRange { .. })
        ));

        let mut request = residency_request();
        request.amount = 0.0;
        assert!(matches!(
            project(&request),
            Err(ProjectionError::AmountNotPositive { .. })
        ));
    }

    #[test]
    fn contribution_sum_grows_two_percent_per_year() {
        let request = ProjectionRequest {
            kind: InvestmentKind::RealEstate,
            amount: 1_000.0,
            years: 3,
            expected_roi_percent: 7.0,
            currency: Currency::Usd,
        };
        let outcome = project(&request).expect("valid inputs");
        let expected = 1_000.0 + 1_000.0 * 1.02 + 1_000.0 * 1.02_f64.powi(2);
        assert!((outcome.total_investment - expected).abs() < 1e-9);
    }
}
