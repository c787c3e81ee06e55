use super::criteria::CriterionId;

/// Remediation and next-step copy for an unmet required criterion. Optional
/// criteria deliberately carry no guidance; missing them only costs points.
pub(crate) fn remediation_pair(criterion: CriterionId) -> Option<(&'static str, &'static str)> {
    match criterion {
        CriterionId::InvestmentAmount => Some((
            "Increase your committed capital to at least USD 300,000, the Qualified Investor Visa minimum.",
            "Review qualifying investment vehicles (real estate, fixed-term deposits, securities) with an advisor.",
        )),
        CriterionId::CriminalRecord => Some((
            "A clean criminal record certificate is mandatory; pending or past convictions must be resolved first.",
            "Request apostilled police clearance certificates from every country you have resided in.",
        )),
        CriterionId::SourceOfFunds => Some((
            "Panama requires documented, lawful provenance for all invested funds.",
            "Gather bank statements, tax returns, and sale contracts evidencing how the funds were earned.",
        )),
        CriterionId::PassportValidity => Some((
            "Your passport must remain valid for at least six months beyond filing.",
            "Renew your passport before starting the application.",
        )),
        CriterionId::Age | CriterionId::Dependents => None,
    }
}

pub(crate) const ELIGIBLE_RECOMMENDATION: &str =
    "You meet the Qualified Investor Visa profile; no remediation is needed.";

pub(crate) const ELIGIBLE_NEXT_STEP: &str =
    "Schedule a consultation to begin document collection and filing.";

/// Build the recommendation and next-step lists for the unmet required
/// criteria, falling back to the single "eligible" pair when nothing was
/// flagged.
pub(crate) fn build_guidance(unmet_required: &[CriterionId]) -> (Vec<String>, Vec<String>) {
    let mut recommendations = Vec::new();
    let mut next_steps = Vec::new();

    for criterion in unmet_required {
        if let Some((remediation, next_step)) = remediation_pair(*criterion) {
            recommendations.push(remediation.to_string());
            next_steps.push(next_step.to_string());
        }
    }

    if recommendations.is_empty() {
        recommendations.push(ELIGIBLE_RECOMMENDATION.to_string());
        next_steps.push(ELIGIBLE_NEXT_STEP.to_string());
    }

    (recommendations, next_steps)
}
