use crate::infra::{parse_currency, parse_investment_kind, InMemoryLeadRepository, InMemoryNotifier};
use clap::Args;
use std::sync::Arc;
use panama_advisory::advisory::comparison::ComparisonSet;
use panama_advisory::advisory::eligibility::{
    AssessmentOutcome, CriterionId, EligibilityEngine, ResponseSet,
};
use panama_advisory::advisory::projection::{
    project, Currency, InvestmentKind, ProjectionRequest,
};
use panama_advisory::error::AppError;
use panama_advisory::intake::{ConsultationRequest, ConsultationService, Language, ServiceInterest};
use panama_advisory::properties::{
    LoadMoreOutcome, PropertyDirectory, PropertyFeed, SampleDirectory,
};

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Applicant can commit at least USD 300,000
    #[arg(long)]
    pub(crate) investment_amount: bool,
    /// Applicant has a clean criminal record
    #[arg(long)]
    pub(crate) criminal_record: bool,
    /// Applicant can document a lawful source of funds
    #[arg(long)]
    pub(crate) source_of_funds: bool,
    /// Passport stays valid for at least six months
    #[arg(long)]
    pub(crate) passport_validity: bool,
    /// Applicant is between 18 and 75 years old
    #[arg(long)]
    pub(crate) age: bool,
    /// Fewer than five dependents on the application
    #[arg(long)]
    pub(crate) dependents: bool,
}

impl EligibilityArgs {
    fn responses(&self) -> ResponseSet {
        [
            (CriterionId::InvestmentAmount, self.investment_amount),
            (CriterionId::CriminalRecord, self.criminal_record),
            (CriterionId::SourceOfFunds, self.source_of_funds),
            (CriterionId::PassportValidity, self.passport_validity),
            (CriterionId::Age, self.age),
            (CriterionId::Dependents, self.dependents),
        ]
        .into_iter()
        .collect()
    }
}

#[derive(Args, Debug)]
pub(crate) struct ProjectArgs {
    /// Investment program: residency, real-estate, medical, or infrastructure
    #[arg(long, value_parser = parse_investment_kind)]
    pub(crate) kind: InvestmentKind,
    /// Amount invested, in USD
    #[arg(long)]
    pub(crate) amount: f64,
    /// Projection horizon in years (1-20)
    #[arg(long)]
    pub(crate) years: u32,
    /// Expected yearly ROI in percent (1-15). Defaults to the program's rate.
    #[arg(long)]
    pub(crate) roi: Option<f64>,
    /// Display currency: usd or cny
    #[arg(long, value_parser = parse_currency, default_value = "usd")]
    pub(crate) currency: Currency,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Amount used for the projection portion of the demo, in USD
    #[arg(long, default_value_t = 300_000.0)]
    pub(crate) amount: f64,
    /// Horizon used for the projection portion of the demo
    #[arg(long, default_value_t = 5)]
    pub(crate) years: u32,
    /// Display currency: usd or cny
    #[arg(long, value_parser = parse_currency, default_value = "usd")]
    pub(crate) currency: Currency,
    /// Skip the consultation intake portion of the demo
    #[arg(long)]
    pub(crate) skip_intake: bool,
}

pub(crate) fn run_eligibility_check(args: EligibilityArgs) -> Result<(), AppError> {
    let outcome = EligibilityEngine::new().assess(&args.responses());
    render_assessment(&outcome);
    Ok(())
}

fn render_assessment(outcome: &AssessmentOutcome) {
    println!(
        "Qualified Investor Visa screening: {} ({} / {} points)",
        if outcome.eligible {
            "ELIGIBLE"
        } else {
            "NOT ELIGIBLE"
        },
        outcome.score,
        outcome.max_score
    );
    for entry in &outcome.breakdown {
        println!(
            "- {:<18} {:<9} {:>2} of {:>2} points",
            entry.criterion.label(),
            if entry.met { "met" } else { "not met" },
            entry.points_awarded,
            entry.weight
        );
    }
    println!("Recommendations:");
    for line in &outcome.recommendations {
        println!("  - {line}");
    }
    println!("Next steps:");
    for line in &outcome.next_steps {
        println!("  - {line}");
    }
}

pub(crate) fn run_projection(args: ProjectArgs) -> Result<(), AppError> {
    let request = ProjectionRequest {
        kind: args.kind,
        amount: args.amount,
        years: args.years,
        expected_roi_percent: args.roi.unwrap_or_else(|| args.kind.default_roi_percent()),
        currency: args.currency,
    };

    let outcome = project(&request)?;
    render_projection(&request, &outcome);
    Ok(())
}

fn render_projection(
    request: &ProjectionRequest,
    outcome: &panama_advisory::advisory::projection::ProjectionOutcome,
) {
    let display = outcome.display_in(request.currency);
    println!(
        "{} projection: {} over {} years at {}%",
        request.kind.label(),
        request.currency.format_usd(request.amount),
        request.years,
        request.expected_roi_percent
    );
    println!("- Total invested (escalating): {}", display.total_investment);
    println!("- Total return:                {}", display.total_return);
    println!("- Total profit:                {}", display.total_profit);
    println!("- Average yearly return:       {}", display.annual_return);
    match outcome.break_even_year {
        Some(year) => println!("- Break-even in year {year}"),
        None => println!("- No break-even within the horizon"),
    }
    if let Some(qualification) = &outcome.residency_qualification {
        println!(
            "- Residency threshold {}: {}",
            request.currency.format_usd(qualification.minimum_investment),
            if qualification.qualifies {
                "met"
            } else {
                "not met"
            }
        );
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Panama advisory platform demo");

    let directory = Arc::new(SampleDirectory::new()?);

    println!("\nListing feed over the sample catalogue");
    let feed = PropertyFeed::new(directory.clone());
    let first = feed.refetch();
    println!(
        "- first page: {} of {} listings",
        first.items.len(),
        first.count
    );
    while let LoadMoreOutcome::Appended(added) = feed.load_more() {
        println!("- loaded {added} more");
    }
    let full = feed.snapshot();
    println!("- feed complete with {} listings", full.items.len());

    let stats = directory.stats()?;
    println!(
        "- market stats: {} listings | avg price {} | avg ROI {:.1}%",
        stats.total_listings,
        args.currency.format_usd(stats.average_price),
        stats.average_roi
    );
    println!("Featured listings:");
    for listing in directory.featured()? {
        println!(
            "  - {} ({}) {} | ROI {:.1}%",
            listing.name,
            listing.location,
            args.currency.format_usd(listing.price),
            listing.roi
        );
    }

    println!("\nComparison of three shortlisted properties");
    let mut comparison = ComparisonSet::new();
    for id in [1, 5, 9] {
        if let Err(err) = comparison.add(directory.detail(id)?) {
            println!("  Could not add listing {id}: {err}");
        }
    }
    let matrix = comparison.matrix();
    let names: Vec<&str> = matrix
        .columns
        .iter()
        .map(|column| column.name.as_str())
        .collect();
    println!("  Comparing: {}", names.join(" | "));
    for row in &matrix.rows {
        let cells: Vec<String> = row
            .values
            .iter()
            .zip(&row.best)
            .map(|(value, best)| {
                format!("{value}{}", if *best { " *" } else { "" })
            })
            .collect();
        println!("  {:<18} {}", row.label, cells.join(" | "));
    }

    println!("\nInvestment projection");
    let request = ProjectionRequest {
        kind: InvestmentKind::Residency,
        amount: args.amount,
        years: args.years,
        expected_roi_percent: InvestmentKind::Residency.default_roi_percent(),
        currency: args.currency,
    };
    let outcome = project(&request)?;
    render_projection(&request, &outcome);

    println!("\nEligibility screening");
    let responses: ResponseSet = [
        (CriterionId::InvestmentAmount, true),
        (CriterionId::CriminalRecord, true),
        (CriterionId::SourceOfFunds, true),
        (CriterionId::PassportValidity, true),
        (CriterionId::Age, true),
        (CriterionId::Dependents, false),
    ]
    .into_iter()
    .collect();
    render_assessment(&EligibilityEngine::new().assess(&responses));

    if args.skip_intake {
        return Ok(());
    }

    println!("\nConsultation intake demo");
    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(InMemoryNotifier::default());
    let service = ConsultationService::new(repository, notifier.clone());

    let request = ConsultationRequest {
        full_name: "Zhang Min".to_string(),
        email: "zhang.min@example.com".to_string(),
        phone: Some("+86 138 0000 0000".to_string()),
        preferred_language: Language::Zh,
        interest: ServiceInterest::Residency,
        message: "Requesting a consultation about the Qualified Investor Visa.".to_string(),
    };

    match service.submit(request) {
        Ok(record) => {
            let view = record.status_view();
            println!(
                "- Received consultation {} -> status {}",
                view.lead_id.0, view.status
            );
            for event in notifier.events() {
                println!(
                    "- Notified advisory team via '{}' for {}",
                    event.template, event.lead_id.0
                );
            }
        }
        Err(err) => println!("  Submission rejected: {err}"),
    }

    Ok(())
}
