use crate::demo::{run_demo, run_eligibility_check, run_projection, DemoArgs, EligibilityArgs, ProjectArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use panama_advisory::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Panama Advisory Platform",
    about = "Run the Panama residency and investment advisory service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screen an applicant against the Qualified Investor Visa rubric
    Eligibility {
        #[command(subcommand)]
        command: EligibilityCommand,
    },
    /// Project returns for an investment program
    Project(ProjectArgs),
    /// Run an end-to-end CLI demo over the sample listing catalogue
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum EligibilityCommand {
    /// Score a full set of screening answers and print the guidance
    Check(EligibilityArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Eligibility {
            command: EligibilityCommand::Check(args),
        } => run_eligibility_check(args),
        Command::Project(args) => run_projection(args),
        Command::Demo(args) => run_demo(args),
    }
}
