use crate::commands::{
    run_eligibility, run_limits_import, run_normalize, run_submit, EligibilityArgs,
    LimitsImportArgs, NormalizeArgs, SubmitArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tenant_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tenant Intake",
    about = "Run the LIHTC income certification intake from the command line",
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
    /// Print income and rent limits for the configured unit
    Eligibility(EligibilityArgs),
    /// Convert a form document into the payload the backend stores
    Normalize(NormalizeArgs),
    /// Normalize a form document and send it to the backend
    Submit(SubmitArgs),
    /// Maintain the area-median rent tables
    Limits {
        #[command(subcommand)]
        command: LimitsCommand,
    },
    /// Walk a sample household through the wizard end to end
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum LimitsCommand {
    /// Convert a rent table CSV export into limits JSON
    Import(LimitsImportArgs),
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
        Command::Eligibility(args) => run_eligibility(args),
        Command::Normalize(args) => run_normalize(args),
        Command::Submit(args) => run_submit(args).await,
        Command::Limits {
            command: LimitsCommand::Import(args),
        } => run_limits_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
