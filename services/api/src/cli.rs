use crate::commands::{run_assess, run_decode, AssessArgs, DecodeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use claim_insight::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Claim Insight",
    about = "Score claim damage and encode or decode assessment narratives",
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
    /// Assess a single claim and print its narrative report
    Assess(AssessArgs),
    /// Recover structured fields from a saved narrative report
    Decode(DecodeArgs),
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
        Command::Assess(args) => run_assess(args),
        Command::Decode(args) => run_decode(args),
    }
}
