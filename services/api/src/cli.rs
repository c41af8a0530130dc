use clap::{Args, Parser, Subcommand};
use creator_match::error::AppError;

use crate::demo::{run_demo, run_interpret, run_score, DemoArgs, InterpretArgs, ScoreArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Creator Match",
    about = "Run and demonstrate the creator-brand matching service from the command line",
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
    /// Seed an in-memory marketplace and walk through search, recommendation, and applications
    Demo(DemoArgs),
    /// Compute a trust score from raw engagement statistics
    Score(ScoreArgs),
    /// Run the deterministic interpreter over a natural-language query
    Interpret(InterpretArgs),
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
        Command::Demo(args) => run_demo(args).await,
        Command::Score(args) => run_score(args),
        Command::Interpret(args) => run_interpret(args),
    }
}
