use clap::{Args, Parser, Subcommand};

use city_lens::error::AppError;

use crate::demo::{run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "City Lens",
    about = "Run and demonstrate the City Lens urban impact scoring service",
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
    /// Score a single project or a CSV batch and print the assessment
    Score(ScoreArgs),
    /// Run a canned sweep across all four project types
    Demo(DemoArgs),
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
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
