use crate::demo::{run_demo, run_rubric_validate, run_score, RubricArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use trade_journal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Trade Journal",
    about = "Score playbook setups and serve the trade journal scoring API",
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
    /// Score a setup described by a JSON file
    Score(ScoreArgs),
    /// Inspect playbook rubrics
    Rubric {
        #[command(subcommand)]
        command: RubricCommand,
    },
    /// Walk through a sample playbook and show how toggles move the grade
    Demo,
}

#[derive(Subcommand, Debug)]
enum RubricCommand {
    /// Validate a rubric JSON file and list weight warnings
    Validate(RubricArgs),
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
        Command::Rubric {
            command: RubricCommand::Validate(args),
        } => run_rubric_validate(args),
        Command::Demo => run_demo(),
    }
}
