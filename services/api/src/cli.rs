use crate::demo::{run_demo, run_questions, DemoArgs, QuestionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mentor_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Mentor AI",
    about = "Run and demonstrate the career and stream guidance service from the command line",
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
    /// Print the question bank for an assessment variant
    Questions(QuestionsArgs),
    /// Run a scripted assessment end to end and print the report
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
        Command::Questions(args) => run_questions(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
