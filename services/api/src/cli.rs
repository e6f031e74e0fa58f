use crate::demo::{run_demo, run_jobs, DemoArgs, JobsCommand};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use talent_flow::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TalentFlow",
    about = "Run the TalentFlow recruiting board or inspect it from the command line",
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
    /// Inspect job postings stored in the data directory
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Walk a candidate through the approval workflow on a throwaway board
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
    /// Override the directory holding the job and candidate collections
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Jobs { command } => run_jobs(command),
        Command::Demo(args) => run_demo(args).await,
    }
}
