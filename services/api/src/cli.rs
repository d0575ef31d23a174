use crate::score::{run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_match::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Match",
    about = "Score students against placement jobs or serve the match API",
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
    /// Score a student document against one or more job documents
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON file with `students` and `jobs` arrays loaded into the in-memory stores
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["placement-match-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_repeated_jobs_and_response_list() {
        let cli = Cli::try_parse_from([
            "placement-match-api",
            "score",
            "--student",
            "student.json",
            "--job",
            "a.json",
            "--job",
            "b.json",
            "--responses",
            "true,false",
            "--today",
            "2025-09-01",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.jobs.len(), 2);
                assert_eq!(args.responses, vec![true, false]);
                assert_eq!(
                    args.today,
                    chrono::NaiveDate::from_ymd_opt(2025, 9, 1)
                );
                assert!(!args.json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }
}
