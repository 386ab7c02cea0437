use crate::demo::{run_demo, run_rewards_catalog, run_rewards_evaluate, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lifeline::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lifeline",
    about = "Run the donor registry service or explore donor rewards from the command line",
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
    /// Inspect the reward catalog or evaluate a donation count
    Rewards {
        #[command(subcommand)]
        command: RewardsCommand,
    },
    /// Seed an in-memory registry and print the dashboard and donor progression
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RewardsCommand {
    /// Print the standard reward catalog in display order
    Catalog,
    /// Evaluate a donation count, or derive it from a ledger CSV export
    Evaluate(EvaluateArgs),
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
        Command::Rewards {
            command: RewardsCommand::Catalog,
        } => run_rewards_catalog(),
        Command::Rewards {
            command: RewardsCommand::Evaluate(args),
        } => run_rewards_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["lifeline-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn evaluate_accepts_negative_counts_for_engine_validation() {
        let cli = Cli::try_parse_from(["lifeline-api", "rewards", "evaluate", "--donations", "-2"])
            .expect("parses");
        match cli.command {
            Some(Command::Rewards {
                command: RewardsCommand::Evaluate(args),
            }) => assert_eq!(args.donations, Some(-2)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn evaluate_requires_a_count_source() {
        assert!(Cli::try_parse_from(["lifeline-api", "rewards", "evaluate"]).is_err());
        assert!(Cli::try_parse_from([
            "lifeline-api",
            "rewards",
            "evaluate",
            "--ledger-csv",
            "donations.csv"
        ])
        .is_err());
    }
}
