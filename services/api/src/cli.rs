use crate::demo::{
    run_affordability, run_demo, run_market, run_rank, AffordabilityArgs, DemoArgs, MarketArgs,
    RankArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Match",
    about = "Score, rank and explain property matches for real-estate leads",
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
    /// Rank a catalog for a single lead profile
    Rank(RankArgs),
    /// Assess how much a lead can afford
    Affordability(AffordabilityArgs),
    /// Summarise listings per community
    Market(MarketArgs),
    /// Run ranking and market views over the built-in sample catalog
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
        Command::Rank(args) => run_rank(args),
        Command::Affordability(args) => {
            run_affordability(args);
            Ok(())
        }
        Command::Market(args) => run_market(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_match::matching::CustomerIntent;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["lead-match-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_rank_arguments() {
        let cli = Cli::try_parse_from([
            "lead-match-api",
            "rank",
            "--income",
            "50000",
            "--intent",
            "Buy",
            "--community",
            "Mudon",
            "--community",
            "Arabian Ranches",
            "--min-score",
            "40",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Rank(args)) => {
                assert_eq!(args.intent, CustomerIntent::Buy);
                assert_eq!(args.income, 50_000.0);
                assert_eq!(args.community, vec!["Mudon", "Arabian Ranches"]);
                assert_eq!(args.min_score, Some(40));
            }
            other => panic!("expected rank command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_intent() {
        let result = Cli::try_parse_from([
            "lead-match-api",
            "affordability",
            "--income",
            "20000",
            "--intent",
            "lease-to-own",
        ]);
        assert!(result.is_err());
    }
}
