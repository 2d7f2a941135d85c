use super::console::{run_alert, run_report, run_screen, AlertArgs, ReportArgs, ScreenArgs};
use super::server;
use crate::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Airport Security Screening",
    about = "Rule-based passenger screening: score datasets, export reports, and raise alerts",
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
    /// Score a passenger dataset and print tier analytics
    Screen(ScreenArgs),
    /// Print one passenger's report and export it as PDF
    Report(ReportArgs),
    /// Email the high-risk passengers of a dataset to the security desk
    Alert(AlertArgs),
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
        Command::Screen(args) => run_screen(args),
        Command::Report(args) => run_report(args),
        Command::Alert(args) => run_alert(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_requires_passenger_id() {
        let parsed = Cli::try_parse_from(["screening", "report", "--csv", "passengers.csv"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "screening",
            "report",
            "--csv",
            "passengers.csv",
            "--passenger-id",
            "P1",
        ])
        .expect("arguments parse");
        match parsed.command {
            Some(Command::Report(args)) => assert_eq!(args.passenger_id, "P1"),
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let parsed = Cli::try_parse_from(["screening"]).expect("arguments parse");
        assert!(parsed.command.is_none());
    }
}
