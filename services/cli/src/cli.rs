use crate::commands::{
    run_forecast, run_lead_duplicates, run_lead_forecast, run_lead_score, run_lead_summary,
    run_marketing, run_predict, ForecastArgs, InputArgs, LeadCsvArgs, LeadForecastArgs,
    LeadScoreArgs, LeadSummaryArgs,
};
use clap::{Parser, Subcommand};
use edulead::config::AppConfig;
use edulead::error::AppError;
use edulead::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "EduLead Insights",
    about = "Score admission leads, forecast enrollments and plan marketing spend",
    version
)]
struct Cli {
    /// Print single-line JSON regardless of APP_OUTPUT_PRETTY
    #[arg(long, global = true)]
    compact: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict admission likelihood for one lead (LeadSignal JSON)
    Predict(InputArgs),
    /// Forecast enrollments from aggregate statistics (ForecastInput JSON)
    Forecast(ForecastArgs),
    /// Suggest marketing channel allocations (MarketingRequest JSON)
    Marketing(InputArgs),
    /// Work with CRM lead CSV exports
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LeadsCommand {
    /// Score every lead in an export, highest likelihood first
    Score(LeadScoreArgs),
    /// List leads sharing an email address or phone number
    Duplicates(LeadCsvArgs),
    /// Forecast enrollments from an export
    Forecast(LeadForecastArgs),
    /// Summarize pipeline status counts and stale leads
    Summary(LeadSummaryArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if cli.compact {
        config.output.pretty = false;
    }

    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Predict(args) => run_predict(args, &config),
        Command::Forecast(args) => run_forecast(args, &config),
        Command::Marketing(args) => run_marketing(args, &config),
        Command::Leads { command } => match command {
            LeadsCommand::Score(args) => run_lead_score(args, &config),
            LeadsCommand::Duplicates(args) => run_lead_duplicates(args, &config),
            LeadsCommand::Forecast(args) => run_lead_forecast(args, &config),
            LeadsCommand::Summary(args) => run_lead_summary(args, &config),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_lead_commands() {
        let cli = Cli::try_parse_from([
            "edulead-cli",
            "leads",
            "score",
            "--csv",
            "leads.csv",
            "--today",
            "2026-04-01",
            "--limit",
            "5",
            "--compact",
        ])
        .expect("arguments parse");

        assert!(cli.compact);
        match cli.command {
            Command::Leads {
                command: LeadsCommand::Score(args),
            } => {
                assert_eq!(args.csv.csv.to_str(), Some("leads.csv"));
                assert_eq!(args.limit, Some(5));
                assert!(args.today.is_some());
            }
            other => panic!("expected leads score, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_as_of_dates() {
        let result = Cli::try_parse_from(["edulead-cli", "forecast", "--as-of", "April"]);
        assert!(result.is_err());
    }

    #[test]
    fn input_file_is_optional() {
        let cli = Cli::try_parse_from(["edulead-cli", "predict"]).expect("arguments parse");
        match cli.command {
            Command::Predict(args) => assert!(args.input.is_none()),
            other => panic!("expected predict, got {other:?}"),
        }
    }
}
