use crate::infra::{emit, read_json_input};
use chrono::{Local, NaiveDate};
use clap::Args;
use edulead::config::AppConfig;
use edulead::error::AppError;
use edulead::insights::{
    forecast_enrollment, predict_admission, recommend_marketing, AdmissionPrediction,
    EnrollmentForecast, ForecastInput, LeadSignal, MarketingRequest,
};
use edulead::leads::{find_duplicates, LeadImporter, LeadPipelineSummary, LeadRecord};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct InputArgs {
    /// JSON input file (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ForecastArgs {
    /// JSON input file (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Date used for the seasonal adjustment (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct LeadCsvArgs {
    /// CRM lead export in CSV format
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct LeadScoreArgs {
    #[command(flatten)]
    pub(crate) csv: LeadCsvArgs,
    /// Evaluation date for lead ages (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Only print the highest scoring N leads
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct LeadForecastArgs {
    #[command(flatten)]
    pub(crate) csv: LeadCsvArgs,
    /// Date used for the seasonal adjustment (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct LeadSummaryArgs {
    #[command(flatten)]
    pub(crate) csv: LeadCsvArgs,
    /// Evaluation date for stale detection (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Override APP_STALE_LEAD_DAYS
    #[arg(long)]
    pub(crate) stale_after_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoredLead {
    pub(crate) lead_id: String,
    pub(crate) name: String,
    pub(crate) class: String,
    pub(crate) prediction: AdmissionPrediction,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeadForecastView {
    pub(crate) aggregates: ForecastInput,
    pub(crate) forecast: EnrollmentForecast,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn run_predict(args: InputArgs, config: &AppConfig) -> Result<(), AppError> {
    let signal: LeadSignal = read_json_input(args.input.as_deref())?;
    emit(&predict_admission(&signal), &config.output)
}

pub(crate) fn run_forecast(args: ForecastArgs, config: &AppConfig) -> Result<(), AppError> {
    let input: ForecastInput = read_json_input(args.input.as_deref())?;
    let as_of = args.as_of.unwrap_or_else(today);
    emit(&forecast_enrollment(&input, as_of), &config.output)
}

pub(crate) fn run_marketing(args: InputArgs, config: &AppConfig) -> Result<(), AppError> {
    let request: MarketingRequest = read_json_input(args.input.as_deref())?;
    emit(&recommend_marketing(&request), &config.output)
}

pub(crate) fn run_lead_score(args: LeadScoreArgs, config: &AppConfig) -> Result<(), AppError> {
    let import = LeadImporter::from_path(&args.csv.csv)?;
    let today = args.today.unwrap_or_else(today);
    let scored = score_leads(&import.leads, today, args.limit);
    info!(scored = scored.len(), %today, "scored lead export");
    emit(&scored, &config.output)
}

pub(crate) fn run_lead_duplicates(args: LeadCsvArgs, config: &AppConfig) -> Result<(), AppError> {
    let import = LeadImporter::from_path(&args.csv)?;
    let groups = find_duplicates(&import.leads);
    info!(groups = groups.len(), "duplicate scan complete");
    emit(&groups, &config.output)
}

pub(crate) fn run_lead_forecast(
    args: LeadForecastArgs,
    config: &AppConfig,
) -> Result<(), AppError> {
    let import = LeadImporter::from_path(&args.csv.csv)?;
    let as_of = args.as_of.unwrap_or_else(today);
    emit(&forecast_leads(&import.leads, as_of), &config.output)
}

pub(crate) fn run_lead_summary(args: LeadSummaryArgs, config: &AppConfig) -> Result<(), AppError> {
    let import = LeadImporter::from_path(&args.csv.csv)?;
    let today = args.today.unwrap_or_else(today);
    let stale_after_days = args
        .stale_after_days
        .unwrap_or(config.import.stale_after_days);
    let summary = LeadPipelineSummary::from_leads(&import.leads, today, stale_after_days);
    emit(&summary, &config.output)
}

/// Scores each lead as of `today` and orders by likelihood, keeping export order for ties.
pub(crate) fn score_leads(
    leads: &[LeadRecord],
    today: NaiveDate,
    limit: Option<usize>,
) -> Vec<ScoredLead> {
    let mut scored: Vec<ScoredLead> = leads
        .iter()
        .map(|lead| ScoredLead {
            lead_id: lead.id.clone(),
            name: lead.name.clone(),
            class: lead.class.clone(),
            prediction: predict_admission(&lead.signal(today)),
        })
        .collect();

    scored.sort_by(|a, b| b.prediction.likelihood.cmp(&a.prediction.likelihood));
    if let Some(limit) = limit {
        scored.truncate(limit);
    }
    scored
}

pub(crate) fn forecast_leads(leads: &[LeadRecord], as_of: NaiveDate) -> LeadForecastView {
    let aggregates = ForecastInput::from_leads(leads);
    let forecast = forecast_enrollment(&aggregates, as_of);
    LeadForecastView {
        aggregates,
        forecast,
    }
}
