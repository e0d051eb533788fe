use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Confidence reported with every forecast, independent of input volume.
pub const FORECAST_CONFIDENCE: f64 = 0.75;

const DEFAULT_CONVERSION_RATE: f64 = 0.1;
const TREND_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEnrollment {
    pub month: String,
    pub enrollments: u32,
}

/// Aggregate pipeline statistics plus a chronological enrollment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastInput {
    pub total_leads: u32,
    pub hot_leads: u32,
    pub conversions: u32,
    #[serde(default)]
    pub monthly_trend: Vec<MonthlyEnrollment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl EnrollmentTrend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentForecast {
    pub predicted_enrollments: u32,
    pub confidence: f64,
    pub trend: EnrollmentTrend,
    pub factors: Vec<String>,
}

/// Projects next-period enrollments from hot leads and the observed conversion rate.
///
/// `as_of` selects the seasonal multiplier; callers pass today's date in production.
pub fn forecast_enrollment(input: &ForecastInput, as_of: NaiveDate) -> EnrollmentForecast {
    let mut factors = Vec::new();

    let conversion_rate = if input.total_leads > 0 {
        input.conversions as f64 / input.total_leads as f64
    } else {
        DEFAULT_CONVERSION_RATE
    };

    let mut predicted = (input.hot_leads as f64 * conversion_rate).floor();
    factors.push(format!(
        "Based on {:.1}% conversion rate",
        conversion_rate * 100.0
    ));

    let history = &input.monthly_trend;
    let recent = &history[history.len().saturating_sub(TREND_WINDOW)..];

    if let [.., previous, latest] = recent {
        if latest.enrollments > previous.enrollments {
            predicted = (predicted * 1.2).floor();
            factors.push("Increasing enrollment trend".to_string());
        } else if latest.enrollments < previous.enrollments {
            predicted = (predicted * 0.8).floor();
            factors.push("Decreasing enrollment trend".to_string());
        } else {
            factors.push("Stable enrollment trend".to_string());
        }
    }

    // chrono months are 1-based: March..=May and November..=December.
    match as_of.month() {
        3..=5 => {
            predicted = (predicted * 1.3).floor();
            factors.push("Peak admission season boost".to_string());
        }
        11 | 12 => {
            predicted = (predicted * 1.1).floor();
            factors.push("Planning season increase".to_string());
        }
        _ => {}
    }

    let trend = classify_trend(history);
    let predicted_enrollments = predicted.max(0.0) as u32;

    debug!(
        total_leads = input.total_leads,
        hot_leads = input.hot_leads,
        predicted_enrollments,
        trend = trend.label(),
        %as_of,
        "forecast enrollments"
    );

    EnrollmentForecast {
        predicted_enrollments,
        confidence: FORECAST_CONFIDENCE,
        trend,
        factors,
    }
}

/// Compares the mean of the latest window against the window immediately before it.
/// An empty earlier window has a mean of zero.
fn classify_trend(history: &[MonthlyEnrollment]) -> EnrollmentTrend {
    let recent_start = history.len().saturating_sub(TREND_WINDOW);
    let recent = &history[recent_start..];
    if recent.len() < 2 {
        return EnrollmentTrend::Stable;
    }

    let previous = &history[recent_start.saturating_sub(TREND_WINDOW)..recent_start];
    let recent_mean = mean_enrollments(recent);
    let previous_mean = mean_enrollments(previous);

    if recent_mean > previous_mean * 1.1 {
        EnrollmentTrend::Increasing
    } else if recent_mean < previous_mean * 0.9 {
        EnrollmentTrend::Decreasing
    } else {
        EnrollmentTrend::Stable
    }
}

fn mean_enrollments(window: &[MonthlyEnrollment]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let total: u64 = window.iter().map(|entry| u64::from(entry.enrollments)).sum();
    total as f64 / window.len() as f64
}
