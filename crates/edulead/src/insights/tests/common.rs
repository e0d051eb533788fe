use crate::insights::{ForecastInput, LeadSignal, MarketingRequest, MonthlyEnrollment};
use chrono::NaiveDate;

/// A lead that fires no rule in any group: unknown status/source, mid-age, a couple of
/// follow-ups, contact five days ago, parent info present.
pub(super) fn neutral_signal() -> LeadSignal {
    LeadSignal {
        status: "contacted".to_string(),
        source: "walk_in".to_string(),
        days_since_creation: 7,
        follow_up_count: 1,
        last_contact_days: Some(5),
        class: "Grade 5".to_string(),
        has_parent_info: true,
    }
}

pub(super) fn strongest_signal() -> LeadSignal {
    LeadSignal {
        status: "hot".to_string(),
        source: "referral".to_string(),
        days_since_creation: 0,
        follow_up_count: 5,
        last_contact_days: Some(1),
        class: "Grade 1".to_string(),
        has_parent_info: true,
    }
}

pub(super) fn weakest_signal() -> LeadSignal {
    LeadSignal {
        status: "cold".to_string(),
        source: "cold_call".to_string(),
        days_since_creation: 20,
        follow_up_count: 0,
        last_contact_days: Some(10),
        class: "Grade 8".to_string(),
        has_parent_info: false,
    }
}

pub(super) fn history(values: &[u32]) -> Vec<MonthlyEnrollment> {
    values
        .iter()
        .enumerate()
        .map(|(index, enrollments)| MonthlyEnrollment {
            month: format!("2025-{:02}", index + 1),
            enrollments: *enrollments,
        })
        .collect()
}

pub(super) fn forecast_input(
    total: u32,
    hot: u32,
    conversions: u32,
    trend: &[u32],
) -> ForecastInput {
    ForecastInput {
        total_leads: total,
        hot_leads: hot,
        conversions,
        monthly_trend: history(trend),
    }
}

/// July carries no seasonal multiplier.
pub(super) fn off_season() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid off-season date")
}

pub(super) fn marketing_request(budget: f64, sources: &[&str]) -> MarketingRequest {
    MarketingRequest {
        target_class: "Grade 3".to_string(),
        budget,
        current_lead_sources: sources.iter().map(|source| source.to_string()).collect(),
    }
}
