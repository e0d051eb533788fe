use super::record::{LeadRecord, LeadStatus};
use crate::insights::{ForecastInput, MonthlyEnrollment};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

impl ForecastInput {
    /// Aggregates a lead list into forecaster input.
    ///
    /// Enrolled leads count as conversions and are bucketed by the month of their last
    /// contact, falling back to the creation date.
    pub fn from_leads(leads: &[LeadRecord]) -> Self {
        let mut by_month: BTreeMap<String, u32> = BTreeMap::new();
        let mut hot_leads = 0;
        let mut conversions = 0;

        for lead in leads {
            match lead.status {
                LeadStatus::Hot => hot_leads += 1,
                LeadStatus::Enrolled => {
                    conversions += 1;
                    let date = lead.last_contacted_on.unwrap_or(lead.created_on);
                    *by_month.entry(date.format("%Y-%m").to_string()).or_default() += 1;
                }
                _ => {}
            }
        }

        let total_leads = u32::try_from(leads.len()).unwrap_or(u32::MAX);
        let monthly_trend = by_month
            .into_iter()
            .map(|(month, enrollments)| MonthlyEnrollment { month, enrollments })
            .collect();

        Self {
            total_leads,
            hot_leads,
            conversions,
            monthly_trend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Pipeline overview for a lead export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPipelineSummary {
    pub total_leads: usize,
    pub by_status: Vec<StatusCount>,
    pub hot_leads: usize,
    pub enrolled: usize,
    /// Open leads idle for longer than the stale window. Leads never contacted are
    /// measured from their creation date.
    pub stale_leads: usize,
}

impl LeadPipelineSummary {
    pub fn from_leads(leads: &[LeadRecord], today: NaiveDate, stale_after_days: u32) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut hot_leads = 0;
        let mut enrolled = 0;
        let mut stale_leads = 0;

        for lead in leads {
            *counts.entry(lead.status.as_str().to_string()).or_default() += 1;
            match lead.status {
                LeadStatus::Hot => hot_leads += 1,
                LeadStatus::Enrolled => enrolled += 1,
                _ => {}
            }

            let closed = matches!(lead.status, LeadStatus::Enrolled | LeadStatus::Dropped);
            let idle_days = lead
                .days_since_contact(today)
                .unwrap_or_else(|| lead.days_since_creation(today));
            if !closed && idle_days > stale_after_days {
                stale_leads += 1;
            }
        }

        let by_status = counts
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect();

        Self {
            total_leads: leads.len(),
            by_status,
            hot_leads,
            enrolled,
            stale_leads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::LeadSource;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn lead(
        id: &str,
        status: LeadStatus,
        created: NaiveDate,
        contacted: Option<NaiveDate>,
    ) -> LeadRecord {
        LeadRecord {
            id: id.to_string(),
            name: format!("Lead {id}"),
            email: None,
            phone: None,
            class: "Grade 4".to_string(),
            status,
            source: LeadSource::Referral,
            created_on: created,
            last_contacted_on: contacted,
            follow_up_count: 1,
            parent_name: None,
            parent_phone: None,
        }
    }

    #[test]
    fn forecast_input_counts_hot_and_enrolled_leads() {
        let leads = vec![
            lead("a", LeadStatus::Hot, date(6, 1), None),
            lead("b", LeadStatus::Enrolled, date(6, 1), Some(date(7, 3))),
            lead("c", LeadStatus::Enrolled, date(5, 2), None),
            lead("d", LeadStatus::Enrolled, date(7, 1), Some(date(7, 20))),
            lead("e", LeadStatus::Other("walk_in".to_string()), date(7, 1), None),
        ];

        let input = ForecastInput::from_leads(&leads);

        assert_eq!(input.total_leads, 5);
        assert_eq!(input.hot_leads, 1);
        assert_eq!(input.conversions, 3);
        assert_eq!(
            input.monthly_trend,
            vec![
                MonthlyEnrollment {
                    month: "2025-05".to_string(),
                    enrollments: 1
                },
                MonthlyEnrollment {
                    month: "2025-07".to_string(),
                    enrollments: 2
                },
            ]
        );
    }

    #[test]
    fn pipeline_summary_flags_stale_open_leads() {
        let today = date(9, 30);
        let leads = vec![
            lead("fresh", LeadStatus::Warm, date(9, 1), Some(date(9, 28))),
            lead("stale", LeadStatus::Hot, date(8, 1), Some(date(9, 1))),
            lead("never", LeadStatus::New, date(9, 1), None),
            lead("done", LeadStatus::Enrolled, date(6, 1), Some(date(6, 10))),
        ];

        let summary = LeadPipelineSummary::from_leads(&leads, today, 14);

        assert_eq!(summary.total_leads, 4);
        assert_eq!(summary.hot_leads, 1);
        assert_eq!(summary.enrolled, 1);
        assert_eq!(summary.stale_leads, 2);
        assert_eq!(
            summary
                .by_status
                .iter()
                .map(|entry| entry.status.as_str())
                .collect::<Vec<_>>(),
            vec!["enrolled", "hot", "new", "warm"]
        );
    }
}
