use serde::{Deserialize, Serialize};
use tracing::debug;

/// Confidence reported with every prediction. The rules carry no notion of certainty.
pub const ADMISSION_CONFIDENCE: f64 = 0.7;

const BASE_LIKELIHOOD: i32 = 50;
const DEFAULT_RECOMMENDATION: &str = "Continue regular follow-up schedule";

/// Lead attributes consumed by the admission scorer.
///
/// `status` and `source` are free-form; values outside the recognized set leave the
/// score untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSignal {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub source: String,
    pub days_since_creation: u32,
    pub follow_up_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact_days: Option<u32>,
    #[serde(default)]
    pub class: String,
    pub has_parent_info: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionPrediction {
    pub likelihood: u8,
    pub confidence: f64,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Accumulates rule contributions before the final clamp.
#[derive(Default)]
struct ScoreSheet {
    adjustment: i32,
    factors: Vec<String>,
    recommendations: Vec<String>,
}

impl ScoreSheet {
    fn apply(&mut self, points: i32, factor: &str) {
        self.adjustment += points;
        self.factors.push(factor.to_string());
    }

    fn recommend(&mut self, action: &str) {
        self.recommendations.push(action.to_string());
    }
}

/// Scores a lead's admission likelihood from additive rules on a base of 50.
///
/// Each rule group is an if/else-if chain, so at most one branch per group contributes.
/// The total is clamped to `0..=100` once, after every group has run.
pub fn predict_admission(signal: &LeadSignal) -> AdmissionPrediction {
    let mut sheet = ScoreSheet::default();

    match signal.status.as_str() {
        "hot" => sheet.apply(25, "High interest level"),
        "warm" => sheet.apply(10, "Moderate interest level"),
        "cold" => {
            sheet.apply(-20, "Low engagement");
            sheet.recommend("Re-engage with personalized outreach");
        }
        _ => {}
    }

    match signal.source.as_str() {
        "referral" => sheet.apply(20, "High-quality referral source"),
        "website" => sheet.apply(10, "Direct website inquiry"),
        "social_media" => sheet.apply(5, "Social media engagement"),
        _ => {}
    }

    if signal.days_since_creation <= 3 {
        sheet.apply(15, "Recent inquiry");
    } else if signal.days_since_creation > 14 {
        sheet.apply(-10, "Older lead requiring attention");
        sheet.recommend("Prioritize immediate follow-up");
    }

    if signal.follow_up_count >= 3 {
        sheet.apply(10, "Good follow-up engagement");
    } else if signal.follow_up_count == 0 {
        sheet.apply(-15, "No follow-up interactions");
        sheet.recommend("Schedule initial follow-up call");
    }

    if let Some(days) = signal.last_contact_days {
        if days <= 2 {
            sheet.apply(10, "Recent contact");
        } else if days > 7 {
            sheet.apply(-10, "Stale contact");
            sheet.recommend("Reach out to maintain engagement");
        }
    }

    if signal.has_parent_info {
        sheet.apply(10, "Complete parent information available");
    } else {
        sheet.apply(-5, "Missing parent information");
        sheet.recommend("Collect parent contact details");
    }

    let likelihood = (BASE_LIKELIHOOD + sheet.adjustment).clamp(0, 100) as u8;

    let mut recommendations = sheet.recommendations;
    if recommendations.is_empty() {
        recommendations.push(DEFAULT_RECOMMENDATION.to_string());
    }

    debug!(
        status = %signal.status,
        source = %signal.source,
        likelihood,
        factors = sheet.factors.len(),
        "scored admission likelihood"
    );

    AdmissionPrediction {
        likelihood,
        confidence: ADMISSION_CONFIDENCE,
        factors: sheet.factors,
        recommendations,
    }
}
