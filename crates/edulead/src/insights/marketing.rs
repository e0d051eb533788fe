use serde::{Deserialize, Serialize};
use tracing::debug;

const GOOGLE_ADS_MIN_BUDGET: f64 = 10_000.0;
const SOCIAL_MIN_BUDGET: f64 = 5_000.0;
const COMMUNITY_EVENTS_SOURCE: &str = "community_events";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingRequest {
    pub target_class: String,
    pub budget: f64,
    #[serde(default)]
    pub current_lead_sources: Vec<String>,
}

/// One suggested channel allocation. Keys stay snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingRecommendation {
    pub campaign_type: String,
    pub target_audience: String,
    pub platform: String,
    pub budget_suggestion: f64,
    pub ad_copy: String,
    pub expected_leads: u64,
}

/// Budget share and cost-per-lead for a channel.
struct ChannelAllocation {
    share: f64,
    cost_per_lead: f64,
}

impl ChannelAllocation {
    const fn new(share: f64, cost_per_lead: f64) -> Self {
        Self {
            share,
            cost_per_lead,
        }
    }

    /// Exact share of `total`, or 0 when the budget is negative or not finite.
    fn budget(&self, total: f64) -> f64 {
        let share = total * self.share;
        if share.is_finite() && share > 0.0 {
            share
        } else {
            0.0
        }
    }

    fn expected_leads(&self, total: f64) -> u64 {
        floor_non_negative(total * self.share / self.cost_per_lead)
    }
}

const GOOGLE_ADS: ChannelAllocation = ChannelAllocation::new(0.4, 200.0);
const SOCIAL: ChannelAllocation = ChannelAllocation::new(0.3, 150.0);
const REFERRAL: ChannelAllocation = ChannelAllocation::new(0.15, 100.0);
const COMMUNITY: ChannelAllocation = ChannelAllocation::new(0.15, 300.0);

fn floor_non_negative(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Builds budget-gated channel suggestions in a fixed order: search ads, social,
/// referral program, then community events when that channel is not already in use.
pub fn recommend_marketing(request: &MarketingRequest) -> Vec<MarketingRecommendation> {
    let budget = request.budget;
    let class = request.target_class.as_str();
    let mut recommendations = Vec::new();

    if budget >= GOOGLE_ADS_MIN_BUDGET {
        recommendations.push(MarketingRecommendation {
            campaign_type: "Search Advertising".to_string(),
            target_audience: format!("Parents searching for {class} admissions nearby"),
            platform: "Google Ads".to_string(),
            budget_suggestion: GOOGLE_ADS.budget(budget),
            ad_copy: format!(
                "Admissions open for {class}! Experienced faculty, modern facilities and a \
                 proven track record. Book a campus visit today."
            ),
            expected_leads: GOOGLE_ADS.expected_leads(budget),
        });
    }

    if budget >= SOCIAL_MIN_BUDGET {
        recommendations.push(MarketingRecommendation {
            campaign_type: "Social Media Campaign".to_string(),
            target_audience: format!("Parents of {class} age children within 10km"),
            platform: "Facebook/Instagram".to_string(),
            budget_suggestion: SOCIAL.budget(budget),
            ad_copy: format!(
                "Give your child the best start in {class}. Limited seats available, enquire now."
            ),
            expected_leads: SOCIAL.expected_leads(budget),
        });
    }

    recommendations.push(MarketingRecommendation {
        campaign_type: "Referral Program".to_string(),
        target_audience: format!("Current parents with {class} age siblings or friends"),
        platform: "Parent Network".to_string(),
        budget_suggestion: REFERRAL.budget(budget),
        ad_copy: format!(
            "Refer a family for {class} admission and earn fee benefits for every \
             successful enrollment."
        ),
        expected_leads: REFERRAL.expected_leads(budget),
    });

    let runs_community_events = request
        .current_lead_sources
        .iter()
        .any(|source| source == COMMUNITY_EVENTS_SOURCE);
    if !runs_community_events {
        recommendations.push(MarketingRecommendation {
            campaign_type: "Community Events".to_string(),
            target_audience: format!("Local families with {class} age children"),
            platform: "Community Events".to_string(),
            budget_suggestion: COMMUNITY.budget(budget),
            ad_copy: format!(
                "Join our open house and meet the {class} teachers. Activities for kids, \
                 Q&A for parents."
            ),
            expected_leads: COMMUNITY.expected_leads(budget),
        });
    }

    debug!(
        budget,
        target_class = class,
        channels = recommendations.len(),
        "generated marketing recommendations"
    );

    recommendations
}
