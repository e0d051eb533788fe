use crate::insights::LeadSignal;
use chrono::NaiveDate;

/// Pipeline stage of a lead. Unrecognized values are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    New,
    Contacted,
    Interested,
    Hot,
    Warm,
    Cold,
    Enrolled,
    Dropped,
    Other(String),
}

impl LeadStatus {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "new" => Self::New,
            "contacted" => Self::Contacted,
            "interested" => Self::Interested,
            "hot" => Self::Hot,
            "warm" => Self::Warm,
            "cold" => Self::Cold,
            "enrolled" => Self::Enrolled,
            "dropped" => Self::Dropped,
            _ => Self::Other(normalized),
        }
    }

    /// Value handed to the scorer.
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Interested => "interested",
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
            Self::Enrolled => "enrolled",
            Self::Dropped => "dropped",
            Self::Other(value) => value,
        }
    }
}

/// Acquisition channel. Export files spell these inconsistently ("Social Media",
/// "social-media"), so parsing folds case, spaces and hyphens into snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeadSource {
    Referral,
    Website,
    SocialMedia,
    ColdCall,
    WalkIn,
    PhoneInquiry,
    CommunityEvents,
    Other(String),
}

impl LeadSource {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        match normalized.as_str() {
            "referral" => Self::Referral,
            "website" => Self::Website,
            "social_media" => Self::SocialMedia,
            "cold_call" => Self::ColdCall,
            "walk_in" => Self::WalkIn,
            "phone_inquiry" => Self::PhoneInquiry,
            "community_events" => Self::CommunityEvents,
            _ => Self::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Referral => "referral",
            Self::Website => "website",
            Self::SocialMedia => "social_media",
            Self::ColdCall => "cold_call",
            Self::WalkIn => "walk_in",
            Self::PhoneInquiry => "phone_inquiry",
            Self::CommunityEvents => "community_events",
            Self::Other(value) => value,
        }
    }
}

/// A lead as exported from the CRM.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadRecord {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub class: String,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub created_on: NaiveDate,
    pub last_contacted_on: Option<NaiveDate>,
    pub follow_up_count: u32,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

impl LeadRecord {
    pub fn has_parent_info(&self) -> bool {
        self.parent_name.is_some() && self.parent_phone.is_some()
    }

    pub fn days_since_creation(&self, today: NaiveDate) -> u32 {
        days_between(self.created_on, today)
    }

    /// Days since the last contact as of `today`, saturating at zero for future dates.
    pub fn days_since_contact(&self, today: NaiveDate) -> Option<u32> {
        self.last_contacted_on.map(|date| days_between(date, today))
    }

    /// Projects the record into the scorer's input as of `today`.
    pub fn signal(&self, today: NaiveDate) -> LeadSignal {
        LeadSignal {
            status: self.status.as_str().to_string(),
            source: self.source.as_str().to_string(),
            days_since_creation: self.days_since_creation(today),
            follow_up_count: self.follow_up_count,
            last_contact_days: self.days_since_contact(today),
            class: self.class.clone(),
            has_parent_info: self.has_parent_info(),
        }
    }
}

fn days_between(earlier: NaiveDate, later: NaiveDate) -> u32 {
    let days = (later - earlier).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}
