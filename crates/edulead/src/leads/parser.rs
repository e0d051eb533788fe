use super::normalizer::normalize_text;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Raw export row. Column names follow the CRM's "Export leads" CSV.
#[derive(Debug, Deserialize)]
pub(crate) struct LeadRow {
    #[serde(rename = "Id")]
    pub(crate) id: String,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    pub(crate) email: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    pub(crate) phone: Option<String>,
    #[serde(rename = "Class", default)]
    pub(crate) class: String,
    #[serde(rename = "Status", default)]
    pub(crate) status: String,
    #[serde(rename = "Source", default)]
    pub(crate) source: String,
    #[serde(rename = "Created At", default, deserialize_with = "empty_string_as_none")]
    pub(crate) created_at: Option<String>,
    #[serde(
        rename = "Last Contacted At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) last_contacted_at: Option<String>,
    #[serde(rename = "Follow Ups", default, deserialize_with = "empty_string_as_none")]
    pub(crate) follow_ups: Option<String>,
    #[serde(rename = "Parent Name", default, deserialize_with = "empty_string_as_none")]
    pub(crate) parent_name: Option<String>,
    #[serde(
        rename = "Parent Phone",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) parent_phone: Option<String>,
}

impl LeadRow {
    pub(crate) fn created_on(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_date)
    }

    pub(crate) fn last_contacted_on(&self) -> Option<NaiveDate> {
        self.last_contacted_at.as_deref().and_then(parse_date)
    }

    /// Missing or malformed counts read as zero follow-ups.
    pub(crate) fn follow_up_count(&self) -> u32 {
        self.follow_ups
            .as_deref()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }

    pub(crate) fn display_name(&self) -> String {
        normalize_text(&self.name)
    }
}

/// Yields each row along with its 1-based line number in the source file.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<(u64, LeadRow)>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: LeadRow = record.deserialize(Some(&headers))?;
        rows.push((line, row));
    }

    Ok(rows)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}
