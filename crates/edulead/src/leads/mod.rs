//! CRM lead exports: CSV import, duplicate detection and aggregation into the
//! inputs of the insight engines.

mod duplicates;
mod normalizer;
mod parser;
mod record;
mod summary;

pub use duplicates::{find_duplicates, DuplicateGroup, DuplicateKind};
pub use record::{LeadRecord, LeadSource, LeadStatus};
pub use summary::{LeadPipelineSummary, StatusCount};

use normalizer::normalize_text;
use parser::LeadRow;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("failed to read lead export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lead CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Leads accepted from an export plus the count of rows that could not be used.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadImport {
    pub leads: Vec<LeadRecord>,
    pub skipped_rows: usize,
}

pub struct LeadImporter;

impl LeadImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LeadImport, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows without a usable creation date or name are skipped and counted; every
    /// other field is optional.
    pub fn from_reader<R: Read>(reader: R) -> Result<LeadImport, LeadImportError> {
        let mut leads = Vec::new();
        let mut skipped_rows = 0;

        for (line, row) in parser::parse_rows(reader)? {
            match build_record(row) {
                Some(record) => leads.push(record),
                None => {
                    warn!(line, "skipping lead row without id, name or creation date");
                    skipped_rows += 1;
                }
            }
        }

        info!(imported = leads.len(), skipped_rows, "lead export imported");
        Ok(LeadImport {
            leads,
            skipped_rows,
        })
    }
}

fn build_record(row: LeadRow) -> Option<LeadRecord> {
    let created_on = row.created_on()?;
    let name = row.display_name();
    let id = normalize_text(&row.id);
    if name.is_empty() || id.is_empty() {
        return None;
    }

    Some(LeadRecord {
        last_contacted_on: row.last_contacted_on(),
        follow_up_count: row.follow_up_count(),
        status: LeadStatus::parse(&row.status),
        source: LeadSource::parse(&row.source),
        class: normalize_text(&row.class),
        id,
        name,
        email: row.email,
        phone: row.phone,
        created_on,
        parent_name: row.parent_name,
        parent_phone: row.parent_phone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    const HEADER: &str = "Id,Name,Email,Phone,Class,Status,Source,Created At,\
                          Last Contacted At,Follow Ups,Parent Name,Parent Phone\n";

    fn import(rows: &str) -> LeadImport {
        LeadImporter::from_reader(Cursor::new(format!("{HEADER}{rows}")))
            .expect("import succeeds")
    }

    #[test]
    fn importer_maps_columns_into_records() {
        let result = import(
            "L-1,Aarav Sharma,aarav@example.com,98765 43210,Grade 2,Hot,Social Media,\
             2025-09-20,2025-09-23T09:30:00Z,3,Rohan Sharma,98765 43210\n",
        );

        assert_eq!(result.skipped_rows, 0);
        let lead = &result.leads[0];
        assert_eq!(lead.id, "L-1");
        assert_eq!(lead.status, LeadStatus::Hot);
        assert_eq!(lead.source, LeadSource::SocialMedia);
        assert_eq!(lead.class, "Grade 2");
        assert_eq!(lead.created_on, NaiveDate::from_ymd_opt(2025, 9, 20).unwrap());
        assert_eq!(
            lead.last_contacted_on,
            Some(NaiveDate::from_ymd_opt(2025, 9, 23).unwrap())
        );
        assert_eq!(lead.follow_up_count, 3);
        assert!(lead.has_parent_info());
    }

    #[test]
    fn importer_skips_rows_without_id_name_or_creation_date() {
        let result = import(concat!(
            "L-1,Aarav,,,,new,website,,,,,\n",
            "L-2,,,,,new,website,2025-09-01,,,,\n",
            ",Nisha,,,,new,website,2025-09-01,,,,\n",
            "L-3,Ishaan,,,,new,website,2025-09-01,,,,\n",
        ));

        assert_eq!(result.skipped_rows, 3);
        assert_eq!(result.leads.len(), 1);
        assert_eq!(result.leads[0].id, "L-3");
    }

    #[test]
    fn unknown_categories_are_preserved() {
        let result = import("L-9,Tara,,,,Follow Up Later,Newspaper Ad,2025-09-01,,,,\n");

        let lead = &result.leads[0];
        assert_eq!(lead.status, LeadStatus::Other("follow up later".to_string()));
        assert_eq!(lead.source, LeadSource::Other("newspaper_ad".to_string()));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = LeadImporter::from_path("./does-not-exist.csv").expect_err("expected io error");

        match error {
            LeadImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn signal_projection_uses_today() {
        let result = import(
            "L-1,Aarav,,,Grade 2,warm,website,2025-09-01,2025-09-08,0,Rohan,\n",
        );
        let today = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();

        let signal = result.leads[0].signal(today);

        assert_eq!(signal.status, "warm");
        assert_eq!(signal.source, "website");
        assert_eq!(signal.days_since_creation, 9);
        assert_eq!(signal.last_contact_days, Some(2));
        assert_eq!(signal.follow_up_count, 0);
        assert!(!signal.has_parent_info, "parent phone missing");
    }

    #[test]
    fn future_dates_saturate_at_zero_days() {
        let result = import("L-1,Aarav,,,,new,website,2025-09-20,2025-09-25,,,\n");
        let today = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();

        let signal = result.leads[0].signal(today);

        assert_eq!(signal.days_since_creation, 0);
        assert_eq!(signal.last_contact_days, Some(0));
    }
}
