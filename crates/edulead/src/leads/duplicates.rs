use super::normalizer::{normalize_email, normalize_phone};
use super::record::LeadRecord;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    Email,
    Phone,
}

/// Leads sharing a normalized contact key, in the order they appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub kind: DuplicateKind,
    pub key: String,
    pub lead_ids: Vec<String>,
}

/// Groups leads by normalized email and phone. A lead can appear in one group of each
/// kind; groups are ordered by the first lead that produced the key.
pub fn find_duplicates(leads: &[LeadRecord]) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut index: HashMap<(DuplicateKind, String), usize> = HashMap::new();

    for lead in leads {
        let keys = [
            lead.email
                .as_deref()
                .and_then(normalize_email)
                .map(|key| (DuplicateKind::Email, key)),
            lead.phone
                .as_deref()
                .and_then(normalize_phone)
                .map(|key| (DuplicateKind::Phone, key)),
        ];

        for (kind, key) in keys.into_iter().flatten() {
            match index.get(&(kind, key.clone())) {
                Some(&position) => {
                    let group = &mut groups[position];
                    if !group.lead_ids.contains(&lead.id) {
                        group.lead_ids.push(lead.id.clone());
                    }
                }
                None => {
                    index.insert((kind, key.clone()), groups.len());
                    groups.push(DuplicateGroup {
                        kind,
                        key,
                        lead_ids: vec![lead.id.clone()],
                    });
                }
            }
        }
    }

    groups.retain(|group| group.lead_ids.len() > 1);
    groups
}
