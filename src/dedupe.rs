//! Bulk deduplication by company name.
//!
//! Records are grouped by trimmed, lowercased company name; in each group
//! of more than one, the most recently created record survives. Planning
//! is pure so the CLI can show what would be deleted before doing it.

use crate::core::Dossier;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupePlan {
    /// Ids of the records that survive, one per duplicated name.
    pub keep: Vec<String>,
    /// Ids of the records to delete.
    pub delete: Vec<String>,
}

impl DedupePlan {
    pub fn is_noop(&self) -> bool {
        self.delete.is_empty()
    }
}

fn normalized_name(dossier: &Dossier) -> String {
    dossier.company_name.trim().to_lowercase()
}

/// Compute the deletions needed to leave one record per company name.
/// Running the plan and re-planning on the result yields a no-op.
pub fn plan(dossiers: &[Dossier]) -> DedupePlan {
    let mut groups: BTreeMap<String, Vec<&Dossier>> = BTreeMap::new();
    for dossier in dossiers {
        groups.entry(normalized_name(dossier)).or_default().push(dossier);
    }

    let mut plan = DedupePlan::default();
    for (_, mut group) in groups {
        if group.len() < 2 {
            continue;
        }
        // Newest first; records without a creation date sort last.
        group.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        plan.keep.push(group[0].id.clone());
        plan.delete
            .extend(group[1..].iter().map(|d| d.id.clone()));
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn dossier(id: &str, name: &str, created: &str) -> Dossier {
        let mut d = Dossier::new(name);
        d.id = id.to_string();
        d.created_date = Some(created.parse::<DateTime<Utc>>().unwrap());
        d
    }

    #[test]
    fn keeps_the_newest_of_each_duplicate_group() {
        let dossiers = vec![
            dossier("a", "Acme Corp", "2025-01-01T00:00:00Z"),
            dossier("b", "acme corp ", "2025-02-01T00:00:00Z"),
            dossier("c", "Other Co", "2025-01-15T00:00:00Z"),
        ];
        let plan = plan(&dossiers);
        assert_eq!(plan.keep, vec!["b".to_string()]);
        assert_eq!(plan.delete, vec!["a".to_string()]);
    }

    #[test]
    fn name_matching_ignores_case_and_whitespace() {
        let dossiers = vec![
            dossier("a", "  ACME  ", "2025-01-01T00:00:00Z"),
            dossier("b", "acme", "2025-01-02T00:00:00Z"),
        ];
        assert_eq!(plan(&dossiers).delete, vec!["a".to_string()]);
    }

    #[test]
    fn unique_names_plan_nothing() {
        let dossiers = vec![
            dossier("a", "Alpha", "2025-01-01T00:00:00Z"),
            dossier("b", "Beta", "2025-01-02T00:00:00Z"),
        ];
        let plan = plan(&dossiers);
        assert!(plan.is_noop());
        assert!(plan.keep.is_empty());
    }

    #[test]
    fn deduplication_is_idempotent() {
        let dossiers = vec![
            dossier("a", "Acme", "2025-01-01T00:00:00Z"),
            dossier("b", "Acme", "2025-02-01T00:00:00Z"),
            dossier("c", "Acme", "2025-03-01T00:00:00Z"),
        ];
        let first = plan(&dossiers);
        assert_eq!(first.delete.len(), 2);

        let survivors: Vec<Dossier> = dossiers
            .into_iter()
            .filter(|d| !first.delete.contains(&d.id))
            .collect();
        assert!(plan(&survivors).is_noop());
    }

    #[test]
    fn missing_creation_dates_lose_to_dated_records() {
        let mut undated = Dossier::new("Acme");
        undated.id = "a".to_string();
        let dossiers = vec![undated, dossier("b", "Acme", "2025-01-01T00:00:00Z")];
        let plan = plan(&dossiers);
        assert_eq!(plan.keep, vec!["b".to_string()]);
        assert_eq!(plan.delete, vec!["a".to_string()]);
    }
}
