//! OSHA Safety Pays cost estimation.
//!
//! A session holds an ordered multiset of selected injuries in memory.
//! Totals are integer dollars and recomputed from the multiset on every
//! read; only the aggregate breakdown is ever persisted, and saving
//! overwrites the dossier's `safety_pays_calculation` field wholesale.

use crate::core::injury_costs;
use crate::core::{Dossier, DossierPatch, InjuryBreakdown, SafetyPaysCalculation};
use crate::errors::{DossierError, Result};
use crate::store::{retry::with_backoff, DossierStore};
use chrono::NaiveDate;

/// One selected injury line. Session-local; duplicates of the same label
/// are kept as separate entries rather than merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedInjury {
    pub entry_id: u64,
    pub label: &'static str,
    pub count: u32,
    pub direct_cost: u64,
    pub indirect_cost: u64,
}

impl SelectedInjury {
    pub fn total_cost(&self) -> u64 {
        (self.direct_cost + self.indirect_cost) * u64::from(self.count)
    }
}

/// In-memory calculator state for one linked dossier.
#[derive(Debug, Clone)]
pub struct SafetyPaysSession {
    injuries: Vec<SelectedInjury>,
    profit_margin: f64,
    default_margin: f64,
    linked_dossier: Option<String>,
    next_entry_id: u64,
}

impl SafetyPaysSession {
    pub fn new(default_margin: f64) -> Self {
        Self {
            injuries: Vec::new(),
            profit_margin: default_margin,
            default_margin,
            linked_dossier: None,
            next_entry_id: 1,
        }
    }

    /// Switch the linked dossier. Unsaved calculator state belongs to the
    /// previous dossier and is discarded rather than merged: the injury
    /// multiset is cleared and the margin resets to the new dossier's
    /// margin, or the configured default when it has none.
    pub fn link_dossier(&mut self, dossier: Option<&Dossier>) {
        self.injuries.clear();
        self.linked_dossier = dossier.map(|d| d.id.clone());
        self.profit_margin = dossier
            .and_then(|d| d.profit_margin_percentage)
            .unwrap_or(self.default_margin);
    }

    pub fn linked_dossier(&self) -> Option<&str> {
        self.linked_dossier.as_deref()
    }

    pub fn profit_margin(&self) -> f64 {
        self.profit_margin
    }

    pub fn set_profit_margin(&mut self, margin: f64) {
        self.profit_margin = margin;
    }

    pub fn injuries(&self) -> &[SelectedInjury] {
        &self.injuries
    }

    /// Append an injury selection. The label must exist in the cost table
    /// and the count must be positive, otherwise the session is unchanged.
    pub fn add_injury(&mut self, label: &str, count: u32) -> Result<u64> {
        if count == 0 {
            return Err(DossierError::validation(
                "number of cases must be a positive integer",
            ));
        }
        let entry = injury_costs::lookup(label).ok_or_else(|| {
            DossierError::validation(format!("unknown injury type: {label}"))
        })?;

        let entry_id = self.next_entry_id;
        self.next_entry_id += 1;
        self.injuries.push(SelectedInjury {
            entry_id,
            label: entry.label,
            count,
            direct_cost: entry.direct_cost,
            indirect_cost: entry.indirect_cost,
        });
        Ok(entry_id)
    }

    /// Remove exactly one entry by its session-local id. No-op if absent.
    pub fn remove_injury(&mut self, entry_id: u64) {
        self.injuries.retain(|injury| injury.entry_id != entry_id);
    }

    pub fn total_direct_costs(&self) -> u64 {
        self.injuries
            .iter()
            .map(|i| i.direct_cost * u64::from(i.count))
            .sum()
    }

    pub fn total_indirect_costs(&self) -> u64 {
        self.injuries
            .iter()
            .map(|i| i.indirect_cost * u64::from(i.count))
            .sum()
    }

    pub fn combined_total_cost(&self) -> u64 {
        self.total_direct_costs() + self.total_indirect_costs()
    }

    /// Additional sales revenue needed to offset the combined cost at the
    /// current margin. Zero when the margin is not positive; that state is
    /// "not computable", not an error.
    pub fn sales_needed(&self) -> f64 {
        if self.profit_margin > 0.0 {
            self.combined_total_cost() as f64 / (self.profit_margin / 100.0)
        } else {
            0.0
        }
    }

    /// Snapshot the current state into a persistable calculation, stamped
    /// with the supplied date.
    pub fn build_calculation(&self, calculation_date: NaiveDate) -> SafetyPaysCalculation {
        SafetyPaysCalculation {
            selected_injuries_breakdown: self
                .injuries
                .iter()
                .map(|injury| InjuryBreakdown {
                    label: injury.label.to_string(),
                    count: injury.count,
                    direct_cost: injury.direct_cost,
                    indirect_cost: injury.indirect_cost,
                    total_cost: injury.total_cost(),
                })
                .collect(),
            total_direct_costs: self.total_direct_costs(),
            total_indirect_costs: self.total_indirect_costs(),
            combined_total_cost: self.combined_total_cost(),
            profit_margin_used: self.profit_margin,
            sales_needed_to_cover: self.sales_needed(),
            calculation_date,
        }
    }

    /// Persist the current breakdown onto the linked dossier, touching only
    /// its `safety_pays_calculation` field. Requires a linked dossier and a
    /// positive margin.
    pub fn save(
        &self,
        store: &dyn DossierStore,
        calculation_date: NaiveDate,
    ) -> Result<SafetyPaysCalculation> {
        let dossier_id = self.linked_dossier.as_deref().ok_or_else(|| {
            DossierError::validation("select a dossier before saving the calculation")
        })?;
        if self.profit_margin <= 0.0 {
            return Err(DossierError::validation(
                "profit margin must be greater than 0 to save",
            ));
        }

        let calculation = self.build_calculation(calculation_date);
        let retry = &crate::config::get_config().retry;
        with_backoff(retry, || {
            store.update(
                dossier_id,
                &DossierPatch::safety_pays(calculation.clone()),
            )
        })?;
        Ok(calculation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SafetyPaysSession {
        SafetyPaysSession::new(3.0)
    }

    #[test]
    fn totals_are_exact_integer_sums() {
        let mut s = session();
        s.add_injury("Fracture", 2).unwrap();
        assert_eq!(s.total_direct_costs(), 15_062);
        assert_eq!(s.total_indirect_costs(), 31_936);
        assert_eq!(s.combined_total_cost(), 46_998);
        assert_eq!(
            s.combined_total_cost(),
            s.total_direct_costs() + s.total_indirect_costs()
        );
    }

    #[test]
    fn sales_needed_divides_by_margin_fraction() {
        let mut s = session();
        s.add_injury("Fracture", 2).unwrap();
        let expected = s.combined_total_cost() as f64 / 0.03;
        assert_eq!(s.sales_needed(), expected);
    }

    #[test]
    fn sales_needed_is_zero_when_margin_not_positive() {
        let mut s = session();
        s.add_injury("Burn", 1).unwrap();
        s.set_profit_margin(0.0);
        assert_eq!(s.sales_needed(), 0.0);
        s.set_profit_margin(-2.0);
        assert_eq!(s.sales_needed(), 0.0);
        assert!(!s.sales_needed().is_nan());
    }

    #[test]
    fn duplicate_labels_stay_separate() {
        let mut s = session();
        let first = s.add_injury("Burn", 1).unwrap();
        let second = s.add_injury("Burn", 2).unwrap();
        assert_ne!(first, second);
        assert_eq!(s.injuries().len(), 2);

        s.remove_injury(first);
        assert_eq!(s.injuries().len(), 1);
        assert_eq!(s.injuries()[0].count, 2);
    }

    #[test]
    fn remove_of_unknown_id_is_noop() {
        let mut s = session();
        s.add_injury("Burn", 1).unwrap();
        s.remove_injury(999);
        assert_eq!(s.injuries().len(), 1);
    }

    #[test]
    fn invalid_additions_leave_state_unchanged() {
        let mut s = session();
        assert!(s.add_injury("Fracture", 0).is_err());
        assert!(s.add_injury("Not In Table", 1).is_err());
        assert!(s.injuries().is_empty());
    }

    #[test]
    fn linking_a_dossier_resets_margin_and_clears_injuries() {
        let mut s = session();
        s.add_injury("Burn", 1).unwrap();
        s.set_profit_margin(9.0);

        let mut dossier = Dossier::new("Acme");
        dossier.id = "d1".to_string();
        dossier.profit_margin_percentage = Some(7.5);
        s.link_dossier(Some(&dossier));

        assert!(s.injuries().is_empty());
        assert_eq!(s.profit_margin(), 7.5);
        assert_eq!(s.linked_dossier(), Some("d1"));

        // A dossier without a margin falls back to the default.
        let plain = Dossier::new("Globex");
        s.link_dossier(Some(&plain));
        assert_eq!(s.profit_margin(), 3.0);
    }

    #[test]
    fn build_calculation_snapshots_breakdown_rows() {
        let mut s = session();
        s.add_injury("Fracture", 2).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let calc = s.build_calculation(date);

        assert_eq!(calc.selected_injuries_breakdown.len(), 1);
        let row = &calc.selected_injuries_breakdown[0];
        assert_eq!(row.label, "Fracture");
        assert_eq!(row.total_cost, 46_998);
        assert_eq!(calc.combined_total_cost, 46_998);
        assert_eq!(calc.profit_margin_used, 3.0);
        assert_eq!(calc.calculation_date, date);
    }
}
