use std::cell::Cell;

use chrono::NaiveDate;
use ehsintel::calculators::{safety_pays::SafetyPaysSession, trir};
use ehsintel::core::{Dossier, DossierPatch};
use ehsintel::errors::{DossierError, Result};
use ehsintel::store::{json::JsonStore, DossierStore, SortSpec};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn store() -> (TempDir, JsonStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path().join("dossiers.json"));
    (dir, store)
}

/// Store double that rate-limits updates a fixed number of times before
/// delegating to the real JSON store.
struct FlakyStore {
    inner: JsonStore,
    failures_left: Cell<u32>,
    update_calls: Cell<u32>,
}

impl FlakyStore {
    fn new(inner: JsonStore, failures: u32) -> Self {
        Self {
            inner,
            failures_left: Cell::new(failures),
            update_calls: Cell::new(0),
        }
    }
}

impl DossierStore for FlakyStore {
    fn create(&self, dossier: Dossier) -> Result<Dossier> {
        self.inner.create(dossier)
    }

    fn list(&self, sort: SortSpec, limit: usize) -> Result<Vec<Dossier>> {
        self.inner.list(sort, limit)
    }

    fn get(&self, id: &str) -> Result<Option<Dossier>> {
        self.inner.get(id)
    }

    fn update(&self, id: &str, patch: &DossierPatch) -> Result<Dossier> {
        self.update_calls.set(self.update_calls.get() + 1);
        if self.failures_left.get() > 0 {
            self.failures_left.set(self.failures_left.get() - 1);
            return Err(DossierError::RateLimited);
        }
        self.inner.update(id, patch)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.inner.delete(id)
    }
}

#[test]
fn trir_save_touches_only_the_trir_field() {
    let (_dir, store) = store();
    let mut dossier = Dossier::new("Acme");
    dossier.user_notes = Some("pre-existing note".to_string());
    let created = store.create(dossier).unwrap();

    let rate = trir::calculate(5.0, 500_000.0).unwrap();
    assert_eq!(rate, 2.00);
    trir::save(&store, &created.id, rate).unwrap();

    let fetched = store.get(&created.id).unwrap().unwrap();
    assert_eq!(fetched.trir, Some(2.00));
    assert_eq!(fetched.user_notes.as_deref(), Some("pre-existing note"));
}

#[test]
fn trir_save_retries_through_rate_limits() {
    let (_dir, inner) = store();
    let created = inner.create(Dossier::new("Acme")).unwrap();
    let flaky = FlakyStore::new(inner, 1);

    trir::save(&flaky, &created.id, 1.25).unwrap();
    assert_eq!(flaky.update_calls.get(), 2);
    assert_eq!(flaky.get(&created.id).unwrap().unwrap().trir, Some(1.25));
}

#[test]
fn validation_failures_never_reach_the_store() {
    let (_dir, inner) = store();
    let created = inner.create(Dossier::new("Acme")).unwrap();
    let flaky = FlakyStore::new(inner, 0);

    assert!(trir::calculate(-1.0, 1000.0).is_err());
    assert_eq!(flaky.update_calls.get(), 0);

    let mut session = SafetyPaysSession::new(3.0);
    let dossier = flaky.get(&created.id).unwrap().unwrap();
    session.link_dossier(Some(&dossier));
    session.set_profit_margin(0.0);
    session.add_injury("Fracture", 1).unwrap();
    let err = session
        .save(&flaky, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        .unwrap_err();
    assert!(matches!(err, DossierError::Validation(_)));
    assert_eq!(flaky.update_calls.get(), 0);
}

#[test]
fn safety_pays_save_persists_the_breakdown() {
    let (_dir, store) = store();
    let mut dossier = Dossier::new("Acme");
    dossier.profit_margin_percentage = Some(3.0);
    dossier.trir = Some(1.5);
    let created = store.create(dossier).unwrap();

    let mut session = SafetyPaysSession::new(3.0);
    session.link_dossier(Some(&created));
    session.add_injury("Fracture", 2).unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let saved = session.save(&store, date).unwrap();
    assert_eq!(saved.combined_total_cost, 46_998);
    assert_eq!(saved.sales_needed_to_cover, 46_998.0 / 0.03);

    let fetched = store.get(&created.id).unwrap().unwrap();
    let calc = fetched.safety_pays_calculation.unwrap();
    assert_eq!(calc.total_direct_costs, 15_062);
    assert_eq!(calc.total_indirect_costs, 31_936);
    assert_eq!(calc.calculation_date, date);
    // The earlier TRIR result is untouched by the Safety Pays patch.
    assert_eq!(fetched.trir, Some(1.5));
}

#[test]
fn relinking_a_session_discards_unsaved_state() {
    let (_dir, store) = store();
    let a = store.create(Dossier::new("Alpha")).unwrap();
    let mut b = Dossier::new("Beta");
    b.profit_margin_percentage = Some(8.0);
    let b = store.create(b).unwrap();

    let mut session = SafetyPaysSession::new(3.0);
    session.link_dossier(Some(&a));
    session.add_injury("Burn", 3).unwrap();

    session.link_dossier(Some(&b));
    assert!(session.injuries().is_empty());
    assert_eq!(session.profit_margin(), 8.0);
    assert_eq!(session.linked_dossier(), Some(b.id.as_str()));
}
