//! Document-store seam.
//!
//! The production backend is an external per-entity create/list/filter/
//! update/delete API; this trait mirrors that surface so features never
//! talk to a concrete store. [`JsonStore`] is the local implementation the
//! CLI and tests run against. Updates are partial: a [`DossierPatch`]
//! touches only the fields it carries.

pub mod json;
pub mod retry;

use crate::core::{Dossier, DossierPatch};
use crate::errors::Result;

pub use json::JsonStore;

/// Sort order for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortSpec {
    /// Newest first by creation timestamp (the backend's `-created_date`).
    #[default]
    CreatedDesc,
    NameAsc,
    NameDesc,
}

pub trait DossierStore {
    /// Persist a new record, assigning its identity and creation timestamp.
    fn create(&self, dossier: Dossier) -> Result<Dossier>;

    fn list(&self, sort: SortSpec, limit: usize) -> Result<Vec<Dossier>>;

    fn get(&self, id: &str) -> Result<Option<Dossier>>;

    /// Apply a partial update. Fields absent from the patch are untouched,
    /// so concurrent saves from different features are last-write-wins per
    /// field rather than whole-record overwrite.
    fn update(&self, id: &str, patch: &DossierPatch) -> Result<Dossier>;

    fn delete(&self, id: &str) -> Result<()>;
}

pub(crate) fn sort_dossiers(dossiers: &mut [Dossier], sort: SortSpec) {
    match sort {
        SortSpec::CreatedDesc => {
            dossiers.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        }
        SortSpec::NameAsc => {
            dossiers.sort_by(|a, b| {
                a.company_name
                    .to_lowercase()
                    .cmp(&b.company_name.to_lowercase())
            });
        }
        SortSpec::NameDesc => {
            dossiers.sort_by(|a, b| {
                b.company_name
                    .to_lowercase()
                    .cmp(&a.company_name.to_lowercase())
            });
        }
    }
}
