//! CLI command handlers. Each handler validates input, talks to the store,
//! emits its activity event, and prints a result; terminal errors bubble as
//! `anyhow::Error` to `main`.

pub mod calculators;
pub mod case_study;
pub mod ingest;
pub mod init;
pub mod list;
pub mod manage;
pub mod report;

use crate::activity::{ActivityEvent, ActivitySink, JsonSink};
use crate::core::Dossier;
use crate::errors::DossierError;
use crate::store::json::JsonStore;
use crate::store::DossierStore;
use anyhow::Result;

/// Shared wiring for every command: the store, the activity sink, and the
/// acting user.
pub struct CommandContext {
    pub store: JsonStore,
    pub sink: Box<dyn ActivitySink>,
    pub user: String,
}

impl CommandContext {
    pub fn new(user: String) -> Self {
        Self {
            store: JsonStore::open_default(),
            sink: Box::new(JsonSink::open_default()),
            user,
        }
    }

    pub fn emit(&self, event: ActivityEvent) {
        self.sink.emit(event);
    }

    /// Fetch a dossier or fail with a not-found error.
    pub fn fetch(&self, id: &str) -> Result<Dossier> {
        Ok(self
            .store
            .get(id)?
            .ok_or_else(|| DossierError::NotFound(id.to_string()))?)
    }
}
