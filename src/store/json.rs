//! Single-file JSON document store.
//!
//! Records live in one JSON array on disk. Every operation reads the file,
//! mutates in memory, and writes the whole array back; fine for the record
//! counts this tool sees.

use crate::core::{Dossier, DossierPatch};
use crate::errors::{DossierError, Result};
use crate::store::{sort_dossiers, DossierStore, SortSpec};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(&crate::config::get_config().store.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Dossier>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| DossierError::Store(format!("corrupt store file: {e}")))
    }

    fn persist(&self, dossiers: &[Dossier]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(dossiers)
            .map_err(|e| DossierError::Store(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl DossierStore for JsonStore {
    fn create(&self, mut dossier: Dossier) -> Result<Dossier> {
        let mut dossiers = self.load()?;
        dossier.id = Uuid::new_v4().to_string();
        dossier.created_date = Some(Utc::now());
        dossiers.push(dossier.clone());
        self.persist(&dossiers)?;
        Ok(dossier)
    }

    fn list(&self, sort: SortSpec, limit: usize) -> Result<Vec<Dossier>> {
        let mut dossiers = self.load()?;
        sort_dossiers(&mut dossiers, sort);
        dossiers.truncate(limit);
        Ok(dossiers)
    }

    fn get(&self, id: &str) -> Result<Option<Dossier>> {
        Ok(self.load()?.into_iter().find(|d| d.id == id))
    }

    fn update(&self, id: &str, patch: &DossierPatch) -> Result<Dossier> {
        let mut dossiers = self.load()?;
        let dossier = dossiers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DossierError::NotFound(id.to_string()))?;
        patch.apply(dossier);
        let updated = dossier.clone();
        self.persist(&dossiers)?;
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut dossiers = self.load()?;
        let before = dossiers.len();
        dossiers.retain(|d| d.id != id);
        if dossiers.len() == before {
            return Err(DossierError::NotFound(id.to_string()));
        }
        self.persist(&dossiers)
    }
}
