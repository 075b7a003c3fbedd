//! Fire-and-forget activity events.
//!
//! Features emit one event per user action through a single injected
//! [`ActivitySink`]. Emission returns `()`; sink failures are swallowed so
//! a logging problem can never abort the action that triggered it. Events
//! are write-once and never read back by the core logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DossierGenerated,
    DossierViewed,
    RegulatorySearch,
    RegulatorySearchSaved,
    TrirCalculated,
    SafetyPaysCalculated,
    PdfDownloaded,
    TrainingAiQuery,
    TrainingDocumentViewed,
    DataExported,
    CaseStudyGenerated,
    CaseStudyDownloaded,
    PageVisited,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::DossierGenerated => "dossier_generated",
            EventType::DossierViewed => "dossier_viewed",
            EventType::RegulatorySearch => "regulatory_search",
            EventType::RegulatorySearchSaved => "regulatory_search_saved",
            EventType::TrirCalculated => "trir_calculated",
            EventType::SafetyPaysCalculated => "safety_pays_calculated",
            EventType::PdfDownloaded => "pdf_downloaded",
            EventType::TrainingAiQuery => "training_ai_query",
            EventType::TrainingDocumentViewed => "training_document_viewed",
            EventType::DataExported => "data_exported",
            EventType::CaseStudyGenerated => "case_study_generated",
            EventType::CaseStudyDownloaded => "case_study_downloaded",
            EventType::PageVisited => "page_visited",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub event_type: EventType,
    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dossier_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(event_type: EventType, user_email: impl Into<String>) -> Self {
        Self {
            event_type,
            user_email: user_email.into(),
            company_name: None,
            feature_used: None,
            dossier_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn company(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.feature_used = Some(feature.into());
        self
    }

    pub fn dossier(mut self, id: impl Into<String>) -> Self {
        self.dossier_id = Some(id.into());
        self
    }
}

/// The one emission interface features depend on. `emit` cannot fail.
pub trait ActivitySink {
    fn emit(&self, event: ActivityEvent);
}

/// Sink that writes one structured log line per event.
pub struct LogSink;

impl ActivitySink for LogSink {
    fn emit(&self, event: ActivityEvent) {
        log::info!(
            "activity {} user={} company={} dossier={}",
            event.event_type,
            event.user_email,
            event.company_name.as_deref().unwrap_or("-"),
            event.dossier_id.as_deref().unwrap_or("-"),
        );
    }
}

/// Sink appending JSON lines to a file. Write errors are logged at debug
/// level and otherwise dropped.
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(&crate::config::get_config().store.activity_path)
    }
}

impl ActivitySink for JsonSink {
    fn emit(&self, event: ActivityEvent) {
        let Ok(line) = serde_json::to_string(&event) else {
            return;
        };
        let appended = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{line}"));
        if let Err(e) = appended {
            log::debug!("activity write dropped: {e}");
        }
    }
}

/// In-memory sink for tests.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<ActivityEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ActivityEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ActivitySink for MemorySink {
    fn emit(&self, event: ActivityEvent) {
        self.events.lock().unwrap().push(event);
    }
}
