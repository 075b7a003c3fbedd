//! EHS/ESG sales-intelligence dossiers: AI payload ingestion, safety
//! calculators, report building, and a local document store behind a CLI.

pub mod activity;
pub mod calculators;
pub mod case_study;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dedupe;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod report;
pub mod search;
pub mod store;

pub use crate::core::{Dossier, DossierPatch, SafetyPaysCalculation};
pub use errors::{DossierError, Result};
pub use report::build_report;
