//! The dossier data model.
//!
//! A `Dossier` is the persisted per-company analysis record. It is created
//! in one shot by the AI ingestion flow (or manually with a minimal subset)
//! and afterwards mutated only through [`DossierPatch`], which carries
//! per-field partial updates so concurrent saves from different features
//! never clobber each other's fields.
//!
//! Every list field deserializes with a default, so an AI payload that
//! omits an optional array is indistinguishable from one that found
//! nothing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Module names the AI may suggest for a sales opportunity.
pub const MODULE_VOCABULARY: &[&str] = &[
    "Incident Management",
    "Compliance Tracking",
    "Training Management",
    "Audit Management",
    "Risk Assessment",
    "Environmental Monitoring",
    "Safety Analytics",
    "Document Management",
    "Contractor Management",
    "Chemical Management",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityLevel::High => write!(f, "High"),
            PriorityLevel::Medium => write!(f, "Medium"),
            PriorityLevel::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOpportunity {
    pub opportunity_description: String,
    #[serde(default)]
    pub priority_level: PriorityLevel,
    #[serde(default)]
    pub suggested_modules: Vec<String>,
    pub module_use_case: Option<String>,
    #[serde(default)]
    pub key_features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedPartnership {
    pub partner_name: String,
    pub status: Option<String>,
    pub partner_type: Option<String>,
    pub category: Option<String>,
    pub relevance_reason: Option<String>,
    pub potential_value: Option<String>,
    pub ehs_insight_enhancement: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvincialRegulation {
    pub province: Option<String>,
    pub regulation_summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanadaSafetyInformation {
    pub federal_regulations_overview: Option<String>,
    #[serde(default)]
    pub provincial_regulations: Vec<ProvincialRegulation>,
    #[serde(default)]
    pub canadian_incidents_penalties: Vec<String>,
    #[serde(default)]
    pub regulatory_bodies: Vec<String>,
    #[serde(default)]
    pub canadian_sources: Vec<String>,
}

impl CanadaSafetyInformation {
    pub fn is_empty(&self) -> bool {
        self.federal_regulations_overview.is_none()
            && self.provincial_regulations.is_empty()
            && self.canadian_incidents_penalties.is_empty()
            && self.regulatory_bodies.is_empty()
            && self.canadian_sources.is_empty()
    }
}

/// One row of a persisted Safety Pays breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryBreakdown {
    pub label: String,
    pub count: u32,
    pub direct_cost: u64,
    pub indirect_cost: u64,
    pub total_cost: u64,
}

/// Persisted output of the Safety Pays calculator, embedded in exactly one
/// dossier and overwritten wholesale on each save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyPaysCalculation {
    #[serde(default)]
    pub selected_injuries_breakdown: Vec<InjuryBreakdown>,
    pub total_direct_costs: u64,
    pub total_indirect_costs: u64,
    pub combined_total_cost: u64,
    pub profit_margin_used: f64,
    pub sales_needed_to_cover: f64,
    pub calculation_date: NaiveDate,
}

/// A saved external regulatory-database search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatorySearchLink {
    pub title: String,
    pub url: String,
    pub database: String,
    pub search_date: DateTime<Utc>,
}

/// The persisted per-company analysis record (store entity "SafetyAnalysis").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dossier {
    /// Opaque store-assigned identity; empty until created.
    #[serde(default)]
    pub id: String,

    pub company_name: String,

    // Company profile
    pub industry: Option<String>,
    pub naics_code: Option<u32>,
    pub headquarters_location: Option<String>,
    pub employee_count: Option<u64>,
    pub annual_revenue: Option<u64>,
    pub profit_margin_percentage: Option<f64>,
    pub cash_flow_indicators: Option<String>,
    pub business_description: Option<String>,
    #[serde(default)]
    pub key_products_services: Vec<String>,
    pub executive_summary: Option<String>,

    // EHS performance. `Some(0.0)` TRIR is a real result and is displayed;
    // only `None` means "never calculated".
    pub trir: Option<f64>,
    pub recent_osha_penalties: Option<u64>,
    #[serde(default)]
    pub common_injury_types: Vec<String>,
    #[serde(default)]
    pub notable_incidents: Vec<String>,
    #[serde(default)]
    pub financial_risk_factors: Vec<String>,
    #[serde(default)]
    pub regulatory_history: Vec<String>,

    // Environmental / ESG
    #[serde(default)]
    pub environmental_programs: Vec<String>,
    #[serde(default)]
    pub social_programs: Vec<String>,
    #[serde(default)]
    pub governance_practices: Vec<String>,
    #[serde(default)]
    pub esg_awards_recognitions: Vec<String>,
    #[serde(default)]
    pub esg_ratings: Vec<String>,
    #[serde(default)]
    pub sustainability_goals: Vec<String>,
    #[serde(default)]
    pub industry_trends: Vec<String>,
    pub applicable_environmental_programs: Option<BTreeMap<String, bool>>,
    pub canada_safety_information: Option<CanadaSafetyInformation>,

    // Sales intelligence
    #[serde(default)]
    pub sales_pain_points: Vec<String>,
    #[serde(default)]
    pub sales_opportunities: Vec<SalesOpportunity>,
    #[serde(default)]
    pub sales_talking_points: Vec<String>,
    #[serde(default)]
    pub suggested_partnerships: Vec<SuggestedPartnership>,

    // Embedded calculator output
    pub safety_pays_calculation: Option<SafetyPaysCalculation>,

    // Bookkeeping
    pub analysis_date: Option<NaiveDate>,
    pub data_source: Option<String>,
    #[serde(default)]
    pub sources_referenced: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub regulatory_search_links: Vec<RegulatorySearchLink>,
    pub user_notes: Option<String>,
    pub full_report_text: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}

impl Dossier {
    /// Minimal manual record: everything optional left empty.
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Default::default()
        }
    }

    pub fn is_ai_generated(&self) -> bool {
        self.data_source
            .as_deref()
            .is_some_and(|s| s.contains("AI Generated"))
    }
}

/// Partial update against a single dossier. Each feature sets only its own
/// field, so two features saving against the same record are last-write-wins
/// per field rather than whole-record overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DossierPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trir: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_pays_calculation: Option<SafetyPaysCalculation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulatory_search_links: Option<Vec<RegulatorySearchLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_report_text: Option<String>,
}

impl DossierPatch {
    pub fn trir(rate: f64) -> Self {
        Self {
            trir: Some(rate),
            ..Default::default()
        }
    }

    pub fn safety_pays(calculation: SafetyPaysCalculation) -> Self {
        Self {
            safety_pays_calculation: Some(calculation),
            ..Default::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            user_notes: Some(notes.into()),
            ..Default::default()
        }
    }

    pub fn search_links(links: Vec<RegulatorySearchLink>) -> Self {
        Self {
            regulatory_search_links: Some(links),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this patch to a record. Absent fields are untouched.
    pub fn apply(&self, dossier: &mut Dossier) {
        if let Some(rate) = self.trir {
            dossier.trir = Some(rate);
        }
        if let Some(calc) = &self.safety_pays_calculation {
            dossier.safety_pays_calculation = Some(calc.clone());
        }
        if let Some(notes) = &self.user_notes {
            dossier.user_notes = Some(notes.clone());
        }
        if let Some(links) = &self.regulatory_search_links {
            dossier.regulatory_search_links = links.clone();
        }
        if let Some(text) = &self.full_report_text {
            dossier.full_report_text = Some(text.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_arrays_deserialize_empty() {
        let dossier: Dossier =
            serde_json::from_str(r#"{"company_name": "Acme Corp"}"#).unwrap();
        assert_eq!(dossier.company_name, "Acme Corp");
        assert!(dossier.sales_pain_points.is_empty());
        assert!(dossier.sources_referenced.is_empty());
        assert!(dossier.trir.is_none());
    }

    #[test]
    fn zero_trir_is_distinct_from_unset() {
        let dossier: Dossier =
            serde_json::from_str(r#"{"company_name": "Acme", "trir": 0.0}"#).unwrap();
        assert_eq!(dossier.trir, Some(0.0));
    }

    #[test]
    fn patch_touches_only_its_own_field() {
        let mut dossier = Dossier::new("Acme");
        dossier.user_notes = Some("keep me".to_string());
        dossier.trir = Some(1.5);

        DossierPatch::notes("edited").apply(&mut dossier);
        assert_eq!(dossier.user_notes.as_deref(), Some("edited"));
        assert_eq!(dossier.trir, Some(1.5));

        DossierPatch::trir(2.0).apply(&mut dossier);
        assert_eq!(dossier.trir, Some(2.0));
        assert_eq!(dossier.user_notes.as_deref(), Some("edited"));
    }

    #[test]
    fn priority_level_round_trips_pascal_case() {
        let op: SalesOpportunity = serde_json::from_str(
            r#"{"opportunity_description": "x", "priority_level": "High"}"#,
        )
        .unwrap();
        assert_eq!(op.priority_level, PriorityLevel::High);
        assert_eq!(op.priority_level.to_string(), "High");
    }
}
