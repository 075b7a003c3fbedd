//! AI payload ingestion boundary.
//!
//! The only place loosely-typed AI output is allowed to exist. A payload
//! comes in as `serde_json::Value`, gets validated and deserialized into a
//! typed [`Dossier`] exactly once, and everything downstream works with the
//! typed record. Source filtering and the report text stamp also happen
//! here, so a stored dossier is always fully prepared.

use crate::core::{Dossier, MODULE_VOCABULARY};
use crate::errors::{DossierError, Result};
use crate::report::builder::build_report;
use crate::report::sources::filter_sources;
use chrono::NaiveDate;
use serde_json::{json, Value};

/// Transport seam for the LLM integration. Implementations may be a real
/// network client, a canned fixture, or a test double.
pub trait LlmClient {
    fn invoke(&self, prompt: &str, schema: &Value) -> Result<Value>;
}

/// An [`LlmClient`] that returns a fixed payload. Used by `ingest --fixture`
/// and tests.
pub struct FixtureClient {
    payload: Value,
}

impl FixtureClient {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// A realistic canned dossier payload for the named company.
    pub fn canned(company_name: &str) -> Self {
        Self::new(fixture_payload(company_name))
    }
}

impl LlmClient for FixtureClient {
    fn invoke(&self, _prompt: &str, _schema: &Value) -> Result<Value> {
        Ok(self.payload.clone())
    }
}

/// Run the full generation flow: prompt the client, then ingest the reply.
pub fn generate_dossier(
    client: &dyn LlmClient,
    company_name: &str,
    today: NaiveDate,
) -> Result<Dossier> {
    let prompt = dossier_prompt(company_name);
    let schema = response_schema();
    let payload = client.invoke(&prompt, &schema)?;
    ingest_response(company_name, payload, today)
}

/// Validate and type an AI payload into a ready-to-store dossier.
///
/// The requested company name always wins over whatever name the payload
/// carries, the source list is filtered (with the default fallback set),
/// and `analysis_date`, `data_source`, and `full_report_text` are stamped.
pub fn ingest_response(
    company_name: &str,
    payload: Value,
    today: NaiveDate,
) -> Result<Dossier> {
    let object = payload
        .as_object()
        .ok_or_else(|| DossierError::schema_mismatch("payload is not a JSON object"))?;

    match object.get("company_name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {}
        _ => {
            return Err(DossierError::InvalidAiResponse(
                "missing company name in AI analysis response".to_string(),
            ))
        }
    }

    let mut dossier: Dossier = serde_json::from_value(payload)
        .map_err(|e| DossierError::schema_mismatch(e.to_string()))?;

    dossier.company_name = company_name.to_string();
    dossier.sources_referenced =
        filter_sources(&dossier.sources_referenced, company_name);
    dossier.analysis_date = Some(today);
    dossier.data_source = Some("AI Generated".to_string());
    dossier.full_report_text = Some(build_report(&dossier));
    Ok(dossier)
}

/// The research prompt sent with every generation request.
pub fn dossier_prompt(company_name: &str) -> String {
    format!(
        r#"You are "EHS Insight AI Analyst," an expert business intelligence professional specializing in Environmental, Health, and Safety (EHS) and Environmental, Social, and Governance (ESG) research. Your primary goal is to provide our sales team with highly specific, actionable, and verifiable insights into potential clients.

**Target Company:** "{company}"

**Core Objective:** Generate a comprehensive EHS/ESG dossier that clearly identifies sales opportunities. Every piece of information must be directly supported by publicly available, factual data.

**Research Approach:**
1. Primary: look for specific incidents, violations, and documented issues for "{company}".
2. Fallback: if no specific company incidents are found, use industry-specific EHS challenges and regulations that would apply to "{company}" based on their business type and industry.

**Focus Areas:** OSHA violations and fines, EPA and environmental incidents, safety incidents and accidents, regulatory enforcement actions, industry-specific risks, and EHS-related risks in financial disclosures.

**Sales Pain Points:** Each must be a single clear sentence, specific to "{company}"'s industry, articulating both the challenge and its business impact. If no company-specific incidents are found, generate 3-5 pain points from well-documented industry challenges.

**Sales Opportunities:** For each pain point, a corresponding opportunity with opportunity_description, priority_level (High/Medium/Low), suggested_modules chosen from: {modules}, module_use_case, and 2-3 key_features.

**Sales Talking Points:** 3-5 conversation starters referencing research findings or industry-specific regulatory requirements.

**CRITICAL:** You MUST generate sales pain points, opportunities, and talking points; do not return empty arrays for these fields. Provide all other schema fields with the same standard of factual accuracy."#,
        company = company_name,
        modules = MODULE_VOCABULARY.join(", "),
    )
}

/// JSON schema constraining the generation response.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "company_name": { "type": "string" },
            "industry": { "type": "string" },
            "naics_code": { "type": "number" },
            "headquarters_location": { "type": "string" },
            "annual_revenue": { "type": "number" },
            "employee_count": { "type": "number" },
            "profit_margin_percentage": { "type": "number" },
            "cash_flow_indicators": { "type": "string" },
            "business_description": { "type": "string" },
            "key_products_services": { "type": "array", "items": { "type": "string" } },
            "executive_summary": { "type": "string" },
            "common_injury_types": { "type": "array", "items": { "type": "string" } },
            "recent_osha_penalties": { "type": "number" },
            "notable_incidents": { "type": "array", "items": { "type": "string" } },
            "financial_risk_factors": { "type": "array", "items": { "type": "string" } },
            "regulatory_history": { "type": "array", "items": { "type": "string" } },
            "environmental_programs": { "type": "array", "items": { "type": "string" } },
            "social_programs": { "type": "array", "items": { "type": "string" } },
            "governance_practices": { "type": "array", "items": { "type": "string" } },
            "esg_awards_recognitions": { "type": "array", "items": { "type": "string" } },
            "esg_ratings": { "type": "array", "items": { "type": "string" } },
            "sustainability_goals": { "type": "array", "items": { "type": "string" } },
            "industry_trends": { "type": "array", "items": { "type": "string" } },
            "applicable_environmental_programs": { "type": "object" },
            "canada_safety_information": { "type": "object" },
            "sales_pain_points": { "type": "array", "items": { "type": "string" } },
            "sales_opportunities": { "type": "array", "items": { "type": "object" } },
            "sales_talking_points": { "type": "array", "items": { "type": "string" } },
            "suggested_partnerships": { "type": "array", "items": { "type": "object" } },
            "recommendations": { "type": "array", "items": { "type": "string" } },
            "sources_referenced": { "type": "array", "items": { "type": "string" } }
        }
    })
}

/// Canned payload used when no live client is wired up.
pub fn fixture_payload(company_name: &str) -> Value {
    json!({
        "company_name": company_name,
        "industry": "Manufacturing",
        "naics_code": 332999,
        "headquarters_location": "Columbus, OH",
        "annual_revenue": 120_000_000u64,
        "employee_count": 850,
        "profit_margin_percentage": 6.5,
        "business_description": format!(
            "{company_name} fabricates precision metal components for the \
             automotive and aerospace sectors."
        ),
        "executive_summary": format!(
            "{company_name} operates in a high-hazard manufacturing segment \
             with documented OSHA exposure and an active sustainability program."
        ),
        "common_injury_types": ["Lacerations", "Strains from material handling"],
        "recent_osha_penalties": 48_500,
        "notable_incidents": [
            "2023 amputation near-miss at the Columbus stamping line"
        ],
        "financial_risk_factors": [
            "Workers' compensation premiums rose 18% year over year"
        ],
        "regulatory_history": [
            "Two serious OSHA citations in the last five years (machine guarding)"
        ],
        "environmental_programs": ["ISO 14001 certification program"],
        "sustainability_goals": ["30% scope 1 emissions reduction by 2030"],
        "applicable_environmental_programs": {
            "clean_air_act": true,
            "clean_water_act": false,
            "rcra_hazardous_waste": true
        },
        "sales_pain_points": [
            "Machine guarding citations have already cost the company $48,500 \
             and signal systemic lockout/tagout gaps.",
            "Rising workers' compensation premiums are eroding a thin 6.5% margin."
        ],
        "sales_opportunities": [
            {
                "opportunity_description": "Close machine guarding compliance gaps",
                "priority_level": "High",
                "suggested_modules": ["Incident Management", "Compliance Tracking"],
                "module_use_case": "Track guarding audits and citation abatement to closure",
                "key_features": ["Corrective action workflows", "Regulatory deadline alerts"]
            }
        ],
        "sales_talking_points": [
            "How are you tracking abatement deadlines from the 2023 citations?"
        ],
        "suggested_partnerships": [
            {
                "partner_name": "Regional Safety Council",
                "partner_type": "Training",
                "relevance_reason": "Local machine-safety training capacity"
            }
        ],
        "recommendations": [
            "Prioritize a lockout/tagout program review within 90 days"
        ],
        "sources_referenced": [
            "[OSHA Establishment Search](https://www.osha.gov/ords/imis/establishment.html)",
            "2023 annual report, risk factors section"
        ]
    })
}
