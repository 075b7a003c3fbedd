use chrono::NaiveDate;
use ehsintel::activity::{ActivityEvent, ActivitySink, EventType, MemorySink};
use ehsintel::errors::DossierError;
use ehsintel::ingest::{fixture_payload, generate_dossier, ingest_response, FixtureClient};
use ehsintel::store::{json::JsonStore, DossierStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

#[test]
fn generated_dossier_persists_with_report_text() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path().join("dossiers.json"));

    let client = FixtureClient::canned("Acme Corp");
    let dossier = generate_dossier(&client, "Acme Corp", today()).unwrap();
    let created = store.create(dossier).unwrap();

    let fetched = store.get(&created.id).unwrap().unwrap();
    assert_eq!(fetched.company_name, "Acme Corp");
    assert_eq!(fetched.data_source.as_deref(), Some("AI Generated"));
    assert_eq!(fetched.analysis_date, Some(today()));
    let report = fetched.full_report_text.unwrap();
    assert!(report.starts_with("# Acme Corp - Safety Analysis Report"));
    assert!(report.contains("## 💔 Sales Pain Points"));
}

#[test]
fn ingest_defaults_missing_arrays_before_anything_reads_them() {
    let dossier = ingest_response(
        "Acme",
        json!({"company_name": "Acme", "industry": "Retail"}),
        today(),
    )
    .unwrap();
    assert!(dossier.sales_opportunities.is_empty());
    assert!(dossier.regulatory_history.is_empty());
    // Filtering an absent source list falls through to the default set.
    assert_eq!(dossier.sources_referenced.len(), 4);
}

#[test]
fn schema_mismatch_is_distinguished_from_missing_name() {
    let mismatch = ingest_response("Acme", json!([1, 2, 3]), today()).unwrap_err();
    assert!(mismatch
        .to_string()
        .contains("did not match the expected schema"));

    let missing = ingest_response("Acme", json!({"industry": "x"}), today()).unwrap_err();
    assert!(missing.to_string().contains("missing company name"));
    assert!(matches!(missing, DossierError::InvalidAiResponse(_)));
}

#[test]
fn source_filtering_applies_at_the_boundary() {
    let mut payload = fixture_payload("Acme");
    payload["sources_referenced"] = json!([
        "short",
        "Results from a turnosearch index page",
        "[EPA ECHO](https://echo.epa.gov/)"
    ]);
    let dossier = ingest_response("Acme", payload, today()).unwrap();
    assert_eq!(
        dossier.sources_referenced,
        vec!["[EPA ECHO](https://echo.epa.gov/)".to_string()]
    );
}

#[test]
fn generation_event_can_be_emitted_without_failing_the_flow() {
    let sink = MemorySink::new();
    sink.emit(
        ActivityEvent::new(EventType::DossierGenerated, "rep@example.com").company("Acme"),
    );
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::DossierGenerated);
    assert_eq!(events[0].company_name.as_deref(), Some("Acme"));
}
