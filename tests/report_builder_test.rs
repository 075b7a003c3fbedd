use ehsintel::core::{
    CanadaSafetyInformation, Dossier, PriorityLevel, ProvincialRegulation, SalesOpportunity,
    SuggestedPartnership,
};
use ehsintel::report::blocks::{parse_blocks, Block};
use ehsintel::report::build_report;
use ehsintel::report::layout::{paginate, LayoutConfig};
use ehsintel::report::pdf::render_dossier_pdf;
use pretty_assertions::assert_eq;

fn full_dossier() -> Dossier {
    let mut d = Dossier::new("Acme Corp");
    d.industry = Some("Manufacturing".to_string());
    d.naics_code = Some(332999);
    d.headquarters_location = Some("Columbus, OH".to_string());
    d.employee_count = Some(1_200);
    d.annual_revenue = Some(250_000_000);
    d.business_description = Some("Precision metal fabrication.".to_string());
    d.executive_summary = Some("High-hazard manufacturer with OSHA history.".to_string());
    d.recent_osha_penalties = Some(48_500);
    d.common_injury_types = vec!["Lacerations".to_string(), "Strains".to_string()];
    d.notable_incidents = vec!["2023 stamping line near-miss".to_string()];
    d.regulatory_history = vec!["Two serious citations since 2020".to_string()];
    d.applicable_environmental_programs = Some(
        [
            ("clean_air_act".to_string(), true),
            ("safe_drinking_water_act".to_string(), false),
        ]
        .into_iter()
        .collect(),
    );
    d.canada_safety_information = Some(CanadaSafetyInformation {
        federal_regulations_overview: Some("Federally regulated under CLC Part II.".to_string()),
        provincial_regulations: vec![ProvincialRegulation {
            province: Some("Ontario".to_string()),
            regulation_summary: Some("OHSA applies to the Windsor plant.".to_string()),
        }],
        canadian_incidents_penalties: vec!["2022 MOL stop-work order".to_string()],
        regulatory_bodies: vec!["Ontario Ministry of Labour".to_string()],
        canadian_sources: vec!["Ontario court bulletin 2022-11".to_string()],
    });
    d.environmental_programs = vec!["ISO 14001 program".to_string()];
    d.sustainability_goals = vec!["Net zero scope 1 by 2040".to_string()];
    d.profit_margin_percentage = Some(6.5);
    d.cash_flow_indicators = Some("Stable operating cash flow".to_string());
    d.financial_risk_factors = vec!["Rising workers' comp premiums".to_string()];
    d.sales_pain_points = vec!["Citation abatement tracked in spreadsheets.".to_string()];
    d.sales_opportunities = vec![SalesOpportunity {
        opportunity_description: "Centralize incident tracking".to_string(),
        priority_level: PriorityLevel::High,
        suggested_modules: vec!["Incident Management".to_string()],
        module_use_case: Some("Close citations before deadlines".to_string()),
        key_features: vec!["Deadline alerts".to_string()],
    }];
    d.sales_talking_points = vec!["Ask about the 2023 near-miss response.".to_string()];
    d.suggested_partnerships = vec![SuggestedPartnership {
        partner_name: "Regional Safety Council".to_string(),
        partner_type: Some("Training".to_string()),
        relevance_reason: Some("Local training capacity".to_string()),
        ..Default::default()
    }];
    d.recommendations = vec!["Review lockout/tagout within 90 days.".to_string()];
    d.sources_referenced = vec![
        "[OSHA Establishment Search](https://www.osha.gov/ords/imis/establishment.html)"
            .to_string(),
        "2023 annual report, risk factors".to_string(),
    ];
    d
}

#[test]
fn sections_appear_in_fixed_order() {
    let report = build_report(&full_dossier());
    let order = [
        "# Acme Corp - Safety Analysis Report",
        "## Executive Summary",
        "## Company Profile",
        "### **📊 EHS Performance Profile**",
        "### **🌍 Applicable Environmental Programs**",
        "### **🇨🇦 Canadian Safety Information**",
        "### **🌱 Environmental & Sustainability Programs**",
        "### **🎯 Sustainability Goals**",
        "### **💰 Financial Health & Indicators**",
        "### **⚠️ Risk Factors & Challenges**",
        "## 💔 Sales Pain Points",
        "## ✨ Sales Opportunities",
        "## 🗣️ Sales Talking Points",
        "### **🤝 Partner Recommendations**",
        "## AI Recommendations",
        "### **📚 Sources & References**",
    ];
    let mut last = 0;
    for header in order {
        let at = report
            .find(header)
            .unwrap_or_else(|| panic!("missing section {header}"));
        assert!(at >= last, "{header} out of order");
        last = at;
    }
}

#[test]
fn minimal_dossier_renders_title_only() {
    assert_eq!(
        build_report(&Dossier::new("Solo Co")),
        "# Solo Co - Safety Analysis Report"
    );
}

#[test]
fn report_is_byte_identical_across_runs() {
    let dossier = full_dossier();
    assert_eq!(build_report(&dossier), build_report(&dossier));
}

#[test]
fn ehs_section_layout_is_exact() {
    let mut dossier = Dossier::new("Acme");
    dossier.recent_osha_penalties = Some(0);
    dossier.common_injury_types = vec!["Falls".to_string()];
    let expected = indoc::indoc! {"
        # Acme - Safety Analysis Report

        ### **📊 EHS Performance Profile**
        - **Recent OSHA Penalties:** N/A
        **Common Injury Types:**
          - Falls
        **Notable Incidents:** N/A
        **Regulatory History (OSHA): N/A**

        ---
    "};
    assert_eq!(build_report(&dossier), expected.trim_end());
}

#[test]
fn canada_section_renders_province_lines() {
    let report = build_report(&full_dossier());
    assert!(report.contains("**Federal Regulations Overview:**"));
    assert!(report.contains("- **Ontario:** OHSA applies to the Windsor plant."));
    assert!(report.contains("**Relevant Regulatory Bodies:**"));
}

#[test]
fn full_report_parses_and_paginates() {
    let report = build_report(&full_dossier());
    let blocks = parse_blocks(&report);
    assert!(blocks.len() > 20);
    assert!(blocks
        .iter()
        .any(|b| matches!(b, Block::Heading { level: 3, .. })));

    let cfg = LayoutConfig::default();
    let pages = paginate(&blocks, &cfg, Some("Generated on 2025-01-15"));
    assert!(!pages.is_empty());
    for page in &pages {
        for span in &page.spans {
            assert!(span.x >= cfg.margin);
            assert!(span.y + span.size <= cfg.page_height - cfg.margin + 0.01);
        }
    }
}

#[test]
fn pdf_bytes_round_trip_through_lopdf() {
    let bytes = render_dossier_pdf(
        &full_dossier(),
        chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
    )
    .unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert!(doc.get_pages().len() >= 1);
}
