//! Markdown report builder.
//!
//! `build_report` is pure and deterministic: the same dossier always
//! produces byte-identical output, and no clock is consulted (the PDF
//! "generated on" stamp is a side input supplied by the caller at render
//! time). Sections appear in a fixed order and a section is emitted only
//! when its backing field is non-empty; the EHS profile is the one place
//! an explicit "N/A" line stands in for an empty sibling sub-bullet.

use crate::core::{CanadaSafetyInformation, Dossier};
use std::fmt::Write;

/// Render a populated dossier to the full markdown report.
pub fn build_report(dossier: &Dossier) -> String {
    let mut report = format!("# {} - Safety Analysis Report\n\n", dossier.company_name);

    if let Some(summary) = non_empty(&dossier.executive_summary) {
        let _ = write!(report, "## Executive Summary\n{summary}\n\n");
    }

    push_company_profile(&mut report, dossier);
    push_ehs_profile(&mut report, dossier);
    push_environmental_programs(&mut report, dossier);
    push_canada_safety(&mut report, dossier);

    push_list_section(
        &mut report,
        "🌱 Environmental & Sustainability Programs",
        &dossier.environmental_programs,
    );
    push_list_section(&mut report, "🎯 Sustainability Goals", &dossier.sustainability_goals);
    push_list_section(&mut report, "🤝 Social Responsibility", &dossier.social_programs);
    push_list_section(&mut report, "🏛️ Corporate Governance", &dossier.governance_practices);
    push_list_section(
        &mut report,
        "🏆 Awards & Recognition",
        &dossier.esg_awards_recognitions,
    );
    push_list_section(&mut report, "⭐ ESG Ratings", &dossier.esg_ratings);
    push_list_section(
        &mut report,
        "📈 Industry Trends & Peer Comparisons",
        &dossier.industry_trends,
    );

    push_financial_health(&mut report, dossier);
    push_list_section(
        &mut report,
        "⚠️ Risk Factors & Challenges",
        &dossier.financial_risk_factors,
    );

    push_numbered_section(&mut report, "💔 Sales Pain Points", &dossier.sales_pain_points);
    push_sales_opportunities(&mut report, dossier);
    push_numbered_section(
        &mut report,
        "🗣️ Sales Talking Points",
        &dossier.sales_talking_points,
    );
    push_partnerships(&mut report, dossier);
    push_numbered_section(&mut report, "AI Recommendations", &dossier.recommendations);

    push_list_section(&mut report, "📚 Sources & References", &dossier.sources_referenced);

    report.trim().to_string()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// `### **title**` section with a trailing horizontal rule.
fn push_text_section(report: &mut String, title: &str, content: &str) {
    if content.trim().is_empty() {
        return;
    }
    let _ = write!(report, "### **{title}**\n{content}\n\n---\n");
}

fn push_list_section(report: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let body: Vec<String> = items.iter().map(|item| format!("- {item}")).collect();
    push_text_section(report, title, &body.join("\n"));
}

/// `## title` section with a numbered list body.
fn push_numbered_section(report: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(report, "## {title}");
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(report, "{}. {item}", index + 1);
    }
    report.push('\n');
}

fn push_company_profile(report: &mut String, dossier: &Dossier) {
    // Blank strings and zero counts are treated as absent, so a dossier
    // with only placeholder profile values emits no header.
    let industry = non_empty(&dossier.industry);
    let naics = dossier.naics_code.filter(|&code| code != 0);
    let headquarters = non_empty(&dossier.headquarters_location);
    let employees = dossier.employee_count.filter(|&count| count != 0);
    let revenue = dossier.annual_revenue.filter(|&amount| amount != 0);
    let description = non_empty(&dossier.business_description);

    let has_profile = industry.is_some()
        || naics.is_some()
        || headquarters.is_some()
        || employees.is_some()
        || revenue.is_some()
        || description.is_some();
    if !has_profile {
        return;
    }

    report.push_str("## Company Profile\n");
    if let Some(industry) = industry {
        let _ = writeln!(report, "**Industry:** {industry}");
    }
    if let Some(naics) = naics {
        let _ = writeln!(report, "**NAICS Code:** {naics}");
    }
    if let Some(hq) = headquarters {
        let _ = writeln!(report, "**Headquarters:** {hq}");
    }
    if let Some(count) = employees {
        let _ = writeln!(report, "**Employees:** {}", group_thousands(count));
    }
    if let Some(amount) = revenue {
        let _ = writeln!(report, "**Annual Revenue:** ${}", group_thousands(amount));
    }
    if let Some(description) = description {
        let _ = write!(report, "\n{description}\n");
    }
    report.push('\n');
}

/// EHS sub-bullets are the single place a sibling "N/A" fallback is
/// emitted: only when the section already has content from another
/// sub-bullet.
fn push_ehs_profile(report: &mut String, dossier: &Dossier) {
    let mut ehs = String::new();

    if let Some(penalties) = dossier.recent_osha_penalties {
        let amount = if penalties > 0 {
            format!("${}", group_thousands(penalties))
        } else {
            "N/A".to_string()
        };
        let _ = writeln!(ehs, "- **Recent OSHA Penalties:** {amount}");
    }

    push_ehs_sublist(&mut ehs, "Common Injury Types", &dossier.common_injury_types);
    push_ehs_sublist(&mut ehs, "Notable Incidents", &dossier.notable_incidents);
    if !dossier.regulatory_history.is_empty() {
        let _ = writeln!(
            ehs,
            "**Regulatory History (OSHA):**\n{}",
            indent_bullets(&dossier.regulatory_history)
        );
    } else if !ehs.is_empty() {
        ehs.push_str("**Regulatory History (OSHA): N/A**\n");
    }

    if !ehs.trim().is_empty() {
        push_text_section(report, "📊 EHS Performance Profile", ehs.trim());
    }
}

fn push_ehs_sublist(ehs: &mut String, label: &str, items: &[String]) {
    if !items.is_empty() {
        let _ = writeln!(ehs, "**{label}:**\n{}", indent_bullets(items));
    } else if !ehs.is_empty() {
        let _ = writeln!(ehs, "**{label}:** N/A");
    }
}

fn indent_bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_environmental_programs(report: &mut String, dossier: &Dossier) {
    let Some(programs) = &dossier.applicable_environmental_programs else {
        return;
    };
    let applicable: Vec<String> = programs
        .iter()
        .filter(|(_, &applies)| applies)
        .map(|(key, _)| format!("- {}", crate::report::sanitize::humanize_key(key)))
        .collect();

    let content = if applicable.is_empty() {
        "No specific major environmental regulatory programs identified as broadly \
         applicable or relevant."
            .to_string()
    } else {
        applicable.join("\n")
    };
    push_text_section(report, "🌍 Applicable Environmental Programs", &content);
}

fn push_canada_safety(report: &mut String, dossier: &Dossier) {
    let Some(cs) = &dossier.canada_safety_information else {
        return;
    };
    let content = canada_safety_content(cs);
    if !content.trim().is_empty() {
        push_text_section(report, "🇨🇦 Canadian Safety Information", content.trim());
    }
}

fn canada_safety_content(cs: &CanadaSafetyInformation) -> String {
    let mut content = String::new();

    if let Some(overview) = cs
        .federal_regulations_overview
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        let _ = write!(content, "**Federal Regulations Overview:**\n{overview}\n\n");
    }

    if !cs.provincial_regulations.is_empty() {
        content.push_str("**Provincial Regulations:**\n");
        for prov in &cs.provincial_regulations {
            let _ = writeln!(
                content,
                "- **{}:** {}",
                prov.province.as_deref().unwrap_or("N/A"),
                prov.regulation_summary.as_deref().unwrap_or("N/A")
            );
        }
        content.push('\n');
    }

    push_canada_list(&mut content, "Canadian Incidents & Penalties", &cs.canadian_incidents_penalties);
    push_canada_list(&mut content, "Relevant Regulatory Bodies", &cs.regulatory_bodies);
    push_canada_list(&mut content, "Canadian Sources", &cs.canadian_sources);

    content
}

fn push_canada_list(content: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let bullets: Vec<String> = items.iter().map(|item| format!("- {item}")).collect();
    let _ = write!(content, "**{label}:**\n{}\n\n", bullets.join("\n"));
}

fn push_financial_health(report: &mut String, dossier: &Dossier) {
    let mut financial = String::new();
    if let Some(margin) = dossier.profit_margin_percentage {
        let _ = writeln!(financial, "- **Profit Margin:** {}%", format_number(margin));
    }
    if let Some(cash_flow) = non_empty(&dossier.cash_flow_indicators) {
        let _ = writeln!(financial, "- **Cash Flow Indicators:** {cash_flow}");
    }
    if !financial.is_empty() {
        push_text_section(report, "💰 Financial Health & Indicators", financial.trim());
    }
}

fn push_sales_opportunities(report: &mut String, dossier: &Dossier) {
    if dossier.sales_opportunities.is_empty() {
        return;
    }
    report.push_str("## ✨ Sales Opportunities\n");
    for (index, opportunity) in dossier.sales_opportunities.iter().enumerate() {
        let _ = writeln!(
            report,
            "{}. **{}** (Priority: {})",
            index + 1,
            opportunity.opportunity_description,
            opportunity.priority_level
        );
        if !opportunity.suggested_modules.is_empty() {
            let _ = writeln!(
                report,
                "   - **Suggested Modules:** {}",
                opportunity.suggested_modules.join(", ")
            );
        }
        if let Some(use_case) = non_empty(&opportunity.module_use_case) {
            let _ = writeln!(report, "   - **Module Use Case:** {use_case}");
        }
        if !opportunity.key_features.is_empty() {
            report.push_str("   - **Key Features:**\n");
            for feature in &opportunity.key_features {
                let _ = writeln!(report, "     - {feature}");
            }
        }
        report.push('\n');
    }
    report.push('\n');
}

fn push_partnerships(report: &mut String, dossier: &Dossier) {
    if dossier.suggested_partnerships.is_empty() {
        return;
    }
    let mut content = String::new();
    for (index, partner) in dossier.suggested_partnerships.iter().enumerate() {
        let _ = writeln!(content, "**{}. {}**", index + 1, partner.partner_name);
        push_partner_field(&mut content, "Status", &partner.status);
        push_partner_field(&mut content, "Type", &partner.partner_type);
        push_partner_field(&mut content, "Category", &partner.category);
        push_partner_field(&mut content, "Reason", &partner.relevance_reason);
        push_partner_field(&mut content, "Potential Value", &partner.potential_value);
        push_partner_field(
            &mut content,
            "EHS Insight Enhancement",
            &partner.ehs_insight_enhancement,
        );
        content.push('\n');
    }
    push_text_section(report, "🤝 Partner Recommendations", content.trim());
}

fn push_partner_field(content: &mut String, label: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(content, "   - {label}: {value}");
    }
}

/// Thousands-grouped integer display.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Display a float without a trailing `.0` for whole values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
