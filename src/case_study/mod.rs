//! Sales case-study generation and export.
//!
//! Turns a dossier's research findings into a fictionalized success story
//! a salesperson can hand to the prospect. The narrative is produced
//! through the same [`LlmClient`] seam the dossier ingestion uses, but the
//! reply here is a plain markdown string rather than a structured payload,
//! so no response schema is sent. Exports reuse the report block parser:
//! the PDF goes through the shared paginator and the Word-compatible
//! export is a self-contained HTML document.

use crate::core::Dossier;
use crate::errors::{DossierError, Result};
use crate::ingest::LlmClient;
use crate::report::blocks::{parse_blocks, Block};
use crate::report::builder::group_thousands;
use crate::report::layout::{paginate, LayoutConfig};
use crate::report::pdf::{prepare_display_blocks, render_pages};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Artifact label recorded with generation and download events.
pub const CASE_STUDY_TITLE: &str = "Sales Case Study";

/// Modules the narrative is allowed to recommend. Deliberately narrower
/// than the dossier module vocabulary.
pub const CASE_STUDY_MODULES: &[&str] = &[
    "Incident Management",
    "Audits & Inspections",
    "Training Management",
    "Compliance Management",
    "Environmental Management",
    "Risk Assessment",
];

/// Prompt the client and return the case-study markdown.
pub fn generate_case_study(client: &dyn LlmClient, dossier: &Dossier) -> Result<String> {
    let prompt = case_study_prompt(dossier);
    // Free-form markdown reply; no schema constrains it.
    let reply = client.invoke(&prompt, &Value::Null)?;
    match reply {
        Value::String(markdown) if !markdown.trim().is_empty() => Ok(markdown),
        _ => Err(DossierError::InvalidAiResponse(
            "case study response was not markdown text".to_string(),
        )),
    }
}

/// The generation prompt, grounded in whatever client data the dossier
/// actually carries; absent fields fall back to generic phrasing.
pub fn case_study_prompt(dossier: &Dossier) -> String {
    let industry = dossier
        .industry
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("Not specified");
    let employees = dossier
        .employee_count
        .map(group_thousands)
        .unwrap_or_else(|| "N/A".to_string());
    let revenue = dossier
        .annual_revenue
        .map(|amount| format!("${}", group_thousands(amount)))
        .unwrap_or_else(|| "N/A".to_string());

    let pain_points = join_or(
        &dossier.sales_pain_points,
        "General safety management inefficiencies",
    );
    let opportunities: Vec<String> = dossier
        .sales_opportunities
        .iter()
        .map(|o| o.opportunity_description.clone())
        .collect();
    let opportunities = join_or(
        &opportunities,
        "Improving safety culture and reducing incident costs",
    );
    let injury_costs = dossier
        .safety_pays_calculation
        .as_ref()
        .map(|calc| {
            format!(
                "Total cost of recent injuries estimated at ${}",
                group_thousands(calc.combined_total_cost)
            )
        })
        .unwrap_or_else(|| "Not calculated".to_string());

    format!(
        r#"You are a sales enablement expert for EHS Insight, a leading EHS software company. Your task is to generate a compelling, client-facing case study for a salesperson to use when talking to "{company}".

The case study should be a short, impactful narrative that highlights the financial and operational benefits of implementing EHS Insight's software. It should be based on the provided company data but presented as a success story of a *similar* (but fictional) company to avoid making direct claims about {company}.

**Client Data Provided:**
- Company Name: {company}
- Industry: {industry}
- Employee Count: {employees}
- Annual Revenue: {revenue}
- Key Pain Points Identified: {pain_points}
- Key Opportunities Identified: {opportunities}
- Safety Pays Calculation (if available): {injury_costs}

**Instructions for Case Study Generation:**
1. **Fictional Company Name:** Create a realistic but fictional name for a company in the same industry. Do not use "{company}".
2. **Narrative Structure:** Follow a classic problem-solution-result structure. The Challenge describes the struggles the fictional company faced, grounded in the client's pain points; if a number is an estimate rather than provided client data, preface it with "an estimated" or "approximately". The Solution explains how the company implemented EHS Insight's software, naming 1-3 modules from the list below. The Results detail quantifiable outcomes.
3. **Quantify Everything:** Use numbers and percentages to make the results tangible, based on the provided client data and industry standards.
4. **EHS Insight Modules:** Select relevant modules from this list: {modules}.
5. **Tone:** Professional, confident, and benefit-oriented. It is a sales tool.

**Output Format:** The output must be a single block of Markdown text. Use headings for "The Challenge," "The Solution," and "The Results." Use bullet points for key results."#,
        company = dossier.company_name,
        modules = CASE_STUDY_MODULES.join(", "),
    )
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Canned case-study markdown used when no live client is wired up.
pub fn fixture_case_study(company_name: &str) -> String {
    let _ = company_name;
    "# Summit Fabrication Partners: From Citation Backlog to Safety Leader\n\
     \n\
     ## The Challenge\n\
     Summit Fabrication Partners, a mid-sized precision metal manufacturer, \
     was losing ground to its own incident paperwork. The company faced an \
     estimated 20 recordable injuries annually, machine guarding citations \
     that cost approximately $50,000 in penalties, and abatement deadlines \
     tracked across disconnected spreadsheets.\n\
     \n\
     ## The Solution\n\
     Summit implemented EHS Insight, starting with Incident Management to \
     centralize reporting and root-cause tracking, Audits & Inspections to \
     put guarding checks on a fixed cadence, and Compliance Management to \
     tie every citation to an owned corrective action.\n\
     \n\
     ## The Results\n\
     - An estimated 30% reduction in TRIR within the first year\n\
     - Citation abatement closed an average of 12 days before deadline\n\
     - Approximately $120,000 saved in penalties and premium growth\n\
     - Incident reports filed 50% faster from the shop floor\n"
        .to_string()
}

/// Title block followed by the parsed narrative.
pub fn case_study_blocks(
    company_name: &str,
    markdown: &str,
    generated_on: NaiveDate,
) -> Vec<Block> {
    let mut blocks = vec![
        Block::Heading {
            level: 1,
            text: CASE_STUDY_TITLE.to_string(),
        },
        Block::Paragraph(company_name.to_string()),
        Block::Paragraph(format!("EHS Insight Solutions - {generated_on}")),
        Block::Rule,
    ];
    blocks.extend(parse_blocks(markdown));
    blocks
}

/// Render the case study to PDF bytes.
pub fn render_case_study_pdf(
    company_name: &str,
    markdown: &str,
    generated_on: NaiveDate,
) -> Result<Vec<u8>> {
    let blocks =
        prepare_display_blocks(&case_study_blocks(company_name, markdown, generated_on));
    let pages = paginate(&blocks, &LayoutConfig::default(), None);
    render_pages(&pages)
}

pub fn write_case_study_pdf(
    company_name: &str,
    markdown: &str,
    generated_on: NaiveDate,
    path: &Path,
) -> Result<()> {
    let bytes = render_case_study_pdf(company_name, markdown, generated_on)?;
    fs::write(path, bytes)?;
    Ok(())
}

static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// Render the case study as a self-contained HTML document. Saved with a
/// `.doc` extension it opens directly in word processors.
pub fn case_study_html(
    company_name: &str,
    markdown: &str,
    generated_on: NaiveDate,
) -> String {
    let mut body = String::new();
    let mut in_list = false;
    for line in markdown.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line = BOLD_SPAN
            .replace_all(&escape_html(line), "<strong>$1</strong>")
            .into_owned();

        if let Some(text) = line.strip_prefix("###") {
            close_list(&mut body, &mut in_list);
            let _ = write!(body, "<h3>{}</h3>\n", text.trim());
        } else if let Some(text) = line.strip_prefix("##") {
            close_list(&mut body, &mut in_list);
            let _ = write!(body, "<h2>{}</h2>\n", text.trim());
        } else if let Some(text) = line.strip_prefix('#') {
            close_list(&mut body, &mut in_list);
            let _ = write!(body, "<h1>{}</h1>\n", text.trim());
        } else if let Some(text) = line.strip_prefix("- ") {
            if !in_list {
                body.push_str("<ul>\n");
                in_list = true;
            }
            let _ = write!(body, "<li>{}</li>\n", text.trim());
        } else {
            close_list(&mut body, &mut in_list);
            let _ = write!(body, "<p>{line}</p>\n");
        }
    }
    close_list(&mut body, &mut in_list);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{title} - {company}</title>
<style>
body {{ font-family: 'Calibri', Arial, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 40px 20px; color: #333; }}
h1 {{ color: #0ea5e9; border-bottom: 2px solid #0ea5e9; padding-bottom: 10px; font-size: 24px; }}
h2 {{ color: #334155; margin-top: 30px; font-size: 20px; }}
h3 {{ color: #475569; margin-top: 25px; font-size: 16px; }}
.header {{ text-align: center; margin-bottom: 40px; border-bottom: 1px solid #e2e8f0; padding-bottom: 30px; }}
.company-name {{ font-size: 28px; color: #0ea5e9; font-weight: bold; margin: 10px 0; }}
.subtitle {{ color: #64748b; font-size: 14px; }}
ul {{ padding-left: 20px; }}
li {{ margin-bottom: 8px; }}
p {{ margin-bottom: 15px; }}
</style>
</head>
<body>
<div class="header">
<h1>{title}</h1>
<div class="company-name">{company}</div>
<div class="subtitle">EHS Insight Solutions - {generated_on}</div>
</div>
{body}</body>
</html>
"#,
        title = CASE_STUDY_TITLE,
        company = escape_html(company_name),
    )
}

pub fn write_case_study_doc(
    company_name: &str,
    markdown: &str,
    generated_on: NaiveDate,
    path: &Path,
) -> Result<()> {
    fs::write(path, case_study_html(company_name, markdown, generated_on))?;
    Ok(())
}

fn close_list(body: &mut String, in_list: &mut bool) {
    if *in_list {
        body.push_str("</ul>\n");
        *in_list = false;
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
