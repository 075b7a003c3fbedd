use crate::activity::{ActivityEvent, EventType};
use crate::cli::{OutputFormat, SortOrder};
use crate::commands::CommandContext;
use crate::store::DossierStore;
use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

pub fn run(
    ctx: &CommandContext,
    sort: SortOrder,
    limit: usize,
    format: OutputFormat,
    plain: bool,
) -> Result<()> {
    if plain {
        colored::control::set_override(false);
    }

    let dossiers = ctx.store.list(sort.into(), limit)?;
    ctx.emit(
        ActivityEvent::new(EventType::PageVisited, &ctx.user).feature("data_management"),
    );

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&dossiers)?);
        return Ok(());
    }

    if dossiers.is_empty() {
        println!("no dossiers stored yet; run {} first", "ehsintel ingest".cyan());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Company", "Industry", "TRIR", "Analysis Date", "Source"]);
    for dossier in &dossiers {
        table.add_row(vec![
            Cell::new(&dossier.id),
            Cell::new(&dossier.company_name),
            Cell::new(dossier.industry.as_deref().unwrap_or("-")),
            Cell::new(
                dossier
                    .trir
                    .map(|t| format!("{t:.2}"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(
                dossier
                    .analysis_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(if dossier.is_ai_generated() { "AI" } else { "manual" }),
        ]);
    }
    println!("{table}");
    println!("{} dossiers", dossiers.len().to_string().bold());
    Ok(())
}
