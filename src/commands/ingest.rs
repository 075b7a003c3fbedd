use crate::activity::{ActivityEvent, EventType};
use crate::cli::OutputFormat;
use crate::commands::CommandContext;
use crate::ingest::{generate_dossier, ingest_response, FixtureClient};
use crate::store::DossierStore;
use anyhow::{bail, Context, Result};
use chrono::Local;
use colored::Colorize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Ingest an AI payload (file, stdin, or the canned fixture), create the
/// dossier record, and print it.
pub fn run(
    ctx: &CommandContext,
    company: &str,
    payload: Option<PathBuf>,
    fixture: bool,
    format: OutputFormat,
) -> Result<()> {
    let today = Local::now().date_naive();

    let dossier = if fixture {
        let client = FixtureClient::canned(company);
        generate_dossier(&client, company, today)?
    } else {
        let raw = read_payload(payload)?;
        let value = serde_json::from_str(&raw).context("parsing payload JSON")?;
        ingest_response(company, value, today)?
    };

    let created = ctx.store.create(dossier)?;
    ctx.emit(
        ActivityEvent::new(EventType::DossierGenerated, &ctx.user)
            .company(company)
            .dossier(&created.id),
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
        OutputFormat::Table => {
            println!(
                "{} created dossier {} for {}",
                "✓".green(),
                created.id.cyan(),
                created.company_name.bold()
            );
            println!(
                "  {} pain points, {} opportunities, {} sources",
                created.sales_pain_points.len(),
                created.sales_opportunities.len(),
                created.sources_referenced.len()
            );
        }
    }
    Ok(())
}

fn read_payload(payload: Option<PathBuf>) -> Result<String> {
    match payload {
        Some(path) if path == Path::new("-") => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
        }
        None => bail!("provide --payload <file> (or \"-\" for stdin), or --fixture"),
    }
}
