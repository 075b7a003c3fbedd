use crate::activity::{ActivityEvent, EventType};
use crate::commands::CommandContext;
use crate::export::download_file_name;
use crate::report::builder::build_report;
use crate::report::pdf::write_dossier_pdf;
use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Print (or write) a dossier's markdown report. The persisted report text
/// is preferred; records that predate it are rendered on the fly.
pub fn show(ctx: &CommandContext, id: &str, output: Option<PathBuf>) -> Result<()> {
    let dossier = ctx.fetch(id)?;
    let report = match &dossier.full_report_text {
        Some(text) if !text.trim().is_empty() => text.clone(),
        _ => build_report(&dossier),
    };

    ctx.emit(
        ActivityEvent::new(EventType::DossierViewed, &ctx.user)
            .company(&dossier.company_name)
            .dossier(id),
    );

    match output {
        Some(path) => {
            fs::write(&path, &report)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{} wrote {}", "✓".green(), path.display());
        }
        None => println!("{report}"),
    }
    Ok(())
}

/// Render a dossier's report as a paginated PDF.
pub fn pdf(ctx: &CommandContext, id: &str, output: Option<PathBuf>) -> Result<()> {
    let dossier = ctx.fetch(id)?;
    let path = output.unwrap_or_else(|| {
        PathBuf::from(download_file_name(
            &dossier.company_name,
            "Safety_Report",
            "pdf",
        ))
    });

    write_dossier_pdf(&dossier, Local::now().date_naive(), &path)?;
    ctx.emit(
        ActivityEvent::new(EventType::PdfDownloaded, &ctx.user)
            .company(&dossier.company_name)
            .dossier(id),
    );
    println!("{} wrote {}", "✓".green(), path.display());
    Ok(())
}
