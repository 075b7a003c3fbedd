use crate::activity::{ActivityEvent, EventType};
use crate::case_study::{
    fixture_case_study, generate_case_study, write_case_study_doc, write_case_study_pdf,
    CASE_STUDY_TITLE,
};
use crate::commands::CommandContext;
use crate::export::download_file_name;
use crate::ingest::FixtureClient;
use anyhow::{bail, Context, Result};
use chrono::Local;
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Generate a fictionalized sales case study from a dossier. The narrative
/// is printed to stdout; `--pdf` and `--word` write the export files and
/// log a download each.
pub fn run(
    ctx: &CommandContext,
    id: &str,
    reply: Option<PathBuf>,
    fixture: bool,
    pdf: bool,
    word: bool,
) -> Result<()> {
    let dossier = ctx.fetch(id)?;
    let client = if fixture {
        FixtureClient::new(Value::String(fixture_case_study(&dossier.company_name)))
    } else {
        FixtureClient::new(Value::String(read_reply(reply)?))
    };
    let markdown = generate_case_study(&client, &dossier)?;

    ctx.emit(
        ActivityEvent::new(EventType::CaseStudyGenerated, &ctx.user)
            .company(&dossier.company_name)
            .feature(CASE_STUDY_TITLE)
            .dossier(id),
    );

    let generated_on = Local::now().date_naive();
    if pdf {
        let path = PathBuf::from(download_file_name(
            &dossier.company_name,
            "Sales_Case_Study",
            "pdf",
        ));
        write_case_study_pdf(&dossier.company_name, &markdown, generated_on, &path)?;
        emit_download(ctx, &dossier.company_name, id, "PDF");
        println!("{} wrote {}", "✓".green(), path.display());
    }
    if word {
        let path = PathBuf::from(download_file_name(
            &dossier.company_name,
            "Sales_Case_Study",
            "doc",
        ));
        write_case_study_doc(&dossier.company_name, &markdown, generated_on, &path)?;
        emit_download(ctx, &dossier.company_name, id, "Word");
        println!("{} wrote {}", "✓".green(), path.display());
    }
    if !pdf && !word {
        println!("{markdown}");
    }
    Ok(())
}

fn emit_download(ctx: &CommandContext, company: &str, id: &str, format: &str) {
    ctx.emit(
        ActivityEvent::new(EventType::CaseStudyDownloaded, &ctx.user)
            .company(company)
            .feature(format!("{CASE_STUDY_TITLE} ({format})"))
            .dossier(id),
    );
}

fn read_reply(reply: Option<PathBuf>) -> Result<String> {
    match reply {
        Some(path) if path == Path::new("-") => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
        }
        None => bail!("provide --reply <file> (or \"-\" for stdin), or --fixture"),
    }
}
