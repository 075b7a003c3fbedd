//! Search-link, export, and record-management handlers.
//!
//! Notes, delete, and dedupe have no dedicated event type; they log as
//! `PageVisited` with `feature_used` set to "notes", "delete_dossier", or
//! "dedupe", so the activity log still tells the actions apart. Search and
//! export use their dedicated event types.

use crate::activity::{ActivityEvent, EventType};
use crate::cli::SiteArg;
use crate::commands::CommandContext;
use crate::config::get_config;
use crate::core::DossierPatch;
use crate::dedupe;
use crate::export::summaries_to_csv;
use crate::search::{build_link, SearchSite, ALL_SITES};
use crate::store::{retry::with_backoff, DossierStore, SortSpec};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Build search links for the external regulatory databases, optionally
/// saving them onto a dossier.
pub fn search(
    ctx: &CommandContext,
    company: &str,
    site: Option<SiteArg>,
    save: Option<String>,
) -> Result<()> {
    let sites: Vec<SearchSite> = match site {
        Some(site) => vec![site.into()],
        None => ALL_SITES.to_vec(),
    };

    let now = Utc::now();
    let mut links = Vec::with_capacity(sites.len());
    for site in &sites {
        let link = build_link(*site, company, now)?;
        println!("{}: {}", site.name().bold(), link.url);
        links.push(link);
    }

    let saved = if let Some(id) = &save {
        let dossier = ctx.fetch(id)?;
        let mut all = dossier.regulatory_search_links.clone();
        all.extend(links);
        let retry = &get_config().retry;
        with_backoff(retry, || {
            ctx.store.update(id, &DossierPatch::search_links(all.clone()))
        })?;
        println!(
            "{} saved {} link(s) to {}",
            "✓".green(),
            sites.len(),
            dossier.company_name
        );
        true
    } else {
        false
    };

    let event_type = if saved {
        EventType::RegulatorySearchSaved
    } else {
        EventType::RegulatorySearch
    };
    let mut event = ActivityEvent::new(event_type, &ctx.user).company(company);
    if let Some(id) = &save {
        event = event.dossier(id);
    }
    ctx.emit(event);
    Ok(())
}

/// Export dossier summaries to CSV. An empty store writes nothing.
pub fn export(ctx: &CommandContext, output: Option<PathBuf>) -> Result<()> {
    let dossiers = ctx.store.list(SortSpec::CreatedDesc, usize::MAX)?;
    let Some(csv) = summaries_to_csv(&dossiers) else {
        println!("no dossiers to export");
        return Ok(());
    };

    let path = output.unwrap_or_else(|| PathBuf::from("ehs_analyses.csv"));
    fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
    ctx.emit(
        ActivityEvent::new(EventType::DataExported, &ctx.user).feature("csv_export"),
    );
    println!(
        "{} exported {} dossiers to {}",
        "✓".green(),
        dossiers.len(),
        path.display()
    );
    Ok(())
}

/// Overwrite a dossier's user notes.
pub fn notes(ctx: &CommandContext, id: &str, notes: &str) -> Result<()> {
    let dossier = ctx.fetch(id)?;
    let retry = &get_config().retry;
    with_backoff(retry, || {
        ctx.store.update(id, &DossierPatch::notes(notes))
    })?;
    ctx.emit(
        ActivityEvent::new(EventType::PageVisited, &ctx.user)
            .feature("notes")
            .company(&dossier.company_name)
            .dossier(id),
    );
    println!("{} updated notes for {}", "✓".green(), dossier.company_name);
    Ok(())
}

/// Delete one dossier. Requires explicit confirmation.
pub fn delete(ctx: &CommandContext, id: &str, yes: bool) -> Result<()> {
    let dossier = ctx.fetch(id)?;
    if !yes {
        bail!(
            "this would delete the dossier for {}; rerun with --yes to confirm",
            dossier.company_name
        );
    }

    ctx.store.delete(id)?;
    ctx.emit(
        ActivityEvent::new(EventType::PageVisited, &ctx.user)
            .feature("delete_dossier")
            .company(&dossier.company_name)
            .dossier(id),
    );
    println!("{} deleted {}", "✓".green(), dossier.company_name);
    Ok(())
}

/// Remove duplicate dossiers by company name, keeping the newest. Without
/// `--yes` this only prints what would be deleted.
pub fn dedupe(ctx: &CommandContext, yes: bool) -> Result<()> {
    let dossiers = ctx.store.list(SortSpec::CreatedDesc, usize::MAX)?;
    let plan = dedupe::plan(&dossiers);

    if plan.is_noop() {
        println!("no duplicates found");
        return Ok(());
    }

    let by_id = |id: &str| {
        dossiers
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.company_name.as_str())
            .unwrap_or("?")
    };
    for id in &plan.delete {
        println!("duplicate: {} ({id})", by_id(id));
    }

    if !yes {
        println!(
            "{} record(s) would be deleted; rerun with --yes to apply",
            plan.delete.len()
        );
        return Ok(());
    }

    for id in &plan.delete {
        ctx.store.delete(id)?;
    }
    // Re-read so the reported count reflects the store, not the plan.
    let remaining = ctx.store.list(SortSpec::CreatedDesc, usize::MAX)?;
    ctx.emit(
        ActivityEvent::new(EventType::PageVisited, &ctx.user).feature("dedupe"),
    );
    println!(
        "{} deleted {} duplicate(s), {} dossiers remain",
        "✓".green(),
        plan.delete.len(),
        remaining.len()
    );
    Ok(())
}
