use crate::activity::{ActivityEvent, EventType};
use crate::calculators::{safety_pays::SafetyPaysSession, trir};
use crate::commands::CommandContext;
use crate::config::get_config;
use crate::export::download_file_name;
use crate::report::pdf::write_safety_pays_pdf;
use anyhow::{bail, Context, Result};
use chrono::Local;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::PathBuf;

/// Compute (and optionally persist) a TRIR.
pub fn run_trir(
    ctx: &CommandContext,
    injuries: f64,
    hours: Option<f64>,
    dossier_id: Option<String>,
    save: bool,
) -> Result<()> {
    let dossier = dossier_id.as_deref().map(|id| ctx.fetch(id)).transpose()?;

    let hours = match hours {
        Some(h) => h,
        None => {
            let headcount = dossier.as_ref().and_then(|d| d.employee_count);
            match headcount {
                Some(count) => {
                    let per_employee = get_config().calculators.hours_per_employee;
                    trir::estimate_hours(count, per_employee) as f64
                }
                None => bail!(
                    "provide --hours, or --dossier for a record with an employee count"
                ),
            }
        }
    };

    let rate = trir::calculate(injuries, hours)?;
    println!("TRIR: {}", format!("{rate:.2}").bold());

    if save {
        let id = dossier_id.as_deref().unwrap();
        trir::save(&ctx.store, id, rate)?;
        println!("{} saved to dossier {id}", "✓".green());
    }

    let mut event = ActivityEvent::new(EventType::TrirCalculated, &ctx.user);
    if let Some(d) = &dossier {
        event = event.company(&d.company_name).dossier(&d.id);
    }
    ctx.emit(event);
    Ok(())
}

/// Run the Safety Pays estimator over a set of "Label=count" selections.
#[allow(clippy::too_many_arguments)]
pub fn run_safety_pays(
    ctx: &CommandContext,
    injuries: &[String],
    margin: Option<f64>,
    dossier_id: Option<String>,
    save: bool,
    pdf: bool,
) -> Result<()> {
    let dossier = dossier_id.as_deref().map(|id| ctx.fetch(id)).transpose()?;

    let mut session = SafetyPaysSession::new(get_config().calculators.default_profit_margin);
    session.link_dossier(dossier.as_ref());
    if let Some(margin) = margin {
        session.set_profit_margin(margin);
    }

    for spec in injuries {
        let (label, count) = parse_injury_spec(spec)?;
        session.add_injury(label, count)?;
    }

    let today = Local::now().date_naive();
    let calculation = session.build_calculation(today);
    print_breakdown(&session);

    if save {
        session.save(&ctx.store, today)?;
        println!(
            "{} saved to dossier {}",
            "✓".green(),
            dossier_id.as_deref().unwrap()
        );
    }

    if pdf {
        let company = dossier
            .as_ref()
            .map(|d| d.company_name.as_str())
            .unwrap_or("Safety Pays");
        let path = PathBuf::from(download_file_name(company, "Safety_Pays_Report", "pdf"));
        write_safety_pays_pdf(company, &calculation, &path)?;
        println!("{} wrote {}", "✓".green(), path.display());
    }

    let mut event = ActivityEvent::new(EventType::SafetyPaysCalculated, &ctx.user);
    if let Some(d) = &dossier {
        event = event.company(&d.company_name).dossier(&d.id);
    }
    ctx.emit(event);
    Ok(())
}

fn parse_injury_spec(spec: &str) -> Result<(&str, u32)> {
    let Some((label, count)) = spec.rsplit_once('=') else {
        bail!("injury selections look like \"Fracture=2\", got {spec:?}");
    };
    let count: u32 = count
        .parse()
        .with_context(|| format!("case count in {spec:?} is not a whole number"))?;
    Ok((label.trim(), count))
}

fn print_breakdown(session: &SafetyPaysSession) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Injury", "Cases", "Direct", "Indirect", "Total"]);
    for injury in session.injuries() {
        table.add_row(vec![
            injury.label.to_string(),
            injury.count.to_string(),
            format!("${}", injury.direct_cost * u64::from(injury.count)),
            format!("${}", injury.indirect_cost * u64::from(injury.count)),
            format!("${}", injury.total_cost()),
        ]);
    }
    println!("{table}");
    println!("Total direct costs:   ${}", session.total_direct_costs());
    println!("Total indirect costs: ${}", session.total_indirect_costs());
    println!(
        "Combined total cost:  {}",
        format!("${}", session.combined_total_cost()).bold()
    );
    if session.profit_margin() > 0.0 {
        println!(
            "Sales needed at {}% margin: {}",
            session.profit_margin(),
            format!("${:.2}", session.sales_needed()).bold()
        );
    } else {
        println!("Sales needed: not computable without a positive profit margin");
    }
}
