use clap::Parser;
use colored::Colorize;
use ehsintel::cli::{Cli, Commands};
use ehsintel::commands::{self, CommandContext};

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CommandContext::new(cli.user);
    match cli.command {
        Commands::Init { force } => commands::init::run(force),
        Commands::Ingest {
            company,
            payload,
            fixture,
            format,
        } => commands::ingest::run(&ctx, &company, payload, fixture, format),
        Commands::List {
            sort,
            limit,
            format,
            plain,
        } => commands::list::run(&ctx, sort, limit, format, plain),
        Commands::Show { id, output } => commands::report::show(&ctx, &id, output),
        Commands::Pdf { id, output } => commands::report::pdf(&ctx, &id, output),
        Commands::Trir {
            injuries,
            hours,
            dossier,
            save,
        } => commands::calculators::run_trir(&ctx, injuries, hours, dossier, save),
        Commands::SafetyPays {
            injuries,
            margin,
            dossier,
            save,
            pdf,
        } => commands::calculators::run_safety_pays(
            &ctx, &injuries, margin, dossier, save, pdf,
        ),
        Commands::CaseStudy {
            id,
            reply,
            fixture,
            pdf,
            word,
        } => commands::case_study::run(&ctx, &id, reply, fixture, pdf, word),
        Commands::Search {
            company,
            site,
            save,
        } => commands::manage::search(&ctx, &company, site, save),
        Commands::Export { output } => commands::manage::export(&ctx, output),
        Commands::Notes { id, notes } => commands::manage::notes(&ctx, &id, &notes),
        Commands::Delete { id, yes } => commands::manage::delete(&ctx, &id, yes),
        Commands::Dedupe { yes } => commands::manage::dedupe(&ctx, yes),
    }
}
