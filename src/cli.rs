use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ehsintel",
    about = "EHS/ESG sales-intelligence dossiers: AI ingestion, safety calculators, reports",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Acting user recorded in the activity log
    #[arg(long, global = true, env = "EHSINTEL_USER", default_value = "local@ehsintel")]
    pub user: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Ingest an AI dossier payload and create a record
    Ingest {
        /// Company to analyze
        company: String,

        /// JSON payload file ("-" reads stdin)
        #[arg(long, conflicts_with = "fixture")]
        payload: Option<PathBuf>,

        /// Use the built-in canned payload instead of a payload file
        #[arg(long)]
        fixture: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List stored dossiers
    List {
        #[arg(long, value_enum, default_value_t = SortOrder::CreatedDesc)]
        sort: SortOrder,

        /// Maximum records to show
        #[arg(long, default_value_t = 50)]
        limit: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },

    /// Print a dossier's markdown report
    Show {
        /// Dossier id
        id: String,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render a dossier's report to PDF
    Pdf {
        /// Dossier id
        id: String,

        /// Output path (defaults to {Company}_Safety_Report.pdf)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compute a Total Recordable Incident Rate
    Trir {
        /// Number of recordable injuries
        #[arg(long)]
        injuries: f64,

        /// Total hours worked (defaults to employee_count * 2000 when a
        /// dossier is given)
        #[arg(long)]
        hours: Option<f64>,

        /// Dossier to prefill hours from and to save against
        #[arg(long)]
        dossier: Option<String>,

        /// Persist the result onto the dossier
        #[arg(long, requires = "dossier")]
        save: bool,
    },

    /// Estimate injury costs with the Safety Pays model
    SafetyPays {
        /// Injury selection as "Label=count", repeatable
        #[arg(long = "injury", value_name = "LABEL=COUNT", required = true)]
        injuries: Vec<String>,

        /// Profit margin percentage (defaults from the linked dossier,
        /// then from configuration)
        #[arg(long)]
        margin: Option<f64>,

        /// Dossier to link the calculation to
        #[arg(long)]
        dossier: Option<String>,

        /// Persist the breakdown onto the dossier
        #[arg(long, requires = "dossier")]
        save: bool,

        /// Also write a PDF of the breakdown
        #[arg(long)]
        pdf: bool,
    },

    /// Generate a sales case study from a dossier's research
    CaseStudy {
        /// Dossier id
        id: String,

        /// Markdown reply file ("-" reads stdin)
        #[arg(long, conflicts_with = "fixture")]
        reply: Option<PathBuf>,

        /// Use the built-in canned narrative instead of a reply file
        #[arg(long)]
        fixture: bool,

        /// Write the PDF export
        #[arg(long)]
        pdf: bool,

        /// Write the Word-compatible export
        #[arg(long)]
        word: bool,
    },

    /// Build regulatory-database search links
    Search {
        /// Company to search for
        company: String,

        /// Database to search (defaults to all three)
        #[arg(long, value_enum)]
        site: Option<SiteArg>,

        /// Save the link(s) onto a dossier
        #[arg(long)]
        save: Option<String>,
    },

    /// Export dossier summaries to CSV
    Export {
        /// Output path (defaults to ehs_analyses.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Overwrite a dossier's user notes
    Notes {
        /// Dossier id
        id: String,

        /// Note text
        notes: String,
    },

    /// Delete a dossier
    Delete {
        /// Dossier id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Delete duplicate dossiers, keeping the newest per company
    Dedupe {
        /// Confirm the deletions
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Newest first
    CreatedDesc,
    /// Company name A-Z
    NameAsc,
    /// Company name Z-A
    NameDesc,
}

impl From<SortOrder> for crate::store::SortSpec {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::CreatedDesc => crate::store::SortSpec::CreatedDesc,
            SortOrder::NameAsc => crate::store::SortSpec::NameAsc,
            SortOrder::NameDesc => crate::store::SortSpec::NameDesc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SiteArg {
    ViolationTracker,
    Osha,
    EpaEcho,
}

impl From<SiteArg> for crate::search::SearchSite {
    fn from(site: SiteArg) -> Self {
        match site {
            SiteArg::ViolationTracker => crate::search::SearchSite::ViolationTracker,
            SiteArg::Osha => crate::search::SearchSite::OshaEstablishment,
            SiteArg::EpaEcho => crate::search::SearchSite::EpaEcho,
        }
    }
}
