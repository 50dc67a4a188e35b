use crate::merge::ImportMode;
use crate::model::{LeadStatus, StatusFilter};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "seller")]
#[command(
    author,
    version,
    about = "A terminal seller console for triaging leads and converting them into opportunities"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .seller.toml by default)
    #[arg(long, global = true, env = "SELLER_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "SELLER_LOG_FILE")]
    pub log_file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new seller console project
    Init {
        /// Lead fixture the console reads from
        #[arg(long, default_value = "leads.json")]
        fixture: String,

        /// Keep persisted state in this directory instead of the user profile
        #[arg(long)]
        store_path: Option<String>,
    },

    /// List leads, highest score first
    #[command(visible_alias = "ls")]
    List {
        /// Search name and company (case-insensitive)
        #[arg(short, long)]
        query: Option<String>,

        /// Filter by status
        #[arg(short, long, value_enum)]
        status: Option<StatusFilterArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the saved list filter
    Filter {
        /// Saved search text (empty string clears it)
        #[arg(short, long)]
        query: Option<String>,

        /// Saved status filter
        #[arg(short, long, value_enum)]
        status: Option<StatusFilterArg>,

        /// Reset to showing every lead
        #[arg(long, conflicts_with_all = ["query", "status"])]
        clear: bool,
    },

    /// Validate a lead import file without importing it
    Check {
        /// Path to a .json file
        file: String,

        /// Output the parsed leads as JSON
        #[arg(long)]
        json: bool,
    },

    /// List converted opportunities
    #[command(visible_alias = "opps")]
    Opportunities {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session (edit, convert, import)
    Console {
        /// Import policy used when `import` is given no mode
        #[arg(long, value_enum)]
        mode: Option<ImportModeArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusFilterArg {
    All,
    New,
    Contacted,
    Qualified,
    Unqualified,
}

impl From<StatusFilterArg> for StatusFilter {
    fn from(arg: StatusFilterArg) -> Self {
        match arg {
            StatusFilterArg::All => StatusFilter::All,
            StatusFilterArg::New => StatusFilter::Only(LeadStatus::New),
            StatusFilterArg::Contacted => StatusFilter::Only(LeadStatus::Contacted),
            StatusFilterArg::Qualified => StatusFilter::Only(LeadStatus::Qualified),
            StatusFilterArg::Unqualified => StatusFilter::Only(LeadStatus::Unqualified),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ImportModeArg {
    Merge,
    Replace,
}

impl From<ImportModeArg> for ImportMode {
    fn from(arg: ImportModeArg) -> Self {
        match arg {
            ImportModeArg::Merge => ImportMode::Merge,
            ImportModeArg::Replace => ImportMode::Replace,
        }
    }
}
