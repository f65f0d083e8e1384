use clap::{Parser, Subcommand};

use crate::{
    api::amfi::{DEFAULT_TIMEOUT_SECS, NAV_ALL_URL},
    app::utils::DEFAULT_EXPORT_PATH,
    models::snapshot::DEFAULT_REFRESH_MINUTES,
};

pub const DEFAULT_LOG_FILE: &str = "nav-dashboard.log";

#[derive(Debug, Parser)]
#[command(
    name = "nav-dashboard",
    version,
    about = "Personal investment dashboard with live AMFI NAVs and an SWP simulator"
)]
pub struct Cli {
    /// JSON portfolio file; the built-in sample portfolio is used when absent
    #[arg(long, env = "NAV_DASHBOARD_PORTFOLIO")]
    pub portfolio: Option<String>,

    /// URL of the AMFI NAV list
    #[arg(long, env = "AMFI_NAV_URL", default_value = NAV_ALL_URL)]
    pub nav_url: String,

    /// Timeout for a single NAV list download
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Minutes a valuation snapshot stays fresh
    #[arg(long, default_value_t = DEFAULT_REFRESH_MINUTES)]
    pub refresh_minutes: u32,

    /// Where the CSV summary is written
    #[arg(long, default_value = DEFAULT_EXPORT_PATH)]
    pub export_path: String,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Open the interactive dashboard (default)
    Dashboard,
    /// Fetch NAVs once and write the CSV summary
    Export,
    /// Print how long a corpus lasts under a systematic withdrawal plan
    Swp {
        #[arg(long, default_value_t = 500_000.0)]
        corpus: f64,
        #[arg(long, default_value_t = 5_000.0)]
        withdrawal: f64,
        #[arg(long, default_value_t = 10.0)]
        annual_return: f64,
    },
}
