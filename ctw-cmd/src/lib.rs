//! Command implementations for the CTW CLI.
//!
//! Subcommands fetch live OpenAQ readings, print demo analytics and the
//! home dashboard, run intervention simulations, manage the persisted
//! settings and write JSON exports.

use clap::{Args, Subcommand};
use ctw_sensor::openaq::{OpenAqClient, OpenAqConfig};
use ctw_sensor::transport::ReqwestTransport;
use ctw_store::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use ctw_store::Database;
use std::path::PathBuf;
use std::time::Duration;

pub mod dashboard;
pub mod demo;
pub mod export;
pub mod fetch;
pub mod settings;
pub mod simulate;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Settings database file
    #[arg(long, env = "CTW_DB", default_value = "ctw.sqlite", global = true)]
    pub db: PathBuf,

    /// OpenAQ API key
    #[arg(long, env = "OPENAQ_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// OpenAQ base URL
    #[arg(long, env = "OPENAQ_API_URL", global = true)]
    pub api_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 60, global = true)]
    pub timeout_secs: u64,
}

impl GlobalArgs {
    pub fn open_db(&self) -> anyhow::Result<Database> {
        Database::open(&self.db)
    }

    pub fn openaq_config(&self) -> OpenAqConfig {
        let mut config = OpenAqConfig::default();
        if let Some(url) = &self.api_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        match &self.api_key {
            Some(key) => config.with_api_key(key.as_str()),
            None => config,
        }
    }

    pub fn openaq_client(&self) -> anyhow::Result<OpenAqClient<ReqwestTransport>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;
        Ok(OpenAqClient::with_reqwest(self.openaq_config(), client))
    }
}

/// Data source selector for commands that accept one.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    Demo,
    Live,
}

impl From<SourceArg> for ctw_data::source::DataSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Demo => ctw_data::source::DataSource::Demo,
            SourceArg::Live => ctw_data::source::DataSource::Live,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the latest readings for the city from OpenAQ
    Fetch {
        /// Print readings as JSON
        #[arg(long)]
        json: bool,

        /// Also write readings to this CSV file
        #[arg(short = 'o', long)]
        csv: Option<PathBuf>,
    },

    /// Print the demo analytics dataset for a time range
    Demo {
        /// 24hours, 7days, 30days or 90days
        #[arg(short, long, default_value = "7days")]
        range: String,

        /// Seed the jitter generator for reproducible series
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Run an intervention simulation
    Simulate {
        /// Trees planted (0-500, step 10)
        #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
        trees: i64,

        /// Traffic reduction target in percent (0-50, step 5)
        #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
        traffic: i64,

        /// CO2 scrubber units (0-20)
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        scrubbers: i64,

        /// Pause before printing results, like the dashboard run control
        #[arg(long)]
        paced: bool,

        #[arg(long)]
        json: bool,
    },

    /// Print the home dashboard
    Dashboard {
        /// Override the persisted data source
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        /// Keep refreshing live data every 30 seconds
        #[arg(long)]
        watch: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show or change persisted settings
    Config {
        #[command(subcommand)]
        action: Option<settings::ConfigAction>,
    },

    /// Demo login (credentials are not verified)
    Login {
        #[arg(long, default_value = DEMO_EMAIL)]
        email: String,

        #[arg(long, default_value = DEMO_PASSWORD)]
        password: String,
    },

    /// Clear the demo login
    Logout,

    /// Show login state, settings and API configuration
    Status,

    /// Write a JSON export
    Export {
        /// Output directory
        #[arg(short = 'o', long, default_value = ".")]
        out_dir: PathBuf,

        /// Data source for sensor, zone and alert exports
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        #[command(subcommand)]
        kind: export::ExportKind,
    },
}

pub async fn run(globals: &GlobalArgs, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch { json, csv } => fetch::run_fetch(globals, json, csv.as_deref()).await,
        Command::Demo { range, seed, json } => demo::run_demo(&range, seed, json),
        Command::Simulate {
            trees,
            traffic,
            scrubbers,
            paced,
            json,
        } => simulate::run_simulate(trees, traffic, scrubbers, paced, json).await,
        Command::Dashboard {
            source,
            watch,
            json,
        } => dashboard::run_dashboard(globals, source.map(Into::into), watch, json).await,
        Command::Config { action } => settings::run_config(globals, action),
        Command::Login { email, password } => settings::run_login(globals, &email, &password).await,
        Command::Logout => settings::run_logout(globals),
        Command::Status => settings::run_status(globals),
        Command::Export {
            out_dir,
            source,
            kind,
        } => export::run_export(globals, &out_dir, source.map(Into::into), kind).await,
    }
}
