//! Command-line flags.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, Mode, DEFAULT_API_URL, DEFAULT_OUTPUT, DEFAULT_RAW_BASE_URL};

/// Pull Singapore and Pima County rows out of the JHU CSSE COVID-19 daily
/// reports into one CSV.
#[derive(Parser, Debug, Clone)]
#[command(name = "casescraper")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    casescraper
    casescraper --mode update
    casescraper --mode fresh -o pima.csv --region \"Pima, Arizona, US\"
    casescraper --from 2021-01-01 --to 2021-01-31")]
pub struct Args {
    /// Output CSV path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// What to do with an existing output file
    #[arg(long, value_enum, default_value = "append")]
    pub mode: Mode,

    /// First report date to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last report date to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Region to keep, most specific first; repeat for more. Replaces the defaults.
    #[arg(long = "region", value_name = "ID")]
    pub regions: Vec<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    #[arg(long, default_value = DEFAULT_API_URL, hide_default_value = true)]
    pub api_url: String,

    #[arg(long, default_value = DEFAULT_RAW_BASE_URL, hide_default_value = true)]
    pub raw_base_url: String,
}

impl Args {
    pub fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            api_url: self.api_url,
            raw_base_url: self.raw_base_url,
            output: self.output,
            regions: if self.regions.is_empty() {
                defaults.regions
            } else {
                self.regions
            },
            from: self.from,
            to: self.to,
            mode: self.mode,
            timeout: std::time::Duration::from_secs(self.timeout),
            github_token: None,
        }
        .with_env()
    }
}
