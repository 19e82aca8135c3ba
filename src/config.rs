// src/config.rs
use chrono::NaiveDate;
use std::{path::PathBuf, time::Duration};

/// GitHub contents API endpoint for the daily report directory.
pub const DEFAULT_API_URL: &str =
    "https://api.github.com/repos/CSSEGISandData/COVID-19/contents/csse_covid_19_data/csse_covid_19_daily_reports";

/// Raw file base; a file's URL is this joined with its name.
pub const DEFAULT_RAW_BASE_URL: &str =
    "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_daily_reports/";

pub const DEFAULT_OUTPUT: &str = "cases.csv";

pub static DEFAULT_REGIONS: &[&str] = &["Singapore", "Pima, Arizona, US"];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How the output file is treated at the start of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Append to whatever is there; header only if the file is new.
    #[default]
    Append,
    /// Truncate and rebuild from every listed file.
    Fresh,
    /// Only process days after the last date already in the output.
    Update,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub raw_base_url: String,
    pub output: PathBuf,
    pub regions: Vec<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub mode: Mode,
    pub timeout: Duration,
    pub github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
            from: None,
            to: None,
            mode: Mode::Append,
            timeout: DEFAULT_TIMEOUT,
            github_token: None,
        }
    }
}

impl Config {
    /// Picks up `GITHUB_TOKEN` if it is set and non-empty.
    pub fn with_env(mut self) -> Self {
        self.github_token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        self
    }

    /// True when `date` lies inside the optional inclusive bounds.
    pub fn in_range(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |f| date >= f) && self.to.map_or(true, |t| date <= t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_targets_singapore_and_pima() {
        let cfg = Config::default();
        assert_eq!(cfg.regions, vec!["Singapore", "Pima, Arizona, US"]);
        assert_eq!(cfg.output, PathBuf::from("cases.csv"));
        assert_eq!(cfg.mode, Mode::Append);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let cfg = Config {
            from: Some(d(2021, 1, 1)),
            to: Some(d(2021, 1, 3)),
            ..Config::default()
        };
        assert!(!cfg.in_range(d(2020, 12, 31)));
        assert!(cfg.in_range(d(2021, 1, 1)));
        assert!(cfg.in_range(d(2021, 1, 3)));
        assert!(!cfg.in_range(d(2021, 1, 4)));
        assert!(Config::default().in_range(d(1999, 1, 1)));
    }
}
