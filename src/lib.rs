pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod process;

pub use config::{Config, Mode};
pub use error::{ParseWarning, ScrapeError};
pub use pipeline::{run, RunSummary};
