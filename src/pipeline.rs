// src/pipeline.rs
use std::io::Cursor;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::{Config, Mode};
use crate::error::{Result, ScrapeError};
use crate::fetch::{self, SourceFile};
use crate::output::{last_recorded_date, CsvSink};
use crate::process::{filter_records, RegionFilter};

/// What one run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub rows: u64,
    pub warnings: usize,
}

/// List → fetch → filter → append, one file at a time in date order.
#[tracing::instrument(level = "info", skip_all, fields(output = %cfg.output.display(), mode = ?cfg.mode))]
pub async fn run(cfg: &Config) -> Result<RunSummary> {
    let filter = RegionFilter::new(&cfg.regions)?;
    let regions: Vec<String> = filter.regions().iter().map(ToString::to_string).collect();
    info!(regions = %regions.join("; "), "region filter");
    let client = fetch::build_client(cfg)?;

    // must be read before the sink touches the file
    let resume_after = match cfg.mode {
        Mode::Update => last_recorded_date(&cfg.output)?,
        Mode::Append | Mode::Fresh => None,
    };

    // list before opening the sink so a failed listing leaves the output alone
    let files = match fetch::list_source_files(&client, cfg).await {
        Ok(files) => files,
        Err(ScrapeError::NotFound(url)) => {
            warn!(%url, "no source files to process");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let files: Vec<SourceFile> = match resume_after {
        Some(last) => {
            info!(%last, "resuming after last recorded date");
            files.into_iter().filter(|f| f.date > last).collect()
        }
        None => files,
    };

    let mut sink = CsvSink::open(&cfg.output, cfg.mode)?;
    let mut summary = RunSummary::default();
    if files.is_empty() {
        info!("no new source files");
        sink.commit()?;
        return Ok(summary);
    }

    for file in &files {
        let start = Instant::now();
        let text = fetch::fetch_csv(&client, file).await?;
        if text.trim().is_empty() {
            warn!(name = %file.name, "empty file, skipping");
            continue;
        }

        let mut rows = 0u64;
        for item in filter_records(Cursor::new(text), &file.name, file.date, &filter)? {
            match item {
                Ok(rec) => {
                    sink.write(&rec)?;
                    rows += 1;
                }
                Err(w) => {
                    warn!(name = %file.name, line = w.line, reason = %w.reason, "skipping row");
                    summary.warnings += 1;
                }
            }
        }
        sink.flush()?;

        summary.files += 1;
        summary.rows += rows;
        info!(name = %file.name, rows, elapsed = ?start.elapsed(), "processed");
    }

    debug_assert_eq!(summary.rows, sink.rows_written());
    sink.commit()?;
    info!(
        files = summary.files,
        rows = summary.rows,
        warnings = summary.warnings,
        "run complete"
    );
    Ok(summary)
}
