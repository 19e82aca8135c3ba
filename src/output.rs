// src/output.rs
use chrono::NaiveDate;
use csv::{ReaderBuilder, Writer, WriterBuilder};
use std::{
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
};
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, info};

use crate::config::Mode;
use crate::error::{Result, ScrapeError};
use crate::process::{date_parser::parse_recorded_date, OutputRecord, HEADER};

/// Appends output records to the target CSV. The header goes in once, when
/// the file is new or empty at open.
///
/// In `Fresh` mode the rows go to a temp file next to the target, which
/// only replaces it on [`CsvSink::commit`]. A sink dropped without commit
/// leaves the existing output untouched.
pub struct CsvSink {
    path: PathBuf,
    writer: Writer<File>,
    staged: Option<TempPath>,
    rows: u64,
}

impl CsvSink {
    pub fn open(path: impl Into<PathBuf>, mode: Mode) -> Result<Self> {
        let path = path.into();
        let io_err = |source: io::Error| ScrapeError::Io {
            path: path.clone(),
            source,
        };

        let (file, staged) = match mode {
            Mode::Fresh => {
                let dir = match path.parent() {
                    Some(p) if !p.as_os_str().is_empty() => p,
                    _ => Path::new("."),
                };
                let (file, tmp) = NamedTempFile::new_in(dir).map_err(io_err)?.into_parts();
                (file, Some(tmp))
            }
            Mode::Append | Mode::Update => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(io_err)?;
                (file, None)
            }
        };
        let is_new = file.metadata().map_err(io_err)?.len() == 0;

        let mut sink = Self {
            writer: WriterBuilder::new().has_headers(false).from_writer(file),
            path,
            staged,
            rows: 0,
        };
        if is_new {
            sink.writer
                .write_record(HEADER)
                .map_err(|e| sink.csv_err(e))?;
            sink.flush()?;
            info!(path = %sink.path.display(), "started output with header");
        }
        Ok(sink)
    }

    pub fn write(&mut self, rec: &OutputRecord) -> Result<()> {
        self.writer.serialize(rec).map_err(|e| self.csv_err(e))?;
        self.rows += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| ScrapeError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Flush, and move a staged output over the target.
    pub fn commit(mut self) -> Result<()> {
        self.flush()?;
        let CsvSink {
            path,
            writer,
            staged,
            ..
        } = self;
        drop(writer);

        if let Some(tmp) = staged {
            tmp.persist(&path).map_err(|e| ScrapeError::Io {
                path: path.clone(),
                source: e.error,
            })?;
            info!(path = %path.display(), "replaced output");
        }
        Ok(())
    }

    /// Data rows written through this sink.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    fn csv_err(&self, source: csv::Error) -> ScrapeError {
        ScrapeError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

/// Date of the last data row in an existing output file. `None` when the
/// file is missing or holds only a header; an error when data rows exist
/// but the last one has no readable date.
pub fn last_recorded_date(path: &Path) -> Result<Option<NaiveDate>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| ScrapeError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut last = None;
    for rec in rdr.records() {
        let rec = rec.map_err(|source| ScrapeError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(cell) = rec.get(0) {
            last = Some(cell.to_string());
        }
    }

    let Some(cell) = last else {
        debug!(path = %path.display(), "no data rows yet");
        return Ok(None);
    };
    let date = parse_recorded_date(&cell).ok_or_else(|| ScrapeError::UnreadableDate {
        path: path.to_path_buf(),
        value: cell.clone(),
    })?;
    debug!(path = %path.display(), %date, "last recorded date");
    Ok(Some(date))
}
