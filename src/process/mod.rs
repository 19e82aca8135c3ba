// src/process/mod.rs
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::{io::Read, path::PathBuf};
use tracing::debug;

use crate::error::{ParseWarning, Result, ScrapeError};

pub mod date_parser;
pub mod layout;
pub mod record;
pub mod region;

pub use layout::Layout;
pub use record::{OutputRecord, HEADER};
pub use region::{RegionFilter, RegionId};

/// Lazily yields the rows of one daily report that fall inside the filter.
///
/// `Err` items are skipped rows; iteration carries on after them.
pub struct RegionRecords<'f, R> {
    records: StringRecordsIntoIter<R>,
    layout: Layout,
    date: String,
    filter: &'f RegionFilter,
}

/// Read the header of `reader`, settle its layout and hand back the
/// filtering iterator over the remaining rows.
pub fn filter_records<'f, R: Read>(
    reader: R,
    file_name: &str,
    date: NaiveDate,
    filter: &'f RegionFilter,
) -> Result<RegionRecords<'f, R>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // row width is checked per record below
        .from_reader(reader);

    let header = rdr.headers().map_err(|source| ScrapeError::Csv {
        path: PathBuf::from(file_name),
        source,
    })?;
    let layout = Layout::detect(header, file_name)?;
    debug!(file = file_name, ?layout, "layout detected");

    Ok(RegionRecords {
        records: rdr.into_records(),
        layout,
        date: date_parser::format_report_date(date),
        filter,
    })
}

impl<R: Read> Iterator for RegionRecords<'_, R> {
    type Item = std::result::Result<OutputRecord, ParseWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rec = match self.records.next()? {
                Ok(rec) => rec,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    return Some(Err(ParseWarning {
                        line,
                        reason: e.to_string(),
                    }));
                }
            };
            let line = rec.position().map(|p| p.line()).unwrap_or_default();

            if rec.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            if rec.len() != self.layout.columns() {
                return Some(Err(ParseWarning {
                    line,
                    reason: format!(
                        "expected {} fields, found {}",
                        self.layout.columns(),
                        rec.len()
                    ),
                }));
            }

            let out = self.layout.project(&rec, &self.date);
            if !self.filter.matches(&out) {
                continue;
            }
            if let Err(reason) = out.check_numbers() {
                return Some(Err(ParseWarning { line, reason }));
            }
            return Some(Ok(out));
        }
    }
}
