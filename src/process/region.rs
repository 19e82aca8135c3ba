use std::{fmt, str::FromStr};

use crate::error::ScrapeError;
use crate::process::record::OutputRecord;

/// A region identifier, written most specific first:
/// `"Singapore"`, `"Arizona, US"`, `"Pima, Arizona, US"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionId {
    pub country: String,
    pub province: Option<String>,
    pub county: Option<String>,
}

impl FromStr for RegionId {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(ScrapeError::InvalidRegion(s.to_string()));
        }
        let mut rev = parts.into_iter().rev().map(str::to_string);
        Ok(RegionId {
            // split always yields at least one part
            country: rev.next().unwrap_or_default(),
            province: rev.next(),
            county: rev.next(),
        })
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(county) = &self.county {
            write!(f, "{}, ", county)?;
        }
        if let Some(province) = &self.province {
            write!(f, "{}, ", province)?;
        }
        f.write_str(&self.country)
    }
}

impl RegionId {
    pub fn matches(&self, rec: &OutputRecord) -> bool {
        fn eq(want: &Option<String>, got: &str) -> bool {
            want.as_deref().map_or(true, |w| w == got.trim())
        }
        self.country == rec.country_region.trim()
            && eq(&self.province, &rec.province_state)
            && eq(&self.county, &rec.admin2)
    }
}

/// The fixed set of regions kept for a run.
#[derive(Clone, Debug, Default)]
pub struct RegionFilter {
    regions: Vec<RegionId>,
}

impl RegionFilter {
    pub fn new<I, S>(ids: I) -> Result<Self, ScrapeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let regions = ids
            .into_iter()
            .map(|s| s.as_ref().parse::<RegionId>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { regions })
    }

    pub fn matches(&self, rec: &OutputRecord) -> bool {
        self.regions.iter().any(|r| r.matches(rec))
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }
}
