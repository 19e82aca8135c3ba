use csv::StringRecord;

use crate::error::{Result, ScrapeError};
use crate::process::record::OutputRecord;

/// Column schemas the daily reports have used over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Province/State, Country/Region, Last Update, Confirmed, Deaths, Recovered
    Early6,
    /// Early6 + Latitude, Longitude
    Early8,
    /// FIPS, Admin2, Province_State, Country_Region, ... Active, Combined_Key
    Modern12,
    /// Modern12 + Incident_Rate, Case_Fatality_Ratio
    Modern14,
}

impl Layout {
    /// Identify the layout from the header row of `file`.
    pub fn detect(header: &StringRecord, file: &str) -> Result<Self> {
        let layout = match header.len() {
            6 => Layout::Early6,
            8 => Layout::Early8,
            12 => Layout::Modern12,
            14 => Layout::Modern14,
            columns => {
                return Err(ScrapeError::UnsupportedLayout {
                    file: file.to_string(),
                    columns,
                })
            }
        };

        // guard against a same-width schema with the columns moved around
        let country = header.get(layout.country_column()).unwrap_or("");
        if !country.contains("Country") {
            return Err(ScrapeError::UnsupportedLayout {
                file: file.to_string(),
                columns: header.len(),
            });
        }
        Ok(layout)
    }

    pub fn columns(self) -> usize {
        match self {
            Layout::Early6 => 6,
            Layout::Early8 => 8,
            Layout::Modern12 => 12,
            Layout::Modern14 => 14,
        }
    }

    fn country_column(self) -> usize {
        match self {
            Layout::Early6 | Layout::Early8 => 1,
            Layout::Modern12 | Layout::Modern14 => 3,
        }
    }

    /// Place the fields of `rec` into the output columns.
    pub fn project(self, rec: &StringRecord, date: &str) -> OutputRecord {
        let f = |i: usize| rec.get(i).unwrap_or_default().to_string();
        match self {
            Layout::Early6 | Layout::Early8 => {
                let (lat, long) = if self == Layout::Early8 {
                    (f(6), f(7))
                } else {
                    Default::default()
                };
                OutputRecord {
                    date: date.to_string(),
                    province_state: f(0),
                    country_region: f(1),
                    last_update: f(2),
                    confirmed: f(3),
                    deaths: f(4),
                    recovered: f(5),
                    lat,
                    long,
                    ..Default::default()
                }
            }
            Layout::Modern12 | Layout::Modern14 => OutputRecord {
                date: date.to_string(),
                fips: f(0),
                admin2: f(1),
                province_state: f(2),
                country_region: f(3),
                last_update: f(4),
                lat: f(5),
                long: f(6),
                confirmed: f(7),
                deaths: f(8),
                recovered: f(9),
                active: f(10),
                combined_key: f(11),
                incident_rate: f(12),
                case_fatality_ratio: f(13),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> StringRecord {
        StringRecord::from(cols.to_vec())
    }

    #[test]
    fn detects_all_known_layouts() {
        let early6 = [
            "Province/State",
            "Country/Region",
            "Last Update",
            "Confirmed",
            "Deaths",
            "Recovered",
        ];
        assert_eq!(Layout::detect(&header(&early6), "a").unwrap(), Layout::Early6);

        let mut early8 = early6.to_vec();
        early8.extend(["Latitude", "Longitude"]);
        assert_eq!(Layout::detect(&header(&early8), "a").unwrap(), Layout::Early8);

        let modern12 = [
            "FIPS",
            "Admin2",
            "Province_State",
            "Country_Region",
            "Last_Update",
            "Lat",
            "Long_",
            "Confirmed",
            "Deaths",
            "Recovered",
            "Active",
            "Combined_Key",
        ];
        assert_eq!(
            Layout::detect(&header(&modern12), "a").unwrap(),
            Layout::Modern12
        );

        let mut modern14 = modern12.to_vec();
        modern14.extend(["Incidence_Rate", "Case-Fatality_Ratio"]);
        let layout = Layout::detect(&header(&modern14), "a").unwrap();
        assert_eq!(layout, Layout::Modern14);
        assert_eq!(layout.columns(), 14);
    }

    #[test]
    fn unknown_width_is_rejected() {
        let err = Layout::detect(&header(&["a"; 15]), "05-01-2023.csv").unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::UnsupportedLayout { columns: 15, .. }
        ));
    }

    #[test]
    fn shuffled_columns_are_rejected() {
        let cols = ["Confirmed", "Deaths", "Recovered", "Province/State", "Country/Region", "Last Update"];
        assert!(Layout::detect(&header(&cols), "a").is_err());
    }

    #[test]
    fn early_rows_are_reordered() {
        let row = header(&["", "Singapore", "2020-03-01T10:13:19", "106", "0", "72", "1.2833", "103.8333"]);
        let out = Layout::Early8.project(&row, "03-01-2020");
        assert_eq!(out.country_region, "Singapore");
        assert_eq!(out.last_update, "2020-03-01T10:13:19");
        assert_eq!(out.confirmed, "106");
        assert_eq!(out.recovered, "72");
        assert_eq!(out.lat, "1.2833");
        assert_eq!(out.long, "103.8333");
        assert_eq!(out.active, "");
        assert_eq!(out.admin2, "");
    }
}
