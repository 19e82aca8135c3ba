use serde::Serialize;

/// Output column names, in write order.
pub const HEADER: [&str; 15] = [
    "Date",
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
    "Incident_Rate",
    "Case_Fatality_Ratio",
];

/// One row of the output file. Values are kept exactly as read; columns
/// the source layout lacks are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "FIPS")]
    pub fips: String,
    #[serde(rename = "Admin2")]
    pub admin2: String,
    #[serde(rename = "Province_State")]
    pub province_state: String,
    #[serde(rename = "Country_Region")]
    pub country_region: String,
    #[serde(rename = "Last_Update")]
    pub last_update: String,
    #[serde(rename = "Lat")]
    pub lat: String,
    #[serde(rename = "Long_")]
    pub long: String,
    #[serde(rename = "Confirmed")]
    pub confirmed: String,
    #[serde(rename = "Deaths")]
    pub deaths: String,
    #[serde(rename = "Recovered")]
    pub recovered: String,
    #[serde(rename = "Active")]
    pub active: String,
    #[serde(rename = "Combined_Key")]
    pub combined_key: String,
    #[serde(rename = "Incident_Rate")]
    pub incident_rate: String,
    #[serde(rename = "Case_Fatality_Ratio")]
    pub case_fatality_ratio: String,
}

impl OutputRecord {
    /// Every non-empty numeric column must parse as a number.
    pub fn check_numbers(&self) -> Result<(), String> {
        let numeric = [
            ("Lat", &self.lat),
            ("Long_", &self.long),
            ("Confirmed", &self.confirmed),
            ("Deaths", &self.deaths),
            ("Recovered", &self.recovered),
            ("Active", &self.active),
            ("Incident_Rate", &self.incident_rate),
            ("Case_Fatality_Ratio", &self.case_fatality_ratio),
        ];
        for (name, value) in numeric {
            let v = value.trim();
            if !v.is_empty() && v.parse::<f64>().is_err() {
                return Err(format!("{} is not a number: {:?}", name, value));
            }
        }
        Ok(())
    }
}
