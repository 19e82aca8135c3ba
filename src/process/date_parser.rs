use chrono::NaiveDate;

const REPORT_DATE_FMT: &str = "%m-%d-%Y";

/// `"01-22-2020.csv"` → 2020-01-22. Anything else → None.
pub fn parse_report_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(".csv")?;
    NaiveDate::parse_from_str(stem, REPORT_DATE_FMT).ok()
}

/// Formats a date the way it is written to the `Date` column.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format(REPORT_DATE_FMT).to_string()
}

/// Lenient parse of a previously written `Date` cell.
///
/// Accepts `M/D/YYYY` and `M-D-YYYY` (spreadsheets tend to rewrite the
/// column and drop the zero padding).
pub fn parse_recorded_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let sep = if s.contains('/') { '/' } else { '-' };
    let mut parts = s.split(sep);
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_names() {
        assert_eq!(
            parse_report_date("01-22-2020.csv"),
            NaiveDate::from_ymd_opt(2020, 1, 22)
        );
        assert_eq!(parse_report_date("README.md"), None);
        assert_eq!(parse_report_date(".gitignore"), None);
        assert_eq!(parse_report_date("13-01-2020.csv"), None);
    }

    #[test]
    fn recorded_dates_accept_loose_formats() {
        let want = NaiveDate::from_ymd_opt(2021, 3, 7);
        assert_eq!(parse_recorded_date("03-07-2021"), want);
        assert_eq!(parse_recorded_date("3/7/2021"), want);
        assert_eq!(parse_recorded_date(" 3-7-2021 "), want);
        assert_eq!(parse_recorded_date("Date"), None);
        assert_eq!(parse_recorded_date("3/7/2021/1"), None);
    }

    #[test]
    fn format_pads() {
        let d = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(format_report_date(d), "03-07-2021");
    }
}
