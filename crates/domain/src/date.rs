use chrono::prelude::*;
use chrono::Months;
use chrono_tz::Tz;

/// Parses a `YYYY-MM-DD` calendar date as sent by clients.
pub fn is_valid_date(datestr: &str) -> anyhow::Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(datestr.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::Error::msg(datestr.to_string()))?;

    if !(1970..=2100).contains(&date.year()) {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    Ok(date)
}

/// The calendar day of `timestamp_millis` in the business timezone.
pub fn today(timestamp_millis: i64, tz: &Tz) -> NaiveDate {
    let utc = Utc
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or_else(Utc::now);
    utc.with_timezone(tz).date_naive()
}

/// Adds calendar months, clamping to the last day of the target month
/// (e.g. Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec!["2018-01-01", "2025-12-31", "2020-02-29"];

        for date in &valid_dates {
            assert!(is_valid_date(date).is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "2018--1-1",
            "2020-01-32",
            "2021-02-29",
            "2020-00-01",
            "2020-01-00",
            "1969-12-31",
            "01/02/2020",
            "",
        ];

        for date in &invalid_dates {
            assert!(is_valid_date(date).is_err());
        }
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(add_months(d, 1), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(add_months(d, 4), NaiveDate::from_ymd_opt(2025, 5, 10).unwrap());
        let d = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
        assert_eq!(add_months(d, 1), NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
    }

    #[test]
    fn today_respects_timezone() {
        // 2025-01-15T20:00:00Z
        let ts = Utc
            .with_ymd_and_hms(2025, 1, 15, 20, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(
            today(ts, &chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert_eq!(
            today(ts, &chrono_tz::Asia::Kolkata),
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
        );
    }

    #[test]
    fn formats_dates() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(format_date(&d), "2025-03-01");
    }
}
