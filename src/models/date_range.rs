use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive reporting window. `end` sits on the last second of its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        let start = NaiveDate::parse_from_str(from, DATE_FORMAT).map_err(|e| {
            Error::InvalidDateRange(format!("Failed to parse start date {:?}: {}", from, e))
        })?;
        let end = NaiveDate::parse_from_str(to, DATE_FORMAT).map_err(|e| {
            Error::InvalidDateRange(format!("Failed to parse end date {:?}: {}", to, e))
        })?;

        Self::from_dates(start, end)
    }

    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let start = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt))
            .ok_or_else(|| Error::InvalidDateRange(format!("Invalid start date: {}", start)))?;
        let end = end
            .and_hms_opt(23, 59, 59)
            .map(|dt| Utc.from_utc_datetime(&dt))
            .ok_or_else(|| Error::InvalidDateRange(format!("Invalid end date: {}", end)))?;

        if end < start {
            return Err(Error::InvalidDateRange(
                "End date must be after start date".to_string(),
            ));
        }

        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant <= self.end
    }

    pub fn start_date(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_date(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_is_last_second_of_day() {
        let range = DateRange::parse("2024-03-01", "2024-03-05").unwrap();
        assert_eq!(range.start.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(range.end.to_rfc3339(), "2024-03-05T23:59:59+00:00");
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::parse("2024-03-01", "2024-03-01").unwrap();
        assert!(range.contains(&"2024-03-01T12:30:00Z".parse().unwrap()));
        assert!(!range.contains(&"2024-03-02T00:00:00Z".parse().unwrap()));
        assert!(!range.contains(&"2024-02-29T23:59:59Z".parse().unwrap()));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = DateRange::parse("2024-03-05", "2024-03-01").unwrap_err();
        assert!(matches!(err, Error::InvalidDateRange(_)));
    }

    #[test]
    fn test_bad_date_names_the_bound() {
        let err = DateRange::parse("2024-03-01", "yesterday").unwrap_err();
        assert!(err.to_string().contains("end date"));
    }
}
