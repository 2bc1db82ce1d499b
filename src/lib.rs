mod calendar;
mod consts;
mod period;
mod prelude;
mod range;
mod table;
mod types;

#[cfg(test)]
mod test_utils;

pub use calendar::Converter;
pub use consts::*;
pub use period::{FiscalPeriod, FiscalYear, PeriodResolver};
pub use range::{DateRange, RangeError};
pub use table::{EPOCH_AD, FIRST_SUPPORTED_YEAR, LAST_SUPPORTED_YEAR, MonthLengthTable, TableError};
pub use types::{Month, month_name};

use crate::prelude::*;
use chrono::NaiveDate;
use std::str::FromStr;

/// A date in the Bikram Sambat calendar.
///
/// This is a plain value: construction does not consult the month-length table, so a
/// `BsDate` may name a day that does not exist. [`Converter::validate`] and every conversion
/// check it against the table before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct BsDate {
    year:  u16,
    month: u8,
    day:   u8,
}

/// Broad class of a [`DateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The date does not exist: bad month, bad day or unparseable text.
    InvalidDate,
    /// The date exists but lies outside the span of the month-length table.
    OutOfRange,
}

/// Error type for date construction, parsing and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Month is not in `1..=12`.
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    /// Day does not exist in the given month.
    #[error("Invalid day {day} for month {year}-{month:02} (must be 1-{max})")]
    InvalidDay { year: u16, month: u8, day: u8, max: u8 },

    /// Text could not be parsed as a date.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    /// Input string was empty.
    #[error("Empty date string")]
    EmptyInput,

    /// B.S. year is not covered by the month-length table.
    #[error("Year {year} is outside the supported range {min}-{max}")]
    YearOutOfRange { year: u16, min: u16, max: u16 },

    /// Gregorian date falls before or after the month-length table.
    #[error("Gregorian date {0} is outside the supported range")]
    GregorianOutOfRange(NaiveDate),

    /// Day offset from the epoch falls outside the month-length table.
    #[error("Day offset {0} is outside the supported range")]
    DayOffsetOutOfRange(i64),
}

impl DateError {
    /// Classifies the error as an invalid date or an out-of-range one
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMonth(_) | Self::InvalidDay { .. } | Self::InvalidFormat(_) | Self::EmptyInput => {
                ErrorKind::InvalidDate
            }
            Self::YearOutOfRange { .. } | Self::GregorianOutOfRange(_) | Self::DayOffsetOutOfRange(_) => {
                ErrorKind::OutOfRange
            }
        }
    }

    /// Whether the date does not exist or could not be parsed
    pub const fn is_invalid_date(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidDate)
    }

    /// Whether the date lies outside the month-length table
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange)
    }
}

impl BsDate {
    /// Creates a date from its components without checking them against the table
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month component (1 for Baishakh)
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day component
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the Month type
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the month component is not in `1..=MAX_MONTH`.
    pub fn month_typed(&self) -> Result<Month, DateError> {
        Month::new(self.month)
    }

    /// The first day of this date's month
    pub const fn first_of_month(&self) -> Self {
        Self::new(self.year, self.month, MIN_DAY)
    }

    /// Converts to database columns: (year, month, day)
    pub const fn to_columns(self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }
}

impl From<(u16, u8, u8)> for BsDate {
    fn from((year, month, day): (u16, u8, u8)) -> Self {
        Self::new(year, month, day)
    }
}

impl FromStr for BsDate {
    type Err = DateError;

    /// Parses `YYYY-MM-DD` or the dotted `YYYY.MM.DD` form.
    ///
    /// Only the shape and the month are checked here; whether the day exists in that month
    /// depends on the month-length table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_dot = trimmed.contains(DOTTED_SEPARATOR);

        let separator = match (has_hyphen, has_dot) {
            (true, true) => {
                return Err(DateError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {DOTTED_SEPARATOR})"
                )));
            }
            (true, false) => DATE_SEPARATOR,
            (false, true) => DOTTED_SEPARATOR,
            (false, false) => {
                return Err(DateError::InvalidFormat(format!(
                    "No date separator found (expected '{DATE_SEPARATOR}' or '{DOTTED_SEPARATOR}'): {trimmed}"
                )));
            }
        };

        let parts: Vec<&str> = trimmed.split(separator).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(format!(
                "Expected year, month and day separated by '{separator}', found {} parts",
                parts.len()
            )));
        };

        let year = Self::parse_u16(year)?;
        let month = Month::new(Self::parse_u8(month)?)?.get();
        let day = Self::parse_u8(day)?;
        if !(MIN_DAY..=MAX_MONTH_DAYS).contains(&day) {
            return Err(DateError::InvalidDay {
                year,
                month,
                day,
                max: MAX_MONTH_DAYS,
            });
        }

        Ok(Self::new(year, month, day))
    }
}

impl BsDate {
    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, DateError> {
        s.parse::<u16>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, DateError> {
        s.parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl serde::Serialize for BsDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for BsDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ad, bs};

    #[test]
    fn test_parse_iso_date() {
        let date = "2079-12-30".parse::<BsDate>().unwrap();
        assert_eq!(date, bs(2079, 12, 30));
        assert_eq!(date.year(), 2079);
        assert_eq!(date.month(), 12);
        assert_eq!(date.day(), 30);
    }

    #[test]
    fn test_parse_dotted_date() {
        // The transaction database concatenates its Nepali date columns with dots
        let date = "2080.4.1".parse::<BsDate>().unwrap();
        assert_eq!(date, bs(2080, 4, 1));
    }

    #[test]
    fn test_parse_with_whitespace() {
        let date = " 2080 - 04 - 32 ".parse::<BsDate>().unwrap();
        assert_eq!(date, bs(2080, 4, 32));
    }

    #[test]
    fn test_parse_errors() {
        struct TestCase {
            input:       &'static str,
            expected:    DateError,
            description: &'static str,
        }

        let cases = [
            TestCase {
                input:       "",
                expected:    DateError::EmptyInput,
                description: "empty input",
            },
            TestCase {
                input:       "   ",
                expected:    DateError::EmptyInput,
                description: "blank input",
            },
            TestCase {
                input:       "2080-13-01",
                expected:    DateError::InvalidMonth(13),
                description: "month too large",
            },
            TestCase {
                input:       "2080-00-01",
                expected:    DateError::InvalidMonth(0),
                description: "month zero",
            },
            TestCase {
                input:       "2080-04-00",
                expected:    DateError::InvalidDay {
                    year:  2080,
                    month: 4,
                    day:   0,
                    max:   32,
                },
                description: "day zero",
            },
            TestCase {
                input:       "2080-04-33",
                expected:    DateError::InvalidDay {
                    year:  2080,
                    month: 4,
                    day:   33,
                    max:   32,
                },
                description: "day longer than any month",
            },
            TestCase {
                input:       "2080-x-01",
                expected:    DateError::InvalidFormat("x".to_owned()),
                description: "non-numeric month",
            },
        ];

        for case in &cases {
            let result = case.input.parse::<BsDate>();
            assert_eq!(result, Err(case.expected.clone()), "{}", case.description);
        }
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for input in ["2080", "2080-04", "2080-04-01-02", "2080-04.01", "2080/04/01"] {
            let result = input.parse::<BsDate>();
            assert!(
                matches!(result, Err(DateError::InvalidFormat(_))),
                "{input} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(bs(2079, 12, 30).to_string(), "2079-12-30");
        assert_eq!(bs(2080, 4, 1).to_string(), "2080-04-01");
    }

    #[test]
    fn test_display_parse_agree() {
        let date = bs(2081, 3, 32);
        assert_eq!(date.to_string().parse::<BsDate>().unwrap(), date);
    }

    #[test]
    fn test_ordering() {
        assert!(bs(2079, 12, 30) < bs(2080, 1, 1));
        assert!(bs(2080, 4, 32) < bs(2080, 5, 1));
        assert!(bs(2080, 5, 1) < bs(2080, 5, 2));
    }

    #[test]
    fn test_first_of_month() {
        assert_eq!(bs(2080, 5, 10).first_of_month(), bs(2080, 5, 1));
    }

    #[test]
    fn test_columns() {
        let date = bs(2080, 5, 10);
        assert_eq!(date.to_columns(), (2080, 5, 10));
        assert_eq!(BsDate::from((2080, 5, 10)), date);
    }

    #[test]
    fn test_month_typed() {
        assert_eq!(bs(2080, 4, 1).month_typed(), Ok(Month::Shrawan));
        assert_eq!(bs(2080, 13, 1).month_typed(), Err(DateError::InvalidMonth(13)));
    }

    #[test]
    fn test_serde() {
        let date = bs(2080, 4, 1);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2080-04-01\"");

        let parsed: BsDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let result: Result<BsDate, _> = serde_json::from_str("\"2080-13-01\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_kinds() {
        let invalid = [
            DateError::InvalidMonth(13),
            DateError::InvalidDay {
                year:  2080,
                month: 4,
                day:   33,
                max:   32,
            },
            DateError::InvalidFormat("x".to_owned()),
            DateError::EmptyInput,
        ];
        for error in &invalid {
            assert_eq!(error.kind(), ErrorKind::InvalidDate, "{error}");
            assert!(error.is_invalid_date());
            assert!(!error.is_out_of_range());
        }

        let out_of_range = [
            DateError::YearOutOfRange {
                year: 1800,
                min:  2000,
                max:  2090,
            },
            DateError::GregorianOutOfRange(ad(1900, 1, 1)),
            DateError::DayOffsetOutOfRange(-1),
        ];
        for error in &out_of_range {
            assert_eq!(error.kind(), ErrorKind::OutOfRange, "{error}");
            assert!(error.is_out_of_range());
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DateError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            DateError::InvalidDay {
                year:  2080,
                month: 4,
                day:   33,
                max:   32
            }
            .to_string(),
            "Invalid day 33 for month 2080-04 (must be 1-32)"
        );
        assert_eq!(
            DateError::YearOutOfRange {
                year: 1800,
                min:  2000,
                max:  2090
            }
            .to_string(),
            "Year 1800 is outside the supported range 2000-2090"
        );
    }
}
