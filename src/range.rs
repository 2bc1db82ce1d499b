use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::RANGE_SEPARATOR;

/// An inclusive range between two dates of the same calendar.
///
/// Used for both [`BsDate`](crate::BsDate) and Gregorian [`NaiveDate`](chrono::NaiveDate)
/// bounds. The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateRange<D> {
    start: D,
    end:   D,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: String, end: String },

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl<D: Ord + fmt::Display> DateRange<D> {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: D, end: D) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange {
                start: start.to_string(),
                end:   end.to_string(),
            });
        }
        Ok(Self { start, end })
    }
}

impl<D: Ord> DateRange<D> {
    /// Builds a range whose bounds are already known to be ordered.
    pub(crate) fn from_ordered(start: D, end: D) -> Self {
        debug_assert!(start <= end, "range bounds out of order");
        Self { start, end }
    }
}

impl<D: Copy> DateRange<D> {
    /// Returns the start date of the range
    pub const fn start(&self) -> D {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> D {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (D, D) {
        (self.start, self.end)
    }
}

impl<D: fmt::Display> fmt::Display for DateRange<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}{}", self.start, self.end)
    }
}

impl<D> FromStr for DateRange<D>
where
    D: FromStr + Ord + fmt::Display,
    D::Err: fmt::Display,
{
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                let parse = |part: &str| {
                    part.trim()
                        .parse::<D>()
                        .map_err(|e| RangeError::InvalidFormat(format!("{}: {e}", part.trim())))
                };

                Self::new(parse(start_str)?, parse(end_str)?)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl<D: fmt::Display> Serialize for DateRange<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de, D> Deserialize<'de> for DateRange<D>
where
    D: FromStr + Ord + fmt::Display,
    D::Err: fmt::Display,
{
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BsDate;
    use crate::test_utils::{ad, bs};
    use chrono::NaiveDate;

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          BsDate,
            end:            BsDate,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          bs(2080, 4, 1),
                end:            bs(2080, 4, 32),
                should_succeed: true,
                description:    "valid range (start < end)",
            },
            TestCase {
                start:          bs(2080, 5, 1),
                end:            bs(2080, 4, 32),
                should_succeed: false,
                description:    "invalid range (start > end)",
            },
            TestCase {
                start:          bs(2080, 4, 1),
                end:            bs(2080, 4, 1),
                should_succeed: true,
                description:    "equal dates (start == end)",
            },
        ];

        for case in &cases {
            let range = DateRange::new(case.start, case.end);

            if case.should_succeed {
                assert!(range.is_ok(), "Expected success for: {}", case.description);
            } else {
                assert!(range.is_err(), "Expected failure for: {}", case.description);
            }
        }
    }

    #[test]
    fn test_invalid_range_message() {
        let result = DateRange::new(bs(2080, 5, 1), bs(2080, 4, 32));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid date range: start (2080-05-01) is after end (2080-04-32)"
        );
    }

    #[test]
    fn test_accessors() {
        let start = ad(2023, 7, 17);
        let end = ad(2023, 8, 17);
        let range = DateRange::new(start, end).expect("failed to construct range for accessor test");

        assert_eq!(range.start(), start);
        assert_eq!(range.end(), end);
        assert_eq!(range.dates(), (start, end));
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(bs(2079, 12, 1), bs(2079, 12, 30)).unwrap();
        assert_eq!(range.to_string(), "2079-12-01/2079-12-30");

        let range = DateRange::new(ad(2023, 3, 15), ad(2023, 4, 13)).unwrap();
        assert_eq!(range.to_string(), "2023-03-15/2023-04-13");
    }

    #[test]
    fn test_from_str() {
        let range: DateRange<BsDate> = "2079-12-01/2079-12-30".parse().unwrap();
        assert_eq!(range.dates(), (bs(2079, 12, 1), bs(2079, 12, 30)));

        let range: DateRange<NaiveDate> = " 2023-03-15 / 2023-04-13 ".parse().unwrap();
        assert_eq!(range.dates(), (ad(2023, 3, 15), ad(2023, 4, 13)));
    }

    #[test]
    fn test_from_str_invalid_order() {
        let result = "2079-12-30/2079-12-01".parse::<DateRange<BsDate>>();
        assert!(matches!(result, Err(RangeError::InvalidRange { .. })));
    }

    #[test]
    fn test_from_str_separator_errors() {
        let result = "2079-12-01".parse::<DateRange<BsDate>>();
        assert!(matches!(result, Err(RangeError::InvalidFormat(_))));

        let result = "2079-12-01/2079-12-15/2079-12-30".parse::<DateRange<BsDate>>();
        assert!(matches!(result, Err(RangeError::InvalidFormat(_))));
    }

    #[test]
    fn test_from_str_bad_date() {
        let result = "2079-13-01/2079-12-30".parse::<DateRange<BsDate>>();
        let Err(RangeError::InvalidFormat(message)) = result else {
            panic!("expected a format error, got {result:?}");
        };
        assert!(message.contains("Invalid month: 13"), "{message}");
    }

    #[test]
    fn test_ordering() {
        let earlier = DateRange::new(bs(2080, 3, 1), bs(2080, 3, 31)).unwrap();
        let later = DateRange::new(bs(2080, 4, 1), bs(2080, 4, 32)).unwrap();
        let longer = DateRange::new(bs(2080, 4, 1), bs(2080, 5, 31)).unwrap();
        assert!(earlier < later);
        assert!(later < longer);
    }

    #[test]
    fn test_serde_string_format() {
        let range = DateRange::new(bs(2080, 4, 1), bs(2080, 4, 32)).unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "\"2080-04-01/2080-04-32\"");

        let parsed: DateRange<BsDate> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, range);

        let result: Result<DateRange<NaiveDate>, _> = serde_json::from_str("\"2023-08-17/2023-07-17\"");
        assert!(result.is_err());
    }
}
