//! The B.S. month-length table.
//!
//! Bikram Sambat month lengths are fixed by published almanacs rather than by a rule, so the
//! calendar is only defined for the years a table covers. A table starts on 1 Baishakh of its
//! first year, which is pinned to a Gregorian date (the epoch pair); every other date is an
//! offset in days from that point.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_MONTH_DAYS, MAX_YEAR_DAYS, MIN_MONTH_DAYS, MIN_YEAR_DAYS, MONTHS_PER_YEAR,
};
use crate::{DateError, Month};

/// First B.S. year covered by the built-in table.
///
/// Dates before this year need a loaded table; see [`MonthLengthTable::new`].
pub const FIRST_SUPPORTED_YEAR: u16 = 2000;
/// Last B.S. year covered by the built-in table (inclusive)
pub const LAST_SUPPORTED_YEAR: u16 = 2090;

/// Gregorian date of 1 Baishakh [`FIRST_SUPPORTED_YEAR`]
pub const EPOCH_AD: NaiveDate = match NaiveDate::from_ymd_opt(1943, 4, 14) {
    Some(date) => date,
    None => panic!("epoch is not a valid Gregorian date"),
};

/// Days in each month, Baishakh first, for every year from [`FIRST_SUPPORTED_YEAR`].
const BUILTIN_MONTH_DAYS: [[u8; MONTHS_PER_YEAR]; 91] = [
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2000
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2001
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2002
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2003
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2004
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2005
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2006
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2007
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2008
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2009
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2010
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2011
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2012
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2013
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2014
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2015
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2016
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2017
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2018
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2019
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2020
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2021
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2022
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2023
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2024
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2025
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2026
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2027
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2028
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 2029
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2030
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2031
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2032
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2033
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2034
    [30, 32, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2035
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2036
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2037
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2038
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2039
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2040
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2041
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2042
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2043
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2044
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2045
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2046
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2047
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2048
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2049
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2050
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2051
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2052
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2053
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2054
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2055
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 2056
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2057
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2058
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2059
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2060
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2061
    [30, 32, 31, 32, 31, 31, 29, 30, 29, 30, 29, 31], // 2062
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2063
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2064
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2065
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2066
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2067
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2068
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2069
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2070
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2071
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2072
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2073
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2074
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2075
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2076
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2077
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2078
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2079
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2080
    [31, 31, 32, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2081
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2082
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2083
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2084
    [31, 32, 31, 32, 30, 31, 30, 30, 29, 30, 30, 30], // 2085
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2086
    [31, 31, 32, 31, 31, 31, 30, 30, 29, 30, 30, 30], // 2087
    [30, 31, 32, 32, 30, 31, 30, 30, 29, 30, 30, 30], // 2088
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2089
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2090
];

static BUILTIN: LazyLock<MonthLengthTable> = LazyLock::new(|| {
    MonthLengthTable::from_trusted(FIRST_SUPPORTED_YEAR, EPOCH_AD, BUILTIN_MONTH_DAYS.to_vec())
});

/// Error type for month-length table data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The table has no years.
    #[error("Month-length table is empty")]
    Empty,

    /// The table runs past the largest representable year.
    #[error("Month-length table starting at {first_year} with {years} years overflows the year range")]
    TooManyYears { first_year: u16, years: usize },

    /// A month is shorter or longer than any B.S. month can be.
    #[error("Invalid length {days} for month {month} of {year} (must be {min}-{max})", min = MIN_MONTH_DAYS, max = MAX_MONTH_DAYS)]
    InvalidMonthLength { year: u16, month: u8, days: u8 },

    /// A year does not add up to a solar year.
    #[error("Year {year} has {days} days (must be {min} or {max})", min = MIN_YEAR_DAYS, max = MAX_YEAR_DAYS)]
    InvalidYearLength { year: u16, days: u16 },
}

/// Days-per-month lookup for a contiguous span of B.S. years, anchored to a Gregorian epoch.
///
/// The table is immutable once built. The built-in one is shared process-wide through
/// [`MonthLengthTable::builtin`]; a replacement can be loaded with serde and handed to a
/// [`Converter`](crate::Converter) by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableData", into = "TableData")]
pub struct MonthLengthTable {
    first_year:  u16,
    epoch:       NaiveDate,
    months:      Vec<[u8; MONTHS_PER_YEAR]>,
    /// Day offset of 1 Baishakh of each year, plus one trailing entry for the end of the table.
    year_starts: Vec<i64>,
}

/// Serialized form of a [`MonthLengthTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableData {
    first_year: u16,
    epoch:      NaiveDate,
    months:     Vec<[u8; MONTHS_PER_YEAR]>,
}

impl MonthLengthTable {
    /// Builds a table from raw month lengths, validating every entry.
    ///
    /// `epoch` is the Gregorian date of 1 Baishakh `first_year`.
    ///
    /// # Errors
    /// Returns a `TableError` if the table is empty, runs past `u16::MAX`, or contains a month
    /// or year length no B.S. year can have.
    pub fn new(
        first_year: u16,
        epoch: NaiveDate,
        months: Vec<[u8; MONTHS_PER_YEAR]>,
    ) -> Result<Self, TableError> {
        if months.is_empty() {
            return Err(TableError::Empty);
        }
        let too_many = TableError::TooManyYears {
            first_year,
            years: months.len(),
        };
        let last_offset = u16::try_from(months.len() - 1).map_err(|_| too_many.clone())?;
        first_year.checked_add(last_offset).ok_or(too_many)?;

        for (year, lengths) in (first_year..).zip(&months) {
            for (month, &days) in (1..).zip(lengths) {
                if !(MIN_MONTH_DAYS..=MAX_MONTH_DAYS).contains(&days) {
                    return Err(TableError::InvalidMonthLength { year, month, days });
                }
            }
            let days = year_length(lengths);
            if !(MIN_YEAR_DAYS..=MAX_YEAR_DAYS).contains(&days) {
                return Err(TableError::InvalidYearLength { year, days });
            }
        }

        tracing::debug!(first_year, years = months.len(), %epoch, "loaded month-length table");
        Ok(Self::from_trusted(first_year, epoch, months))
    }

    /// Builds a table without validation. Callers guarantee the data is well formed.
    fn from_trusted(first_year: u16, epoch: NaiveDate, months: Vec<[u8; MONTHS_PER_YEAR]>) -> Self {
        let year_starts = std::iter::once(0)
            .chain(months.iter().scan(0_i64, |start, lengths| {
                *start += i64::from(year_length(lengths));
                Some(*start)
            }))
            .collect();
        Self {
            first_year,
            epoch,
            months,
            year_starts,
        }
    }

    /// The built-in table covering [`FIRST_SUPPORTED_YEAR`] to [`LAST_SUPPORTED_YEAR`].
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// First B.S. year in the table
    pub const fn first_year(&self) -> u16 {
        self.first_year
    }

    /// Last B.S. year in the table (inclusive)
    pub fn last_year(&self) -> u16 {
        // Length was bounded against u16::MAX when the table was built.
        self.first_year + u16::try_from(self.months.len() - 1).unwrap_or_default()
    }

    /// Supported B.S. years
    pub fn years(&self) -> RangeInclusive<u16> {
        self.first_year..=self.last_year()
    }

    /// Gregorian date of 1 Baishakh of [`first_year`](Self::first_year)
    pub const fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Total number of days covered by the table
    pub fn total_days(&self) -> i64 {
        self.year_starts.last().copied().unwrap_or_default()
    }

    /// Month lengths of `year`, Baishakh first.
    ///
    /// # Errors
    /// Returns `DateError::YearOutOfRange` if the table does not cover `year`.
    pub fn month_lengths(&self, year: u16) -> Result<&[u8; MONTHS_PER_YEAR], DateError> {
        year.checked_sub(self.first_year)
            .and_then(|index| self.months.get(usize::from(index)))
            .ok_or_else(|| self.year_out_of_range(year))
    }

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if `month` is not in `1..=12`, or
    /// `DateError::YearOutOfRange` if the table does not cover `year`.
    pub fn days_in_month(&self, year: u16, month: u8) -> Result<u8, DateError> {
        let month = Month::new(month)?;
        let lengths = self.month_lengths(year)?;
        Ok(lengths[usize::from(month.get() - 1)])
    }

    /// Number of days in `year`.
    ///
    /// # Errors
    /// Returns `DateError::YearOutOfRange` if the table does not cover `year`.
    pub fn days_in_year(&self, year: u16) -> Result<u16, DateError> {
        self.month_lengths(year).map(year_length)
    }

    /// Day offset of 1 Baishakh `year` from the epoch.
    ///
    /// # Errors
    /// Returns `DateError::YearOutOfRange` if the table does not cover `year`.
    pub fn year_start(&self, year: u16) -> Result<i64, DateError> {
        year.checked_sub(self.first_year)
            .filter(|&index| usize::from(index) < self.months.len())
            .and_then(|index| self.year_starts.get(usize::from(index)))
            .copied()
            .ok_or_else(|| self.year_out_of_range(year))
    }

    /// Whether a day offset from the epoch falls inside the table
    pub fn contains_offset(&self, offset: i64) -> bool {
        (0..self.total_days()).contains(&offset)
    }

    /// Finds the year containing a day offset, returning it with the offset into that year.
    pub fn locate(&self, offset: i64) -> Option<(u16, i64)> {
        if !self.contains_offset(offset) {
            return None;
        }
        let index = self.year_starts.partition_point(|&start| start <= offset) - 1;
        let year = self.first_year + u16::try_from(index).ok()?;
        Some((year, offset - self.year_starts[index]))
    }

    fn year_out_of_range(&self, year: u16) -> DateError {
        DateError::YearOutOfRange {
            year,
            min: self.first_year,
            max: self.last_year(),
        }
    }
}

impl TryFrom<TableData> for MonthLengthTable {
    type Error = TableError;

    fn try_from(data: TableData) -> Result<Self, Self::Error> {
        Self::new(data.first_year, data.epoch, data.months)
    }
}

impl From<MonthLengthTable> for TableData {
    fn from(table: MonthLengthTable) -> Self {
        Self {
            first_year: table.first_year,
            epoch:      table.epoch,
            months:     table.months,
        }
    }
}

fn year_length(lengths: &[u8; MONTHS_PER_YEAR]) -> u16 {
    lengths.iter().map(|&days| u16::from(days)).sum()
}
