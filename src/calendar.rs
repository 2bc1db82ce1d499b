//! Conversion between Bikram Sambat and Gregorian dates.
//!
//! Every conversion goes through the day offset from the table's epoch: a B.S. date is
//! turned into an offset by summing month lengths, and the offset is added to the Gregorian
//! epoch date (or the other way round). Month lengths always come from the table.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

use crate::consts::{MIN_DAY, REPORTING_TIMEZONE};
use crate::table::MonthLengthTable;
use crate::{BsDate, DateError, month_name};

/// Converts dates using a borrowed [`MonthLengthTable`].
///
/// `Converter` is a cheap `Copy` handle; share the table once and hand out converters freely.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'t> {
    table: &'t MonthLengthTable,
}

impl Converter<'static> {
    /// A converter over the built-in table
    pub fn builtin() -> Self {
        Self::new(MonthLengthTable::builtin())
    }
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'t> Converter<'t> {
    /// A converter over `table`
    pub const fn new(table: &'t MonthLengthTable) -> Self {
        Self { table }
    }

    /// The table this converter reads month lengths from
    pub const fn table(self) -> &'t MonthLengthTable {
        self.table
    }

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` or `DateError::YearOutOfRange`.
    pub fn days_in_month(self, year: u16, month: u8) -> Result<u8, DateError> {
        self.table.days_in_month(year, month)
    }

    /// Checks that `date` names a day that exists in the table.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` or `DateError::InvalidDay` for a date that does not
    /// exist, and `DateError::YearOutOfRange` if the table does not cover its year.
    pub fn validate(self, date: BsDate) -> Result<BsDate, DateError> {
        let max = self.days_in_month(date.year(), date.month())?;
        if !(MIN_DAY..=max).contains(&date.day()) {
            return Err(DateError::InvalidDay {
                year: date.year(),
                month: date.month(),
                day: date.day(),
                max,
            });
        }
        Ok(date)
    }

    /// The last day of `month` in `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` or `DateError::YearOutOfRange`.
    pub fn last_day_of_month(self, year: u16, month: u8) -> Result<BsDate, DateError> {
        let days = self.days_in_month(year, month)?;
        Ok(BsDate::new(year, month, days))
    }

    /// Days elapsed between the table's epoch and `date`.
    ///
    /// # Errors
    /// Fails like [`validate`](Self::validate).
    pub fn ordinal(self, date: BsDate) -> Result<i64, DateError> {
        let date = self.validate(date)?;
        let lengths = self.table.month_lengths(date.year())?;
        let elapsed_months: i64 = lengths[..usize::from(date.month() - 1)]
            .iter()
            .map(|&days| i64::from(days))
            .sum();
        Ok(self.table.year_start(date.year())? + elapsed_months + i64::from(date.day() - MIN_DAY))
    }

    /// The B.S. date `ordinal` days after the table's epoch.
    ///
    /// # Errors
    /// Returns `DateError::DayOffsetOutOfRange` if the offset falls outside the table.
    pub fn date_at(self, ordinal: i64) -> Result<BsDate, DateError> {
        let out_of_range = DateError::DayOffsetOutOfRange(ordinal);
        let (year, mut remaining) = self.table.locate(ordinal).ok_or_else(|| out_of_range.clone())?;

        for (month, &days) in (1..).zip(self.table.month_lengths(year)?) {
            let days = i64::from(days);
            if remaining < days {
                let day = u8::try_from(remaining).map_err(|_| out_of_range.clone())? + MIN_DAY;
                return Ok(BsDate::new(year, month, day));
            }
            remaining -= days;
        }

        // locate() only returns offsets inside the year
        Err(out_of_range)
    }

    /// Converts a B.S. date to its Gregorian equivalent.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth`/`InvalidDay` if the date does not exist and
    /// `DateError::YearOutOfRange` if its year is outside the table.
    pub fn to_gregorian(self, date: BsDate) -> Result<NaiveDate, DateError> {
        let ordinal = self.ordinal(date)?;
        u64::try_from(ordinal)
            .ok()
            .and_then(|days| self.table.epoch().checked_add_days(Days::new(days)))
            .ok_or(DateError::DayOffsetOutOfRange(ordinal))
    }

    /// Converts a Gregorian date to its B.S. equivalent.
    ///
    /// # Errors
    /// Returns `DateError::GregorianOutOfRange` if the date falls outside the table.
    pub fn to_bikram_sambat(self, date: NaiveDate) -> Result<BsDate, DateError> {
        let ordinal = date.signed_duration_since(self.table.epoch()).num_days();
        if !self.table.contains_offset(ordinal) {
            return Err(DateError::GregorianOutOfRange(date));
        }
        self.date_at(ordinal)
    }

    /// The B.S. date `days` days after `date` (before it, for negative `days`).
    ///
    /// # Errors
    /// Fails like [`validate`](Self::validate) for the input and returns
    /// `DateError::DayOffsetOutOfRange` if the result leaves the table.
    pub fn add_days(self, date: BsDate, days: i64) -> Result<BsDate, DateError> {
        let ordinal = self.ordinal(date)?;
        let target = ordinal
            .checked_add(days)
            .ok_or(DateError::DayOffsetOutOfRange(ordinal))?;
        self.date_at(target)
    }

    /// The B.S. date `days` days before `date`.
    ///
    /// Crosses month and year boundaries using the table's month lengths, so the day before
    /// 1 Baishakh is the last day of the previous year's Chaitra, whatever its length.
    ///
    /// # Errors
    /// Fails like [`add_days`](Self::add_days).
    pub fn subtract_days(self, date: BsDate, days: i64) -> Result<BsDate, DateError> {
        let ordinal = self.ordinal(date)?;
        let target = ordinal
            .checked_sub(days)
            .ok_or(DateError::DayOffsetOutOfRange(ordinal))?;
        self.date_at(target)
    }

    /// Romanized name of a month number.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if `month` is not in `1..=12`.
    pub fn month_name(self, month: u8) -> Result<&'static str, DateError> {
        month_name(month)
    }

    /// Today's B.S. date on the system clock.
    ///
    /// # Errors
    /// Returns `DateError::GregorianOutOfRange` once the clock runs past the table.
    pub fn today(self) -> Result<BsDate, DateError> {
        self.today_in(Utc::now())
    }

    /// The B.S. date at instant `now`, taken in Nepal time whatever zone `now` carries.
    ///
    /// # Errors
    /// Returns `DateError::GregorianOutOfRange` if that date falls outside the table.
    pub fn today_in<Tz: TimeZone>(self, now: DateTime<Tz>) -> Result<BsDate, DateError> {
        let local = now.with_timezone(&REPORTING_TIMEZONE).date_naive();
        tracing::trace!(%local, "resolved today's date");
        self.to_bikram_sambat(local)
    }
}
