//! Reporting periods: the B.S. month a VAT report covers, with its Gregorian query bounds.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::consts::{ASAR, FISCAL_YEAR_PATH_SEPARATOR, FISCAL_YEAR_SEPARATOR, MIN_DAY, SHRAWAN};
use crate::prelude::*;
use crate::{BsDate, Converter, DateError, DateRange, Month};

/// A single B.S. month used as a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FiscalPeriod {
    bs_year:    u16,
    bs_month:   Month,
    bs_range:   DateRange<BsDate>,
    ad_range:   DateRange<NaiveDate>,
    month_name: &'static str,
}

impl FiscalPeriod {
    /// B.S. year of the reported month
    pub const fn bs_year(&self) -> u16 {
        self.bs_year
    }

    /// The reported month
    pub const fn bs_month(&self) -> Month {
        self.bs_month
    }

    /// First and last day of the month in B.S., for labelling reports
    pub const fn bs_range(&self) -> DateRange<BsDate> {
        self.bs_range
    }

    /// Inclusive Gregorian bounds, for querying transactions
    pub const fn ad_range(&self) -> DateRange<NaiveDate> {
        self.ad_range
    }

    /// Romanized name of the reported month
    pub const fn month_name(&self) -> &'static str {
        self.month_name
    }

    /// The fiscal year this month is reported under
    pub const fn fiscal_year(&self) -> FiscalYear {
        FiscalYear::containing(self.bs_range.start())
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({})",
            self.bs_range.start(),
            self.bs_range.end(),
            self.month_name
        )
    }
}

/// A Nepali fiscal year, running from 1 Shrawan to the end of Asar of the next B.S. year.
///
/// Displayed the way tax returns label it, e.g. `2079/80`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}{}{:02}", start_year, FISCAL_YEAR_SEPARATOR, "self.end_year() % 100")]
#[serde(transparent)]
pub struct FiscalYear {
    start_year: u16,
}

impl FiscalYear {
    /// The fiscal year beginning in Shrawan of `start_year`
    pub const fn new(start_year: u16) -> Self {
        Self { start_year }
    }

    /// The fiscal year a B.S. date falls in
    pub const fn containing(date: BsDate) -> Self {
        if date.month() >= SHRAWAN {
            Self::new(date.year())
        } else {
            Self::new(date.year().saturating_sub(1))
        }
    }

    /// B.S. year in which the fiscal year starts
    pub const fn start_year(&self) -> u16 {
        self.start_year
    }

    /// B.S. year in which the fiscal year ends
    pub const fn end_year(&self) -> u16 {
        self.start_year.saturating_add(1)
    }

    /// 1 Shrawan of the start year
    pub const fn first_day(&self) -> BsDate {
        BsDate::new(self.start_year, SHRAWAN, MIN_DAY)
    }

    /// Label safe for use as a directory name, e.g. `2079-80`
    pub fn path_label(&self) -> String {
        self.to_string()
            .replace(FISCAL_YEAR_SEPARATOR, &FISCAL_YEAR_PATH_SEPARATOR.to_string())
    }
}

/// Derives reporting periods from "today" using a [`Converter`].
#[derive(Debug, Clone, Copy)]
pub struct PeriodResolver<'t> {
    converter: Converter<'t>,
}

impl PeriodResolver<'static> {
    /// A resolver over the built-in table
    pub fn builtin() -> Self {
        Self::new(Converter::builtin())
    }
}

impl Default for PeriodResolver<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'t> PeriodResolver<'t> {
    /// A resolver converting dates with `converter`
    pub const fn new(converter: Converter<'t>) -> Self {
        Self { converter }
    }

    /// The converter used for period bounds
    pub const fn converter(&self) -> Converter<'t> {
        self.converter
    }

    /// The most recently completed B.S. month relative to `today`.
    ///
    /// The period ends on the day before the first of `today`'s month, so a `today` in
    /// Baishakh yields Chaitra of the previous year.
    ///
    /// # Errors
    /// Propagates conversion errors unchanged: `InvalidMonth` or `InvalidDay` if `today` does
    /// not exist, and an out-of-range error if the period falls outside the table.
    pub fn last_completed_month(&self, today: BsDate) -> Result<FiscalPeriod, DateError> {
        let today = self.converter.validate(today)?;
        let end = self.converter.subtract_days(today.first_of_month(), 1)?;
        self.period_ending(end)
    }

    /// The period covering `month` of `year`, for backfilling an earlier report.
    ///
    /// # Errors
    /// Returns `InvalidMonth` or `YearOutOfRange`.
    pub fn month_period(&self, year: u16, month: u8) -> Result<FiscalPeriod, DateError> {
        let end = self.converter.last_day_of_month(year, month)?;
        self.period_ending(end)
    }

    /// The most recently completed month as of instant `now`, taken in Nepal time.
    ///
    /// # Errors
    /// Fails like [`last_completed_month`](Self::last_completed_month), or if `now` is
    /// outside the table.
    pub fn previous_month<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Result<FiscalPeriod, DateError> {
        let today = self.converter.today_in(now)?;
        self.last_completed_month(today)
    }

    /// B.S. and Gregorian bounds of a whole fiscal year.
    ///
    /// # Errors
    /// Returns `YearOutOfRange` unless the table covers both years of `fiscal_year`.
    pub fn fiscal_year_range(
        &self,
        fiscal_year: FiscalYear,
    ) -> Result<(DateRange<BsDate>, DateRange<NaiveDate>), DateError> {
        let start = self.converter.validate(fiscal_year.first_day())?;
        let end = self.converter.last_day_of_month(fiscal_year.end_year(), ASAR)?;
        let ad_range = DateRange::from_ordered(
            self.converter.to_gregorian(start)?,
            self.converter.to_gregorian(end)?,
        );
        Ok((DateRange::from_ordered(start, end), ad_range))
    }

    fn period_ending(&self, end: BsDate) -> Result<FiscalPeriod, DateError> {
        let start = end.first_of_month();
        let bs_range = DateRange::from_ordered(start, end);
        let ad_range = DateRange::from_ordered(
            self.converter.to_gregorian(start)?,
            self.converter.to_gregorian(end)?,
        );
        let bs_month = end.month_typed()?;

        tracing::debug!(%bs_range, %ad_range, month = bs_month.name(), "resolved reporting period");

        Ok(FiscalPeriod {
            bs_year: end.year(),
            bs_month,
            bs_range,
            ad_range,
            month_name: bs_month.name(),
        })
    }
}
