use crate::consts::{MONTH_NAMES, NEPALI_MONTH_NAMES};
use crate::DateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Bikram Sambat month, numbered `1..=MAX_MONTH` starting from Baishakh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Month {
    Baishakh = 1,
    Jestha = 2,
    Asar = 3,
    Shrawan = 4,
    Bhadau = 5,
    Asoj = 6,
    Kartik = 7,
    Mangsir = 8,
    Poush = 9,
    Magh = 10,
    Falgun = 11,
    Chaitra = 12,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Self; 12] = [
        Self::Baishakh,
        Self::Jestha,
        Self::Asar,
        Self::Shrawan,
        Self::Bhadau,
        Self::Asoj,
        Self::Kartik,
        Self::Mangsir,
        Self::Poush,
        Self::Magh,
        Self::Falgun,
        Self::Chaitra,
    ];

    /// Creates a Month from its number, validating that it's in `1..=MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        value
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(usize::from(index)))
            .copied()
            .ok_or(DateError::InvalidMonth(value))
    }

    /// Returns the month number (1 for Baishakh)
    #[inline]
    pub const fn get(self) -> u8 {
        self as u8
    }

    /// Romanized name, as printed on report headers and output folders
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self as usize]
    }

    /// Name in Devanagari script
    pub const fn nepali_name(self) -> &'static str {
        NEPALI_MONTH_NAMES[self as usize]
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up the romanized name of a month number.
///
/// # Errors
/// Returns `DateError::InvalidMonth` if `month` is not in `1..=MAX_MONTH`.
pub fn month_name(month: u8) -> Result<&'static str, DateError> {
    Month::new(month).map(Month::name)
}
