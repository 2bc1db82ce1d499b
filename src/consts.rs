/// Maximum valid month (Chaitra)
pub const MAX_MONTH: u8 = 12;

/// Number of months in every B.S. year
pub const MONTHS_PER_YEAR: usize = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for Asar, the last month of the fiscal year
pub const ASAR: u8 = 3;
/// Month number for Shrawan, the first month of the fiscal year
pub const SHRAWAN: u8 = 4;

/// Shortest month length found in any B.S. year
pub const MIN_MONTH_DAYS: u8 = 29;
/// Longest month length found in any B.S. year
pub const MAX_MONTH_DAYS: u8 = 32;

/// Length of a common B.S. year in days
pub const MIN_YEAR_DAYS: u16 = 365;
/// Length of a long B.S. year in days
pub const MAX_YEAR_DAYS: u16 = 366;

/// Romanized month names (index 0 is unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 13] = [
    "", // index 0 unused (months are 1-indexed)
    "Baishakh", "Jestha", "Asar", "Shrawan", "Bhadau", "Asoj", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// Devanagari month names (index 0 is unused, months are 1-indexed)
pub const NEPALI_MONTH_NAMES: [&str; 13] = [
    "", "बैशाख", "जेठ", "असार", "साउन", "भदौ", "असोज", "कात्तिक", "मंसिर", "पुस", "माघ", "फागुन", "चैत",
];

/// Date component separator (ISO 8601 style)
pub const DATE_SEPARATOR: char = '-';
/// Date component separator used by the transaction database's Nepali date column
pub const DOTTED_SEPARATOR: char = '.';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
/// Separator between the two years of a fiscal year label, e.g. `2079/80`
pub const FISCAL_YEAR_SEPARATOR: char = '/';
/// Filesystem-safe replacement for [`FISCAL_YEAR_SEPARATOR`]
pub const FISCAL_YEAR_PATH_SEPARATOR: char = '-';

/// Time zone in which "today" is resolved
pub const REPORTING_TIMEZONE: chrono_tz::Tz = chrono_tz::Asia::Kathmandu;
