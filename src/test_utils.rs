use chrono::NaiveDate;

use crate::BsDate;

pub fn bs(year: u16, month: u8, day: u8) -> BsDate {
    BsDate::new(year, month, day)
}

pub fn ad(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("test date should be a valid Gregorian date")
}
