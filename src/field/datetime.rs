//! UTC date and time of day.
//!
//! Both are kept packed as decimal integers exactly as they appear on the
//! wire, and only split into components when read. No calendar or clock
//! correction is applied; use `in_range` to reject implausible values.

use crate::sans::term::{parse_decimal, parse_u32};

use super::{Commit, Staged};

/// Date, packed as `ddmmyy`.
#[derive(Debug, Default, Clone)]
pub struct Date(Staged<u32>);

impl Date {
    staged_status!();

    /// The packed `ddmmyy` value.
    pub fn value(&mut self) -> u32 {
        *self.0.value()
    }

    /// Four-digit year, assuming the 21st century.
    pub fn year(&mut self) -> u16 {
        (self.value() % 100) as u16 + 2000
    }

    /// Month, 1 to 12. Clears the updated flag.
    pub fn month(&mut self) -> u8 {
        (self.value() / 100 % 100) as u8
    }

    /// Day of the month, 1 to 31. Clears the updated flag.
    pub fn day(&mut self) -> u8 {
        (self.value() / 10_000 % 100) as u8
    }

    /// Whether the committed date has plausible components: a month of at
    /// most 12 and a day of at most 31. Zeroes, as sent by receivers without
    /// a date, pass.
    ///
    /// A date that was never committed is considered in range. This does not
    /// clear the updated flag.
    pub fn in_range(&self) -> bool {
        if !self.0.is_valid() {
            return true;
        }

        let date = *self.0.committed();
        let month = date / 100 % 100;
        let day = date / 10_000;

        month <= 12 && day <= 31
    }

    pub(crate) fn set(&mut self, term: &[u8]) {
        self.0.stage(parse_u32(term));
    }
}

impl Commit for Date {
    fn commit(&mut self, now: u32) {
        self.0.commit(now);
    }
}

/// Time of day, packed as `hhmmsscc` (centiseconds).
#[derive(Debug, Default, Clone)]
pub struct Time(Staged<u32>);

impl Time {
    staged_status!();

    /// The packed `hhmmsscc` value.
    pub fn value(&mut self) -> u32 {
        *self.0.value()
    }

    /// Hour, 0 to 23. Clears the updated flag.
    pub fn hour(&mut self) -> u8 {
        (self.value() / 1_000_000) as u8
    }

    /// Minute, 0 to 59. Clears the updated flag.
    pub fn minute(&mut self) -> u8 {
        (self.value() / 10_000 % 100) as u8
    }

    /// Second, 0 to 59. Clears the updated flag.
    pub fn second(&mut self) -> u8 {
        (self.value() / 100 % 100) as u8
    }

    /// Hundredths of a second. Clears the updated flag.
    pub fn centisecond(&mut self) -> u8 {
        (self.value() % 100) as u8
    }

    /// Whether the committed time has plausible components.
    ///
    /// A time that was never committed is considered in range. This does not
    /// clear the updated flag.
    pub fn in_range(&self) -> bool {
        if !self.0.is_valid() {
            return true;
        }

        let time = *self.0.committed();

        time / 1_000_000 <= 23 && time / 10_000 % 100 <= 59 && time / 100 % 100 <= 59
    }

    pub(crate) fn set(&mut self, term: &[u8]) {
        self.0.stage(parse_decimal(term) as u32);
    }
}

impl Commit for Time {
    fn commit(&mut self, now: u32) {
        self.0.commit(now);
    }
}
