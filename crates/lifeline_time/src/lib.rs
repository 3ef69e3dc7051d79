//! Civil calendar handling for the lifeline workspace.
//!
//! This crate provides:
//! - `CivilTime`, a validated Gregorian date and time of day
//! - Birthday string parsing (`YYYY-MM-DD[ HH:MM]`, default 12:00)
//! - Julian Date ↔ calendar conversions
//! - ΔT (TT − UT) for converting civil instants to dynamical time

pub mod civil;
pub mod delta_t;
pub mod error;
pub mod julian;

pub use civil::{CivilTime, DEFAULT_HOUR, DEFAULT_MINUTE};
pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, day_number, days_in_month,
    is_leap_year, jd_to_calendar, jd_to_centuries,
};

/// Offset of a fixed civil time zone from UT, in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcOffset {
    hours: f64,
}

impl UtcOffset {
    /// China Standard Time, the zone the traditional calendar is reckoned in.
    pub const CHINA_STANDARD: Self = Self { hours: 8.0 };

    /// Convert a local Julian Date to a UT Julian Date.
    pub fn local_to_ut(self, jd_local: f64) -> f64 {
        jd_local - self.hours / 24.0
    }

    /// Convert a local Julian Date to a TT Julian Date via ΔT.
    pub fn local_to_tt(self, jd_local: f64) -> f64 {
        let jd_ut = self.local_to_ut(jd_local);
        let (year, month, _) = jd_to_calendar(jd_ut);
        let decimal_year = year as f64 + (month as f64 - 0.5) / 12.0;
        jd_ut + delta_t_seconds(decimal_year) / SECONDS_PER_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn china_offset_is_eight_hours() {
        let jd = 2_460_000.5;
        let lag_h = (UtcOffset::CHINA_STANDARD.local_to_ut(jd) - jd) * 24.0;
        assert!((lag_h + 8.0).abs() < 1e-9, "lag = {lag_h}h");
    }

    #[test]
    fn tt_is_ahead_of_ut() {
        let jd_local = 2_460_000.5;
        let off = UtcOffset::CHINA_STANDARD;
        let lead_s = (off.local_to_tt(jd_local) - off.local_to_ut(jd_local)) * SECONDS_PER_DAY;
        assert!((60.0..80.0).contains(&lead_s), "ΔT = {lead_s}");
    }
}
