//! Civil (wall-clock) date and time to minute precision.
//!
//! `CivilTime` is the canonical input type of the calendar layer. It is
//! always a valid Gregorian date with an in-range time of day; the only
//! ways to build one go through validation.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, day_number, days_in_month, jd_to_calendar};

/// Hour used when a birthday carries no time of day.
pub const DEFAULT_HOUR: u32 = 12;

/// Minute used when a birthday carries no time of day.
pub const DEFAULT_MINUTE: u32 = 0;

/// Validated Gregorian date with hour and minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CivilTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl CivilTime {
    /// Build a civil time, rejecting dates that do not exist and
    /// out-of-range hours or minutes.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self, TimeError> {
        if month == 0 || month > 12 || day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate { year, month, day });
        }
        if hour > 23 || minute > 59 {
            return Err(TimeError::InvalidTime { hour, minute });
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
        })
    }

    /// Midnight at the start of the given date.
    pub fn date(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        Self::new(year, month, day, 0, 0)
    }

    /// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM` (24-hour clock).
    ///
    /// A missing time of day defaults to 12:00.
    pub fn parse_birthday(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let (date_part, time_part) = match s.split_once(' ') {
            Some((d, t)) => (d, Some(t.trim())),
            None => (s, None),
        };

        let date_fields: Vec<&str> = date_part.split('-').collect();
        if date_fields.len() != 3 || date_fields[0].len() != 4 {
            return Err(TimeError::Parse(format!(
                "expected YYYY-MM-DD[ HH:MM], got {s:?}"
            )));
        }
        let year: i32 = parse_field(date_fields[0], "year")?;
        let month: u32 = parse_field(date_fields[1], "month")?;
        let day: u32 = parse_field(date_fields[2], "day")?;

        let (hour, minute) = match time_part {
            None => (DEFAULT_HOUR, DEFAULT_MINUTE),
            Some(t) => {
                let (h, m) = t.split_once(':').ok_or_else(|| {
                    TimeError::Parse(format!("expected HH:MM time of day, got {t:?}"))
                })?;
                (parse_field(h, "hour")?, parse_field(m, "minute")?)
            }
        };

        Self::new(year, month, day, hour, minute)
    }

    /// Convert a local Julian Date back to a civil time, rounded to the
    /// nearest minute.
    pub fn from_jd(jd: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd);
        let day = day_frac.floor();
        let minutes = ((day_frac - day) * 1440.0).round() as u32;
        let base_jd = calendar_to_jd(year, month, day);
        if minutes >= 1440 {
            // Rounded up into the next day: re-derive the date from midnight.
            let (y, m, d) = jd_to_calendar(base_jd + 1.0);
            return Self {
                year: y,
                month: m,
                day: d.floor() as u32,
                hour: 0,
                minute: 0,
            };
        }
        Self {
            year,
            month,
            day: day as u32,
            hour: minutes / 60,
            minute: minutes % 60,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Local Julian Date of this wall-clock instant.
    pub fn to_jd(&self) -> f64 {
        let day_frac =
            self.day as f64 + self.hour as f64 / 24.0 + self.minute as f64 / 1440.0;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Integer Julian Day Number of the date part.
    pub fn day_number(&self) -> i64 {
        day_number(self.year, self.month, self.day)
    }

    /// Same month and day in another year, at 00:00.
    ///
    /// Feb 29 in a common year overflows into Mar 1.
    pub fn anniversary_in(&self, year: i32) -> Self {
        let month_len = days_in_month(year, self.month);
        let (month, day) = if self.day > month_len {
            (self.month + 1, self.day - month_len)
        } else {
            (self.month, self.day)
        };
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
        }
    }
}

fn parse_field<T: FromStr>(s: &str, what: &str) -> Result<T, TimeError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::Parse(format!("invalid {what}: {s:?}")));
    }
    s.parse()
        .map_err(|_| TimeError::Parse(format!("invalid {what}: {s:?}")))
}

impl FromStr for CivilTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_birthday(s)
    }
}

impl Display for CivilTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_date() {
        assert!(CivilTime::new(2024, 2, 29, 0, 0).is_ok());
        assert_eq!(
            CivilTime::new(2023, 2, 29, 0, 0),
            Err(TimeError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(CivilTime::new(2023, 13, 1, 0, 0).is_err());
        assert!(CivilTime::new(2023, 0, 1, 0, 0).is_err());
        assert!(CivilTime::new(2023, 1, 0, 0, 0).is_err());
    }

    #[test]
    fn new_validates_time() {
        assert_eq!(
            CivilTime::new(2023, 1, 1, 24, 0),
            Err(TimeError::InvalidTime {
                hour: 24,
                minute: 0
            })
        );
        assert!(CivilTime::new(2023, 1, 1, 23, 60).is_err());
        assert!(CivilTime::new(2023, 1, 1, 23, 59).is_ok());
    }

    #[test]
    fn parse_date_only_defaults_to_noon() {
        let t = CivilTime::parse_birthday("1990-05-15").unwrap();
        assert_eq!(t, CivilTime::new(1990, 5, 15, 12, 0).unwrap());
    }

    #[test]
    fn parse_date_and_time() {
        let t: CivilTime = "1990-05-15 08:30".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (8, 30));
    }

    #[test]
    fn parse_rejects_garbage() {
        for s in ["", "1990", "1990-05", "90-05-15", "1990-05-15 8", "1990/05/15", "1990-0x-15", "1990-05-15 -1:00"] {
            assert!(
                matches!(CivilTime::parse_birthday(s), Err(TimeError::Parse(_))),
                "{s:?} should not parse"
            );
        }
    }

    #[test]
    fn parse_rejects_nonexistent_date() {
        assert!(matches!(
            CivilTime::parse_birthday("2023-02-30"),
            Err(TimeError::InvalidDate { .. })
        ));
    }

    #[test]
    fn jd_roundtrip_to_minute() {
        let t = CivilTime::new(1990, 5, 15, 8, 30).unwrap();
        assert_eq!(CivilTime::from_jd(t.to_jd()), t);
    }

    #[test]
    fn from_jd_rounds_into_next_day() {
        let t = CivilTime::new(2023, 12, 31, 23, 59).unwrap();
        let almost_midnight = t.to_jd() + 59.8 / 86_400.0;
        assert_eq!(
            CivilTime::from_jd(almost_midnight),
            CivilTime::new(2024, 1, 1, 0, 0).unwrap()
        );
    }

    #[test]
    fn anniversary_keeps_month_and_day() {
        let t = CivilTime::new(1990, 5, 15, 8, 30).unwrap();
        assert_eq!(t.anniversary_in(2000), CivilTime::date(2000, 5, 15).unwrap());
    }

    #[test]
    fn leap_day_anniversary_rolls_to_march() {
        let t = CivilTime::new(2000, 2, 29, 12, 0).unwrap();
        assert_eq!(t.anniversary_in(2001), CivilTime::date(2001, 3, 1).unwrap());
        assert_eq!(t.anniversary_in(2004), CivilTime::date(2004, 2, 29).unwrap());
    }

    #[test]
    fn display_format() {
        let t = CivilTime::new(2024, 1, 5, 7, 3).unwrap();
        assert_eq!(t.to_string(), "2024-01-05 07:03");
    }
}
