//! Decade cycles (dayun): start age and the cycle active at a given age.
//!
//! The decade sequence runs forward for a yang-year male or yin-year
//! female birth, and backward otherwise. The start age comes from the
//! distance between birth and the adjacent jie term: forward births count
//! to the next jie, backward births count from the previous one. Three
//! days of that distance are one year of age and a two-hour period is
//! ten days.

use std::fmt::{Display, Formatter};

use lifeline_time::CivilTime;
use serde::{Deserialize, Serialize};

use crate::chart::pillars_at;
use crate::error::CalendarError;
use crate::solar_term::{next_jie, prev_jie};

/// Years per decade cycle.
pub const DECADE_YEARS: f64 = 10.0;

/// Number of distinct decade-cycle strength steps.
const FACTOR_STEPS: i32 = 8;

/// Gender of the subject; it selects the direction of the decade cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Start of the first decade cycle, as an age offset from birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecadeStart {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    /// Whether the cycles advance through the sexagenary sequence.
    pub forward: bool,
}

impl DecadeStart {
    /// Start age in years; days are ignored.
    pub fn start_age(&self) -> f64 {
        self.years as f64 + self.months as f64 / 12.0
    }

    /// Decade cycle active at an age in whole years.
    pub fn cycle_at(&self, age: u32) -> CycleDescriptor {
        let age = age as f64;
        let start = self.start_age();
        if age < start {
            return CycleDescriptor::BEFORE_START;
        }
        CycleDescriptor::for_index(((age - start) / DECADE_YEARS).floor() as i32)
    }
}

/// The decade cycle active at an age and its strength factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleDescriptor {
    /// 0-based cycle index, or -1 before the first cycle starts.
    pub index: i32,
    /// Multiplicative strength in [0.85, 1.1125].
    pub factor: f64,
}

impl CycleDescriptor {
    /// Descriptor for ages before the first cycle starts.
    pub const BEFORE_START: Self = Self {
        index: -1,
        factor: 1.0,
    };

    /// Descriptor of the cycle with the given index.
    pub fn for_index(index: i32) -> Self {
        let step = index.rem_euclid(FACTOR_STEPS) as f64;
        Self {
            index,
            factor: 0.85 + 0.3 * (step / FACTOR_STEPS as f64),
        }
    }

    /// Age-only approximation used when the start cannot be computed:
    /// cycles are taken to start at birth.
    pub fn fallback(age: u32) -> Self {
        Self::for_index((age as f64 / DECADE_YEARS).floor() as i32)
    }

    pub fn is_started(&self) -> bool {
        self.index >= 0
    }
}

// Two-hour period of a clock hour, with 23:00 as the last period of its day.
const fn hour_period(hour: u32) -> i64 {
    if hour == 23 {
        11
    } else {
        (((hour + 1) / 2) % 12) as i64
    }
}

/// Convert a span between two minute-resolution instants into a start age.
fn span_to_start(from: &CivilTime, to: &CivilTime, forward: bool) -> DecadeStart {
    let mut hour_diff = hour_period(to.hour()) - hour_period(from.hour());
    let mut day_diff = to.day_number() - from.day_number();
    if hour_diff < 0 {
        hour_diff += 12;
        day_diff -= 1;
    }
    let month_diff = hour_diff * 10 / 30;
    let total_months = (day_diff * 4 + month_diff).max(0);
    let days = (hour_diff * 10 - month_diff * 30).max(0);
    DecadeStart {
        years: (total_months / 12) as u32,
        months: (total_months % 12) as u32,
        days: days as u32,
        forward,
    }
}

/// Compute the decade-cycle start for a birth instant.
pub fn decade_start(birth: &CivilTime, gender: Gender) -> Result<DecadeStart, CalendarError> {
    let pillars = pillars_at(birth)?;
    let yang_year = pillars.year.stem().is_yang();
    let forward = yang_year == (gender == Gender::Male);

    let jd = birth.to_jd();
    let start = if forward {
        let jie = CivilTime::from_jd(next_jie(jd)?.jd_local);
        span_to_start(birth, &jie, true)
    } else {
        let jie = CivilTime::from_jd(prev_jie(jd)?.jd_local);
        span_to_start(&jie, birth, false)
    };
    Ok(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> CivilTime {
        CivilTime::new(y, mo, d, h, mi).unwrap()
    }

    #[test]
    fn hour_periods() {
        assert_eq!(hour_period(0), 0);
        assert_eq!(hour_period(1), 1);
        assert_eq!(hour_period(8), 4);
        assert_eq!(hour_period(22), 11);
        assert_eq!(hour_period(23), 11);
    }

    #[test]
    fn span_of_whole_days() {
        // 30 days -> 120 months -> 10 years.
        let s = span_to_start(&t(2000, 1, 1, 12, 0), &t(2000, 1, 31, 12, 0), true);
        assert_eq!((s.years, s.months, s.days), (10, 0, 0));
    }

    #[test]
    fn span_borrows_a_day_for_negative_hours() {
        // 1 day minus 2 hours: 0 days + 11 periods -> 3 months 20 days.
        let s = span_to_start(&t(2000, 1, 1, 12, 0), &t(2000, 1, 2, 10, 0), false);
        assert_eq!((s.years, s.months, s.days), (0, 3, 20));
        assert!(!s.forward);
    }

    #[test]
    fn cycle_before_and_after_start() {
        let s = DecadeStart {
            years: 7,
            months: 3,
            days: 20,
            forward: true,
        };
        assert!((s.start_age() - 7.25).abs() < 1e-12);
        assert_eq!(s.cycle_at(7), CycleDescriptor::BEFORE_START);
        let c = s.cycle_at(8);
        assert_eq!(c.index, 0);
        assert!((c.factor - 0.85).abs() < 1e-12);
        assert_eq!(s.cycle_at(17).index, 0);
        assert_eq!(s.cycle_at(18).index, 1);
        assert!((s.cycle_at(18).factor - 0.8875).abs() < 1e-12);
    }

    #[test]
    fn factor_cycles_every_eight_decades() {
        assert!((CycleDescriptor::for_index(7).factor - 1.1125).abs() < 1e-12);
        assert!((CycleDescriptor::for_index(8).factor - 0.85).abs() < 1e-12);
    }

    #[test]
    fn fallback_starts_at_birth() {
        assert_eq!(CycleDescriptor::fallback(0).index, 0);
        assert_eq!(CycleDescriptor::fallback(9).index, 0);
        assert_eq!(CycleDescriptor::fallback(79).index, 7);
        assert!(CycleDescriptor::fallback(0).is_started());
        assert!(!CycleDescriptor::BEFORE_START.is_started());
    }

    #[test]
    fn gender_parse() {
        assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("f".parse::<Gender>(), Ok(Gender::Female));
        assert!("x".parse::<Gender>().is_err());
    }
}
