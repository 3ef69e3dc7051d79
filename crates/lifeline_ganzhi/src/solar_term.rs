//! Sun apparent longitude and the twelve "jie" solar terms.
//!
//! The month pillars change at the jie terms, when the Sun's apparent
//! ecliptic longitude reaches 315° + 30°·k (Lichun at 315°, Jingzhe at
//! 345°, ...). Longitude comes from the low-precision solar theory of
//! Meeus, *Astronomical Algorithms*, ch. 25 (about 0.01°, i.e. a quarter
//! of an hour in time), with aberration and the principal nutation term.
//!
//! All public functions take and return *local* Julian Dates in China
//! Standard Time; the TT conversion is internal.

use std::fmt;

use lifeline_time::{CivilTime, UtcOffset, jd_to_centuries};

use crate::error::CalendarError;
use crate::util::{normalize_360, normalize_pm180};

/// Longitude of Lichun, the first jie of the solar year.
pub const LICHUN_LONGITUDE_DEG: f64 = 315.0;

/// Longitude span of one solar month.
pub const JIE_SPAN_DEG: f64 = 30.0;

/// Mean days per degree of solar longitude.
const DAYS_PER_DEGREE: f64 = 365.242_19 / 360.0;

/// Maximum refinement steps for a solar-term search.
const MAX_ITERATIONS: usize = 10;

/// Convergence threshold in days (~0.009 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-7;

/// The twelve jie terms, in order from Lichun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jie {
    Lichun,
    Jingzhe,
    Qingming,
    Lixia,
    Mangzhong,
    Xiaoshu,
    Liqiu,
    Bailu,
    Hanlu,
    Lidong,
    Daxue,
    Xiaohan,
}

/// All twelve jie in order (index 0 = Lichun).
pub const ALL_JIE: [Jie; 12] = [
    Jie::Lichun,
    Jie::Jingzhe,
    Jie::Qingming,
    Jie::Lixia,
    Jie::Mangzhong,
    Jie::Xiaoshu,
    Jie::Liqiu,
    Jie::Bailu,
    Jie::Hanlu,
    Jie::Lidong,
    Jie::Daxue,
    Jie::Xiaohan,
];

impl Jie {
    /// 0-based index (Lichun=0 .. Xiaohan=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Lichun => 0,
            Self::Jingzhe => 1,
            Self::Qingming => 2,
            Self::Lixia => 3,
            Self::Mangzhong => 4,
            Self::Xiaoshu => 5,
            Self::Liqiu => 6,
            Self::Bailu => 7,
            Self::Hanlu => 8,
            Self::Lidong => 9,
            Self::Daxue => 10,
            Self::Xiaohan => 11,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lichun => "Lichun",
            Self::Jingzhe => "Jingzhe",
            Self::Qingming => "Qingming",
            Self::Lixia => "Lixia",
            Self::Mangzhong => "Mangzhong",
            Self::Xiaoshu => "Xiaoshu",
            Self::Liqiu => "Liqiu",
            Self::Bailu => "Bailu",
            Self::Hanlu => "Hanlu",
            Self::Lidong => "Lidong",
            Self::Daxue => "Daxue",
            Self::Xiaohan => "Xiaohan",
        }
    }

    /// Apparent solar longitude at which this term begins.
    pub fn longitude_deg(self) -> f64 {
        normalize_360(LICHUN_LONGITUDE_DEG + JIE_SPAN_DEG * self.index() as f64)
    }
}

/// A located jie term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JieEvent {
    pub jie: Jie,
    /// Local (China Standard Time) Julian Date of the term.
    pub jd_local: f64,
}

impl fmt::Display for JieEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.jie.name(), CivilTime::from_jd(self.jd_local))
    }
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees [0, 360),
/// for a Julian Date in TT.
pub fn sun_apparent_longitude_tt(jd_tt: f64) -> f64 {
    let t = jd_to_centuries(jd_tt);
    let t2 = t * t;

    // Geometric mean longitude and mean anomaly (degrees).
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t2;
    let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t2).to_radians();

    // Equation of centre.
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t2) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    // Longitude of the Moon's ascending node drives the nutation term.
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_360(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}

/// Apparent solar longitude at a local (China Standard Time) Julian Date.
pub fn sun_longitude_local(jd_local: f64) -> f64 {
    sun_apparent_longitude_tt(UtcOffset::CHINA_STANDARD.local_to_tt(jd_local))
}

/// 0-based solar month for a longitude: 0 from Lichun to Jingzhe, 11 from
/// Xiaohan to the next Lichun.
pub fn solar_month_index(sun_longitude_deg: f64) -> u8 {
    let since_lichun = normalize_360(sun_longitude_deg - LICHUN_LONGITUDE_DEG);
    ((since_lichun / JIE_SPAN_DEG).floor() as u8).min(11)
}

/// Refine `guess` until the Sun's longitude equals `target_deg`.
fn refine(target_deg: f64, guess: f64) -> Result<f64, CalendarError> {
    let mut jd = guess;
    for _ in 0..MAX_ITERATIONS {
        let step = normalize_pm180(target_deg - sun_longitude_local(jd)) * DAYS_PER_DEGREE;
        jd += step;
        if step.abs() < CONVERGENCE_DAYS {
            return Ok(jd);
        }
    }
    Err(CalendarError::NoConvergence("solar term refinement"))
}

/// First jie strictly after `jd_local`.
pub fn next_jie(jd_local: f64) -> Result<JieEvent, CalendarError> {
    let lon = sun_longitude_local(jd_local);
    let index = (solar_month_index(lon) + 1) % 12;
    let jie = ALL_JIE[index as usize];
    let target = jie.longitude_deg();
    let ahead = normalize_360(target - lon);
    let jd = refine(target, jd_local + ahead * DAYS_PER_DEGREE)?;
    Ok(JieEvent { jie, jd_local: jd })
}

/// Latest jie at or before `jd_local`.
pub fn prev_jie(jd_local: f64) -> Result<JieEvent, CalendarError> {
    let lon = sun_longitude_local(jd_local);
    let jie = ALL_JIE[solar_month_index(lon) as usize];
    let target = jie.longitude_deg();
    let behind = normalize_360(lon - target);
    let jd = refine(target, jd_local - behind * DAYS_PER_DEGREE)?;
    Ok(JieEvent { jie, jd_local: jd })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_time::calendar_to_jd;

    #[test]
    fn meeus_example_25a() {
        // 1992 Oct 13.0 TD: apparent longitude 199.90895° (low-precision
        // result 199.90988°).
        let lon = sun_apparent_longitude_tt(2_448_908.5);
        assert!((lon - 199.909).abs() < 0.01, "got {lon}");
    }

    #[test]
    fn jie_longitudes() {
        assert!((Jie::Lichun.longitude_deg() - 315.0).abs() < 1e-12);
        assert!((Jie::Jingzhe.longitude_deg() - 345.0).abs() < 1e-12);
        assert!((Jie::Qingming.longitude_deg() - 15.0).abs() < 1e-12);
        assert!((Jie::Xiaohan.longitude_deg() - 285.0).abs() < 1e-12);
    }

    #[test]
    fn solar_month_boundaries() {
        assert_eq!(solar_month_index(315.0), 0);
        assert_eq!(solar_month_index(344.9), 0);
        assert_eq!(solar_month_index(345.0), 1);
        assert_eq!(solar_month_index(0.0), 1);
        assert_eq!(solar_month_index(284.9), 10);
        assert_eq!(solar_month_index(300.0), 11);
    }

    #[test]
    fn lichun_2024() {
        // Lichun 2024: Feb 4 16:27 CST.
        let ev = next_jie(calendar_to_jd(2024, 1, 25.0)).unwrap();
        assert_eq!(ev.jie, Jie::Lichun);
        let expected = calendar_to_jd(2024, 2, 4.0 + (16.0 + 27.0 / 60.0) / 24.0);
        assert!(
            (ev.jd_local - expected).abs() < 0.01,
            "off by {} min",
            (ev.jd_local - expected) * 1440.0
        );
    }

    #[test]
    fn xiaohan_2024() {
        // Xiaohan 2024: Jan 6 04:49 CST.
        let ev = prev_jie(calendar_to_jd(2024, 1, 20.0)).unwrap();
        assert_eq!(ev.jie, Jie::Xiaohan);
        let expected = calendar_to_jd(2024, 1, 6.0 + (4.0 + 49.0 / 60.0) / 24.0);
        assert!(
            (ev.jd_local - expected).abs() < 0.01,
            "off by {} min",
            (ev.jd_local - expected) * 1440.0
        );
    }

    #[test]
    fn event_display_names_the_term() {
        let ev = next_jie(calendar_to_jd(2024, 1, 25.0)).unwrap();
        let shown = ev.to_string();
        assert!(shown.starts_with("Lichun 2024-02-04 16:"), "{shown}");
        assert_eq!(Jie::Daxue.name(), "Daxue");
    }

    #[test]
    fn prev_and_next_bracket_the_instant() {
        let jd = calendar_to_jd(1990, 5, 15.354);
        let prev = prev_jie(jd).unwrap();
        let next = next_jie(jd).unwrap();
        assert_eq!(prev.jie, Jie::Lixia);
        assert_eq!(next.jie, Jie::Mangzhong);
        assert!(prev.jd_local <= jd && jd < next.jd_local);
        let span = next.jd_local - prev.jd_local;
        assert!((29.0..33.0).contains(&span), "span {span}");
    }

    #[test]
    fn longitude_at_found_term_matches_target() {
        let ev = next_jie(calendar_to_jd(2010, 7, 1.0)).unwrap();
        let lon = sun_longitude_local(ev.jd_local);
        assert!(normalize_pm180(lon - ev.jie.longitude_deg()).abs() < 1e-6);
    }
}
