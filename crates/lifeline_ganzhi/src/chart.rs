//! Four-pillar chart for a civil instant in China Standard Time.
//!
//! Year and month pillars follow the solar (jie) calendar: the year turns
//! at Lichun and each month at the next jie. The day pillar follows the
//! civil date and does not roll over at 23:00; the hour pillar of the
//! 23:00 hour takes its stem from the following day.

use lifeline_time::CivilTime;

use crate::branch::Branch;
use crate::error::CalendarError;
use crate::pillar::{Pillar, Pillars};
use crate::solar_term::{solar_month_index, sun_longitude_local};
use crate::stem::Stem;

/// Julian Day Number offset placing 1949-10-01 (JDN 2433191) at Jia-Zi.
const DAY_CYCLE_OFFSET: i64 = 49;

/// Reference year of a Jia-Zi year (4 CE).
const JIAZI_YEAR: i64 = 4;

/// Year pillar for a solar year (the year starting at that year's Lichun).
pub fn year_pillar(solar_year: i32) -> Pillar {
    Pillar::from_cycle_offset(solar_year as i64 - JIAZI_YEAR)
}

/// Month pillar from the year stem and the 0-based solar month
/// (0 = the Yin month starting at Lichun).
pub fn month_pillar(year_stem: Stem, solar_month: u8) -> Pillar {
    let stem = Stem::from_index(((year_stem.index() % 5) * 2 + 2 + solar_month) % 10);
    let branch = Branch::from_index((solar_month + 2) % 12);
    pillar_of(stem, branch)
}

/// Day pillar from a Julian Day Number.
pub fn day_pillar(day_number: i64) -> Pillar {
    Pillar::from_cycle_offset(day_number + DAY_CYCLE_OFFSET)
}

/// Hour pillar from the stem governing the hour and the clock hour.
pub fn hour_pillar(day_stem: Stem, hour: u32) -> Pillar {
    let branch = Branch::from_hour(hour);
    let stem = Stem::from_index(((day_stem.index() % 5) * 2 + branch.index()) % 10);
    pillar_of(stem, branch)
}

// The month and hour rules always pair stems and branches of equal parity.
fn pillar_of(stem: Stem, branch: Branch) -> Pillar {
    Pillar::from_cycle_index(cycle_index_of(stem, branch))
}

/// Cycle position of a same-parity (stem, branch) pair.
pub fn cycle_index_of(stem: Stem, branch: Branch) -> u32 {
    (6 * stem.index() as u32 + 60 - 5 * branch.index() as u32) % 60
}

/// Solar year of a civil instant given its solar month: January and
/// February dates before Lichun belong to the previous year.
pub fn solar_year(time: &CivilTime, solar_month: u8) -> i32 {
    if time.month() <= 2 && solar_month >= 10 {
        time.year() - 1
    } else {
        time.year()
    }
}

/// Compute the four pillars for a civil instant.
pub fn pillars_at(time: &CivilTime) -> Result<Pillars, CalendarError> {
    let longitude = sun_longitude_local(time.to_jd());
    if !longitude.is_finite() {
        return Err(CalendarError::Unsupported("solar longitude out of range"));
    }
    let solar_month = solar_month_index(longitude);

    let year = year_pillar(solar_year(time, solar_month));
    let month = month_pillar(year.stem(), solar_month);
    let day = day_pillar(time.day_number());
    let hour_stem_source = if time.hour() == 23 {
        day.stem().offset(1)
    } else {
        day.stem()
    };
    let hour = hour_pillar(hour_stem_source, time.hour());

    Ok(Pillars::new(year, month, day, hour))
}
