//! Seam between the scoring engine and the calendrical computations.
//!
//! The engine only needs pillars for an instant and the decade-cycle start
//! for a birth. [`NativeCalendar`] provides both from this crate's own
//! solar-term search; other calendar sources can be plugged in by
//! implementing [`CalendricalAdapter`].

use lifeline_time::CivilTime;
use tracing::warn;

use crate::chart::pillars_at;
use crate::decade::{CycleDescriptor, DecadeStart, Gender, decade_start};
use crate::error::CalendarError;
use crate::pillar::Pillars;

/// Calendar source for pillar charts and decade cycles.
pub trait CalendricalAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Four pillars of a civil instant (China Standard Time).
    fn pillars_for(&self, time: &CivilTime) -> Result<Pillars, CalendarError>;

    /// Start of the first decade cycle for a birth.
    fn decade_start(&self, birth: &CivilTime, gender: Gender)
    -> Result<DecadeStart, CalendarError>;

    /// Decade cycle active at `age`, falling back to birth-aligned cycles
    /// when the start cannot be computed.
    fn decade_cycle(&self, birth: &CivilTime, gender: Gender, age: u32) -> CycleDescriptor {
        match self.decade_start(birth, gender) {
            Ok(start) => start.cycle_at(age),
            Err(err) => {
                warn!(
                    adapter = self.name(),
                    %birth, %err,
                    "decade start unavailable, using age fallback"
                );
                CycleDescriptor::fallback(age)
            }
        }
    }
}

/// Built-in calendar backed by the low-precision solar theory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCalendar;

impl CalendricalAdapter for NativeCalendar {
    fn name(&self) -> &'static str {
        "native"
    }

    fn pillars_for(&self, time: &CivilTime) -> Result<Pillars, CalendarError> {
        pillars_at(time)
    }

    fn decade_start(
        &self,
        birth: &CivilTime,
        gender: Gender,
    ) -> Result<DecadeStart, CalendarError> {
        decade_start(birth, gender)
    }
}
