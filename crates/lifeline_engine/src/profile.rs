//! Birth profile: the frozen calendrical facts of a birth moment.

use lifeline_ganzhi::{
    CalendarError, CalendricalAdapter, CycleDescriptor, DecadeStart, Gender, Pillars,
};
use lifeline_time::CivilTime;
use serde::Serialize;
use tracing::{debug, warn};

use crate::decile::decile_score;
use crate::elemental::ElementDistribution;
use crate::weights::ScoringWeights;

/// Everything the engine derives once per birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthProfile {
    pub moment: CivilTime,
    pub gender: Gender,
    pub pillars: Pillars,
    pub distribution: ElementDistribution,
    pub elemental_score: f64,
    pub decile_score: f64,
    /// Mean of the elemental and decile scores.
    pub base_score: f64,
    /// `None` when the adapter could not compute a start; cycles then use
    /// [`CycleDescriptor::fallback`].
    pub decade_start: Option<DecadeStart>,
}

impl BirthProfile {
    pub fn new<A: CalendricalAdapter + ?Sized>(
        adapter: &A,
        moment: CivilTime,
        gender: Gender,
        weights: &ScoringWeights,
    ) -> Result<Self, CalendarError> {
        let pillars = adapter.pillars_for(&moment)?;
        let distribution = ElementDistribution::from_pillars(&pillars);
        let elemental_score = distribution.score(&weights.elements);
        let decile_score = decile_score(&pillars, &weights.roles);
        let base_score = (elemental_score + decile_score) / 2.0;

        let decade_start = match adapter.decade_start(&moment, gender) {
            Ok(start) => Some(start),
            Err(err) => {
                warn!(
                    adapter = adapter.name(),
                    %moment, %err,
                    "decade start unavailable, using age fallback"
                );
                None
            }
        };

        debug!(
            %moment,
            %pillars,
            base_score,
            start_age = decade_start.map(|s| s.start_age()),
            "birth profile derived"
        );

        Ok(Self {
            moment,
            gender,
            pillars,
            distribution,
            elemental_score,
            decile_score,
            base_score,
            decade_start,
        })
    }

    /// Decade cycle active at `age`.
    pub fn cycle_at(&self, age: u32) -> CycleDescriptor {
        match &self.decade_start {
            Some(start) => start.cycle_at(age),
            None => CycleDescriptor::fallback(age),
        }
    }
}
