//! Per-age scoring: annual context, life-stage curve and the score table.
//!
//! Ages are independent of each other here, so the table can be built in
//! parallel; only the candle synthesis that follows is sequential.

use lifeline_ganzhi::{CalendarError, CalendricalAdapter, CycleDescriptor, Pillars};
use lifeline_time::CivilTime;
use rayon::prelude::*;
use serde::Serialize;

use crate::cycle::annual_factor;
use crate::decile::decile_score;
use crate::elemental::ElementDistribution;
use crate::profile::BirthProfile;
use crate::relation::stem_relation;
use crate::weights::ScoringWeights;

/// Number of ages in a life series (0..=79).
pub const SERIES_LENGTH: usize = 80;

/// Life-stage multiplier: piecewise linear over four 20-year bands.
///
/// | ages   | factor        |
/// |--------|---------------|
/// | 0-20   | 0.80 → 1.00   |
/// | 20-40  | 1.00 → 1.25   |
/// | 40-60  | 1.25 → 1.10   |
/// | 60-80  | 1.10 → 0.85   |
pub fn life_stage_factor(age: u32) -> f64 {
    let a = age as f64;
    match age {
        0..20 => 0.8 + a / 20.0 * 0.2,
        20..40 => 1.0 + (a - 20.0) / 20.0 * 0.25,
        40..60 => 1.25 - (a - 40.0) / 20.0 * 0.15,
        _ => 1.1 - (a - 60.0) / 20.0 * 0.25,
    }
}

/// Calendrical facts for one age of a birth profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualContext {
    pub age: u32,
    /// Birthday in the year of this age, at 00:00.
    pub moment: CivilTime,
    pub pillars: Pillars,
    pub distribution: ElementDistribution,
    pub liunian_score: f64,
    pub cycle: CycleDescriptor,
}

impl AnnualContext {
    pub fn new<A: CalendricalAdapter + ?Sized>(
        adapter: &A,
        profile: &BirthProfile,
        age: u32,
        weights: &ScoringWeights,
    ) -> Result<Self, CalendarError> {
        let moment = profile.moment.anniversary_in(profile.moment.year() + age as i32);
        let pillars = adapter.pillars_for(&moment)?;
        let distribution = ElementDistribution::from_pillars(&pillars);
        let liunian_score =
            (distribution.score(&weights.elements) + decile_score(&pillars, &weights.roles)) / 2.0;
        Ok(Self {
            age,
            moment,
            pillars,
            distribution,
            liunian_score,
            cycle: profile.cycle_at(age),
        })
    }

    /// Stem relation between the birth day stem and this year's stem.
    pub fn gan_zhi_factor(&self, profile: &BirthProfile) -> f64 {
        stem_relation(profile.pillars.day.stem(), self.pillars.year.stem())
    }

    pub fn annual_factor(&self, profile: &BirthProfile) -> f64 {
        annual_factor(profile.base_score, self.liunian_score)
    }
}

/// Score of one age.
pub fn age_score(profile: &BirthProfile, ctx: &AnnualContext) -> f64 {
    profile.base_score
        * ctx.cycle.factor
        * ctx.annual_factor(profile)
        * life_stage_factor(ctx.age)
        * ctx.gan_zhi_factor(profile)
}

/// Annual contexts and scores for every age of a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    contexts: Vec<AnnualContext>,
    scores: Vec<f64>,
}

impl ScoreTable {
    /// Build the table one age after another.
    pub fn sequential<A: CalendricalAdapter + ?Sized>(
        adapter: &A,
        profile: &BirthProfile,
        weights: &ScoringWeights,
    ) -> Result<Self, CalendarError> {
        let contexts = (0..SERIES_LENGTH as u32)
            .map(|age| AnnualContext::new(adapter, profile, age, weights))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_contexts(profile, contexts))
    }

    /// Build the table with ages scored in parallel.
    pub fn parallel<A: CalendricalAdapter + ?Sized>(
        adapter: &A,
        profile: &BirthProfile,
        weights: &ScoringWeights,
    ) -> Result<Self, CalendarError> {
        let contexts = (0..SERIES_LENGTH as u32)
            .into_par_iter()
            .map(|age| AnnualContext::new(adapter, profile, age, weights))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_contexts(profile, contexts))
    }

    fn from_contexts(profile: &BirthProfile, contexts: Vec<AnnualContext>) -> Self {
        let scores = contexts.iter().map(|ctx| age_score(profile, ctx)).collect();
        Self { contexts, scores }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn contexts(&self) -> &[AnnualContext] {
        &self.contexts
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
