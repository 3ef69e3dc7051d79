//! Deterministic life K-line engine.
//!
//! Turns a birth moment into 80 annual `[open, close, low, high]` candles,
//! one per age 0..=79, from the four pillars of the birth and of each
//! year's birthday.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use lifeline_engine::{Gender, generate_life_series};
//!
//! let series = generate_life_series("1990-05-15 08:30", Gender::Male).unwrap();
//! assert_eq!(series.len(), 80);
//! println!("{}", serde_json::to_string(&series).unwrap());
//! ```

pub mod age_score;
pub mod cycle;
pub mod decile;
pub mod elemental;
pub mod error;
pub mod profile;
pub mod relation;
pub mod series;
pub mod stats;
pub mod weights;

pub use age_score::{AnnualContext, SERIES_LENGTH, ScoreTable, age_score, life_stage_factor};
pub use cycle::{annual_factor, element_affinity, five_elements_match};
pub use decile::decile_score;
pub use elemental::{ElementDistribution, element_distribution, elemental_score};
pub use error::{ConfigError, EngineError};
pub use profile::BirthProfile;
pub use relation::{BranchRelation, StemRelation, branch_relation, stem_relation};
pub use series::{
    AgeTrace, CandleRecord, CloseCarry, LifeSeries, RawCandle, Synthesizer, round2, seed_price,
    synthesize,
};
pub use stats::SeriesStats;
pub use weights::{ElementWeights, RoleWeights, ScoringWeights};

// Re-export calendar types so callers don't need the lower crates directly.
pub use lifeline_ganzhi::{CalendricalAdapter, Gender, NativeCalendar, Pillars};
pub use lifeline_time::CivilTime;

use std::path::Path;

use tracing::debug;

/// Life-series engine: a calendar adapter, a weighting scheme and a close
/// carry strategy.
#[derive(Debug, Clone, Default)]
pub struct LifeEngine<A = NativeCalendar> {
    adapter: A,
    weights: ScoringWeights,
    carry: CloseCarry,
}

impl LifeEngine<NativeCalendar> {
    /// Engine on the built-in calendar with default weights.
    pub fn native() -> Self {
        Self::default()
    }
}

impl<A: CalendricalAdapter> LifeEngine<A> {
    pub fn new(adapter: A, weights: ScoringWeights) -> Self {
        Self {
            adapter,
            weights,
            carry: CloseCarry::default(),
        }
    }

    /// Engine with weights read from a TOML file.
    pub fn with_weights_file(adapter: A, path: impl AsRef<Path>) -> Result<Self, EngineError> {
        Ok(Self::new(adapter, ScoringWeights::load(path)?))
    }

    pub fn with_carry(mut self, carry: CloseCarry) -> Self {
        self.carry = carry;
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn carry(&self) -> CloseCarry {
        self.carry
    }

    /// Derive the birth profile for a parsed moment.
    pub fn profile(&self, moment: CivilTime, gender: Gender) -> Result<BirthProfile, EngineError> {
        Ok(BirthProfile::new(
            &self.adapter,
            moment,
            gender,
            &self.weights,
        )?)
    }

    /// Score every age of a profile (parallel precompute).
    pub fn score_table(&self, profile: &BirthProfile) -> Result<ScoreTable, EngineError> {
        Ok(ScoreTable::parallel(&self.adapter, profile, &self.weights)?)
    }

    /// Per-age traces with every intermediate factor.
    pub fn explain(&self, moment: CivilTime, gender: Gender) -> Result<Vec<AgeTrace>, EngineError> {
        let profile = self.profile(moment, gender)?;
        let table = self.score_table(&profile)?;
        Ok(Synthesizer::new(&profile, &table, &self.weights, self.carry).collect())
    }

    /// Series for a parsed birth moment.
    pub fn series_for(&self, moment: CivilTime, gender: Gender) -> Result<LifeSeries, EngineError> {
        let profile = self.profile(moment, gender)?;
        let table = self.score_table(&profile)?;
        let series = synthesize(&profile, &table, &self.weights, self.carry);
        debug!(
            %moment,
            %gender,
            records = series.len(),
            last_close = series.get(SERIES_LENGTH - 1).map(|r| r.close),
            "life series generated"
        );
        Ok(series)
    }

    /// Series for a `YYYY-MM-DD[ HH:MM]` birthday (time defaults to 12:00).
    pub fn generate(&self, birthday: &str, gender: Gender) -> Result<LifeSeries, EngineError> {
        self.series_for(CivilTime::parse_birthday(birthday)?, gender)
    }
}

/// Series for a birthday string on the built-in calendar with default
/// weights and unrounded close carry.
pub fn generate_life_series(birthday: &str, gender: Gender) -> Result<LifeSeries, EngineError> {
    LifeEngine::native().generate(birthday, gender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_1990_first_records() {
        let s = generate_life_series("1990-05-15 08:30", Gender::Female).unwrap();
        assert_eq!(s.len(), SERIES_LENGTH);
        let r0 = s.get(0).unwrap();
        assert_eq!([r0.open, r0.close, r0.low, r0.high], [100.12, 100.33, 97.0, 103.98]);
        let r1 = s.get(1).unwrap();
        assert_eq!([r1.open, r1.close, r1.low, r1.high], [100.4, 93.52, 90.51, 104.17]);
    }

    #[test]
    fn invalid_date_is_invalid_input() {
        let err = generate_life_series("2023-02-30", Gender::Male).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn explain_matches_series() {
        let engine = LifeEngine::native();
        let moment = CivilTime::parse_birthday("1975-09-09 17:45").unwrap();
        let traces = engine.explain(moment, Gender::Male).unwrap();
        let series = engine.series_for(moment, Gender::Male).unwrap();
        assert_eq!(LifeSeries::from_traces(&traces), series);
        assert_eq!(traces[40].year, 2015);
    }

    #[test]
    fn missing_weights_file_is_config_error() {
        let err = LifeEngine::with_weights_file(NativeCalendar, "no/such/weights.toml").unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::Read { .. })), "{err}");
        assert!(err.to_string().contains("no/such/weights.toml"));
    }

    #[test]
    fn shipped_weights_file_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/weights.toml");
        let engine = LifeEngine::with_weights_file(NativeCalendar, path).unwrap();
        assert_eq!(*engine.weights(), ScoringWeights::default());
    }

    #[test]
    fn cycles_start_at_the_decade_start_age() {
        let engine = LifeEngine::native();
        let moment = CivilTime::parse_birthday("1990-05-15 08:30").unwrap();
        let start = engine.profile(moment, Gender::Female).unwrap().decade_start.unwrap();
        for t in engine.explain(moment, Gender::Female).unwrap() {
            assert_eq!(t.cycle.is_started(), t.age as f64 >= start.start_age(), "age {}", t.age);
        }
    }
}
