//! Candle synthesis: turns the score table into 80 OHLC records.
//!
//! The synthesizer is a small state machine over ages 0..=79 carrying the
//! previous close. Each age opens at the carried close nudged by the stem
//! and branch relations, closes after a bounded change driven by the score
//! movement and the cycle factors, and gets a high/low envelope from a
//! bounded volatility.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lifeline_ganzhi::{CycleDescriptor, Pillar, PillarPosition};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::age_score::{AnnualContext, ScoreTable, life_stage_factor};
use crate::cycle::five_elements_match;
use crate::profile::BirthProfile;
use crate::relation::branch_relation;
use crate::weights::ScoringWeights;

/// Floor of the seed price.
pub const MIN_SEED: f64 = 100.0;
/// Seed price per unit of the age-0 score.
pub const SEED_MULTIPLIER: f64 = 10.0;
/// Bounds of the yearly close/open change.
pub const CHANGE_MIN: f64 = -0.22;
pub const CHANGE_MAX: f64 = 0.28;
/// Bounds of the yearly volatility.
pub const VOLATILITY_MIN: f64 = 0.04;
pub const VOLATILITY_MAX: f64 = 0.40;

/// Round to two decimals, half away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Initial carried close for a score table.
pub fn seed_price(age0_score: f64) -> f64 {
    (age0_score * SEED_MULTIPLIER).max(MIN_SEED)
}

/// An unrounded candle, as computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawCandle {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
}

impl RawCandle {
    /// Build the envelope around an open/close pair.
    pub fn with_volatility(open: f64, close: f64, volatility: f64) -> Self {
        let top = open.max(close);
        let bottom = open.min(close);
        Self {
            open,
            close,
            high: (top * (1.0 + volatility * 0.7)).max(top * 1.01),
            low: (bottom * (1.0 - volatility * 0.6)).max(bottom * 0.90),
        }
    }

    pub fn rounded(&self) -> CandleRecord {
        CandleRecord {
            open: round2(self.open),
            close: round2(self.close),
            low: round2(self.low),
            high: round2(self.high),
        }
    }
}

/// One year of the life series, rounded to two decimals.
///
/// Serialized as `[open, close, low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 4]", from = "[f64; 4]")]
pub struct CandleRecord {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
}

impl From<CandleRecord> for [f64; 4] {
    fn from(c: CandleRecord) -> Self {
        [c.open, c.close, c.low, c.high]
    }
}

impl From<[f64; 4]> for CandleRecord {
    fn from([open, close, low, high]: [f64; 4]) -> Self {
        Self {
            open,
            close,
            low,
            high,
        }
    }
}

/// Which close carries into the next year's open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseCarry {
    /// Carry the full-precision close; round only on emission.
    #[default]
    Unrounded,
    /// Carry the emitted two-decimal close.
    Rounded,
}

impl Display for CloseCarry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Unrounded => "unrounded",
            Self::Rounded => "rounded",
        })
    }
}

impl FromStr for CloseCarry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unrounded" => Ok(Self::Unrounded),
            "rounded" => Ok(Self::Rounded),
            other => Err(format!("unknown carry mode: {other}")),
        }
    }
}

/// Every intermediate value of one synthesized age.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeTrace {
    pub age: u32,
    pub year: i32,
    pub annual_pillar: Pillar,
    pub cycle: CycleDescriptor,
    pub score: f64,
    pub score_change: f64,
    pub gan_zhi_factor: f64,
    pub zhi_factor: f64,
    pub annual_factor: f64,
    pub life_stage_factor: f64,
    pub five_elements_match: f64,
    pub shi_shen_factor: f64,
    pub total_change: f64,
    pub volatility: f64,
    pub raw: RawCandle,
    pub record: CandleRecord,
}

/// Sequential candle synthesizer over a score table.
///
/// Yields one [`AgeTrace`] per age in increasing order.
pub struct Synthesizer<'a> {
    profile: &'a BirthProfile,
    table: &'a ScoreTable,
    weights: &'a ScoringWeights,
    carry: CloseCarry,
    previous_close: f64,
    next_age: usize,
}

impl<'a> Synthesizer<'a> {
    pub fn new(
        profile: &'a BirthProfile,
        table: &'a ScoreTable,
        weights: &'a ScoringWeights,
        carry: CloseCarry,
    ) -> Self {
        let seed = table.scores().first().copied().map_or(MIN_SEED, seed_price);
        Self {
            profile,
            table,
            weights,
            carry,
            previous_close: seed,
            next_age: 0,
        }
    }

    /// Close that the next age will open from.
    pub fn previous_close(&self) -> f64 {
        self.previous_close
    }

    fn step(&self, age: usize, ctx: &AnnualContext) -> AgeTrace {
        let scores = self.table.scores();
        let score = scores[age];
        let prior = scores[age.saturating_sub(1)];
        let score_change = (score - prior) / prior;

        let birth_day = self.profile.pillars.day;
        let gan_zhi = ctx.gan_zhi_factor(self.profile);
        let zhi = branch_relation(birth_day.branch(), ctx.pillars.year.branch());
        let dayun = ctx.cycle.factor;
        let elements = five_elements_match(&self.profile.distribution, &ctx.distribution);
        let year_role = ctx.pillars.primary_role(PillarPosition::Year);
        let shi_shen = 0.9 + (self.weights.roles.get(year_role) - 1.0) * 0.2;

        let open = self.previous_close * (1.0 + (gan_zhi - 1.0) * 0.015 + (zhi - 1.0) * 0.01);
        let total_change = (score_change * 3.0
            + (dayun - 1.0) * 0.35
            + (gan_zhi - 1.0) * 0.25
            + (zhi - 1.0) * 0.15
            + (elements - 1.0) * 0.18
            + (shi_shen - 1.0) * 0.12)
            .clamp(CHANGE_MIN, CHANGE_MAX);
        let close = open * (1.0 + total_change);
        let volatility = (score_change.abs() * 0.25
            + (gan_zhi - 1.0).abs() * 0.15
            + (zhi - 1.0).abs() * 0.10
            + VOLATILITY_MIN)
            .clamp(VOLATILITY_MIN, VOLATILITY_MAX);

        let raw = RawCandle::with_volatility(open, close, volatility);
        AgeTrace {
            age: ctx.age,
            year: ctx.moment.year(),
            annual_pillar: ctx.pillars.year,
            cycle: ctx.cycle,
            score,
            score_change,
            gan_zhi_factor: gan_zhi,
            zhi_factor: zhi,
            annual_factor: ctx.annual_factor(self.profile),
            life_stage_factor: life_stage_factor(ctx.age),
            five_elements_match: elements,
            shi_shen_factor: shi_shen,
            total_change,
            volatility,
            raw,
            record: raw.rounded(),
        }
    }
}

impl Iterator for Synthesizer<'_> {
    type Item = AgeTrace;

    fn next(&mut self) -> Option<AgeTrace> {
        let age = self.next_age;
        let ctx = self.table.contexts().get(age)?;
        let t = self.step(age, ctx);
        self.previous_close = match self.carry {
            CloseCarry::Unrounded => t.raw.close,
            CloseCarry::Rounded => t.record.close,
        };
        self.next_age += 1;
        trace!(age = t.age, close = t.record.close, "age synthesized");
        Some(t)
    }
}

/// The 80-year candle series, indexed by age.
///
/// Serialized as an array of `[open, close, low, high]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifeSeries {
    records: Vec<CandleRecord>,
}

impl LifeSeries {
    pub fn from_traces(traces: &[AgeTrace]) -> Self {
        Self {
            records: traces.iter().map(|t| t.record).collect(),
        }
    }

    pub fn records(&self) -> &[CandleRecord] {
        &self.records
    }

    pub fn get(&self, age: usize) -> Option<&CandleRecord> {
        self.records.get(age)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandleRecord> {
        self.records.iter()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.close)
    }

    pub fn into_vec(self) -> Vec<CandleRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a LifeSeries {
    type Item = &'a CandleRecord;
    type IntoIter = std::slice::Iter<'a, CandleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Synthesize the series for a profile and its score table.
pub fn synthesize(
    profile: &BirthProfile,
    table: &ScoreTable,
    weights: &ScoringWeights,
    carry: CloseCarry,
) -> LifeSeries {
    LifeSeries {
        records: Synthesizer::new(profile, table, weights, carry)
            .map(|t| t.record)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_half_up() {
        assert!((round2(1.005_000_1) - 1.01).abs() < 1e-12);
        assert!((round2(100.123) - 100.12).abs() < 1e-12);
        assert!((round2(99.995_01) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn seed_has_a_floor() {
        assert!((seed_price(4.2) - 100.0).abs() < 1e-12);
        assert!((seed_price(12.5) - 125.0).abs() < 1e-12);
    }

    #[test]
    fn envelope_contains_body() {
        for (o, c, v) in [(100.0, 110.0, 0.04), (100.0, 80.0, 0.4), (50.0, 50.0, 0.1)] {
            let r = RawCandle::with_volatility(o, c, v);
            assert!(r.low <= o.min(c));
            assert!(r.high >= o.max(c));
            assert!(r.low >= 0.9 * o.min(c));
            assert!(r.high >= 1.01 * o.max(c));
        }
    }

    #[test]
    fn low_keeps_the_larger_candidate() {
        // v = 0.4: 1 - 0.24 = 0.76 < 0.90, so the 90% floor wins.
        let r = RawCandle::with_volatility(100.0, 100.0, 0.4);
        assert!((r.low - 90.0).abs() < 1e-9);
        // v = 0.04: 1 - 0.024 = 0.976 > 0.90.
        let r = RawCandle::with_volatility(100.0, 100.0, 0.04);
        assert!((r.low - 97.6).abs() < 1e-9);
    }

    #[test]
    fn record_serializes_as_quadruple() {
        let c = CandleRecord {
            open: 100.12,
            close: 100.33,
            low: 97.0,
            high: 103.98,
        };
        assert_eq!(serde_json::to_string(&c).unwrap(), "[100.12,100.33,97.0,103.98]");
        let back: CandleRecord = serde_json::from_str("[1.0,2.0,0.5,2.5]").unwrap();
        assert!((back.high - 2.5).abs() < 1e-12);
    }

    #[test]
    fn carry_parse() {
        assert_eq!("Rounded".parse::<CloseCarry>(), Ok(CloseCarry::Rounded));
        assert_eq!(CloseCarry::default(), CloseCarry::Unrounded);
        assert!("floor".parse::<CloseCarry>().is_err());
    }
}
