//! Annual-cycle modifiers relative to the birth baseline.

use lifeline_ganzhi::ALL_ELEMENTS;

use crate::elemental::ElementDistribution;

/// Lower bound of every cycle modifier.
pub const MODIFIER_MIN: f64 = 0.85;
/// Upper bound of every cycle modifier.
pub const MODIFIER_MAX: f64 = 1.15;

const SHARED_ELEMENT: f64 = 1.0;
const GENERATED_ELEMENT: f64 = 0.5;
const CONTROLLING_ELEMENT: f64 = -0.3;

/// Strength of the year's chart against the birth baseline.
///
/// A year scoring 80% of the baseline or less sits at the floor (0.85);
/// each further 10% adds 0.03.
pub fn annual_factor(base_score: f64, liunian_score: f64) -> f64 {
    let ratio = liunian_score / base_score;
    (MODIFIER_MIN + (ratio - 0.8) * 0.3).clamp(MODIFIER_MIN, MODIFIER_MAX)
}

/// Raw element affinity between the birth and year distributions.
///
/// For every element present at birth: +1 when the year shares it, +0.5
/// when the year holds the element it generates, -0.3 when the year holds
/// the element that controls it.
pub fn element_affinity(birth: &ElementDistribution, year: &ElementDistribution) -> f64 {
    ALL_ELEMENTS
        .into_iter()
        .filter(|&e| birth.has(e))
        .map(|e| {
            let mut s = 0.0;
            if year.has(e) {
                s += SHARED_ELEMENT;
            }
            if year.has(e.generated()) {
                s += GENERATED_ELEMENT;
            }
            if year.has(e.controller()) {
                s += CONTROLLING_ELEMENT;
            }
            s
        })
        .sum()
}

/// Element affinity normalized into [0.85, 1.15].
pub fn five_elements_match(birth: &ElementDistribution, year: &ElementDistribution) -> f64 {
    (MODIFIER_MIN + (element_affinity(birth, year) / 10.0) * 0.3).clamp(MODIFIER_MIN, MODIFIER_MAX)
}
