//! Five-element distribution of a chart and its weighted score.

use lifeline_ganzhi::{ALL_ELEMENTS, Element, Pillars};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::weights::ElementWeights;

/// Count of each element over the eight chart symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ElementDistribution {
    counts: [u8; 5],
}

impl ElementDistribution {
    /// Classify the four stems and four branches of a chart.
    pub fn from_pillars(pillars: &Pillars) -> Self {
        let mut counts = [0u8; 5];
        for (_, pillar) in pillars.iter() {
            counts[pillar.stem().element().index() as usize] += 1;
            counts[pillar.branch().element().index() as usize] += 1;
        }
        Self { counts }
    }

    #[cfg(test)]
    pub(crate) const fn from_counts(counts: [u8; 5]) -> Self {
        Self { counts }
    }

    pub const fn count(&self, element: Element) -> u8 {
        self.counts[element.index() as usize]
    }

    pub const fn has(&self, element: Element) -> bool {
        self.count(element) > 0
    }

    /// Always 8 for a chart-derived distribution.
    pub fn total(&self) -> u8 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, u8)> {
        let counts = self.counts;
        ALL_ELEMENTS
            .into_iter()
            .map(move |e| (e, counts[e.index() as usize]))
    }

    /// Weighted sum of the counts.
    pub fn score(&self, weights: &ElementWeights) -> f64 {
        self.iter()
            .map(|(e, n)| n as f64 * weights.get(e))
            .sum()
    }
}

impl Serialize for ElementDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ALL_ELEMENTS.len()))?;
        for (element, count) in self.iter() {
            map.serialize_entry(&element, &count)?;
        }
        map.end()
    }
}

/// Element distribution of a chart.
pub fn element_distribution(pillars: &Pillars) -> ElementDistribution {
    ElementDistribution::from_pillars(pillars)
}

/// Weighted elemental score of a chart.
pub fn elemental_score(pillars: &Pillars, weights: &ElementWeights) -> f64 {
    element_distribution(pillars).score(weights)
}
