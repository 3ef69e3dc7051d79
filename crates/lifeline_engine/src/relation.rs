//! Stem-to-stem and branch-to-branch relations between a birth pillar and
//! a cycle or annual pillar.

use lifeline_ganzhi::{Branch, Stem};
use serde::Serialize;

/// Relation of another stem to the birth stem, by forward distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StemRelation {
    /// Distance 0.
    Identical,
    /// Distance 1: the other polarity of the same element.
    SameElement,
    /// Distance 2-3: the element the birth stem generates.
    Generative,
    /// Distance 4-5: the element the birth stem controls.
    ReverseDestructive,
    /// Distance 6-7: the element that controls the birth stem.
    Destructive,
    /// Distance 8-9.
    Neutral,
}

impl StemRelation {
    pub const fn between(birth: Stem, other: Stem) -> Self {
        match (other.index() + 10 - birth.index()) % 10 {
            0 => Self::Identical,
            1 => Self::SameElement,
            2 | 3 => Self::Generative,
            4 | 5 => Self::ReverseDestructive,
            6 | 7 => Self::Destructive,
            _ => Self::Neutral,
        }
    }

    pub const fn factor(self) -> f64 {
        match self {
            Self::Identical => 1.08,
            Self::SameElement => 1.05,
            Self::Generative => 1.15,
            Self::ReverseDestructive => 0.92,
            Self::Destructive => 0.85,
            Self::Neutral => 1.0,
        }
    }
}

/// Relation between two branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchRelation {
    /// One of the six harmonizing pairs (liuhe).
    Harmony,
    /// Opposite branches (liuchong).
    Clash,
    Identical,
    Neutral,
}

impl BranchRelation {
    pub const fn between(birth: Branch, other: Branch) -> Self {
        let a = birth.index();
        let b = other.index();
        if (a + b) % 12 == 1 {
            // Zi-Chou, Yin-Hai, Mao-Xu, Chen-You, Si-Shen, Wu-Wei.
            Self::Harmony
        } else if (a + 12 - b) % 12 == 6 {
            Self::Clash
        } else if a == b {
            Self::Identical
        } else {
            Self::Neutral
        }
    }

    pub const fn factor(self) -> f64 {
        match self {
            Self::Harmony => 1.10,
            Self::Clash => 0.90,
            Self::Identical => 1.05,
            Self::Neutral => 1.0,
        }
    }
}

/// Stem relation multiplier.
pub const fn stem_relation(birth: Stem, other: Stem) -> f64 {
    StemRelation::between(birth, other).factor()
}

/// Branch relation multiplier.
pub const fn branch_relation(birth: Branch, other: Branch) -> f64 {
    BranchRelation::between(birth, other).factor()
}
