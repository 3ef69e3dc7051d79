//! The ten heavenly stems (tiangan).
//!
//! Stems alternate yang/yin and pair off by element:
//! Jia/Yi wood, Bing/Ding fire, Wu/Ji earth, Geng/Xin metal, Ren/Gui water.

use serde::Serialize;

use crate::element::Element;

/// One of the ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[allow(missing_docs)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All ten stems in order (index 0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = [
    "Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui",
];

const STEM_HANZI: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    /// 0-based index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Jia => 0,
            Self::Yi => 1,
            Self::Bing => 2,
            Self::Ding => 3,
            Self::Wu => 4,
            Self::Ji => 5,
            Self::Geng => 6,
            Self::Xin => 7,
            Self::Ren => 8,
            Self::Gui => 9,
        }
    }

    /// Stem at an index (taken mod 10).
    pub const fn from_index(i: u8) -> Self {
        ALL_STEMS[(i % 10) as usize]
    }

    /// Pinyin name.
    pub fn name(self) -> &'static str {
        STEM_NAMES[self.index() as usize]
    }

    pub fn hanzi(self) -> &'static str {
        STEM_HANZI[self.index() as usize]
    }

    /// Element of the stem: consecutive pairs share one element.
    pub const fn element(self) -> Element {
        Element::from_index(self.index() / 2)
    }

    /// Yang stems sit at even indices.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// Stem `n` steps further along the cycle.
    pub const fn offset(self, n: u8) -> Self {
        Self::from_index((self.index() + n % 10) % 10)
    }
}
