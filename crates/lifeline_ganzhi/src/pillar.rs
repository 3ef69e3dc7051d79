//! Pillars: stem/branch pairs of the sexagenary cycle, and the four-pillar
//! chart built from them.
//!
//! The 60-cycle pairs stems and branches of equal parity, starting from
//! Jia-Zi (index 0) and ending at Gui-Hai (index 59).

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;
use crate::ten_god::{TenGod, ten_god};

/// Length of the sexagenary cycle.
pub const CYCLE_LEN: u8 = 60;

/// A (stem, branch) pair of the sexagenary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

impl Pillar {
    /// Pillar at a cycle position (taken mod 60).
    pub const fn from_cycle_index(i: u32) -> Self {
        let i = i % CYCLE_LEN as u32;
        Self {
            stem: Stem::from_index((i % 10) as u8),
            branch: Branch::from_index((i % 12) as u8),
        }
    }

    /// Pillar for a signed cycle offset (wrapped with `rem_euclid`).
    pub fn from_cycle_offset(offset: i64) -> Self {
        Self::from_cycle_index(offset.rem_euclid(CYCLE_LEN as i64) as u32)
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// 0-based position in the 60-cycle (Jia-Zi = 0).
    pub const fn cycle_index(self) -> u8 {
        let s = self.stem.index() as u16;
        let b = self.branch.index() as u16;
        ((6 * s + 60 - 5 * b) % 60) as u8
    }

    /// Traditional sound-element (nayin) name, shared by consecutive pairs.
    pub fn na_yin(self) -> &'static str {
        NA_YIN[(self.cycle_index() / 2) as usize].0
    }

    /// Element of the nayin.
    pub fn na_yin_element(self) -> Element {
        NA_YIN[(self.cycle_index() / 2) as usize].1
    }

    /// Hanzi rendering, e.g. "甲子".
    pub fn hanzi(self) -> String {
        format!("{}{}", self.stem.hanzi(), self.branch.hanzi())
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stem.name(), self.branch.name())
    }
}

#[rustfmt::skip]
const NA_YIN: [(&str, Element); 30] = [
    ("海中金", Element::Metal), ("炉中火", Element::Fire),  ("大林木", Element::Wood),
    ("路旁土", Element::Earth), ("剑锋金", Element::Metal), ("山头火", Element::Fire),
    ("涧下水", Element::Water), ("城头土", Element::Earth), ("白蜡金", Element::Metal),
    ("杨柳木", Element::Wood),  ("泉中水", Element::Water), ("屋上土", Element::Earth),
    ("霹雳火", Element::Fire),  ("松柏木", Element::Wood),  ("长流水", Element::Water),
    ("沙中金", Element::Metal), ("山下火", Element::Fire),  ("平地木", Element::Wood),
    ("壁上土", Element::Earth), ("金箔金", Element::Metal), ("覆灯火", Element::Fire),
    ("天河水", Element::Water), ("大驿土", Element::Earth), ("钗钏金", Element::Metal),
    ("桑柘木", Element::Wood),  ("大溪水", Element::Water), ("沙中土", Element::Earth),
    ("天上火", Element::Fire),  ("石榴木", Element::Wood),  ("大海水", Element::Water),
];

/// Position of a pillar within a four-pillar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

/// All four positions in chart order.
pub const ALL_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

impl PillarPosition {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

/// The four pillars of a moment (bazi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl Pillars {
    pub const fn new(year: Pillar, month: Pillar, day: Pillar, hour: Pillar) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    /// The day stem, reference point of every ten-god role.
    pub const fn day_master(&self) -> Stem {
        self.day.stem
    }

    pub const fn get(&self, position: PillarPosition) -> Pillar {
        match position {
            PillarPosition::Year => self.year,
            PillarPosition::Month => self.month,
            PillarPosition::Day => self.day,
            PillarPosition::Hour => self.hour,
        }
    }

    /// Pillars in chart order with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (PillarPosition, Pillar)> {
        let pillars = *self;
        ALL_POSITIONS.into_iter().map(move |p| (p, pillars.get(p)))
    }

    /// Ten-god role of the pillar's stem. The day pillar is the day master.
    pub const fn primary_role(&self, position: PillarPosition) -> TenGod {
        match position {
            PillarPosition::Day => TenGod::DayMaster,
            _ => ten_god(self.day_master(), self.get(position).stem),
        }
    }

    /// Ten-god roles of the branch's hidden stems, principal stem first.
    pub fn secondary_roles(&self, position: PillarPosition) -> impl Iterator<Item = TenGod> {
        let day_master = self.day_master();
        self.get(position)
            .branch
            .hidden_stems()
            .iter()
            .map(move |&s| ten_god(day_master, s))
    }
}

impl Display for Pillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.year.hanzi(),
            self.month.hanzi(),
            self.day.hanzi(),
            self.hour.hanzi()
        )
    }
}
