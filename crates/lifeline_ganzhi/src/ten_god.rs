//! Ten-god (shishen) roles: how a stem relates to the day master.
//!
//! A role is fixed by the element relation between the day master and the
//! other stem, and by whether their polarities agree. The day pillar's own
//! stem carries the extra `DayMaster` label.

use serde::Serialize;

use crate::stem::Stem;

/// Ten-god role label (ten relations plus the day master itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGod {
    /// Same element, same polarity (Companion).
    BiJian,
    /// Same element, opposite polarity (Rob Wealth).
    JieCai,
    /// Generated by the day master, same polarity (Eating God).
    ShiShen,
    /// Generated by the day master, opposite polarity (Hurting Officer).
    ShangGuan,
    /// Controlled by the day master, same polarity (Indirect Wealth).
    PianCai,
    /// Controlled by the day master, opposite polarity (Direct Wealth).
    ZhengCai,
    /// Controls the day master, same polarity (Seven Killings).
    QiSha,
    /// Controls the day master, opposite polarity (Direct Officer).
    ZhengGuan,
    /// Generates the day master, same polarity (Indirect Resource).
    PianYin,
    /// Generates the day master, opposite polarity (Direct Resource).
    ZhengYin,
    /// The day stem itself.
    DayMaster,
}

/// All eleven labels.
pub const ALL_TEN_GODS: [TenGod; 11] = [
    TenGod::BiJian,
    TenGod::JieCai,
    TenGod::ShiShen,
    TenGod::ShangGuan,
    TenGod::PianCai,
    TenGod::ZhengCai,
    TenGod::QiSha,
    TenGod::ZhengGuan,
    TenGod::PianYin,
    TenGod::ZhengYin,
    TenGod::DayMaster,
];

impl TenGod {
    /// 0-based index in [`ALL_TEN_GODS`].
    pub const fn index(self) -> u8 {
        match self {
            Self::BiJian => 0,
            Self::JieCai => 1,
            Self::ShiShen => 2,
            Self::ShangGuan => 3,
            Self::PianCai => 4,
            Self::ZhengCai => 5,
            Self::QiSha => 6,
            Self::ZhengGuan => 7,
            Self::PianYin => 8,
            Self::ZhengYin => 9,
            Self::DayMaster => 10,
        }
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BiJian => "Bi Jian",
            Self::JieCai => "Jie Cai",
            Self::ShiShen => "Shi Shen",
            Self::ShangGuan => "Shang Guan",
            Self::PianCai => "Pian Cai",
            Self::ZhengCai => "Zheng Cai",
            Self::QiSha => "Qi Sha",
            Self::ZhengGuan => "Zheng Guan",
            Self::PianYin => "Pian Yin",
            Self::ZhengYin => "Zheng Yin",
            Self::DayMaster => "Ri Zhu",
        }
    }

    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::BiJian => "比肩",
            Self::JieCai => "劫财",
            Self::ShiShen => "食神",
            Self::ShangGuan => "伤官",
            Self::PianCai => "偏财",
            Self::ZhengCai => "正财",
            Self::QiSha => "七杀",
            Self::ZhengGuan => "正官",
            Self::PianYin => "偏印",
            Self::ZhengYin => "正印",
            Self::DayMaster => "日主",
        }
    }
}

/// Role of `other` seen from `day_master`.
///
/// Never returns [`TenGod::DayMaster`]; that label belongs to the day
/// pillar position, not to a stem pairing.
pub const fn ten_god(day_master: Stem, other: Stem) -> TenGod {
    let same_polarity = day_master.is_yang() == other.is_yang();
    // Steps from the day master's element to the other's along the
    // generating cycle.
    let steps = (other.element().index() + 5 - day_master.element().index()) % 5;
    match (steps, same_polarity) {
        (0, true) => TenGod::BiJian,
        (0, false) => TenGod::JieCai,
        (1, true) => TenGod::ShiShen,
        (1, false) => TenGod::ShangGuan,
        (2, true) => TenGod::PianCai,
        (2, false) => TenGod::ZhengCai,
        (3, true) => TenGod::QiSha,
        (3, false) => TenGod::ZhengGuan,
        (_, true) => TenGod::PianYin,
        (_, false) => TenGod::ZhengYin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem::ALL_STEMS;

    #[test]
    fn indices_sequential() {
        for (i, g) in ALL_TEN_GODS.iter().enumerate() {
            assert_eq!(g.index() as usize, i);
        }
    }

    #[test]
    fn jia_day_master_table() {
        use Stem::*;
        let expected = [
            (Jia, TenGod::BiJian),
            (Yi, TenGod::JieCai),
            (Bing, TenGod::ShiShen),
            (Ding, TenGod::ShangGuan),
            (Wu, TenGod::PianCai),
            (Ji, TenGod::ZhengCai),
            (Geng, TenGod::QiSha),
            (Xin, TenGod::ZhengGuan),
            (Ren, TenGod::PianYin),
            (Gui, TenGod::ZhengYin),
        ];
        for (other, role) in expected {
            assert_eq!(ten_god(Jia, other), role, "Jia vs {}", other.name());
        }
    }

    #[test]
    fn yin_day_master_flips_polarity_pairs() {
        // Yi (yin wood): Geng is yang metal → opposite polarity → Zheng Guan.
        assert_eq!(ten_god(Stem::Yi, Stem::Geng), TenGod::ZhengGuan);
        assert_eq!(ten_god(Stem::Yi, Stem::Xin), TenGod::QiSha);
        assert_eq!(ten_god(Stem::Yi, Stem::Gui), TenGod::PianYin);
    }

    #[test]
    fn self_pairing_is_companion() {
        for s in ALL_STEMS {
            assert_eq!(ten_god(s, s), TenGod::BiJian);
        }
    }

    #[test]
    fn never_day_master() {
        for a in ALL_STEMS {
            for b in ALL_STEMS {
                assert_ne!(ten_god(a, b), TenGod::DayMaster);
            }
        }
    }

    #[test]
    fn names() {
        assert_eq!(TenGod::ZhengYin.hanzi(), "正印");
        assert_eq!(TenGod::DayMaster.hanzi(), "日主");
    }
}
