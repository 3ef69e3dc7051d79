//! The twelve earthly branches (dizhi).
//!
//! Each branch carries a principal element and one to three hidden stems
//! (canggan). Branches also label the twelve double-hours of the day,
//! starting with Zi at 23:00.

use serde::Serialize;

use crate::element::Element;
use crate::stem::Stem;

/// One of the twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[allow(missing_docs)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All twelve branches in order (index 0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_NAMES: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

const BRANCH_HANZI: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water, // Zi
    Element::Earth, // Chou
    Element::Wood,  // Yin
    Element::Wood,  // Mao
    Element::Earth, // Chen
    Element::Fire,  // Si
    Element::Fire,  // Wu
    Element::Earth, // Wei
    Element::Metal, // Shen
    Element::Metal, // You
    Element::Earth, // Xu
    Element::Water, // Hai
];

impl Branch {
    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Zi => 0,
            Self::Chou => 1,
            Self::Yin => 2,
            Self::Mao => 3,
            Self::Chen => 4,
            Self::Si => 5,
            Self::Wu => 6,
            Self::Wei => 7,
            Self::Shen => 8,
            Self::You => 9,
            Self::Xu => 10,
            Self::Hai => 11,
        }
    }

    /// Branch at an index (taken mod 12).
    pub const fn from_index(i: u8) -> Self {
        ALL_BRANCHES[(i % 12) as usize]
    }

    /// Double-hour branch for a clock hour: 23:00–00:59 is Zi,
    /// 01:00–02:59 is Chou, and so on.
    pub const fn from_hour(hour: u32) -> Self {
        Self::from_index((((hour + 1) / 2) % 12) as u8)
    }

    /// Pinyin name.
    pub fn name(self) -> &'static str {
        BRANCH_NAMES[self.index() as usize]
    }

    pub fn hanzi(self) -> &'static str {
        BRANCH_HANZI[self.index() as usize]
    }

    /// Principal element of the branch.
    pub const fn element(self) -> Element {
        BRANCH_ELEMENTS[self.index() as usize]
    }

    /// Hidden stems, principal stem first.
    pub const fn hidden_stems(self) -> &'static [Stem] {
        use Stem::*;
        match self {
            Self::Zi => &[Gui],
            Self::Chou => &[Ji, Gui, Xin],
            Self::Yin => &[Jia, Bing, Wu],
            Self::Mao => &[Yi],
            Self::Chen => &[Wu, Yi, Gui],
            Self::Si => &[Bing, Geng, Wu],
            Self::Wu => &[Ding, Ji],
            Self::Wei => &[Ji, Ding, Yi],
            Self::Shen => &[Geng, Ren, Wu],
            Self::You => &[Xin],
            Self::Xu => &[Wu, Xin, Ding],
            Self::Hai => &[Ren, Jia],
        }
    }

    /// Branch `n` steps further along the cycle.
    pub const fn offset(self, n: u8) -> Self {
        Self::from_index((self.index() + n % 12) % 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, b) in ALL_BRANCHES.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
            assert_eq!(Branch::from_index(i as u8), *b);
        }
    }

    #[test]
    fn double_hours() {
        assert_eq!(Branch::from_hour(23), Branch::Zi);
        assert_eq!(Branch::from_hour(0), Branch::Zi);
        assert_eq!(Branch::from_hour(1), Branch::Chou);
        assert_eq!(Branch::from_hour(2), Branch::Chou);
        assert_eq!(Branch::from_hour(8), Branch::Chen);
        assert_eq!(Branch::from_hour(12), Branch::Wu);
        assert_eq!(Branch::from_hour(22), Branch::Hai);
    }

    #[test]
    fn elements() {
        assert_eq!(Branch::Zi.element(), Element::Water);
        assert_eq!(Branch::Yin.element(), Element::Wood);
        assert_eq!(Branch::Wu.element(), Element::Fire);
        assert_eq!(Branch::You.element(), Element::Metal);
        assert_eq!(Branch::Xu.element(), Element::Earth);
    }

    #[test]
    fn principal_hidden_stem_matches_element() {
        for b in ALL_BRANCHES {
            let hidden = b.hidden_stems();
            assert!(!hidden.is_empty() && hidden.len() <= 3);
            assert_eq!(hidden[0].element(), b.element(), "{}", b.name());
        }
    }

    #[test]
    fn hidden_stem_total() {
        let total: usize = ALL_BRANCHES.iter().map(|b| b.hidden_stems().len()).sum();
        assert_eq!(total, 28);
    }

    #[test]
    fn names() {
        assert_eq!(Branch::Chen.name(), "Chen");
        assert_eq!(Branch::Chen.hanzi(), "辰");
    }
}
