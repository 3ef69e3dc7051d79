//! The five elements (wuxing) and their generating/controlling cycles.
//!
//! Elements are ordered along the generating cycle:
//! Wood → Fire → Earth → Metal → Water → Wood.
//! The controlling cycle skips one step: Wood controls Earth, Earth
//! controls Water, and so on.

use serde::Serialize;

/// One of the five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in generating order.
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// 0-based position in the generating cycle (Wood=0 .. Water=4).
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Element at a cycle index (taken mod 5).
    pub const fn from_index(i: u8) -> Self {
        ALL_ELEMENTS[(i % 5) as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// The element this one generates (one step along the cycle).
    pub const fn generated(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The element that controls this one (three steps along the cycle).
    pub const fn controller(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, e) in ALL_ELEMENTS.iter().enumerate() {
            assert_eq!(e.index() as usize, i);
            assert_eq!(Element::from_index(i as u8), *e);
        }
    }

    #[test]
    fn generating_cycle() {
        assert_eq!(Element::Wood.generated(), Element::Fire);
        assert_eq!(Element::Fire.generated(), Element::Earth);
        assert_eq!(Element::Water.generated(), Element::Wood);
    }

    #[test]
    fn controlling_cycle() {
        assert_eq!(Element::Earth.controller(), Element::Wood);
        assert_eq!(Element::Water.controller(), Element::Earth);
        assert_eq!(Element::Wood.controller(), Element::Metal);
    }

    #[test]
    fn controller_of_generated_generates_self() {
        for e in ALL_ELEMENTS {
            assert_eq!(e.generated().controller().generated(), e);
            assert_ne!(e.controller(), e.generated());
        }
    }

    #[test]
    fn names() {
        assert_eq!(Element::Metal.name(), "Metal");
        assert_eq!(Element::Water.hanzi(), "水");
    }
}
