//! Chinese sexagenary calendar for the lifeline workspace.
//!
//! This crate provides:
//! - Heavenly stems, earthly branches, five elements and ten-god roles
//! - The 60-cycle `Pillar` and the four-pillar chart (`Pillars`)
//! - Sun apparent longitude and the twelve jie solar terms
//! - Pillar computation for a civil instant in China Standard Time
//! - Decade-cycle (dayun) start and per-age cycle descriptors
//! - The `CalendricalAdapter` seam with the built-in `NativeCalendar`

pub mod adapter;
pub mod branch;
pub mod chart;
pub mod decade;
pub mod element;
pub mod error;
pub mod pillar;
pub mod solar_term;
pub mod stem;
pub mod ten_god;
pub mod util;

pub use adapter::{CalendricalAdapter, NativeCalendar};
pub use branch::{ALL_BRANCHES, Branch};
pub use chart::{day_pillar, hour_pillar, month_pillar, pillars_at, year_pillar};
pub use decade::{CycleDescriptor, DecadeStart, Gender, decade_start};
pub use element::{ALL_ELEMENTS, Element};
pub use error::CalendarError;
pub use pillar::{ALL_POSITIONS, CYCLE_LEN, Pillar, PillarPosition, Pillars};
pub use solar_term::{ALL_JIE, Jie, JieEvent, next_jie, prev_jie, sun_longitude_local};
pub use stem::{ALL_STEMS, Stem};
pub use ten_god::{ALL_TEN_GODS, TenGod, ten_god};
