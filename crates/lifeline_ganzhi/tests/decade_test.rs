//! Integration tests for decade-cycle start computation.

use lifeline_ganzhi::{CalendricalAdapter, CycleDescriptor, Gender, NativeCalendar, decade_start};
use lifeline_time::CivilTime;

fn birth(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> CivilTime {
    CivilTime::new(y, mo, d, h, mi).unwrap()
}

/// 庚 (yang) year: males run forward to Mangzhong, females back to Lixia.
#[test]
fn yang_year_directions() {
    let b = birth(1990, 5, 15, 8, 30);
    let male = decade_start(&b, Gender::Male).unwrap();
    assert!(male.forward);
    assert_eq!((male.years, male.months), (7, 3));

    let female = decade_start(&b, Gender::Female).unwrap();
    assert!(!female.forward);
    assert_eq!((female.years, female.months), (3, 1));
}

/// 己 (yin) year: the directions swap.
#[test]
fn yin_year_directions() {
    let b = birth(2000, 1, 1, 12, 0);
    let male = decade_start(&b, Gender::Male).unwrap();
    let female = decade_start(&b, Gender::Female).unwrap();
    assert!(!male.forward);
    assert!(female.forward);
    assert_eq!((male.years, male.months), (8, 2));
    assert_eq!((female.years, female.months), (1, 7));
}

/// Birth hours before Lichun count to Lichun itself.
#[test]
fn forward_span_to_same_day_term() {
    let s = decade_start(&birth(2024, 2, 4, 12, 0), Gender::Female).unwrap();
    assert!(s.forward);
    assert_eq!((s.years, s.months, s.days), (0, 0, 20));
    assert!(s.start_age() < 1.0);
}

#[test]
fn start_never_exceeds_a_solar_month() {
    for (y, m) in [(1951, 3), (1966, 7), (1988, 10), (2003, 12), (2019, 6)] {
        for gender in [Gender::Male, Gender::Female] {
            let s = decade_start(&birth(y, m, 17, 14, 0), gender).unwrap();
            // 31 days at most -> 10 years 4 months.
            assert!(s.start_age() <= 10.34, "{y}-{m} {gender}: {s:?}");
            assert!(s.months < 12);
        }
    }
}

#[test]
fn cycle_indices_over_a_lifetime() {
    let b = birth(1990, 5, 15, 8, 30);
    let cal = NativeCalendar;
    let indices: Vec<i32> = (0..80)
        .map(|age| cal.decade_cycle(&b, Gender::Male, age).index)
        .collect();
    assert!(indices[..8].iter().all(|&i| i == -1));
    assert_eq!(indices[8], 0);
    assert_eq!(indices[79], 7);
    assert!(indices.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn factors_stay_in_range() {
    for i in -1..40 {
        let c = if i < 0 {
            CycleDescriptor::BEFORE_START
        } else {
            CycleDescriptor::for_index(i)
        };
        assert!((0.85..=1.1125 + 1e-12).contains(&c.factor) || c.factor == 1.0);
    }
}
