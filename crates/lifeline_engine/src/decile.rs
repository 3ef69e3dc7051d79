//! Ten-god (decile) score of a chart.
//!
//! Each pillar contributes the full weight of its stem's role and half the
//! weight of every hidden-stem role of its branch.

use lifeline_ganzhi::{ALL_POSITIONS, Pillars};

use crate::weights::RoleWeights;

/// Weight of a hidden-stem role relative to a primary role.
pub const SECONDARY_ROLE_SHARE: f64 = 0.5;

/// Weighted ten-god score of a chart.
pub fn decile_score(pillars: &Pillars, weights: &RoleWeights) -> f64 {
    ALL_POSITIONS
        .into_iter()
        .map(|position| {
            let primary = weights.get(pillars.primary_role(position));
            let secondary: f64 = pillars
                .secondary_roles(position)
                .map(|role| SECONDARY_ROLE_SHARE * weights.get(role))
                .sum();
            primary + secondary
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_ganzhi::pillars_at;
    use lifeline_time::CivilTime;

    #[test]
    fn millennium_chart() {
        // 己卯 丙子 戊午 戊午, day master 戊.
        // Primary: JieCai 0.9 + PianYin 1.7 + DayMaster 1.0 + BiJian 1.0.
        // Hidden: 卯[乙 ZhengGuan], 子[癸 ZhengCai], 午[丁 ZhengYin, 己 JieCai] ×2.
        let p = pillars_at(&CivilTime::new(2000, 1, 1, 12, 0).unwrap()).unwrap();
        let expected = 0.9 + 1.7 + 1.0 + 1.0 + 0.5 * (1.6 + 1.4 + 2.0 * (1.8 + 0.9));
        assert!((decile_score(&p, &RoleWeights::default()) - expected).abs() < 1e-12);
    }
}
