//! Scoring weights: the element and ten-god influence tables.
//!
//! Weights are immutable configuration owned by the engine. The defaults
//! are the reference tables; a TOML file may override any subset of keys:
//!
//! ```toml
//! [elements]
//! fire = 1.3
//!
//! [roles]
//! zheng_guan = 1.5
//! ```

use std::fs;
use std::path::Path;

use lifeline_ganzhi::{Element, TenGod};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-element weight applied to element counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementWeights {
    pub wood: f64,
    pub fire: f64,
    pub earth: f64,
    pub metal: f64,
    pub water: f64,
}

impl Default for ElementWeights {
    fn default() -> Self {
        Self {
            wood: 1.0,
            fire: 1.2,
            earth: 0.8,
            metal: 1.1,
            water: 0.9,
        }
    }
}

impl ElementWeights {
    pub const fn get(&self, element: Element) -> f64 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("elements.wood", self.wood),
            ("elements.fire", self.fire),
            ("elements.earth", self.earth),
            ("elements.metal", self.metal),
            ("elements.water", self.water),
        ]
    }
}

/// Per-role weight for the ten-god labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoleWeights {
    pub bi_jian: f64,
    pub jie_cai: f64,
    pub shi_shen: f64,
    pub shang_guan: f64,
    pub pian_cai: f64,
    pub zheng_cai: f64,
    pub qi_sha: f64,
    pub zheng_guan: f64,
    pub pian_yin: f64,
    pub zheng_yin: f64,
    pub day_master: f64,
}

impl Default for RoleWeights {
    fn default() -> Self {
        Self {
            bi_jian: 1.0,
            jie_cai: 0.9,
            shi_shen: 1.1,
            shang_guan: 1.2,
            pian_cai: 1.3,
            zheng_cai: 1.4,
            qi_sha: 1.5,
            zheng_guan: 1.6,
            pian_yin: 1.7,
            zheng_yin: 1.8,
            day_master: 1.0,
        }
    }
}

impl RoleWeights {
    pub const fn get(&self, role: TenGod) -> f64 {
        match role {
            TenGod::BiJian => self.bi_jian,
            TenGod::JieCai => self.jie_cai,
            TenGod::ShiShen => self.shi_shen,
            TenGod::ShangGuan => self.shang_guan,
            TenGod::PianCai => self.pian_cai,
            TenGod::ZhengCai => self.zheng_cai,
            TenGod::QiSha => self.qi_sha,
            TenGod::ZhengGuan => self.zheng_guan,
            TenGod::PianYin => self.pian_yin,
            TenGod::ZhengYin => self.zheng_yin,
            TenGod::DayMaster => self.day_master,
        }
    }

    fn entries(&self) -> [(&'static str, f64); 11] {
        [
            ("roles.bi_jian", self.bi_jian),
            ("roles.jie_cai", self.jie_cai),
            ("roles.shi_shen", self.shi_shen),
            ("roles.shang_guan", self.shang_guan),
            ("roles.pian_cai", self.pian_cai),
            ("roles.zheng_cai", self.zheng_cai),
            ("roles.qi_sha", self.qi_sha),
            ("roles.zheng_guan", self.zheng_guan),
            ("roles.pian_yin", self.pian_yin),
            ("roles.zheng_yin", self.zheng_yin),
            ("roles.day_master", self.day_master),
        ]
    }
}

/// Complete weighting scheme for the scorers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringWeights {
    pub elements: ElementWeights,
    pub roles: RoleWeights,
}

impl ScoringWeights {
    /// Parse and validate weights from TOML text. Missing keys keep their
    /// default values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let weights: Self = toml::from_str(s)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Load weights from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Every weight must be finite and strictly positive so that scores
    /// stay positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let elements = self.elements.entries();
        let roles = self.roles.entries();
        match elements
            .iter()
            .chain(roles.iter())
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
        {
            Some(&(key, value)) => Err(ConfigError::Invalid { key, value }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_ganzhi::ALL_TEN_GODS;

    #[test]
    fn default_tables() {
        let w = ScoringWeights::default();
        assert!((w.elements.get(Element::Fire) - 1.2).abs() < 1e-12);
        assert!((w.roles.get(TenGod::ZhengYin) - 1.8).abs() < 1e-12);
        let min = ALL_TEN_GODS
            .iter()
            .map(|&r| w.roles.get(r))
            .fold(f64::INFINITY, f64::min);
        assert!((min - 0.9).abs() < 1e-12);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            ScoringWeights::from_toml_str("").unwrap(),
            ScoringWeights::default()
        );
    }

    #[test]
    fn partial_override() {
        let w = ScoringWeights::from_toml_str("[elements]\nfire = 1.5\n[roles]\nqi_sha = 2.0\n")
            .unwrap();
        assert!((w.elements.fire - 1.5).abs() < 1e-12);
        assert!((w.elements.wood - 1.0).abs() < 1e-12);
        assert!((w.roles.qi_sha - 2.0).abs() < 1e-12);
        assert!((w.roles.zheng_yin - 1.8).abs() < 1e-12);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = ScoringWeights::from_toml_str("[elements]\nstone = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn non_positive_weight_rejected() {
        let err = ScoringWeights::from_toml_str("[roles]\njie_cai = 0.0\n").unwrap_err();
        match err {
            ConfigError::Invalid { key, .. } => assert_eq!(key, "roles.jie_cai"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ScoringWeights::load("/nonexistent/weights.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/weights.toml"));
    }
}
