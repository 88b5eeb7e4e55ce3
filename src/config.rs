//! Tunable parameters for a pipe network.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logistics::{PipeTier, TierSpec};

/// Ticks between extraction attempts of a puller segment.
pub const DEFAULT_EXTRACTION_INTERVAL: u32 = 20;

/// Network-wide configuration. Every field has a default, so a partial TOML
/// document only needs to name what it changes:
///
/// ```toml
/// extraction_interval_ticks = 40
///
/// [tiers.elite]
/// speed = 1
/// extraction_cap = 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeConfig {
    pub extraction_interval_ticks: u32,
    pub tiers: TierOverrides,
}

/// Optional per-tier replacements for [`PipeTier::default_spec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierOverrides {
    pub basic: Option<TierSpec>,
    pub improved: Option<TierSpec>,
    pub advanced: Option<TierSpec>,
    pub elite: Option<TierSpec>,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            extraction_interval_ticks: DEFAULT_EXTRACTION_INTERVAL,
            tiers: TierOverrides::default(),
        }
    }
}

impl PipeConfig {
    /// Parses and validates a TOML configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PipeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.extraction_interval_ticks == 0 {
            return Err(Error::InvalidConfig(
                "extraction_interval_ticks must be at least 1".to_string(),
            ));
        }

        for tier in PipeTier::ALL {
            let spec = self.tier_spec(tier);
            if spec.speed == 0 {
                return Err(Error::InvalidConfig(format!(
                    "tier {tier:?} must take at least one tick per block"
                )));
            }
            if spec.extraction_cap == 0 {
                return Err(Error::InvalidConfig(format!(
                    "tier {tier:?} must extract at least one item"
                )));
            }
        }

        Ok(())
    }

    /// Returns the effective parameters for `tier`.
    pub fn tier_spec(&self, tier: PipeTier) -> TierSpec {
        let overridden = match tier {
            PipeTier::Basic => self.tiers.basic,
            PipeTier::Improved => self.tiers.improved,
            PipeTier::Advanced => self.tiers.advanced,
            PipeTier::Elite => self.tiers.elite,
        };
        overridden.unwrap_or_else(|| tier.default_spec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PipeConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, PipeConfig::default());
        assert_eq!(config.extraction_interval_ticks, 20);
        assert_eq!(config.tier_spec(PipeTier::Improved).speed, 10);
    }

    #[test]
    fn tier_overrides_apply_only_to_named_tiers() {
        let config = PipeConfig::from_toml_str(
            r#"
            extraction_interval_ticks = 40

            [tiers.elite]
            speed = 1
            extraction_cap = 32
            "#,
        )
        .expect("config parses");

        assert_eq!(config.extraction_interval_ticks, 40);
        assert_eq!(
            config.tier_spec(PipeTier::Elite),
            TierSpec {
                speed: 1,
                extraction_cap: 32
            }
        );
        assert_eq!(
            config.tier_spec(PipeTier::Basic),
            PipeTier::Basic.default_spec()
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = PipeConfig::from_toml_str("extraction_interval_ticks = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        let err = PipeConfig::from_toml_str("extraction_interval_ticks = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
