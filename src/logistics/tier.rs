use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Speed and throughput class of a pipe segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeTier {
    Basic,
    Improved,
    Advanced,
    Elite,
}

/// Resolved movement and extraction parameters for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSpec {
    /// Ticks an item needs to cross one block. Lower is faster.
    pub speed: u32,
    /// Most items a puller of this tier removes from a slot per cycle.
    pub extraction_cap: u16,
}

impl PipeTier {
    pub const ALL: [PipeTier; 4] = [
        PipeTier::Basic,
        PipeTier::Improved,
        PipeTier::Advanced,
        PipeTier::Elite,
    ];

    /// Stable id used in persisted and synced state.
    pub fn id(self) -> u8 {
        match self {
            PipeTier::Basic => 0,
            PipeTier::Improved => 1,
            PipeTier::Advanced => 2,
            PipeTier::Elite => 3,
        }
    }

    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(PipeTier::Basic),
            1 => Ok(PipeTier::Improved),
            2 => Ok(PipeTier::Advanced),
            3 => Ok(PipeTier::Elite),
            other => Err(Error::UnknownTier(other)),
        }
    }

    /// Built-in parameters, used unless a [`crate::PipeConfig`] overrides them.
    pub fn default_spec(self) -> TierSpec {
        match self {
            PipeTier::Basic => TierSpec {
                speed: 20,
                extraction_cap: 1,
            },
            PipeTier::Improved => TierSpec {
                speed: 10,
                extraction_cap: 8,
            },
            PipeTier::Advanced => TierSpec {
                speed: 5,
                extraction_cap: 16,
            },
            PipeTier::Elite => TierSpec {
                speed: 2,
                extraction_cap: 64,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ids_are_stable() {
        for tier in PipeTier::ALL {
            assert_eq!(PipeTier::from_id(tier.id()).expect("known id"), tier);
        }
        assert!(matches!(PipeTier::from_id(9), Err(Error::UnknownTier(9))));
    }

    #[test]
    fn higher_tiers_are_faster() {
        let speeds: Vec<u32> = PipeTier::ALL
            .iter()
            .map(|tier| tier.default_spec().speed)
            .collect();
        assert!(speeds.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(PipeTier::Basic.default_spec().speed, 20);
        assert_eq!(PipeTier::Elite.default_spec().speed, 2);
    }
}
