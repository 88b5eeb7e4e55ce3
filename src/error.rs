//! Error types for pipe-logistics.
//!
//! Routing and transfer failures inside the simulation are recovered locally
//! and never show up here. These errors cover API misuse and bad persisted
//! or configured state.

use crate::types::{BlockPos, Face};
use thiserror::Error;

/// Result type for pipe-logistics operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A block already occupies the requested position.
    #[error("position {0} is already occupied")]
    Occupied(BlockPos),

    /// No pipe segment exists at the requested position.
    #[error("no pipe segment at {0}")]
    NoSegment(BlockPos),

    /// A persisted tier id does not name a known tier.
    #[error("unknown pipe tier id {0}")]
    UnknownTier(u8),

    /// A persisted face mask has bits outside the six faces.
    #[error("face mask {0:#010b} has bits outside the six faces")]
    InvalidFaceMask(u8),

    /// A persisted segment lists a face as both connected and blocked.
    #[error("face {0:?} is both connected and blocked")]
    ConflictingMasks(Face),

    /// A persisted travelling item carries no items.
    #[error("travelling item at index {0} has an empty stack")]
    EmptyStack(usize),

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
