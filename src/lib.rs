//! Item transport pipes for a voxel sandbox.
//!
//! A world is a grid of pipe segments and storage blocks. Every tick each segment moves the
//! stacks inside it toward its exit faces, routes them at the block midpoint and hands them to
//! the next segment or into a terminal inventory. Pullers extract stacks from adjacent storage on
//! a fixed interval. [`PipeNetwork`] hosts the blocks and drives the tick; everything it does is
//! also available on [`PipeSegment`] for hosts that manage their own world.

pub mod config;
pub mod error;
pub mod logistics;
pub mod types;

pub use config::PipeConfig;
pub use error::{Error, Result};
pub use logistics::{
    Inventory, ItemDrop, ItemStorage, NoSync, PipeNetwork, PipeSegment, PipeTier, Role, Stack,
    SyncMessage, SyncSink, ToggleOutcome, TravellingItem,
};
pub use types::{BlockPos, Face, FaceSet, ItemType};
