//! Core logistics primitives: pipe segments, the items travelling through them, and the storage
//! they deliver to.

pub mod access;
pub mod extraction;
pub mod inventory;
pub mod network;
pub mod routing;
pub mod segment;
pub mod snapshot;
pub mod stack;
pub mod tier;
pub mod topology;
pub mod travelling_item;

#[cfg(test)]
mod tests;

// Re-export the main types for easier access
pub use access::{BlockAccess, TransferTarget};
pub use extraction::Extractor;
pub use inventory::{Inventory, ItemStorage, SideAccess};
pub use network::PipeNetwork;
pub use routing::{Candidates, select_direction};
pub use segment::{ItemDrop, PipeSegment, Role, SegmentInlet, ToggleOutcome};
pub use snapshot::{
    ExtractionSnapshot, ItemSnapshot, NoSync, SegmentSnapshot, SyncMessage, SyncSink,
};
pub use stack::Stack;
pub use tier::{PipeTier, TierSpec};
pub use topology::{ConnectionTopology, edge_open};
pub use travelling_item::{MIDPOINT, TravellingItem};
