//! Persisted and synchronized segment state.
//!
//! The same shape is written to disk on save and pushed to mirrors whenever a segment changes
//! observably, plus once whenever a segment is loaded.

use serde::{Deserialize, Serialize};

use crate::types::{BlockPos, Face, ItemType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub tier: u8,
    /// 6-bit mask of connected faces, bit index = [`Face::index`].
    pub connections: u8,
    /// 6-bit mask of manually blocked faces.
    pub blocked: u8,
    /// In-flight items in arrival order.
    pub items: Vec<ItemSnapshot>,
    pub round_robin_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub item_type: ItemType,
    pub count: u16,
    pub progress: f32,
    pub ticks_in_pipe: u32,
    pub direction: Option<Face>,
    pub source: Option<Face>,
    pub teleported: bool,
    #[serde(default)]
    pub parked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSnapshot {
    pub interval: u32,
    pub ticks_since_pull: u32,
}

/// One state push from the authority to its mirrors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncMessage {
    pub pos: BlockPos,
    /// `true` for the mandatory snapshot sent when a segment is loaded.
    pub full: bool,
    pub snapshot: SegmentSnapshot,
}

/// Receiver of state pushes. Transport and marshalling live behind this seam.
pub trait SyncSink {
    fn push(&mut self, message: SyncMessage);
}

impl SyncSink for Vec<SyncMessage> {
    fn push(&mut self, message: SyncMessage) {
        Vec::push(self, message);
    }
}

/// Discards every push, for worlds without observers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSync;

impl SyncSink for NoSync {
    fn push(&mut self, _message: SyncMessage) {}
}
