use crate::logistics::{ItemStorage, PipeSegment};
use crate::types::BlockPos;

/// What a segment finds when it looks at an adjacent block.
pub enum TransferTarget<'a> {
    /// Another item pipe segment.
    Segment(&'a mut PipeSegment),
    /// Anything exposing generic item storage.
    Inventory(&'a mut dyn ItemStorage),
}

/// World lookup handed to a segment while it ticks. The segment being updated is never
/// reachable through its own access, so neighbors can be borrowed mutably alongside it.
pub trait BlockAccess {
    /// Classifies the block at `pos`, or returns `None` when nothing there moves items.
    fn target(&mut self, pos: BlockPos) -> Option<TransferTarget<'_>>;
}
