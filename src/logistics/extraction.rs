use tracing::trace;

use crate::logistics::{BlockAccess, Stack, TransferTarget};
use crate::types::{BlockPos, Face, FaceSet};

/**
 * Pull schedule of an extraction (puller) segment. Every `interval` ticks the segment scans its
 * connected storage neighbors in face order and pulls from the first non-empty slot it finds.
 * Exactly one slot of one neighbor is drained per cycle, capped by the tier's extraction amount.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    interval: u32,
    ticks_since_pull: u32,
}

impl Extractor {
    pub fn new(interval: u32) -> Self {
        debug_assert!(interval > 0, "extraction interval must be non-zero");
        Self {
            interval,
            ticks_since_pull: 0,
        }
    }

    /// Restores a schedule mid-cycle.
    pub fn resume(interval: u32, ticks_since_pull: u32) -> Self {
        Self {
            interval: interval.max(1),
            ticks_since_pull: ticks_since_pull.min(interval),
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn ticks_since_pull(&self) -> u32 {
        self.ticks_since_pull
    }

    /// Counts one tick and reports whether a pull is due this tick.
    pub(crate) fn tick(&mut self) -> bool {
        self.ticks_since_pull += 1;
        if self.ticks_since_pull < self.interval {
            return false;
        }
        self.ticks_since_pull = 0;
        true
    }

    /// Removes up to `cap` items from the first non-empty slot of the first storage neighbor
    /// among `connections` that holds anything. Returns the stack together with the face it was
    /// pulled through, or `None` if that slot refuses extraction.
    pub(crate) fn pull(
        pos: BlockPos,
        connections: FaceSet,
        cap: u16,
        world: &mut dyn BlockAccess,
    ) -> Option<(Stack, Face)> {
        for face in connections.iter() {
            let Some(TransferTarget::Inventory(storage)) = world.target(pos.offset(face)) else {
                continue;
            };

            let facing = face.opposite();
            let Some(side) = [Some(facing), None]
                .into_iter()
                .find(|side| storage.exposes(*side))
            else {
                continue;
            };

            let Some(slot) = (0..storage.slot_count())
                .find(|slot| storage.stack_in_slot(*slot).is_some_and(|stack| !stack.is_empty()))
            else {
                continue;
            };

            // only the first non-empty slot of the first stocked neighbor is tried
            let stack = storage
                .extract(slot, cap, side, false)
                .filter(|stack| !stack.is_empty());
            match &stack {
                Some(stack) => {
                    trace!("puller {} took {:?} from slot {} via {:?}", pos, stack, slot, face)
                }
                None => trace!("puller {} found slot {} via {:?} locked", pos, slot, face),
            }
            return stack.map(|stack| (stack, face));
        }

        None
    }
}
