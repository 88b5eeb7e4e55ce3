use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::PipeConfig;
use crate::error::{Error, Result};
use crate::logistics::{
    BlockAccess, ItemDrop, ItemStorage, PipeSegment, PipeTier, Role, SegmentSnapshot, Stack,
    SyncMessage, SyncSink, ToggleOutcome, TransferTarget,
};
use crate::types::{BlockPos, Face, ItemType};

/// Mutable view of every block except the segment currently being updated.
struct WorldView<'a> {
    segments: &'a mut BTreeMap<BlockPos, PipeSegment>,
    storages: &'a mut BTreeMap<BlockPos, Box<dyn ItemStorage>>,
}

impl BlockAccess for WorldView<'_> {
    fn target(&mut self, pos: BlockPos) -> Option<TransferTarget<'_>> {
        if let Some(segment) = self.segments.get_mut(&pos) {
            return Some(TransferTarget::Segment(segment));
        }
        self.storages
            .get_mut(&pos)
            .map(|storage| TransferTarget::Inventory(storage.as_mut()))
    }
}

/**
 * Hosts every loaded pipe segment and storage block of one world and drives them tick by tick.
 * Segments are updated one at a time in position order; while a segment runs it is lifted out of
 * the map so it can hand items to its neighbors through plain mutable borrows. After every
 * segment has run, those that changed observably push a snapshot to the sync sink.
 */
pub struct PipeNetwork {
    config: PipeConfig,
    role: Role,
    segments: BTreeMap<BlockPos, PipeSegment>,
    storages: BTreeMap<BlockPos, Box<dyn ItemStorage>>,
    tick_count: u64,
}

impl PipeNetwork {
    /// Creates an empty network after validating `config`.
    pub fn new(config: PipeConfig, role: Role) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            role,
            segments: BTreeMap::new(),
            storages: BTreeMap::new(),
            tick_count: 0,
        })
    }

    pub fn config(&self) -> &PipeConfig {
        &self.config
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn segment(&self, pos: BlockPos) -> Option<&PipeSegment> {
        self.segments.get(&pos)
    }

    pub fn segments(&self) -> impl Iterator<Item = &PipeSegment> {
        self.segments.values()
    }

    pub fn storage(&self, pos: BlockPos) -> Option<&dyn ItemStorage> {
        self.storages.get(&pos).map(|storage| storage.as_ref())
    }

    pub fn storage_mut(&mut self, pos: BlockPos) -> Option<&mut (dyn ItemStorage + 'static)> {
        self.storages.get_mut(&pos).map(|storage| storage.as_mut())
    }

    fn ensure_vacant(&self, pos: BlockPos) -> Result<()> {
        if self.segments.contains_key(&pos) || self.storages.contains_key(&pos) {
            return Err(Error::Occupied(pos));
        }
        Ok(())
    }

    /// Places an empty transport segment.
    pub fn place_segment(&mut self, pos: BlockPos, tier: PipeTier) -> Result<()> {
        self.ensure_vacant(pos)?;
        let segment = PipeSegment::new(pos, tier, self.config.tier_spec(tier));
        self.insert_segment(segment);
        Ok(())
    }

    /// Places an empty puller segment using the configured extraction interval.
    pub fn place_extraction_segment(&mut self, pos: BlockPos, tier: PipeTier) -> Result<()> {
        self.ensure_vacant(pos)?;
        let segment = PipeSegment::extraction(
            pos,
            tier,
            self.config.tier_spec(tier),
            self.config.extraction_interval_ticks,
        );
        self.insert_segment(segment);
        Ok(())
    }

    fn insert_segment(&mut self, segment: PipeSegment) {
        let pos = segment.pos();
        debug!(
            "placed {:?} segment at {} (puller: {})",
            segment.tier(),
            pos,
            segment.is_extraction()
        );
        self.segments.insert(pos, segment);
        self.notify_block_changed(pos);
    }

    /// Restores a saved segment and pushes its mandatory full snapshot.
    pub fn load_segment(
        &mut self,
        pos: BlockPos,
        snapshot: &SegmentSnapshot,
        sink: &mut dyn SyncSink,
    ) -> Result<()> {
        self.ensure_vacant(pos)?;
        let segment = PipeSegment::from_snapshot(pos, snapshot, &self.config)?;
        sink.push(SyncMessage {
            pos,
            full: true,
            snapshot: segment.snapshot(),
        });
        self.insert_segment(segment);
        Ok(())
    }

    /// Places an item storage block such as a chest or machine.
    pub fn place_storage(&mut self, pos: BlockPos, storage: impl ItemStorage + 'static) -> Result<()> {
        self.ensure_vacant(pos)?;
        self.storages.insert(pos, Box::new(storage));
        self.notify_block_changed(pos);
        Ok(())
    }

    /// Removes a storage block, handing it back with its contents.
    pub fn remove_storage(&mut self, pos: BlockPos) -> Option<Box<dyn ItemStorage>> {
        let storage = self.storages.remove(&pos)?;
        self.notify_block_changed(pos);
        Some(storage)
    }

    /// Breaks the segment at `pos`. Every item inside comes back as a drop.
    pub fn break_segment(&mut self, pos: BlockPos) -> Result<Vec<ItemDrop>> {
        let segment = self.segments.remove(&pos).ok_or(Error::NoSegment(pos))?;
        let drops = segment.into_drops();
        debug!("broke segment at {}, {} item drops", pos, drops.len());
        self.notify_block_changed(pos);
        Ok(drops)
    }

    /// Flags every segment adjacent to `pos` for connection recomputation on the next tick.
    pub fn notify_block_changed(&mut self, pos: BlockPos) {
        for face in Face::ALL {
            if let Some(neighbor) = self.segments.get_mut(&pos.offset(face)) {
                neighbor.mark_neighbor_changed();
            }
        }
    }

    /// Runs `f` on the segment at `pos` with the rest of the world reachable through
    /// [`BlockAccess`].
    fn with_segment<T>(
        &mut self,
        pos: BlockPos,
        f: impl FnOnce(&mut PipeSegment, &mut dyn BlockAccess) -> T,
    ) -> Result<T> {
        let mut segment = self.segments.remove(&pos).ok_or(Error::NoSegment(pos))?;
        let mut view = WorldView {
            segments: &mut self.segments,
            storages: &mut self.storages,
        };
        let result = f(&mut segment, &mut view);
        self.segments.insert(pos, segment);
        Ok(result)
    }

    /// Toggles the connection on `face` of the segment at `pos`, updating both ends of the edge.
    pub fn toggle_connection(&mut self, pos: BlockPos, face: Face) -> Result<ToggleOutcome> {
        if self.role == Role::Mirror {
            warn!("ignoring connection toggle at {} on a mirror", pos);
            return Ok(ToggleOutcome::Unchanged);
        }
        self.with_segment(pos, |segment, world| segment.toggle_connection(face, world))
    }

    /// Injects `stack` into the segment at `pos` through its insertion endpoint on `from`.
    /// Mirrors ignore injections; items only enter on the authority.
    pub fn insert_stack(&mut self, pos: BlockPos, from: Option<Face>, stack: Stack) -> Result<()> {
        if self.role == Role::Mirror {
            warn!("ignoring insertion of {:?} at {} on a mirror", stack, pos);
            return Ok(());
        }
        let segment = self.segments.get_mut(&pos).ok_or(Error::NoSegment(pos))?;
        let remainder = segment.inlet(from).insert(stack, from, false);
        debug_assert!(remainder.is_none(), "segment inlets accept everything");
        Ok(())
    }

    /// Advances the whole network by one tick and pushes snapshots of segments that changed.
    pub fn tick(&mut self, sink: &mut dyn SyncSink) {
        let role = self.role;
        let positions: Vec<BlockPos> = self.segments.keys().copied().collect();
        for pos in positions {
            // A segment can only disappear between ticks, never while one runs.
            if let Err(err) = self.with_segment(pos, |segment, world| segment.tick(role, world)) {
                warn!("skipping tick for {}: {}", pos, err);
            }
        }

        if role == Role::Authoritative {
            for (pos, segment) in self.segments.iter_mut() {
                if segment.take_sync_request() {
                    sink.push(SyncMessage {
                        pos: *pos,
                        full: false,
                        snapshot: segment.snapshot(),
                    });
                }
            }
        }

        self.tick_count += 1;
    }

    /// Runs `ticks` consecutive ticks.
    pub fn run(&mut self, ticks: u32, sink: &mut dyn SyncSink) {
        for _ in 0..ticks {
            self.tick(sink);
        }
    }

    /// Replaces a mirrored segment with the state carried by `message`. The authority owns its
    /// own state and ignores incoming syncs.
    pub fn apply_sync(&mut self, message: &SyncMessage) -> Result<()> {
        if self.role == Role::Authoritative {
            warn!("ignoring sync for {} on the authority", message.pos);
            return Ok(());
        }
        let segment = PipeSegment::from_snapshot(message.pos, &message.snapshot, &self.config)?;
        self.segments.insert(message.pos, segment);
        Ok(())
    }

    /// Items of `item_type` currently travelling through pipes.
    pub fn count_in_transit(&self, item_type: ItemType) -> u64 {
        self.segments
            .values()
            .map(|segment| segment.count_of(item_type))
            .sum()
    }

    /// Items of `item_type` resting in storage blocks.
    pub fn count_stored(&self, item_type: ItemType) -> u64 {
        self.storages
            .values()
            .map(|storage| storage.count_of(item_type))
            .sum()
    }
}
