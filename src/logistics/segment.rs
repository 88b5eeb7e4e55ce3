use tracing::{debug, trace};

use crate::config::PipeConfig;
use crate::error::{self, Error};
use crate::logistics::routing::{Candidates, select_direction};
use crate::logistics::snapshot::{ExtractionSnapshot, ItemSnapshot, SegmentSnapshot};
use crate::logistics::topology::edge_open;
use crate::logistics::{
    BlockAccess, ConnectionTopology, Extractor, ItemStorage, PipeTier, Stack, TierSpec,
    TransferTarget, TravellingItem,
};
use crate::types::{BlockPos, Face, FaceSet, ItemType};

/// Which side of the simulation a tick runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Owns routing and topology; the only side that moves items between blocks.
    Authoritative,
    /// Replays item movement for display between snapshots and never routes.
    Mirror,
}

/// A stack ejected into the world as a physical pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDrop {
    pub pos: BlockPos,
    pub stack: Stack,
}

/// Result of toggling one face with the wrench.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Blocked,
    Unblocked { reconnected: bool },
    Unchanged,
}

/**
 * One pipe block. A segment owns the items currently inside it and the connection state of its
 * six faces. Each tick moves every item forward by `1 / speed` blocks; at the midpoint the item
 * commits to an output face and at the exit it is handed to the neighbor behind that face. A
 * rejected hand-off re-routes the item, bounces it back toward where it came from, or parks it
 * until a route opens. Items only ever leave by delivery or by becoming drops when the block
 * breaks.
 *
 * A segment carrying an [`Extractor`] is a puller: on top of the transport behavior it pulls
 * one stack from an adjacent storage every extraction interval.
 */
#[derive(Debug, Clone)]
pub struct PipeSegment {
    pos: BlockPos,
    tier: PipeTier,
    spec: TierSpec,
    topology: ConnectionTopology,
    // arrival order
    items: Vec<TravellingItem>,
    // shared by every routing decision this segment makes
    round_robin_index: u32,
    connections_dirty: bool,
    needs_sync: bool,
    extractor: Option<Extractor>,
}

impl PipeSegment {
    /// Creates an empty transport segment. Its connections are computed on its first tick.
    pub fn new(pos: BlockPos, tier: PipeTier, spec: TierSpec) -> Self {
        debug_assert!(spec.speed > 0, "speed must be non-zero");

        Self {
            pos,
            tier,
            spec,
            topology: ConnectionTopology::new(),
            items: Vec::new(),
            round_robin_index: 0,
            connections_dirty: true,
            needs_sync: false,
            extractor: None,
        }
    }

    /// Creates an empty puller segment that extracts every `interval` ticks.
    pub fn extraction(pos: BlockPos, tier: PipeTier, spec: TierSpec, interval: u32) -> Self {
        let mut segment = Self::new(pos, tier, spec);
        segment.extractor = Some(Extractor::new(interval));
        segment
    }

    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    pub fn tier(&self) -> PipeTier {
        self.tier
    }

    pub fn spec(&self) -> TierSpec {
        self.spec
    }

    pub fn topology(&self) -> &ConnectionTopology {
        &self.topology
    }

    pub fn connections(&self) -> FaceSet {
        self.topology.connections()
    }

    pub fn blocked(&self) -> FaceSet {
        self.topology.blocked()
    }

    pub fn items(&self) -> &[TravellingItem] {
        &self.items
    }

    pub fn round_robin_index(&self) -> u32 {
        self.round_robin_index
    }

    pub fn extractor(&self) -> Option<&Extractor> {
        self.extractor.as_ref()
    }

    pub fn is_extraction(&self) -> bool {
        self.extractor.is_some()
    }

    /// Counts the items of `item_type` currently travelling through this segment.
    pub fn count_of(&self, item_type: ItemType) -> u64 {
        self.items
            .iter()
            .filter(|item| item.stack.item_type == item_type)
            .map(|item| item.stack.item_count as u64)
            .sum()
    }

    /// Accepts `stack` unconditionally as a new item entering through `from`.
    /// Progress is not advanced here; the item first moves on this segment's own tick.
    pub fn receive(&mut self, stack: Stack, from: Option<Face>) {
        if stack.is_empty() {
            return;
        }
        trace!("segment {} received {:?} from {:?}", self.pos, stack, from);
        self.items.push(TravellingItem::new(stack, from));
        self.needs_sync = true;
    }

    /// Topological acceptance check used by neighbors before handing over an item. Capacity is
    /// never a concern since [`PipeSegment::receive`] always succeeds.
    pub fn can_receive(&self, _stack: &Stack, from: Face) -> bool {
        self.topology.is_connected(from)
    }

    /// Insertion endpoint for external code. `from` is the face the stack enters through, or
    /// `None` for an injection with no particular side.
    pub fn inlet(&mut self, from: Option<Face>) -> SegmentInlet<'_> {
        SegmentInlet {
            segment: self,
            from,
        }
    }

    /// Flags the connections for recomputation on the next tick.
    pub fn mark_neighbor_changed(&mut self) {
        self.connections_dirty = true;
    }

    pub fn needs_connection_update(&self) -> bool {
        self.connections_dirty
    }

    /// Returns `true` once if something observable changed since the last call.
    pub fn take_sync_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_sync)
    }

    /// Runs one tick. Mirrors only interpolate progress for display.
    pub fn tick(&mut self, role: Role, world: &mut dyn BlockAccess) {
        match role {
            Role::Authoritative => self.simulate(world),
            Role::Mirror => self.interpolate(),
        }
    }

    fn interpolate(&mut self) {
        let speed = self.spec.speed;
        for item in self.items.iter_mut().filter(|item| !item.parked) {
            item.advance(speed);
            if item.progress > 1.0 {
                item.progress = 1.0;
            }
        }
    }

    fn simulate(&mut self, world: &mut dyn BlockAccess) {
        if self.connections_dirty {
            self.update_connections(world);
        }

        let pull_due = self.extractor.as_mut().is_some_and(Extractor::tick);
        if pull_due
            && let Some((stack, face)) = Extractor::pull(
                self.pos,
                self.topology.connections(),
                self.spec.extraction_cap,
                world,
            )
        {
            debug!("puller {} extracted {:?} through {:?}", self.pos, stack, face);
            self.receive(stack, Some(face));
        }

        let items = std::mem::take(&mut self.items);
        let mut kept = Vec::with_capacity(items.len());
        for item in items {
            if let Some(item) = self.step_item(item, world) {
                kept.push(item);
            }
        }
        self.items = kept;
    }

    fn step_item(
        &mut self,
        mut item: TravellingItem,
        world: &mut dyn BlockAccess,
    ) -> Option<TravellingItem> {
        item.ticks_in_pipe = item.ticks_in_pipe.saturating_add(1);

        if item.parked {
            return self.retry_parked(item, world);
        }

        let reached_end = item.advance(self.spec.speed);
        if item.direction.is_none() && item.past_midpoint() {
            item.direction = self.choose_output_direction(&item, world);
            if item.direction.is_some() {
                self.needs_sync = true;
            }
        }

        if !reached_end {
            return Some(item);
        }

        let direction = match item.direction {
            Some(direction) => Some(direction),
            None => self.choose_output_direction(&item, world),
        };
        let Some(direction) = direction else {
            debug!("segment {} has no route for {:?}, parking", self.pos, item.stack);
            item.park(None);
            self.needs_sync = true;
            return Some(item);
        };

        self.attempt_exit(item, direction, world)
    }

    fn retry_parked(
        &mut self,
        item: TravellingItem,
        world: &mut dyn BlockAccess,
    ) -> Option<TravellingItem> {
        let Some(direction) = self.choose_output_direction(&item, world) else {
            return Some(item);
        };
        self.attempt_exit(item, direction, world)
    }

    fn attempt_exit(
        &mut self,
        mut item: TravellingItem,
        direction: Face,
        world: &mut dyn BlockAccess,
    ) -> Option<TravellingItem> {
        let item_type = item.stack.item_type;
        match self.transfer_to_neighbor(item.stack, direction, world) {
            Ok(()) => {
                trace!(
                    "segment {} passed item {} on through {:?} after {} ticks",
                    self.pos, item_type, direction, item.ticks_in_pipe
                );
                self.needs_sync = true;
                None
            }
            Err(remainder) => {
                item.stack = remainder;
                Some(self.bounce(item, direction, world))
            }
        }
    }

    /// Handles an item whose hand-off through `failed` was rejected.
    fn bounce(
        &mut self,
        mut item: TravellingItem,
        failed: Face,
        world: &mut dyn BlockAccess,
    ) -> TravellingItem {
        if let Some(alternative) = self.choose_output_direction_excluding(&item, failed, world) {
            trace!(
                "segment {} rerouted {:?} from {:?} to {:?}",
                self.pos, item.stack, failed, alternative
            );
            item.restart_hop(Some(failed), Some(alternative));
            self.needs_sync = true;
            return item;
        }

        let back = match item.source {
            Some(source) if self.accepts_toward(source, &item.stack, world) => Some(source),
            _ => None,
        };
        if let Some(back) = back {
            debug!(
                "segment {} bounced {:?} back toward {:?}",
                self.pos, item.stack, back
            );
            item.restart_hop(Some(failed), Some(back));
            self.needs_sync = true;
            return item;
        }

        if !item.parked || item.direction != Some(failed) {
            debug!(
                "segment {} parked {:?} behind {:?}",
                self.pos, item.stack, failed
            );
            self.needs_sync = true;
        }
        item.park(Some(failed));
        item
    }

    /// Chooses the output face for `item`, or `None` when no neighbor can take it right now.
    pub fn choose_output_direction(
        &mut self,
        item: &TravellingItem,
        world: &mut dyn BlockAccess,
    ) -> Option<Face> {
        let candidates = self.candidates(item, None, world);
        select_direction(&candidates, &mut self.round_robin_index)
    }

    /// Same as [`PipeSegment::choose_output_direction`] with `excluded` removed from the
    /// candidates. Used when retrying after a failed transfer.
    pub fn choose_output_direction_excluding(
        &mut self,
        item: &TravellingItem,
        excluded: Face,
        world: &mut dyn BlockAccess,
    ) -> Option<Face> {
        let candidates = self.candidates(item, Some(excluded), world);
        select_direction(&candidates, &mut self.round_robin_index)
    }

    fn candidates(
        &self,
        item: &TravellingItem,
        excluded: Option<Face>,
        world: &mut dyn BlockAccess,
    ) -> Candidates {
        let mut candidates = Candidates::default();
        for face in self.topology.connections().iter() {
            if Some(face) == item.source || Some(face) == excluded {
                continue;
            }
            match world.target(self.pos.offset(face)) {
                Some(TransferTarget::Segment(neighbor)) => {
                    if neighbor.can_receive(&item.stack, face.opposite()) {
                        candidates.pipes.insert(face);
                    }
                }
                Some(TransferTarget::Inventory(storage)) => {
                    if storage_reachable(storage, face.opposite()) {
                        candidates.inventories.insert(face);
                    }
                }
                None => {}
            }
        }
        candidates
    }

    fn accepts_toward(&self, face: Face, stack: &Stack, world: &mut dyn BlockAccess) -> bool {
        if !self.topology.is_connected(face) {
            return false;
        }
        match world.target(self.pos.offset(face)) {
            Some(TransferTarget::Segment(neighbor)) => neighbor.can_receive(stack, face.opposite()),
            Some(TransferTarget::Inventory(storage)) => {
                storage_reachable(storage, face.opposite())
            }
            None => false,
        }
    }

    /// Hands `stack` to the neighbor behind `direction`. On failure the unaccepted remainder is
    /// returned; a terminal inventory may have taken part of the stack.
    pub fn transfer_to_neighbor(
        &self,
        stack: Stack,
        direction: Face,
        world: &mut dyn BlockAccess,
    ) -> Result<(), Stack> {
        if !self.topology.is_connected(direction) {
            return Err(stack);
        }

        let from = direction.opposite();
        match world.target(self.pos.offset(direction)) {
            Some(TransferTarget::Segment(neighbor)) => {
                if !neighbor.can_receive(&stack, from) {
                    return Err(stack);
                }
                neighbor.receive(stack, Some(from));
                Ok(())
            }
            Some(TransferTarget::Inventory(storage)) => insert_into_storage(storage, stack, from),
            None => Err(stack),
        }
    }

    /// Recomputes which faces are connected. Blocked faces stay disconnected. Returns `true` if
    /// the connection set changed.
    pub fn update_connections(&mut self, world: &mut dyn BlockAccess) -> bool {
        let mut next = FaceSet::EMPTY;
        for face in Face::ALL {
            if self.topology.is_blocked(face) {
                continue;
            }
            let connect = match world.target(self.pos.offset(face)) {
                Some(TransferTarget::Segment(neighbor)) => {
                    edge_open(&self.topology, face, neighbor.topology())
                }
                Some(TransferTarget::Inventory(storage)) => {
                    storage_reachable(storage, face.opposite())
                }
                None => false,
            };
            if connect {
                next.insert(face);
            }
        }

        self.connections_dirty = false;
        let changed = self.topology.replace_connections(next);
        if changed {
            debug!(
                "segment {} connections now {:?}",
                self.pos,
                self.topology.connections()
            );
            self.needs_sync = true;
        }
        changed
    }

    /// Cycles `face` between connected and blocked on this segment and, when the neighbor is a
    /// segment, on the matching face of the neighbor too. Unblocking clears both ends.
    pub fn toggle_connection(&mut self, face: Face, world: &mut dyn BlockAccess) -> ToggleOutcome {
        let neighbor_pos = self.pos.offset(face);
        let facing = face.opposite();

        if self.topology.is_connected(face) {
            self.topology.block(face);
            if let Some(TransferTarget::Segment(neighbor)) = world.target(neighbor_pos) {
                neighbor.topology.block(facing);
                neighbor.needs_sync = true;
            }
            self.needs_sync = true;
            debug!("segment {} blocked {:?}", self.pos, face);
            return ToggleOutcome::Blocked;
        }

        // blocked on either end of a segment edge counts as blocked here
        let blocked_by_neighbor = matches!(
            world.target(neighbor_pos),
            Some(TransferTarget::Segment(neighbor)) if neighbor.topology.is_blocked(facing)
        );
        if !self.topology.is_blocked(face) && !blocked_by_neighbor {
            return ToggleOutcome::Unchanged;
        }

        self.topology.unblock(face);
        let reconnected = match world.target(neighbor_pos) {
            Some(TransferTarget::Segment(neighbor)) => {
                neighbor.topology.unblock(facing);
                neighbor.needs_sync = true;
                if edge_open(&self.topology, face, &neighbor.topology) {
                    self.topology.connect(face);
                    neighbor.topology.connect(facing);
                    true
                } else {
                    false
                }
            }
            Some(TransferTarget::Inventory(storage)) => {
                storage_reachable(storage, facing) && self.topology.connect(face)
            }
            None => false,
        };
        self.needs_sync = true;
        debug!(
            "segment {} unblocked {:?}, reconnected: {}",
            self.pos, face, reconnected
        );
        ToggleOutcome::Unblocked { reconnected }
    }

    /// Breaks the segment, turning every resident item into a drop at its position.
    pub fn into_drops(self) -> Vec<ItemDrop> {
        let pos = self.pos;
        self.items
            .into_iter()
            .map(|item| ItemDrop {
                pos,
                stack: item.stack,
            })
            .collect()
    }

    pub fn snapshot(&self) -> SegmentSnapshot {
        SegmentSnapshot {
            tier: self.tier.id(),
            connections: self.topology.connections().bits(),
            blocked: self.topology.blocked().bits(),
            items: self
                .items
                .iter()
                .map(|item| ItemSnapshot {
                    item_type: item.stack.item_type,
                    count: item.stack.item_count,
                    progress: item.progress,
                    ticks_in_pipe: item.ticks_in_pipe,
                    direction: item.direction,
                    source: item.source,
                    teleported: item.teleported,
                    parked: item.parked,
                })
                .collect(),
            round_robin_index: self.round_robin_index,
            extraction: self.extractor.map(|extractor| ExtractionSnapshot {
                interval: extractor.interval(),
                ticks_since_pull: extractor.ticks_since_pull(),
            }),
        }
    }

    /// Rebuilds a segment from persisted or synced state. Tier parameters come from `config`.
    /// Connections are recomputed on the first authoritative tick; blocked faces are kept.
    pub fn from_snapshot(
        pos: BlockPos,
        snapshot: &SegmentSnapshot,
        config: &PipeConfig,
    ) -> error::Result<Self> {
        let tier = PipeTier::from_id(snapshot.tier)?;
        let connections = FaceSet::from_bits(snapshot.connections)
            .ok_or(Error::InvalidFaceMask(snapshot.connections))?;
        let blocked = FaceSet::from_bits(snapshot.blocked)
            .ok_or(Error::InvalidFaceMask(snapshot.blocked))?;
        let topology =
            ConnectionTopology::from_sets(connections, blocked).map_err(Error::ConflictingMasks)?;

        let mut items = Vec::with_capacity(snapshot.items.len());
        for (index, saved) in snapshot.items.iter().enumerate() {
            if saved.count == 0 {
                return Err(Error::EmptyStack(index));
            }
            items.push(TravellingItem {
                stack: Stack::new(saved.item_type, saved.count),
                progress: saved.progress.max(0.0),
                source: saved.source,
                direction: saved.direction,
                ticks_in_pipe: saved.ticks_in_pipe,
                teleported: saved.teleported,
                parked: saved.parked,
            });
        }

        Ok(Self {
            pos,
            tier,
            spec: config.tier_spec(tier),
            topology,
            items,
            round_robin_index: snapshot.round_robin_index,
            connections_dirty: true,
            needs_sync: false,
            extractor: snapshot
                .extraction
                .map(|saved| Extractor::resume(saved.interval, saved.ticks_since_pull)),
        })
    }
}

/// Face-restricted or unrestricted storage access toward a neighbor touching `facing`.
fn storage_reachable(storage: &dyn ItemStorage, facing: Face) -> bool {
    storage.exposes(Some(facing)) || storage.exposes(None)
}

/// Sides tried when inserting into a terminal inventory touched on `facing`: the touching face,
/// then the top so top-loaded machines work from any side, then unrestricted, then the bottom,
/// then the remaining lateral faces.
fn insertion_sides(facing: Face) -> Vec<Option<Face>> {
    let mut sides = Vec::with_capacity(7);
    let ordered = [Some(facing), Some(Face::Up), None, Some(Face::Down)]
        .into_iter()
        .chain(Face::LATERAL.into_iter().map(Some));
    for side in ordered {
        if !sides.contains(&side) {
            sides.push(side);
        }
    }
    sides
}

fn insert_into_storage(
    storage: &mut dyn ItemStorage,
    mut stack: Stack,
    facing: Face,
) -> Result<(), Stack> {
    for side in insertion_sides(facing) {
        if !storage.exposes(side) {
            continue;
        }
        match storage.insert(stack, side, false) {
            None => return Ok(()),
            Some(remainder) => stack = remainder,
        }
    }
    Err(stack)
}

/// Per-face insertion endpoint of a segment. Accepts everything and forwards it to
/// [`PipeSegment::receive`].
pub struct SegmentInlet<'a> {
    segment: &'a mut PipeSegment,
    from: Option<Face>,
}

impl ItemStorage for SegmentInlet<'_> {
    fn exposes(&self, side: Option<Face>) -> bool {
        side.is_none() || side == self.from
    }

    fn slot_count(&self) -> usize {
        0
    }

    fn stack_in_slot(&self, _slot: usize) -> Option<&Stack> {
        None
    }

    fn insert(&mut self, stack: Stack, _side: Option<Face>, simulate: bool) -> Option<Stack> {
        if !simulate {
            self.segment.receive(stack, self.from);
        }
        None
    }

    fn extract(
        &mut self,
        _slot: usize,
        _max: u16,
        _side: Option<Face>,
        _simulate: bool,
    ) -> Option<Stack> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logistics::Inventory;
    use std::collections::BTreeMap;

    /// Inventories only; the segment under test is held outside the map.
    #[derive(Default)]
    struct StorageWorld {
        storages: BTreeMap<BlockPos, Inventory>,
    }

    impl BlockAccess for StorageWorld {
        fn target(&mut self, pos: BlockPos) -> Option<TransferTarget<'_>> {
            self.storages
                .get_mut(&pos)
                .map(|storage| TransferTarget::Inventory(storage as &mut dyn ItemStorage))
        }
    }

    const ORIGIN: BlockPos = BlockPos::new(0, 0, 0);

    fn segment(speed: u32) -> PipeSegment {
        PipeSegment::new(
            ORIGIN,
            PipeTier::Improved,
            TierSpec {
                speed,
                extraction_cap: 8,
            },
        )
    }

    #[test]
    fn receive_appends_without_advancing() {
        let mut pipe = segment(10);
        pipe.receive(Stack::new(1, 3), Some(Face::West));
        pipe.receive(Stack::new(2, 1), None);

        assert_eq!(pipe.items().len(), 2);
        assert_eq!(pipe.items()[0].progress, 0.0);
        assert_eq!(pipe.items()[0].source, Some(Face::West));
        assert_eq!(pipe.items()[1].stack, Stack::new(2, 1));
        assert!(pipe.items().iter().all(|item| item.direction.is_none()));
        assert!(pipe.take_sync_request());
        assert!(!pipe.take_sync_request());
    }

    #[test]
    fn connections_follow_neighbors_and_respect_blocks() {
        let mut world = StorageWorld::default();
        world
            .storages
            .insert(ORIGIN.offset(Face::East), Inventory::new(1, 64));
        world
            .storages
            .insert(ORIGIN.offset(Face::Up), Inventory::new(1, 64));

        let mut pipe = segment(10);
        assert!(pipe.update_connections(&mut world));
        assert!(pipe.connections().contains(Face::East));
        assert!(pipe.connections().contains(Face::Up));
        assert_eq!(pipe.connections().len(), 2);

        assert_eq!(
            pipe.toggle_connection(Face::East, &mut world),
            ToggleOutcome::Blocked
        );
        pipe.update_connections(&mut world);
        assert!(!pipe.connections().contains(Face::East));
        assert!(pipe.blocked().contains(Face::East));

        assert_eq!(
            pipe.toggle_connection(Face::East, &mut world),
            ToggleOutcome::Unblocked { reconnected: true }
        );
        assert!(pipe.connections().contains(Face::East));
        assert_eq!(
            pipe.toggle_connection(Face::South, &mut world),
            ToggleOutcome::Unchanged
        );
    }

    #[test]
    fn direction_is_chosen_at_midpoint_never_toward_source() {
        let mut world = StorageWorld::default();
        world
            .storages
            .insert(ORIGIN.offset(Face::West), Inventory::new(1, 64));
        world
            .storages
            .insert(ORIGIN.offset(Face::East), Inventory::new(1, 64));

        let mut pipe = segment(10);
        pipe.receive(Stack::new(1, 1), Some(Face::West));

        for _ in 0..4 {
            pipe.tick(Role::Authoritative, &mut world);
        }
        assert_eq!(pipe.items()[0].direction, None);

        pipe.tick(Role::Authoritative, &mut world);
        assert_eq!(pipe.items()[0].direction, Some(Face::East));
    }

    #[test]
    fn insertion_tries_top_before_unrestricted() {
        let sides = insertion_sides(Face::West);
        assert_eq!(
            sides,
            vec![
                Some(Face::West),
                Some(Face::Up),
                None,
                Some(Face::Down),
                Some(Face::North),
                Some(Face::South),
                Some(Face::East),
            ]
        );
        let from_below = insertion_sides(Face::Up);
        assert_eq!(from_below.len(), 7);
        assert_eq!(from_below[0], Some(Face::Up));
        assert_eq!(from_below[1], None);
    }

    #[test]
    fn partial_insert_shrinks_the_travelling_stack() {
        let mut world = StorageWorld::default();
        let target = ORIGIN.offset(Face::East);
        world.storages.insert(target, Inventory::new(1, 4));

        let mut pipe = segment(2);
        pipe.update_connections(&mut world);
        pipe.receive(Stack::new(7, 10), Some(Face::West));

        pipe.tick(Role::Authoritative, &mut world);
        pipe.tick(Role::Authoritative, &mut world);

        assert_eq!(world.storages[&target].item_count(), 4);
        let item = &pipe.items()[0];
        assert_eq!(item.stack, Stack::new(7, 6));
        assert_eq!(item.progress, 0.0);
        assert!(item.parked);
        assert_eq!(pipe.count_of(7) + world.storages[&target].count_of(7), 10);
    }

    #[test]
    fn mirror_only_interpolates() {
        let mut world = StorageWorld::default();
        world
            .storages
            .insert(ORIGIN.offset(Face::East), Inventory::new(1, 64));

        let mut pipe = segment(4);
        pipe.receive(Stack::new(1, 1), Some(Face::West));
        pipe.take_sync_request();

        for _ in 0..10 {
            pipe.tick(Role::Mirror, &mut world);
        }

        assert!(pipe.connections().is_empty());
        assert_eq!(pipe.items().len(), 1);
        assert_eq!(pipe.items()[0].progress, 1.0);
        assert_eq!(pipe.items()[0].direction, None);
        assert!(!pipe.take_sync_request());
    }

    #[test]
    fn breaking_turns_items_into_drops() {
        let mut pipe = segment(10);
        pipe.receive(Stack::new(1, 5), None);
        pipe.receive(Stack::new(2, 7), Some(Face::Up));

        let drops = pipe.into_drops();
        assert_eq!(
            drops,
            vec![
                ItemDrop {
                    pos: ORIGIN,
                    stack: Stack::new(1, 5)
                },
                ItemDrop {
                    pos: ORIGIN,
                    stack: Stack::new(2, 7)
                },
            ]
        );
    }

    #[test]
    fn snapshot_rejects_overlapping_masks() {
        let mut snapshot = segment(10).snapshot();
        snapshot.connections = 0b01;
        snapshot.blocked = 0b01;
        let err = PipeSegment::from_snapshot(ORIGIN, &snapshot, &PipeConfig::default()).unwrap_err();
        assert!(matches!(err, Error::ConflictingMasks(Face::Down)));

        snapshot.blocked = 0b1000_0000;
        let err = PipeSegment::from_snapshot(ORIGIN, &snapshot, &PipeConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidFaceMask(_)));
    }
}
