use crate::logistics::Stack;
use crate::types::{Face, FaceSet, ItemType};

/// Generic item storage that pipes can probe, insert into and extract from.
///
/// Every mutating call takes a `simulate` flag: with `simulate == true` the call only reports
/// what would happen, so "would this be accepted" probes and real transfers share one shape.
/// `side` is the face of the storage block being accessed, `None` for unrestricted access.
pub trait ItemStorage {
    /// Returns `true` if storage is reachable through `side`.
    fn exposes(&self, side: Option<Face>) -> bool;

    fn slot_count(&self) -> usize;

    fn stack_in_slot(&self, slot: usize) -> Option<&Stack>;

    /// Inserts as much of `stack` as fits and returns what was left over, `None` when
    /// everything was accepted.
    fn insert(&mut self, stack: Stack, side: Option<Face>, simulate: bool) -> Option<Stack>;

    /// Removes up to `max` items from a single slot.
    fn extract(&mut self, slot: usize, max: u16, side: Option<Face>, simulate: bool)
    -> Option<Stack>;

    /// Counts every stored item of `item_type`.
    fn count_of(&self, item_type: ItemType) -> u64 {
        (0..self.slot_count())
            .filter_map(|slot| self.stack_in_slot(slot))
            .filter(|stack| stack.item_type == item_type)
            .map(|stack| stack.item_count as u64)
            .sum()
    }
}

/// Which faces of an [`Inventory`] block expose its slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideAccess {
    All,
    Only(FaceSet),
}

/// Models a slotted container such as a chest or a machine input.
///
/// Each slot holds at most one stack of up to `slot_limit` items. Incoming stacks top up slots
/// that already hold the same item type before filling empty slots. An optional filter limits
/// which item types are accepted. Unrestricted access (`side == None`) is always exposed; side
/// restrictions only apply to face-specific access.
#[derive(Debug, Clone)]
pub struct Inventory {
    slots: Vec<Option<Stack>>,
    slot_limit: u16,
    sides: SideAccess,
    item_filter: Option<Vec<ItemType>>,
}

impl Inventory {
    /// Creates an empty inventory reachable from every face.
    pub fn new(slot_count: usize, slot_limit: u16) -> Self {
        debug_assert!(slot_limit > 0, "slot limit must be non-zero");

        Self {
            slots: vec![None; slot_count],
            slot_limit,
            sides: SideAccess::All,
            item_filter: None,
        }
    }

    /// Restricts face-specific access to `sides`.
    pub fn with_sides(mut self, sides: SideAccess) -> Self {
        self.sides = sides;
        self
    }

    pub fn with_item_filter(mut self, filter: Option<Vec<ItemType>>) -> Self {
        self.item_filter = filter;
        self
    }

    /// Places `stack` directly into `slot`, replacing its contents. Intended for world setup.
    pub fn set_slot(&mut self, slot: usize, stack: Option<Stack>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = stack.filter(|stack| !stack.is_empty());
        }
    }

    pub fn slot_limit(&self) -> u16 {
        self.slot_limit
    }

    /// Returns the total number of items held across all slots.
    pub fn item_count(&self) -> u64 {
        self.slots
            .iter()
            .flatten()
            .map(|stack| stack.item_count as u64)
            .sum()
    }

    /// Returns `true` if no slot holds anything.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn accepts_type(&self, item_type: ItemType) -> bool {
        match &self.item_filter {
            Some(filter) => filter.contains(&item_type),
            None => true,
        }
    }
}

impl ItemStorage for Inventory {
    fn exposes(&self, side: Option<Face>) -> bool {
        match (side, self.sides) {
            (None, _) => true,
            (Some(_), SideAccess::All) => true,
            (Some(face), SideAccess::Only(faces)) => faces.contains(face),
        }
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn stack_in_slot(&self, slot: usize) -> Option<&Stack> {
        self.slots.get(slot)?.as_ref()
    }

    fn insert(&mut self, mut stack: Stack, side: Option<Face>, simulate: bool) -> Option<Stack> {
        if stack.is_empty() {
            return None;
        }
        if !self.exposes(side) || !self.accepts_type(stack.item_type) {
            return Some(stack);
        }

        let limit = self.slot_limit;

        // top up matching slots first
        for slot in self.slots.iter_mut().flatten() {
            if !slot.can_merge(&stack) || slot.item_count >= limit {
                continue;
            }
            let moved = (limit - slot.item_count).min(stack.item_count);
            if !simulate {
                slot.item_count += moved;
            }
            stack.item_count -= moved;
            if stack.is_empty() {
                return None;
            }
        }

        for slot in self.slots.iter_mut().filter(|slot| slot.is_none()) {
            let moved = limit.min(stack.item_count);
            if !simulate {
                *slot = Some(Stack::new(stack.item_type, moved));
            }
            stack.item_count -= moved;
            if stack.is_empty() {
                return None;
            }
        }

        Some(stack)
    }

    fn extract(
        &mut self,
        slot: usize,
        max: u16,
        side: Option<Face>,
        simulate: bool,
    ) -> Option<Stack> {
        if max == 0 || !self.exposes(side) {
            return None;
        }

        let entry = self.slots.get_mut(slot)?;
        let stored = entry.as_mut()?;
        if simulate {
            return Some(Stack::new(stored.item_type, stored.item_count.min(max)));
        }

        match stored.split(max) {
            Some(taken) => Some(taken),
            None => entry.take(),
        }
    }
}
