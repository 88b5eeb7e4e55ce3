//! Shared primitive types used across the pipe library.

use serde::{Deserialize, Serialize};
use std::fmt;

// An item type is represented by a simple integer identifier.
pub type ItemType = u16;

/// Integer block coordinate in the voxel world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the position one block away in the given direction.
    pub fn offset(self, face: Face) -> Self {
        let (dx, dy, dz) = face.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the six axis-aligned faces of a block.
///
/// The declaration order is the canonical scan order used for connection
/// iteration and routing candidate ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Face {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Down,
        Face::Up,
        Face::North,
        Face::South,
        Face::West,
        Face::East,
    ];

    pub const LATERAL: [Face; 4] = [Face::North, Face::South, Face::West, Face::East];

    pub fn opposite(self) -> Face {
        match self {
            Face::Down => Face::Up,
            Face::Up => Face::Down,
            Face::North => Face::South,
            Face::South => Face::North,
            Face::West => Face::East,
            Face::East => Face::West,
        }
    }

    /// Bit index of this face inside a [`FaceSet`] mask.
    pub fn index(self) -> u8 {
        self as u8
    }

    fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Down => (0, -1, 0),
            Face::Up => (0, 1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }
}

/// A compact set of faces stored as a 6-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const EMPTY: FaceSet = FaceSet(0);
    pub const FULL_MASK: u8 = 0b11_1111;

    /// Builds a set from a raw mask. Returns `None` if bits outside the six faces are set.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::FULL_MASK != 0 {
            return None;
        }
        Some(Self(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, face: Face) -> bool {
        self.0 & (1 << face.index()) != 0
    }

    /// Adds `face`, returning `true` if it was not already present.
    pub fn insert(&mut self, face: Face) -> bool {
        let had = self.contains(face);
        self.0 |= 1 << face.index();
        !had
    }

    /// Removes `face`, returning `true` if it was present.
    pub fn remove(&mut self, face: Face) -> bool {
        let had = self.contains(face);
        self.0 &= !(1 << face.index());
        had
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn intersects(self, other: FaceSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterates the members in canonical [`Face::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |face| self.contains(*face))
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut set = FaceSet::EMPTY;
        for face in iter {
            set.insert(face);
        }
        set
    }
}

impl fmt::Debug for FaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_faces_round_trip_positions() {
        let origin = BlockPos::new(3, 4, 5);
        for face in Face::ALL {
            assert_eq!(origin.offset(face).offset(face.opposite()), origin);
            assert_ne!(face, face.opposite());
        }
    }

    #[test]
    fn face_set_mask_rejects_extra_bits() {
        assert!(FaceSet::from_bits(0b100_0000).is_none());
        let set = FaceSet::from_bits(0b10_0001).expect("valid mask");
        assert!(set.contains(Face::Down));
        assert!(set.contains(Face::East));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn face_set_iterates_in_canonical_order() {
        let set: FaceSet = [Face::East, Face::Up, Face::North].into_iter().collect();
        let order: Vec<Face> = set.iter().collect();
        assert_eq!(order, vec![Face::Up, Face::North, Face::East]);
    }
}
