use crate::types::{Face, FaceSet};

/**
 * The connection state of one segment: which faces currently carry items and which faces were
 * manually blocked. The two sets are disjoint. A blocked face stays blocked through every
 * recomputation until it is explicitly unblocked.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionTopology {
    connections: FaceSet,
    blocked: FaceSet,
}

/// Returns `true` when the edge between two adjacent segments may carry items: neither end has
/// blocked its side. `face` is the face of `this` that touches `neighbor`.
pub fn edge_open(this: &ConnectionTopology, face: Face, neighbor: &ConnectionTopology) -> bool {
    !this.is_blocked(face) && !neighbor.is_blocked(face.opposite())
}

impl ConnectionTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a topology from persisted masks. Returns the first face found in both sets on
    /// conflict.
    pub fn from_sets(connections: FaceSet, blocked: FaceSet) -> Result<Self, Face> {
        if let Some(face) = connections.iter().find(|face| blocked.contains(*face)) {
            return Err(face);
        }
        Ok(Self {
            connections,
            blocked,
        })
    }

    pub fn connections(&self) -> FaceSet {
        self.connections
    }

    pub fn blocked(&self) -> FaceSet {
        self.blocked
    }

    pub fn is_connected(&self, face: Face) -> bool {
        self.connections.contains(face)
    }

    pub fn is_blocked(&self, face: Face) -> bool {
        self.blocked.contains(face)
    }

    /// Connects `face` unless it is blocked. Returns `true` if the connection set changed.
    pub fn connect(&mut self, face: Face) -> bool {
        if self.blocked.contains(face) {
            return false;
        }
        self.connections.insert(face)
    }

    /// Drops any connection on `face` and marks it blocked.
    pub fn block(&mut self, face: Face) {
        self.connections.remove(face);
        self.blocked.insert(face);
    }

    /// Clears the manual block on `face`. The face stays disconnected until the next
    /// recomputation or an explicit [`ConnectionTopology::connect`].
    pub fn unblock(&mut self, face: Face) -> bool {
        self.blocked.remove(face)
    }

    /// Replaces every automatic connection with `connections`, keeping the blocked set. Blocked
    /// faces in `connections` are ignored. Returns `true` if the connection set changed.
    pub fn replace_connections(&mut self, connections: FaceSet) -> bool {
        let mut next = FaceSet::EMPTY;
        for face in connections.iter() {
            if !self.blocked.contains(face) {
                next.insert(face);
            }
        }
        let changed = next != self.connections;
        self.connections = next;
        changed
    }
}
