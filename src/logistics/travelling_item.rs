use crate::logistics::Stack;
use crate::types::Face;

/// Progress at which an item commits to an output direction.
pub const MIDPOINT: f32 = 0.5;

/**
 * A stack in transit through one pipe segment. Progress runs from 0 (just entered) to 1 (at the
 * exit face). The item keeps the face it came in through so routing never sends it straight back,
 * and picks its output once it passes the midpoint of the block.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct TravellingItem {
    pub stack: Stack,
    pub progress: f32,
    // face the item entered this hop through, `None` when injected from outside the network
    pub source: Option<Face>,
    // output face for this hop, chosen at the midpoint
    pub direction: Option<Face>,
    pub ticks_in_pipe: u32,
    // carried for remote delivery variants, never read by routing
    pub teleported: bool,
    // held at the exit waiting for any route to open
    pub parked: bool,
}

impl TravellingItem {
    /// Creates a freshly entered item with no chosen direction.
    pub fn new(stack: Stack, source: Option<Face>) -> Self {
        debug_assert!(!stack.is_empty(), "travelling items must carry items");
        Self {
            stack,
            progress: 0.0,
            source,
            direction: None,
            ticks_in_pipe: 0,
            teleported: false,
            parked: false,
        }
    }

    /// Moves the item one tick along the segment. `speed` is ticks per block, so lower is faster.
    /// Returns `true` once the item has reached the exit face.
    pub fn advance(&mut self, speed: u32) -> bool {
        debug_assert!(speed > 0, "speed must be non-zero");
        self.progress += 1.0 / speed as f32;
        self.reached_end()
    }

    pub fn reached_end(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn past_midpoint(&self) -> bool {
        self.progress >= MIDPOINT
    }

    /// Starts a new traversal of the current segment after a failed exit, heading for `direction`.
    pub(crate) fn restart_hop(&mut self, source: Option<Face>, direction: Option<Face>) {
        self.progress = 0.0;
        self.source = source;
        self.direction = direction;
        self.parked = false;
    }

    /// Holds the item at the start of the segment until a route opens up.
    pub(crate) fn park(&mut self, direction: Option<Face>) {
        self.progress = 0.0;
        self.direction = direction;
        self.parked = true;
    }
}
