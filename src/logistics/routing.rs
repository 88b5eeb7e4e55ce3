use crate::types::{Face, FaceSet};

/**
 * Output faces that could take an item right now, split by what sits behind them. Terminal
 * inventories end a trip, so they are always preferred over handing the item to another pipe.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candidates {
    pub inventories: FaceSet,
    pub pipes: FaceSet,
}

impl Candidates {
    /// The set routing picks from: inventories when there are any, otherwise pipes.
    pub fn preferred(&self) -> FaceSet {
        if self.inventories.is_empty() {
            self.pipes
        } else {
            self.inventories
        }
    }
}

/// Picks an output face from `candidates`, advancing the shared round-robin `cursor` on ties.
///
/// The cursor belongs to the segment and is shared by every decision it makes, whatever the
/// size of the preferred set, so fairness is only exact while the set stays stable.
pub fn select_direction(candidates: &Candidates, cursor: &mut u32) -> Option<Face> {
    let preferred = candidates.preferred();
    let len = preferred.len() as u32;
    match len {
        0 => None,
        1 => preferred.iter().next(),
        _ => {
            let index = *cursor % len;
            *cursor = (index + 1) % len;
            preferred.iter().nth(index as usize)
        }
    }
}
