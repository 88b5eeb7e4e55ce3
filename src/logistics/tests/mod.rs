//! Multi-block scenarios driven through [`PipeNetwork`].


use crate::config::PipeConfig;
use crate::logistics::{NoSync, PipeNetwork, Role};
use crate::types::{BlockPos, ItemType};

pub(super) const ORIGIN: BlockPos = BlockPos::new(0, 0, 0);

pub(super) fn authority() -> PipeNetwork {
    PipeNetwork::new(PipeConfig::default(), Role::Authoritative).expect("default config is valid")
}

pub(super) fn at(x: i32) -> BlockPos {
    BlockPos::new(x, 0, 0)
}

/// Ticks until nothing of `item_type` is in transit, returning how many ticks that took.
/// Gives up after `limit` ticks.
pub(super) fn run_until_settled(net: &mut PipeNetwork, item_type: ItemType, limit: u32) -> u32 {
    for elapsed in 1..=limit {
        net.tick(&mut NoSync);
        if net.count_in_transit(item_type) == 0 {
            return elapsed;
        }
    }
    limit
}
