use serde::{Deserialize, Serialize};

use crate::types::ItemType;

/// Represents a stack of homogeneous items travelling through pipes or resting in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    /// Item identifier representing the type in this stack.
    pub item_type: ItemType,
    /// How many items are contained in this stack.
    pub item_count: u16,
}

impl Stack {
    /// Creates a new stack for the given item type with the provided quantity.
    pub fn new(item_type: ItemType, item_count: u16) -> Self {
        Self {
            item_type,
            item_count,
        }
    }

    /// Returns `true` if the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Returns `true` if `other` holds the same item type and could merge into this stack.
    pub fn can_merge(&self, other: &Stack) -> bool {
        self.item_type == other.item_type
    }

    /// Splits `count` items off this stack into a new stack, shrinking the original in place.
    /// Returns `None` when `count` is not strictly smaller than the current stack size.
    pub fn split(&mut self, count: u16) -> Option<Stack> {
        if count >= self.item_count {
            return None;
        }

        self.item_count -= count;
        Some(Stack {
            item_type: self.item_type,
            item_count: count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_leaves_remainder_in_place() {
        let mut stack = Stack::new(4, 10);
        let taken = stack.split(3).expect("split smaller than stack");
        assert_eq!(taken, Stack::new(4, 3));
        assert_eq!(stack, Stack::new(4, 7));

        assert!(stack.split(7).is_none());
        assert_eq!(stack.item_count, 7);
    }
}
