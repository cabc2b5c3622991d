//! Engines of one deployment, indexed by pool id

use crate::engine::VestingEngine;
use ghx_primitives::Address;
use serde::Serialize;
use std::fmt;

/// Index of an engine inside a [`VestingArena`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PoolId(usize);

impl PoolId {
    /// Id for a raw index
    pub const fn new(index: usize) -> Self {
        PoolId(index)
    }

    /// Raw index
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only store of vesting engines. Engines are never removed, so a
/// [`PoolId`] stays valid for the arena's lifetime.
#[derive(Debug, Default)]
pub struct VestingArena {
    engines: Vec<VestingEngine>,
}

impl VestingArena {
    /// Empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an engine and return its id
    pub fn insert(&mut self, engine: VestingEngine) -> PoolId {
        self.engines.push(engine);
        PoolId(self.engines.len() - 1)
    }

    /// Engine by id
    pub fn get(&self, id: PoolId) -> Option<&VestingEngine> {
        self.engines.get(id.0)
    }

    /// Mutable engine by id
    pub fn get_mut(&mut self, id: PoolId) -> Option<&mut VestingEngine> {
        self.engines.get_mut(id.0)
    }

    /// Id of the engine holding custody at `address`
    pub fn find_by_custody(&self, address: &Address) -> Option<PoolId> {
        self.engines
            .iter()
            .position(|e| e.custody_address() == *address)
            .map(PoolId)
    }

    /// Number of engines
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Engines with their ids, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (PoolId, &VestingEngine)> {
        self.engines.iter().enumerate().map(|(i, e)| (PoolId(i), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(custody: u8) -> VestingEngine {
        VestingEngine::new(
            Address::from_bytes([1; 20]),
            Address::from_bytes([custody; 20]),
            Address::from_bytes([2; 20]),
            Address::from_bytes([3; 20]),
        )
        .unwrap()
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut arena = VestingArena::new();
        let a = arena.insert(engine(10));
        let b = arena.insert(engine(11));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).unwrap().custody_address(), Address::from_bytes([11; 20]));
        assert!(arena.get(PoolId::new(2)).is_none());
    }

    #[test]
    fn test_find_by_custody() {
        let mut arena = VestingArena::new();
        arena.insert(engine(10));
        let id = arena.insert(engine(11));
        assert_eq!(arena.find_by_custody(&Address::from_bytes([11; 20])), Some(id));
        assert_eq!(arena.find_by_custody(&Address::from_bytes([12; 20])), None);
        assert_eq!(id.to_string(), "#1");
    }
}
