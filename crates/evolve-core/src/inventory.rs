//! Owned-material multiset.
//!
//! Resolution consumes the inventory destructively: every credited
//! material is removed, so a single instance cannot satisfy two recipe
//! slots. Clone the inventory before each independent query.

use serde::{Deserialize, Serialize};

use crate::entity::{matches, Entity, Key};

/// Ordered multiset of owned entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Entity>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an inventory holding the given entities, in order.
    #[must_use]
    pub fn from_entities(items: Vec<Entity>) -> Self {
        Self { items }
    }

    /// Adds one owned entity.
    pub fn push(&mut self, entity: Entity) {
        self.items.push(entity);
    }

    /// Number of owned instances, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is owned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of instances equal to `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.items.iter().filter(|e| matches(e, name)).count()
    }

    /// Whether at least one instance equals the key.
    #[must_use]
    pub fn contains<'a>(&self, key: impl Into<Key<'a>>) -> bool {
        let key = key.into();
        self.items.iter().any(|e| matches(e, key))
    }

    /// Removes and returns the first instance equal to `name`.
    pub fn take(&mut self, name: &str) -> Option<Entity> {
        let pos = self.items.iter().position(|e| matches(e, name))?;
        Some(self.items.remove(pos))
    }

    /// Iterates owned instances in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.items.iter()
    }
}

impl Extend<Entity> for Inventory {
    fn extend<T: IntoIterator<Item = Entity>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl FromIterator<Entity> for Inventory {
    fn from_iter<T: IntoIterator<Item = Entity>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolve_common::Rank;

    fn luffy() -> Entity {
        Entity::new("Luffy", Rank::Common)
    }

    #[test]
    fn test_take_removes_one_instance() {
        let mut inv: Inventory = [luffy(), Entity::new("Nami", Rank::Common), luffy()]
            .into_iter()
            .collect();
        assert_eq!(inv.count("Luffy"), 2);

        let taken = inv.take("Luffy").expect("owned");
        assert_eq!(taken.name, "Luffy");
        assert_eq!(inv.count("Luffy"), 1);
        assert_eq!(inv.len(), 2);

        assert!(inv.take("Zoro").is_none());
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_take_removes_first_match() {
        let mut inv = Inventory::new();
        inv.push(luffy().with_payload(crate::entity::Payload::Count(2)));
        inv.push(luffy());
        let taken = inv.take("Luffy").expect("owned");
        assert_eq!(taken.other.count(), Some(2));
    }

    #[test]
    fn test_contains_by_entity_or_name() {
        let mut inv = Inventory::new();
        inv.extend([luffy()]);
        assert!(inv.contains("Luffy"));
        assert!(inv.contains(&luffy()));
        assert!(!inv.contains("Chopper"));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Inventory::from_entities(vec![luffy()]);
        let mut copy = original.clone();
        copy.take("Luffy");
        assert!(copy.is_empty());
        assert_eq!(original.len(), 1);
    }
}
