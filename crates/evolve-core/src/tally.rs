//! Name → quantity tallies of resolved materials.

use ahash::AHashMap;
use serde::Serialize;
use std::fmt;

use crate::resolve::Resolved;

/// Quantities per distinct name, in first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tally {
    entries: Vec<(String, i64)>,
    #[serde(skip)]
    index: AHashMap<String, usize>,
}

impl Tally {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies resolved materials. A stacked material adds its stack size,
    /// anything else adds one.
    #[must_use]
    pub fn from_resolved(items: &[Resolved<'_>]) -> Self {
        let mut tally = Self::new();
        for item in items {
            tally.add(item.name(), item.stacked_count().unwrap_or(1));
        }
        tally
    }

    /// Adds `amount` under `name`.
    pub fn add(&mut self, name: &str, amount: i64) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), amount));
            },
        }
    }

    /// Quantity recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Iterates `(name, quantity)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(name, n)| (name.as_str(), *n))
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was tallied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Tally {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Tally {}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (name, n)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "x{n} {name}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, Payload};
    use evolve_common::Rank;

    #[test]
    fn test_format_counts_duplicates_in_first_seen_order() {
        let luffy = Entity::new("Luffy", Rank::Common);
        let chopper = Entity::new("Chopper", Rank::Common);
        let items = [
            Resolved::Entity(&luffy),
            Resolved::Entity(&luffy),
            Resolved::Entity(&chopper),
        ];
        assert_eq!(Tally::from_resolved(&items).to_string(), "[x2 Luffy, x1 Chopper]");
    }

    #[test]
    fn test_stacked_count_replaces_one() {
        let wood = Entity::new("Wood", Rank::Other).with_payload(Payload::Count(3));
        let note = Entity::new("Gold", Rank::Other).with_payload(Payload::Note("merged".into()));
        let items = [
            Resolved::Entity(&wood),
            Resolved::Resource("Wood"),
            Resolved::Entity(&note),
        ];
        let tally = Tally::from_resolved(&items);
        assert_eq!(tally.get("Wood"), Some(4));
        assert_eq!(tally.get("Gold"), Some(1));
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.to_string(), "[x4 Wood, x1 Gold]");
    }

    #[test]
    fn test_empty_tally() {
        let tally = Tally::from_resolved(&[]);
        assert!(tally.is_empty());
        assert_eq!(tally.to_string(), "[]");
        assert_eq!(tally.get("Luffy"), None);
    }
}
