//! Entity records: the nodes of the crafting graph.

use evolve_common::{EntityId, Rank};
use serde::{Deserialize, Serialize};

/// Extra data an entity carries: a stacked count or a free-form note.
///
/// Payloads take part in query arithmetic and tallies but never in
/// equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Nothing stacked
    #[default]
    None,
    /// Stacked amount, e.g. `x3 Wood`
    Count(i64),
    /// Textual annotation
    Note(String),
}

impl Payload {
    /// True for a non-zero count or a non-empty note.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::None => false,
            Self::Count(n) => *n != 0,
            Self::Note(s) => !s.is_empty(),
        }
    }

    /// The stacked amount, if this is a non-zero count.
    #[must_use]
    pub fn count(&self) -> Option<i64> {
        match self {
            Self::Count(n) if *n != 0 => Some(*n),
            _ => None,
        }
    }
}

/// One component of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    /// Another catalog entity, shared by reference
    Entity(EntityId),
    /// A raw resource that is not itself a catalog entity
    Resource(String),
}

impl Material {
    /// Shorthand for a raw resource.
    #[must_use]
    pub fn resource(name: impl Into<String>) -> Self {
        Self::Resource(name.into())
    }
}

/// A craftable or ownable game object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique name, the equality key
    pub name: String,
    /// Crafting tier
    pub rank: Rank,
    /// Recipe components in definition order
    pub materials: Vec<Material>,
    /// Free-form annotation, carried through untouched
    pub command: Option<String>,
    /// Stacked count or note
    pub other: Payload,
}

impl Entity {
    /// Creates an entity with no recipe and no payload.
    #[must_use]
    pub fn new(name: impl Into<String>, rank: Rank) -> Self {
        Self {
            name: name.into(),
            rank,
            materials: Vec::new(),
            command: None,
            other: Payload::None,
        }
    }

    /// Returns a copy of this entity with the payload cleared.
    #[must_use]
    pub fn fresh_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            rank: self.rank,
            materials: self.materials.clone(),
            command: self.command.clone(),
            other: Payload::None,
        }
    }

    /// Returns a copy of this entity carrying the given payload.
    #[must_use]
    pub fn with_payload(&self, other: Payload) -> Self {
        Self {
            other,
            ..self.fresh_copy()
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Entity {}

/// Anything an entity can be compared against.
#[derive(Debug, Clone, Copy)]
pub enum Key<'a> {
    /// Another entity
    Entity(&'a Entity),
    /// A bare name
    Name(&'a str),
}

impl Key<'_> {
    /// The name this key compares by.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Key::Entity(entity) => &entity.name,
            Key::Name(name) => name,
        }
    }
}

impl<'a> From<&'a Entity> for Key<'a> {
    fn from(entity: &'a Entity) -> Self {
        Key::Entity(entity)
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

/// Name-based equality between an entity and an entity or a name.
#[must_use]
pub fn matches<'a>(entity: &Entity, key: impl Into<Key<'a>>) -> bool {
    entity.name == key.into().name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_payload_and_rank() {
        let a = Entity::new("Wood", Rank::Other).with_payload(Payload::Count(3));
        let b = Entity::new("Wood", Rank::Common);
        assert_eq!(a, b);
        assert_ne!(a, Entity::new("Gold", Rank::Other));
    }

    #[test]
    fn test_matches_entity_and_name() {
        let luffy = Entity::new("Luffy", Rank::Common);
        assert!(matches(&luffy, "Luffy"));
        assert!(!matches(&luffy, "luffy"));
        assert!(matches(&luffy, &Entity::new("Luffy", Rank::Special)));
    }

    #[test]
    fn test_payload_is_set() {
        assert!(!Payload::None.is_set());
        assert!(!Payload::Count(0).is_set());
        assert!(Payload::Count(-2).is_set());
        assert!(!Payload::Note(String::new()).is_set());
        assert!(Payload::Note("merged".into()).is_set());
        assert_eq!(Payload::Count(0).count(), None);
        assert_eq!(Payload::Count(4).count(), Some(4));
    }

    #[test]
    fn test_fresh_copy_clears_payload() {
        let mut wood = Entity::new("Wood", Rank::Other);
        wood.command = Some("!wood".into());
        let stacked = wood.with_payload(Payload::Count(5));
        let copy = stacked.fresh_copy();
        assert_eq!(copy.other, Payload::None);
        assert_eq!(copy.command.as_deref(), Some("!wood"));
    }
}
