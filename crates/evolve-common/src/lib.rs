//! # Evolve Common
//!
//! Shared vocabulary for the evolve resolver.
//!
//! This crate provides the foundational types used by the resolution engine
//! and its front-ends:
//! - Entity identifiers (`EntityId`)
//! - The crafting tier ordering (`Rank`)
//! - Error types for catalog lookup and query building
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod rank;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::rank::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_roundtrip() {
        let id = EntityId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn test_default_leaf_threshold_covers_low_tiers() {
        assert!(Rank::Wisp.is_leaf(Rank::Common));
        assert!(Rank::Other.is_leaf(Rank::Common));
        assert!(Rank::Common.is_leaf(Rank::Common));
        assert!(!Rank::Uncommon.is_leaf(Rank::Common));
    }

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::NotFound("Shanks".to_string());
        assert_eq!(err.to_string(), "Entity not found: Shanks");
    }
}
