//! # Evolve Core
//!
//! Dependency resolution for crafting/evolution graphs.
//!
//! Entities are built from other entities through a recursive bill of
//! materials. This crate provides:
//! - The read-only entity catalog (arena of shared recipe references)
//! - Owned-material inventories and query-expression builders
//! - Leaf expansion and missing-material computation
//! - Candidate ranking by fewest missing materials
//! - Reverse dependency search
//! - Tallies and reporting entry points
//! - Resolver configuration and the built-in roster

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod combine;
pub mod config;
pub mod dataset;
pub mod entity;
pub mod inventory;
pub mod query;
pub mod resolve;
pub mod tally;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::combine::*;
    pub use crate::config::*;
    pub use crate::dataset::*;
    pub use crate::entity::*;
    pub use crate::inventory::*;
    pub use crate::query::*;
    pub use crate::resolve::*;
    pub use crate::tally::*;
    pub use evolve_common::prelude::*;
}

pub use prelude::*;
