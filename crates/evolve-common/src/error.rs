//! Error types for the evolve resolver.

use thiserror::Error;

/// Top-level error type for evolve operations.
#[derive(Debug, Error)]
pub enum EvolveError {
    /// Catalog lookup errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Query expression building errors
    #[error("Query error: {0}")]
    Combine(#[from] CombineError),

    /// Rank name could not be parsed
    #[error(transparent)]
    Rank(#[from] RankParseError),

    /// A term of a textual query expression is malformed
    #[error("Invalid query term: {term:?}")]
    InvalidTerm {
        /// The offending term
        term: String,
    },

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}

/// Catalog construction and lookup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No entity carries this name
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// An entity with this name is already defined
    #[error("Duplicate entity name: {0}")]
    DuplicateName(String),

    /// The id was not minted by this catalog
    #[error("Unknown entity id: {0}")]
    UnknownId(u32),
}

/// Errors raised while building inventory/query expressions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombineError {
    /// The two operand kinds have no defined combination
    #[error("Cannot combine {lhs} with {rhs}")]
    UnsupportedOperands {
        /// Kind of the left operand
        lhs: &'static str,
        /// Kind of the right operand
        rhs: &'static str,
    },

    /// This operand kind cannot be replicated
    #[error("Cannot replicate {0}")]
    UnsupportedReplication(&'static str),

    /// A numeric payload met a textual one on the same entity
    #[error("Payload kinds differ on {name}")]
    PayloadMismatch {
        /// Entity carrying the payload
        name: String,
    },

    /// A stacked count or repeated note grew past what can be represented
    #[error("Payload overflow on {name}")]
    Overflow {
        /// Entity (or operand kind) whose payload overflowed
        name: String,
    },

    /// The expression reduced to a bare value with no entity to carry it
    #[error("Expression ends with a bare {0}")]
    Dangling(&'static str),
}

/// Unknown rank name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown rank: {0}")]
pub struct RankParseError(pub String);

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for query building.
pub type CombineResult<T> = Result<T, CombineError>;

/// Result type alias for evolve operations.
pub type EvolveResult<T> = Result<T, EvolveError>;
