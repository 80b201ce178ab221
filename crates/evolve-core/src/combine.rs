//! Query-expression builders.
//!
//! Callers describe an inventory tersely, e.g. three Luffy plus a stack
//! of five Wood, by replicating and combining [`Operand`]s. Every operand
//! pairing has an explicit rule; pairings without one are rejected instead
//! of coerced.

use evolve_common::{CombineError, CombineResult, EvolveError, EvolveResult, Rank};
use tracing::trace;

use crate::catalog::Catalog;
use crate::entity::{Entity, Payload};
use crate::inventory::Inventory;

/// Longest note a replication may produce, in bytes.
pub const MAX_NOTE_LEN: usize = 4096;

/// A value in a query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A single entity, possibly carrying a payload
    Entity(Entity),
    /// A bare number
    Count(i64),
    /// A bare piece of text
    Text(String),
    /// Several entities, in order
    Group(Vec<Entity>),
}

impl Operand {
    /// Short name of the operand kind, used in errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Entity(_) => "entity",
            Self::Count(_) => "count",
            Self::Text(_) => "text",
            Self::Group(_) => "group",
        }
    }

    /// Replicates the operand `times` times.
    ///
    /// A plain entity becomes a group of fresh copies. An entity that
    /// already carries a payload stays single and has its payload scaled,
    /// so `n` stacks of `k` collapse into one stack of `n * k`.
    pub fn repeat(self, times: u32) -> CombineResult<Operand> {
        match self {
            Self::Entity(entity) => repeat(&entity, times),
            Self::Count(k) => k
                .checked_mul(i64::from(times))
                .map(Self::Count)
                .ok_or_else(|| overflow("count")),
            other => Err(CombineError::UnsupportedReplication(other.kind())),
        }
    }

    /// Combines two operands.
    pub fn add(self, rhs: Operand) -> CombineResult<Operand> {
        match (self, rhs) {
            (Self::Entity(a), Self::Entity(b)) => {
                if a.name == b.name && a.rank == Rank::Other && b.rank == Rank::Other {
                    if let (Some(x), Some(y)) = (stack_size(&a.other), stack_size(&b.other)) {
                        let total = x.checked_add(y).ok_or_else(|| overflow(&a.name))?;
                        return Ok(Self::Entity(a.with_payload(Payload::Count(total))));
                    }
                }
                Ok(Self::Group(vec![a, b]))
            },
            (Self::Entity(e), Self::Count(n)) | (Self::Count(n), Self::Entity(e)) => {
                add_count(e, n).map(Self::Entity)
            },
            (Self::Entity(e), Self::Text(s)) | (Self::Text(s), Self::Entity(e)) => {
                add_note(e, &s).map(Self::Entity)
            },
            // A group takes an entity at the front from either side.
            (Self::Entity(e), Self::Group(mut g)) | (Self::Group(mut g), Self::Entity(e)) => {
                g.insert(0, e);
                Ok(Self::Group(g))
            },
            (Self::Group(mut a), Self::Group(b)) => {
                a.extend(b);
                Ok(Self::Group(a))
            },
            (Self::Count(a), Self::Count(b)) => a
                .checked_add(b)
                .map(Self::Count)
                .ok_or_else(|| overflow("count")),
            (lhs, rhs) => Err(CombineError::UnsupportedOperands {
                lhs: lhs.kind(),
                rhs: rhs.kind(),
            }),
        }
    }

    /// Flattens the operand into owned entities.
    pub fn into_entities(self) -> CombineResult<Vec<Entity>> {
        match self {
            Self::Entity(e) => Ok(vec![e]),
            Self::Group(g) => Ok(g),
            other => Err(CombineError::Dangling(other.kind())),
        }
    }
}

impl From<Entity> for Operand {
    fn from(entity: Entity) -> Self {
        Self::Entity(entity)
    }
}

impl From<&Entity> for Operand {
    fn from(entity: &Entity) -> Self {
        Self::Entity(entity.fresh_copy())
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Self::Count(n)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

fn overflow(name: &str) -> CombineError {
    CombineError::Overflow {
        name: name.to_string(),
    }
}

/// Number of units a stack stands for when merged, `None` for notes.
fn stack_size(payload: &Payload) -> Option<i64> {
    match payload {
        Payload::None | Payload::Count(0) => Some(1),
        Payload::Count(n) => Some(*n),
        Payload::Note(_) => None,
    }
}

fn add_count(entity: Entity, n: i64) -> CombineResult<Entity> {
    let total = match &entity.other {
        Payload::None => n,
        Payload::Count(k) => k.checked_add(n).ok_or_else(|| overflow(&entity.name))?,
        Payload::Note(_) => return Err(CombineError::PayloadMismatch { name: entity.name }),
    };
    Ok(entity.with_payload(Payload::Count(total)))
}

fn add_note(entity: Entity, note: &str) -> CombineResult<Entity> {
    let text = match &entity.other {
        Payload::None | Payload::Count(0) => note.to_string(),
        Payload::Note(existing) => format!("{existing}{note}"),
        Payload::Count(_) => return Err(CombineError::PayloadMismatch { name: entity.name }),
    };
    Ok(entity.with_payload(Payload::Note(text)))
}

/// Replicates an entity `times` times; see [`Operand::repeat`].
///
/// Fails when a scaled count leaves `i64` or a repeated note would exceed
/// [`MAX_NOTE_LEN`].
pub fn repeat(entity: &Entity, times: u32) -> CombineResult<Operand> {
    match &entity.other {
        Payload::Count(k) if *k != 0 => {
            let total = k
                .checked_mul(i64::from(times))
                .ok_or_else(|| overflow(&entity.name))?;
            Ok(Operand::Entity(entity.with_payload(Payload::Count(total))))
        },
        Payload::Note(note) if !note.is_empty() => {
            let len = note.len().checked_mul(times as usize);
            if !len.is_some_and(|len| len <= MAX_NOTE_LEN) {
                return Err(overflow(&entity.name));
            }
            Ok(Operand::Entity(
                entity.with_payload(Payload::Note(note.repeat(times as usize))),
            ))
        },
        _ => Ok(Operand::Group((0..times).map(|_| entity.fresh_copy()).collect())),
    }
}

/// Folds operands left to right with [`Operand::add`] and flattens the result.
pub fn combine<I>(operands: I) -> CombineResult<Vec<Entity>>
where
    I: IntoIterator<Item = Operand>,
{
    let mut iter = operands.into_iter();
    let Some(first) = iter.next() else {
        return Ok(Vec::new());
    };
    iter.try_fold(first, Operand::add)?.into_entities()
}

/// Like [`combine`], collecting into an [`Inventory`].
pub fn into_inventory<I>(operands: I) -> CombineResult<Inventory>
where
    I: IntoIterator<Item = Operand>,
{
    combine(operands).map(Inventory::from_entities)
}

/// Parses a compact owned-materials expression against a catalog.
///
/// Terms are separated by `+`. Each term is a catalog name optionally
/// followed by `:N` (stacked count) or `:"note"`, then optionally `*N`
/// (replication). A bare integer or a quoted string is a bare operand.
/// Inside double quotes `+`, `*` and `:` are plain text.
///
/// `Luffy*3 + Chopper*3 + Wood:5` owns three Luffy, three Chopper and a
/// stack of five Wood.
pub fn parse_owned(catalog: &Catalog, expr: &str) -> EvolveResult<Inventory> {
    let operands = split_terms(expr)
        .into_iter()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| parse_term(catalog, term))
        .collect::<EvolveResult<Vec<_>>>()?;
    Ok(into_inventory(operands)?)
}

fn parse_term(catalog: &Catalog, term: &str) -> EvolveResult<Operand> {
    let invalid = || EvolveError::InvalidTerm {
        term: term.to_string(),
    };

    if let Ok(n) = term.parse::<i64>() {
        return Ok(Operand::Count(n));
    }
    if let Some(text) = quoted(term) {
        return Ok(Operand::Text(text.to_string()));
    }

    // Only a `*` after the closing quote of a note is replication.
    let unquoted_from = term.rfind('"').map_or(0, |i| i + 1);
    let (body, times) = match term[unquoted_from..].rfind('*') {
        Some(at) => {
            let (body, n) = term.split_at(unquoted_from + at);
            let n = n[1..].trim().parse::<u32>().map_err(|_| invalid())?;
            (body.trim(), Some(n))
        },
        None => (term, None),
    };
    let (name, payload) = match body.split_once(':') {
        Some((name, payload)) => (name.trim(), Some(payload.trim())),
        None => (body, None),
    };

    let mut operand = Operand::from(catalog.find(name)?);
    if let Some(payload) = payload {
        let extra = match quoted(payload) {
            Some(text) => Operand::Text(text.to_string()),
            None => Operand::Count(payload.parse().map_err(|_| invalid())?),
        };
        operand = operand.add(extra)?;
    }
    if let Some(times) = times {
        operand = operand.repeat(times)?;
    }
    trace!(term, kind = operand.kind(), "parsed query term");
    Ok(operand)
}

/// Splits on `+` outside double quotes.
fn split_terms(expr: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut start = 0;
    let mut in_quote = false;
    for (i, c) in expr.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            '+' if !in_quote => {
                terms.push(&expr[start..i]);
                start = i + 1;
            },
            _ => {},
        }
    }
    terms.push(&expr[start..]);
    terms
}

fn quoted(s: &str) -> Option<&str> {
    s.strip_prefix('"')?.strip_suffix('"')
}
