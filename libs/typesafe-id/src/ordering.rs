//! Orderings over [`TypeId`] and the process-wide default.
//!
//! Two total orders are available:
//!
//! - [`IdOrder::Lexicographic`]: prefix first (byte order), then value.
//! - [`IdOrder::TimestampFirst`]: value first, then prefix. Values are
//!   time-ordered, so this sorts by creation time across prefixes.
//!
//! Values compare as unsigned 16-byte big-endian sequences.
//!
//! The default order backs `Ord for TypeId`. It is process-wide state: set it
//! once during startup, before any sorted collection of `TypeId`s exists.
//! Changing it while a `BTreeMap<TypeId, _>` is alive, or during a sort,
//! leaves that collection inconsistently ordered.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

use crate::TypeId;

/// Which total order to use when comparing IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdOrder {
    /// Prefix, then value.
    #[default]
    Lexicographic,
    /// Value, then prefix.
    TimestampFirst,
}

impl IdOrder {
    /// Compares two IDs under this order.
    pub fn compare(self, a: &TypeId, b: &TypeId) -> Ordering {
        match self {
            IdOrder::Lexicographic => lexicographic(a, b),
            IdOrder::TimestampFirst => timestamp_first(a, b),
        }
    }

    const fn to_u8(self) -> u8 {
        match self {
            IdOrder::Lexicographic => 0,
            IdOrder::TimestampFirst => 1,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => IdOrder::TimestampFirst,
            _ => IdOrder::Lexicographic,
        }
    }
}

impl std::fmt::Display for IdOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdOrder::Lexicographic => write!(f, "lex"),
            IdOrder::TimestampFirst => write!(f, "timestamp"),
        }
    }
}

/// Error returned when an order name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ID order '{0}': expected 'lex' or 'timestamp'")]
pub struct UnknownOrder(pub String);

impl FromStr for IdOrder {
    type Err = UnknownOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lex" | "lexicographic" => Ok(IdOrder::Lexicographic),
            "timestamp" | "timestamp_first" | "time" => Ok(IdOrder::TimestampFirst),
            other => Err(UnknownOrder(other.to_string())),
        }
    }
}

/// Compares by prefix, then by value.
pub fn lexicographic(a: &TypeId, b: &TypeId) -> Ordering {
    a.prefix()
        .as_bytes()
        .cmp(b.prefix().as_bytes())
        .then_with(|| a.uuid().as_bytes().cmp(b.uuid().as_bytes()))
}

/// Compares by value, then by prefix.
pub fn timestamp_first(a: &TypeId, b: &TypeId) -> Ordering {
    a.uuid()
        .as_bytes()
        .cmp(b.uuid().as_bytes())
        .then_with(|| a.prefix().as_bytes().cmp(b.prefix().as_bytes()))
}

static DEFAULT_ORDER: AtomicU8 = AtomicU8::new(IdOrder::Lexicographic.to_u8());

/// Returns the order used by `Ord for TypeId`.
pub fn default_order() -> IdOrder {
    IdOrder::from_u8(DEFAULT_ORDER.load(AtomicOrdering::Acquire))
}

/// Replaces the order used by `Ord for TypeId` and returns the previous one.
///
/// Call this during startup only; see the module docs.
pub fn set_default_order(order: IdOrder) -> IdOrder {
    let previous = IdOrder::from_u8(DEFAULT_ORDER.swap(order.to_u8(), AtomicOrdering::AcqRel));
    if previous != order {
        tracing::debug!(%previous, current = %order, "default TypeId order changed");
    }
    previous
}
