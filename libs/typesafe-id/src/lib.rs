//! # typesafe-id
//!
//! Type-prefixed, time-ordered identifiers.
//!
//! ## ID Format
//!
//! An ID is an optional lowercase prefix and a 128-bit value encoded as 26
//! base32 characters: `[prefix_]<suffix>`.
//!
//! Examples:
//! - `user_01h455vb4pex5vsknk084sn02q`
//! - `order_line_01h455vb4pex5vsknk084sn02r`
//! - `01h455vb4pex5vsknk084sn02s` (no prefix)
//!
//! This format provides:
//! - Type safety (prefix indicates the entity type)
//! - Sortability (values are UUIDv7 with sub-millisecond ordering)
//! - Uniqueness (60 bits of cryptographic randomness per value)
//! - Human readability (clear prefixes, no ambiguous characters)
//!
//! ## Pieces
//!
//! - [`TypeId`]: any prefix, checked at runtime.
//! - [`TypedId<T>`]: the prefix belongs to the entity type `T`; see
//!   [`define_id!`].
//! - [`base32`], [`generator`], [`prefix`]: the building blocks.
//! - [`ordering`]: lexicographic and timestamp-first comparison.
//!
//! With the `sqlx` feature, both ID types can be bound to and read from
//! Postgres text columns.

pub mod base32;
mod error;
pub mod generator;
mod id;
mod macros;
pub mod ordering;
#[cfg(feature = "sqlx")]
mod postgres;
pub mod prefix;
mod typed;

pub use error::{IdError, PrefixError};
pub use id::{TypeId, MAX_LENGTH};
pub use ordering::IdOrder;
pub use typed::{prefix_for, Entity, PrefixConfig, TypedId};

/// Re-export uuid for consumers that need the raw 128-bit value
pub use uuid::Uuid;
