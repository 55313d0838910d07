//! IDs bound to an entity type.
//!
//! A [`TypedId<T>`] only ever carries `T`'s prefix, so the prefix is not
//! stored: it is resolved once per type and cached for the life of the
//! process. Resolution takes the explicit override from `T::TYPEID` if there
//! is one, and otherwise derives a snake-case prefix from `T`'s type name.
//!
//! A prefix that breaks the grammar is a configuration error in the program,
//! not bad input: [`TypedId::prefix`] panics on it and every operation that
//! needs the prefix panics with it. Use [`TypedId::try_prefix`] to check a
//! type's configuration without panicking.

use std::any::{type_name, TypeId as TypeKey};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::error::IdError;
use crate::generator;
use crate::id::{self, TypeId};
use crate::prefix;

/// Out-of-band prefix configuration for an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrefixConfig {
    /// Explicit prefix. `None` derives one from the type name.
    pub prefix: Option<&'static str>,
}

impl PrefixConfig {
    /// Derive the prefix from the type name.
    pub const DERIVED: Self = Self { prefix: None };

    /// Use `prefix` as is.
    #[must_use]
    pub const fn with_prefix(prefix: &'static str) -> Self {
        Self {
            prefix: Some(prefix),
        }
    }
}

/// A type that owns a family of IDs.
///
/// ```
/// use typesafe_id::{Entity, PrefixConfig, TypedId};
///
/// struct User;
/// impl Entity for User {}
///
/// struct ApiKey;
/// impl Entity for ApiKey {
///     const TYPEID: PrefixConfig = PrefixConfig::with_prefix("key");
/// }
///
/// assert_eq!(TypedId::<User>::prefix(), "user");
/// assert_eq!(TypedId::<ApiKey>::prefix(), "key");
/// ```
pub trait Entity: 'static {
    /// Prefix configuration for this type.
    const TYPEID: PrefixConfig = PrefixConfig::DERIVED;
}

static PREFIXES: Lazy<DashMap<TypeKey, &'static str>> = Lazy::new(DashMap::new);

/// Returns the cached prefix for `T`, resolving it on first use.
pub fn prefix_for<T: Entity>() -> Result<&'static str, IdError> {
    let key = TypeKey::of::<T>();
    if let Some(prefix) = PREFIXES.get(&key) {
        return Ok(*prefix);
    }

    match PREFIXES.entry(key) {
        Entry::Occupied(entry) => Ok(*entry.get()),
        Entry::Vacant(entry) => {
            let prefix = resolve::<T>()?;
            Ok(*entry.insert(prefix))
        }
    }
}

fn resolve<T: Entity>() -> Result<&'static str, IdError> {
    let type_name = type_name::<T>();
    let prefix = match T::TYPEID.prefix {
        Some(prefix) => {
            validate_config(type_name, prefix)?;
            prefix
        }
        None => {
            let derived = prefix::snake_case_type_name(type_name);
            validate_config(type_name, &derived)?;
            &*Box::leak(derived.into_boxed_str())
        }
    };

    tracing::debug!(type_name, prefix, "resolved TypeId prefix");
    Ok(prefix)
}

fn validate_config(type_name: &'static str, prefix: &str) -> Result<(), IdError> {
    prefix::validate(prefix).map_err(|reason| {
        tracing::error!(type_name, prefix, %reason, "invalid TypeId prefix configuration");
        IdError::FatalPrefixConfiguration {
            type_name,
            prefix: prefix.to_string(),
            reason,
        }
    })
}

/// An ID whose prefix is fixed by the entity type `T`.
pub struct TypedId<T: Entity> {
    uuid: Uuid,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> TypedId<T> {
    /// Returns `T`'s prefix.
    ///
    /// # Panics
    ///
    /// Panics if `T`'s prefix configuration breaks the prefix grammar.
    #[must_use]
    pub fn prefix() -> &'static str {
        match prefix_for::<T>() {
            Ok(prefix) => prefix,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns `T`'s prefix, or the configuration error.
    pub fn try_prefix() -> Result<&'static str, IdError> {
        prefix_for::<T>()
    }

    /// Creates an ID with a fresh time-ordered value.
    ///
    /// # Panics
    ///
    /// Panics if `T`'s prefix configuration is invalid, or if the system clock
    /// reads earlier than 1970.
    #[must_use]
    pub fn new() -> Self {
        match Self::new_at(Utc::now()) {
            Ok(id) => id,
            Err(err) => panic!("cannot generate TypedId<{}>: {err}", type_name::<T>()),
        }
    }

    /// Creates an ID with a time-ordered value for the given instant.
    pub fn new_at(timestamp: DateTime<Utc>) -> Result<Self, IdError> {
        prefix_for::<T>()?;
        Ok(Self::from_uuid(generator::generate(timestamp)?))
    }

    /// Creates an ID from an arbitrary 128-bit value.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _entity: PhantomData,
        }
    }

    /// Creates an ID from a 16-byte big-endian value.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self::from_uuid(Uuid::from_bytes(bytes))
    }

    /// Returns the 128-bit value.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns the value as 16 big-endian bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        self.uuid.into_bytes()
    }

    /// Returns the 26-character encoded value.
    #[must_use]
    pub fn suffix(&self) -> String {
        id::encode_suffix(&self.uuid)
    }

    /// Returns the length of the string form.
    #[must_use]
    pub fn len(&self) -> usize {
        id::encoded_len(Self::prefix())
    }

    /// Always false: every ID has a 26-character suffix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the millisecond timestamp held in the value.
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        generator::timestamp_ms(&self.uuid)
    }

    /// Returns the instant held in the value, at millisecond precision.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        generator::timestamp(&self.uuid)
    }

    /// Returns the equivalent untyped ID.
    #[must_use]
    pub fn to_type_id(&self) -> TypeId {
        TypeId::from_parts_unchecked(Self::prefix().to_string(), self.uuid)
    }

    /// Rebinds this ID to another entity type.
    ///
    /// Fails with [`IdError::PrefixMismatch`] unless both types share a prefix.
    pub fn cast<U: Entity>(&self) -> Result<TypedId<U>, IdError> {
        TypedId::<U>::bind(Self::prefix(), self.uuid)
    }

    fn bind(prefix: &str, uuid: Uuid) -> Result<Self, IdError> {
        let expected = prefix_for::<T>()?;
        if prefix != expected {
            return Err(IdError::PrefixMismatch {
                expected,
                actual: prefix.to_string(),
            });
        }
        Ok(Self::from_uuid(uuid))
    }

    /// Parses an ID and checks that it carries `T`'s prefix.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let id = TypeId::parse(s)?;
        Self::bind(id.prefix(), id.uuid())
    }

    /// Parses an ID, returning `None` on any failure.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// Parses an ID from UTF-8 bytes and checks that it carries `T`'s prefix.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, IdError> {
        let id = TypeId::parse_bytes(bytes)?;
        Self::bind(id.prefix(), id.uuid())
    }

    /// Parses an ID from UTF-8 bytes, returning `None` on any failure.
    #[must_use]
    pub fn try_parse_bytes(bytes: &[u8]) -> Option<Self> {
        Self::parse_bytes(bytes).ok()
    }
}

impl<T: Entity> Default for TypedId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Entity> Copy for TypedId<T> {}

impl<T: Entity> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T: Entity> Eq for TypedId<T> {}

impl<T: Entity> PartialEq<TypeId> for TypedId<T> {
    fn eq(&self, other: &TypeId) -> bool {
        self.uuid == other.uuid() && Self::prefix() == other.prefix()
    }
}

impl<T: Entity> PartialEq<TypedId<T>> for TypeId {
    fn eq(&self, other: &TypedId<T>) -> bool {
        other == self
    }
}

impl<T: Entity> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

/// All IDs of one type share a prefix, so both orders reduce to the value.
impl<T: Entity> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.as_bytes().cmp(other.uuid.as_bytes())
    }
}

impl<T: Entity> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Entity> fmt::Debug for TypedId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedId({self})")
    }
}

impl<T: Entity> fmt::Display for TypedId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        id::fmt_parts(Self::prefix(), &self.uuid, f)
    }
}

impl<T: Entity> FromStr for TypedId<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: Entity> From<TypedId<T>> for TypeId {
    fn from(id: TypedId<T>) -> Self {
        id.to_type_id()
    }
}

impl<T: Entity> TryFrom<TypeId> for TypedId<T> {
    type Error = IdError;

    fn try_from(id: TypeId) -> Result<Self, Self::Error> {
        Self::try_from(&id)
    }
}

impl<T: Entity> TryFrom<&TypeId> for TypedId<T> {
    type Error = IdError;

    fn try_from(id: &TypeId) -> Result<Self, Self::Error> {
        Self::bind(id.prefix(), id.uuid())
    }
}

impl<T: Entity> serde::Serialize for TypedId<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de, T: Entity> serde::Deserialize<'de> for TypedId<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = TypeId::deserialize(deserializer)?;
        Self::try_from(&id).map_err(serde::de::Error::custom)
    }
}
