//! The untyped identifier: an optional prefix plus a 128-bit value.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::base32::{self, ENCODED_LEN};
use crate::error::{IdError, PrefixError};
use crate::generator;
use crate::ordering;
use crate::prefix::{self, MAX_PREFIX_LEN, SEPARATOR};
use crate::typed::{Entity, TypedId};

/// Maximum length of an ID string: a 63-character prefix, `_`, and the suffix.
pub const MAX_LENGTH: usize = MAX_PREFIX_LEN + 1 + ENCODED_LEN;

/// A prefixed, base32-encoded 128-bit identifier.
///
/// The text form is `[prefix_]<suffix>`, where the suffix is always 26
/// characters. The prefix may be empty, in which case there is no separator.
///
/// ```
/// use typesafe_id::TypeId;
///
/// let id = TypeId::parse("user_01h455vb4pex5vsknk084sn02q")?;
/// assert_eq!(id.prefix(), "user");
/// assert_eq!(id.suffix(), "01h455vb4pex5vsknk084sn02q");
/// assert_eq!(id.to_string(), "user_01h455vb4pex5vsknk084sn02q");
/// # Ok::<(), typesafe_id::IdError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeId {
    prefix: String,
    uuid: Uuid,
}

impl TypeId {
    /// Maximum length of an ID string.
    pub const MAX_LENGTH: usize = MAX_LENGTH;

    /// Creates an ID with a fresh time-ordered value.
    pub fn new(prefix: impl Into<String>) -> Result<Self, IdError> {
        Self::new_at(prefix, Utc::now())
    }

    /// Creates an ID with a time-ordered value for the given instant.
    pub fn new_at(prefix: impl Into<String>, timestamp: DateTime<Utc>) -> Result<Self, IdError> {
        let prefix = prefix.into();
        prefix::validate(&prefix)?;
        Ok(Self {
            prefix,
            uuid: generator::generate(timestamp)?,
        })
    }

    /// Creates an ID from a prefix and an arbitrary 128-bit value.
    ///
    /// The prefix is validated; the value is taken as is.
    pub fn from_uuid(prefix: impl Into<String>, uuid: Uuid) -> Result<Self, IdError> {
        let prefix = prefix.into();
        prefix::validate(&prefix)?;
        Ok(Self { prefix, uuid })
    }

    /// Creates an ID from a prefix and a 16-byte big-endian value.
    pub fn from_bytes(prefix: impl Into<String>, bytes: [u8; 16]) -> Result<Self, IdError> {
        Self::from_uuid(prefix, Uuid::from_bytes(bytes))
    }

    /// Builds an ID whose prefix is already known to be valid.
    pub(crate) fn from_parts_unchecked(prefix: String, uuid: Uuid) -> Self {
        Self { prefix, uuid }
    }

    /// Returns the prefix, or `""` if there is none.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the 128-bit value.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns the value as 16 big-endian bytes.
    ///
    /// The prefix is not included; store it separately if it is needed.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        self.uuid.into_bytes()
    }

    /// Returns the 26-character encoded value.
    #[must_use]
    pub fn suffix(&self) -> String {
        encode_suffix(&self.uuid)
    }

    /// Returns the length of the string form.
    #[must_use]
    pub fn len(&self) -> usize {
        encoded_len(&self.prefix)
    }

    /// Always false: every ID has a 26-character suffix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the millisecond timestamp held in the value.
    ///
    /// Only meaningful for values minted by the generator.
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        generator::timestamp_ms(&self.uuid)
    }

    /// Returns the instant held in the value, at millisecond precision.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        generator::timestamp(&self.uuid)
    }

    /// Writes the string form into `buf` and returns it.
    ///
    /// Returns `None` if `buf` is shorter than [`len`](Self::len).
    pub fn write_to<'b>(&self, buf: &'b mut [u8]) -> Option<&'b str> {
        let len = format_into(&self.prefix, &self.uuid, &mut *buf)?;
        let buf: &'b [u8] = buf;
        std::str::from_utf8(&buf[..len]).ok()
    }

    /// Binds this ID to the entity type `T`.
    ///
    /// Fails with [`IdError::PrefixMismatch`] if the prefix is not `T`'s.
    pub fn cast<T: Entity>(&self) -> Result<TypedId<T>, IdError> {
        TypedId::try_from(self)
    }

    /// Parses an ID from its string form.
    ///
    /// Accepts 26 to 90 characters. A 26-character input is a bare suffix;
    /// anything longer must have `_` right before the final 26 characters and
    /// a valid prefix before that.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let len = if s.is_ascii() {
            s.len()
        } else {
            s.chars().count()
        };
        if !(ENCODED_LEN..=MAX_LENGTH).contains(&len) {
            return Err(IdError::MalformedLength { len });
        }

        if len == ENCODED_LEN {
            let uuid = Uuid::from_bytes(base32::decode(s.as_bytes())?);
            return Ok(Self::from_parts_unchecked(String::new(), uuid));
        }

        // The separator is the 27th character from the end.
        let Some((separator, c)) = s.char_indices().rev().nth(ENCODED_LEN) else {
            return Err(IdError::MalformedLength { len });
        };
        if c != char::from(SEPARATOR) {
            return Err(IdError::MissingSeparator);
        }

        let (prefix, rest) = s.split_at(separator);
        if prefix.is_empty() {
            return Err(IdError::InvalidPrefix(PrefixError::StartsWithSeparator));
        }
        prefix::validate(prefix)?;
        let uuid = Uuid::from_bytes(base32::decode(&rest.as_bytes()[1..])?);

        Ok(Self::from_parts_unchecked(prefix.to_string(), uuid))
    }

    /// Parses an ID, returning `None` on any failure.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// Parses an ID from UTF-8 bytes.
    ///
    /// Multi-byte characters can never appear in an ID, so any input that is
    /// not plain ASCII fails with [`IdError::InvalidUtf8`].
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, IdError> {
        let s = std::str::from_utf8(bytes).map_err(|_| IdError::InvalidUtf8)?;
        if !s.is_ascii() {
            return Err(IdError::InvalidUtf8);
        }
        Self::parse(s)
    }

    /// Parses an ID from UTF-8 bytes, returning `None` on any failure.
    #[must_use]
    pub fn try_parse_bytes(bytes: &[u8]) -> Option<Self> {
        Self::parse_bytes(bytes).ok()
    }
}

/// Length of the string form for a given prefix.
pub(crate) fn encoded_len(prefix: &str) -> usize {
    if prefix.is_empty() {
        ENCODED_LEN
    } else {
        prefix.len() + 1 + ENCODED_LEN
    }
}

/// Writes `[prefix_]<suffix>` into `buf`, returning the number of bytes written.
pub(crate) fn format_into(prefix: &str, uuid: &Uuid, buf: &mut [u8]) -> Option<usize> {
    let len = encoded_len(prefix);
    let out = buf.get_mut(..len)?;
    let (head, suffix) = out.split_at_mut(len - ENCODED_LEN);
    if let Some((separator, prefix_out)) = head.split_last_mut() {
        prefix_out.copy_from_slice(prefix.as_bytes());
        *separator = SEPARATOR;
    }
    suffix.copy_from_slice(&base32::encode(uuid.as_bytes()));
    Some(len)
}

/// Formats `[prefix_]<suffix>` without allocating.
pub(crate) fn fmt_parts(prefix: &str, uuid: &Uuid, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut buf = [0u8; MAX_LENGTH];
    let len = format_into(prefix, uuid, &mut buf).ok_or(fmt::Error)?;
    let s = std::str::from_utf8(&buf[..len]).map_err(|_| fmt::Error)?;
    f.pad(s)
}

pub(crate) fn encode_suffix(uuid: &Uuid) -> String {
    base32::encode(uuid.as_bytes())
        .iter()
        .map(|&b| char::from(b))
        .collect()
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_parts(&self.prefix, &self.uuid, f)
    }
}

impl FromStr for TypeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TypeId {
    type Error = IdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// Ordered by the process-wide default; see [`ordering`](crate::ordering).
impl Ord for TypeId {
    fn cmp(&self, other: &Self) -> Ordering {
        ordering::default_order().compare(self, other)
    }
}

impl PartialOrd for TypeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl serde::Serialize for TypeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TypeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(IdVisitor)
    }
}

struct IdVisitor;

impl serde::de::Visitor<'_> for IdVisitor {
    type Value = TypeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a TypeId string such as 'user_01h455vb4pex5vsknk084sn02q'")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        TypeId::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        TypeId::parse_bytes(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SUFFIX: &str = "01h455vb4pex5vsknk084sn02q";

    fn value() -> Uuid {
        Uuid::from_u128(0x01890a5d_ac96_774b_bcce_b302099a8057)
    }

    #[test]
    fn test_user_roundtrip() {
        let id = TypeId::from_uuid("user", value()).unwrap();
        let s = id.to_string();
        assert_eq!(s, format!("user_{SUFFIX}"));

        let parsed = TypeId::parse(&s).unwrap();
        assert_eq!(parsed.prefix(), "user");
        assert_eq!(parsed.uuid(), value());
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_no_prefix() {
        let id = TypeId::from_uuid("", value()).unwrap();
        assert_eq!(id.to_string(), SUFFIX);
        assert_eq!(id.len(), 26);

        let parsed: TypeId = SUFFIX.parse().unwrap();
        assert_eq!(parsed.prefix(), "");
        assert_eq!(parsed.uuid(), value());
    }

    #[test]
    fn test_length_matches_string() {
        for prefix in ["", "a", "user", "order_line"] {
            let id = TypeId::new(prefix).unwrap();
            assert_eq!(id.len(), id.to_string().len());
        }
    }

    #[test]
    fn test_display_honours_width() {
        let id = TypeId::from_uuid("", value()).unwrap();
        assert_eq!(format!("{id:>28}"), format!("  {SUFFIX}"));
        assert_eq!(format!("{id:-<30}"), format!("{SUFFIX}----"));
    }

    #[test]
    fn test_max_length() {
        let prefix = "a".repeat(63);
        let id = TypeId::new(prefix.as_str()).unwrap();
        let s = id.to_string();
        assert_eq!(s.len(), 90);
        assert_eq!(s.len(), TypeId::MAX_LENGTH);
        assert_eq!(TypeId::parse(&s).unwrap(), id);
    }

    #[test]
    fn test_construction_validates_prefix() {
        assert_eq!(
            TypeId::from_uuid("User", value()),
            Err(IdError::InvalidPrefix(PrefixError::InvalidCharacter))
        );
        assert_eq!(
            TypeId::new("a_"),
            Err(IdError::InvalidPrefix(PrefixError::EndsWithSeparator))
        );
    }

    #[rstest]
    #[case(25)]
    #[case(91)]
    #[case(0)]
    #[case(200)]
    fn test_malformed_length(#[case] len: usize) {
        let s = "a".repeat(len);
        assert_eq!(TypeId::parse(&s), Err(IdError::MalformedLength { len }));
    }

    #[test]
    fn test_length_counts_characters() {
        // 25 characters, 26 bytes.
        let s = format!("é{}", &SUFFIX[..24]);
        assert_eq!(TypeId::parse(&s), Err(IdError::MalformedLength { len: 25 }));
    }

    #[rstest]
    #[case(format!("user-{SUFFIX}"))]
    #[case(format!("user{SUFFIX}"))]
    #[case(format!("a{SUFFIX}"))]
    fn test_missing_separator(#[case] input: String) {
        assert_eq!(TypeId::parse(&input), Err(IdError::MissingSeparator));
    }

    #[rstest]
    #[case(format!("_{SUFFIX}"), PrefixError::StartsWithSeparator)]
    #[case(format!("User_{SUFFIX}"), PrefixError::InvalidCharacter)]
    #[case(format!("user__{SUFFIX}"), PrefixError::EndsWithSeparator)]
    #[case(format!("_user_{SUFFIX}"), PrefixError::StartsWithSeparator)]
    #[case(format!("us3r_{SUFFIX}"), PrefixError::InvalidCharacter)]
    #[case(format!("é{}_{SUFFIX}", "a".repeat(62)), PrefixError::InvalidCharacter)]
    fn test_invalid_prefix(#[case] input: String, #[case] expected: PrefixError) {
        assert_eq!(TypeId::parse(&input), Err(IdError::InvalidPrefix(expected)));
    }

    #[rstest]
    #[case("user_01h455vb4pex5vsknk084sn02u")]
    #[case("user_01H455VB4PEX5VSKNK084SN02Q")]
    #[case("user_81h455vb4pex5vsknk084sn02q")]
    #[case("01h455vb4pex5vsknk084sn0-q")]
    #[case("user_01h455vb4pex5vsknk084sn0éq")]
    fn test_invalid_suffix(#[case] input: &str) {
        assert_eq!(TypeId::parse(input), Err(IdError::InvalidSuffix));
    }

    #[test]
    fn test_parse_bytes() {
        let s = format!("user_{SUFFIX}");
        let id = TypeId::parse_bytes(s.as_bytes()).unwrap();
        assert_eq!(id.prefix(), "user");

        assert_eq!(
            TypeId::parse_bytes(&[0xff, 0xfe, 0x00]),
            Err(IdError::InvalidUtf8)
        );
        let multibyte = format!("usér_{SUFFIX}");
        assert_eq!(
            TypeId::parse_bytes(multibyte.as_bytes()),
            Err(IdError::InvalidUtf8)
        );
        assert!(TypeId::try_parse_bytes(b"short").is_none());
    }

    #[test]
    fn test_try_parse() {
        assert!(TypeId::try_parse(SUFFIX).is_some());
        assert!(TypeId::try_parse("").is_none());
        assert!(TypeId::try_parse("   ").is_none());
    }

    #[test]
    fn test_write_to() {
        let id = TypeId::from_uuid("user", value()).unwrap();

        let mut buf = [0u8; MAX_LENGTH];
        assert_eq!(id.write_to(&mut buf), Some(format!("user_{SUFFIX}").as_str()));

        let mut small = [0u8; 30];
        assert_eq!(id.write_to(&mut small), None);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let id = TypeId::from_uuid("user", value()).unwrap();
        let restored = TypeId::from_bytes("user", id.to_bytes()).unwrap();
        assert_eq!(restored, id);
    }

    #[test]
    fn test_timestamp_from_generated() {
        let ts = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let id = TypeId::new_at("evt", ts).unwrap();
        assert_eq!(id.timestamp_ms(), 1_700_000_000_123);
        assert_eq!(id.timestamp(), Some(ts));
    }

    #[test]
    fn test_json_roundtrip() {
        let id = TypeId::new("user").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let parsed: TypeId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_json_invalid_is_error() {
        let result: Result<TypeId, _> = serde_json::from_str("\"user_nope\"");
        assert!(result.is_err());
        let result: Result<TypeId, _> = serde_json::from_str("42");
        assert!(result.is_err());
    }

    #[test]
    fn test_json_map_keys() {
        use std::collections::HashMap;

        let a = TypeId::new("user").unwrap();
        let b = TypeId::new("order").unwrap();
        let map: HashMap<TypeId, u32> = [(a.clone(), 1), (b.clone(), 2)].into_iter().collect();

        let json = serde_json::to_string(&map).unwrap();
        let parsed: HashMap<TypeId, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get(&a), Some(&1));
        assert_eq!(parsed.get(&b), Some(&2));
    }
}
