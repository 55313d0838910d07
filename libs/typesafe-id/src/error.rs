//! Error types for ID parsing, generation and typed binding.

use thiserror::Error;

/// The first rule a prefix breaks.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixError {
    /// The prefix is longer than 63 characters.
    #[error("prefix is longer than 63 characters")]
    TooLong,

    /// The prefix starts with `_`.
    #[error("prefix starts with '_'")]
    StartsWithSeparator,

    /// The prefix ends with `_`.
    #[error("prefix ends with '_'")]
    EndsWithSeparator,

    /// The prefix contains something other than `a-z` or `_`.
    #[error("prefix contains a character outside 'a-z' and '_'")]
    InvalidCharacter,
}

/// Errors that can occur when parsing, generating or binding IDs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is shorter than 26 or longer than 90 characters.
    #[error("invalid ID length: {len} (expected 26 to 90 characters)")]
    MalformedLength { len: usize },

    /// The character before the 26-character suffix is not `_`.
    #[error("ID missing underscore separator before suffix")]
    MissingSeparator,

    /// The prefix portion of the ID breaks the prefix grammar.
    #[error("invalid ID prefix: {0}")]
    InvalidPrefix(#[from] PrefixError),

    /// The suffix is not a valid base32 encoding of 128 bits.
    #[error("invalid ID suffix: expected 26 characters from '0123456789abcdefghjkmnpqrstvwxyz' starting with 0-7")]
    InvalidSuffix,

    /// The byte input is not ASCII-only UTF-8.
    #[error("ID bytes are not valid single-byte UTF-8")]
    InvalidUtf8,

    /// The ID carries a prefix other than the one its type is bound to.
    #[error("invalid ID prefix: expected '{expected}', got '{actual}'")]
    PrefixMismatch {
        expected: &'static str,
        actual: String,
    },

    /// The generator was asked for a timestamp before 1970-01-01T00:00:00Z.
    #[error("timestamp precedes the Unix epoch")]
    TimestampBeforeEpoch,

    /// The generator was asked for a timestamp beyond the 48-bit millisecond range.
    #[error("timestamp does not fit in 48 bits of milliseconds")]
    TimestampOverflow,

    /// A bound type resolved to a prefix that breaks the grammar.
    #[error("invalid TypeId prefix '{prefix}' configured for type '{type_name}': {reason}")]
    FatalPrefixConfiguration {
        type_name: &'static str,
        prefix: String,
        reason: PrefixError,
    },
}

impl IdError {
    /// Returns true if this error means the input is not a well-formed ID string.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            IdError::MalformedLength { .. }
                | IdError::MissingSeparator
                | IdError::InvalidPrefix(_)
                | IdError::InvalidSuffix
                | IdError::InvalidUtf8
        )
    }

    /// Returns true if this error concerns the prefix.
    pub fn is_prefix_error(&self) -> bool {
        matches!(
            self,
            IdError::InvalidPrefix(_)
                | IdError::PrefixMismatch { .. }
                | IdError::FatalPrefixConfiguration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_classification() {
        assert!(IdError::MalformedLength { len: 3 }.is_malformed());
        assert!(IdError::InvalidPrefix(PrefixError::TooLong).is_malformed());
        assert!(!IdError::TimestampBeforeEpoch.is_malformed());
        assert!(!IdError::PrefixMismatch {
            expected: "user",
            actual: "org".to_string()
        }
        .is_malformed());
    }

    #[test]
    fn test_prefix_error_conversion() {
        let err: IdError = PrefixError::EndsWithSeparator.into();
        assert!(err.is_prefix_error());
        assert_eq!(err.to_string(), "invalid ID prefix: prefix ends with '_'");
    }
}
