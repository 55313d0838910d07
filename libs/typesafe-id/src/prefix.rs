//! Prefix grammar.
//!
//! A prefix is empty, or 1 to 63 characters from `a-z` and `_` that neither
//! starts nor ends with `_`.

use crate::error::PrefixError;

/// Maximum prefix length in characters.
pub const MAX_PREFIX_LEN: usize = 63;

/// The character between prefix and suffix.
pub const SEPARATOR: u8 = b'_';

/// Validates a prefix, reporting the first violated rule.
///
/// Rules are checked in this order: length, leading `_`, trailing `_`,
/// character set.
pub fn validate(prefix: &str) -> Result<(), PrefixError> {
    let bytes = prefix.as_bytes();
    let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
        return Ok(());
    };

    let len = if prefix.is_ascii() {
        bytes.len()
    } else {
        prefix.chars().count()
    };
    if len > MAX_PREFIX_LEN {
        return Err(PrefixError::TooLong);
    }
    if first == SEPARATOR {
        return Err(PrefixError::StartsWithSeparator);
    }
    if last == SEPARATOR {
        return Err(PrefixError::EndsWithSeparator);
    }
    if !bytes.iter().all(|&c| c.is_ascii_lowercase() || c == SEPARATOR) {
        return Err(PrefixError::InvalidCharacter);
    }

    Ok(())
}

/// Returns true if `prefix` satisfies the grammar.
#[must_use]
pub fn is_valid(prefix: &str) -> bool {
    validate(prefix).is_ok()
}

/// Converts a Rust type name into a default prefix.
///
/// Takes the last path segment, drops generic arguments, then lowercases and
/// inserts `_` at word boundaries: before an uppercase letter that follows a
/// lowercase letter or digit, and before the last letter of an uppercase run
/// that is followed by a lowercase letter. Digits never start a new word.
///
/// `User` -> `user`, `OrderLine` -> `order_line`, `HTTPRequest` -> `http_request`,
/// `crate::models::ApiKey<u8>` -> `api_key`.
pub(crate) fn snake_case_type_name(type_name: &str) -> String {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    let name = without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics);

    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("a")]
    #[case("user")]
    #[case("order_line")]
    #[case("prefix_with_multiple_underscores_in_it")]
    #[case("a_very_long_prefix_which_is_actually_the_maximum_allowed_length")]
    fn test_valid_prefixes(#[case] prefix: &str) {
        assert_eq!(validate(prefix), Ok(()));
        assert!(is_valid(prefix));
    }

    #[rstest]
    #[case("_a", PrefixError::StartsWithSeparator)]
    #[case("_", PrefixError::StartsWithSeparator)]
    #[case("a_", PrefixError::EndsWithSeparator)]
    #[case("a-b", PrefixError::InvalidCharacter)]
    #[case("User", PrefixError::InvalidCharacter)]
    #[case("user1", PrefixError::InvalidCharacter)]
    #[case("usér", PrefixError::InvalidCharacter)]
    #[case("a b", PrefixError::InvalidCharacter)]
    fn test_invalid_prefixes(#[case] prefix: &str, #[case] expected: PrefixError) {
        assert_eq!(validate(prefix), Err(expected));
    }

    #[test]
    fn test_length_boundary() {
        assert_eq!(validate(&"a".repeat(63)), Ok(()));
        assert_eq!(validate(&"a".repeat(64)), Err(PrefixError::TooLong));
    }

    #[test]
    fn test_length_counts_characters() {
        let at_limit = format!("é{}", "a".repeat(62));
        assert_eq!(validate(&at_limit), Err(PrefixError::InvalidCharacter));

        let over_limit = format!("é{}", "a".repeat(63));
        assert_eq!(validate(&over_limit), Err(PrefixError::TooLong));
    }

    #[test]
    fn test_first_violation_wins() {
        // Too long and starts with '_': length is reported first.
        let prefix = format!("_{}", "a".repeat(70));
        assert_eq!(validate(&prefix), Err(PrefixError::TooLong));
        // Starts and ends with '_': leading separator is reported first.
        assert_eq!(validate("_a_"), Err(PrefixError::StartsWithSeparator));
        // Ends with '_' and has an invalid character.
        assert_eq!(validate("A_"), Err(PrefixError::EndsWithSeparator));
    }

    #[rstest]
    #[case("User", "user")]
    #[case("OrderLine", "order_line")]
    #[case("HTTPRequest", "http_request")]
    #[case("ApiKey", "api_key")]
    #[case("my_app::models::ApiKey", "api_key")]
    #[case("my_app::Wrapper<my_app::Inner>", "wrapper")]
    #[case("Order2Line", "order2_line")]
    #[case("already_snake", "already_snake")]
    fn test_snake_case_type_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(snake_case_type_name(input), expected);
    }
}
