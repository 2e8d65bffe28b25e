//! Pattern helpers for base58-encoded addresses.
//!
//! The server owns semantic validation of patterns; [`is_base58`] exists so
//! user interfaces can warn about patterns that can never match, not to
//! reject them. The matching test mirrors the server's case-insensitive
//! comparison rule.

use crate::types::Position;

/// The base58 alphabet used by the address encoding (no `0`, `O`, `I`, `l`).
pub const BASE58_ALPHABET: &str =
    "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Whether every character of `pattern` is in the base58 alphabet.
pub fn is_base58(pattern: &str) -> bool {
    !pattern.is_empty() && pattern.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Case-insensitive prefix/suffix test, matching the server's search rule.
pub fn matches_pattern(address: &str, pattern: &str, position: Position) -> bool {
    let address = address.as_bytes();
    let pattern = pattern.as_bytes();
    if pattern.len() > address.len() {
        return false;
    }
    match position {
        Position::Prefix => address[..pattern.len()].eq_ignore_ascii_case(pattern),
        Position::Suffix => address[address.len() - pattern.len()..].eq_ignore_ascii_case(pattern),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_excludes_ambiguous_characters() {
        for c in ['0', 'O', 'I', 'l'] {
            assert!(!BASE58_ALPHABET.contains(c), "{c} must not be in the alphabet");
        }
        assert_eq!(BASE58_ALPHABET.len(), 58);
    }

    #[test]
    fn base58_check_accepts_valid_patterns() {
        assert!(is_base58("abc"));
        assert!(is_base58("Xyz123"));
    }

    #[test]
    fn base58_check_rejects_invalid_patterns() {
        assert!(!is_base58(""));
        assert!(!is_base58("a0c"));
        assert!(!is_base58("hello!"));
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        assert!(matches_pattern("abc9fXkQ", "abc", Position::Prefix));
        assert!(matches_pattern("AbC9fXkQ", "abc", Position::Prefix));
        assert!(!matches_pattern("9abc9fXk", "abc", Position::Prefix));
    }

    #[test]
    fn suffix_match_is_case_insensitive() {
        assert!(matches_pattern("9fQkxyz", "xyz", Position::Suffix));
        assert!(matches_pattern("9fQkXYZ", "xyz", Position::Suffix));
        assert!(!matches_pattern("xyz9fQk", "xyz", Position::Suffix));
    }

    #[test]
    fn pattern_longer_than_address_never_matches() {
        assert!(!matches_pattern("ab", "abc", Position::Prefix));
        assert!(!matches_pattern("ab", "abc", Position::Suffix));
    }
}
