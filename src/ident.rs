//! Session-unique identifier generation.
//!
//! Ids combine a millisecond timestamp with a short random suffix:
//! the timestamp keeps ids distinguishable over time, the suffix keeps
//! entities created within the same millisecond apart. Uniqueness only
//! needs to hold against ids minted by this process — imported ids are
//! trusted as given.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

const SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mints an id of the form `{prefix}-{millis}-{suffix}`.
pub fn new_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();

    format!("{prefix}-{millis}-{suffix}")
}

/// Mints a student id.
pub fn student_id() -> String {
    new_id("student")
}

/// Mints a tag id.
pub fn tag_id() -> String {
    new_id("custom")
}

/// Mints a separation-rule id.
pub fn rule_id() -> String {
    new_id("rule")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let id = new_id("student");
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "student");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), SUFFIX_LEN);
    }

    #[test]
    fn test_ids_unique_within_tick() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id("rule")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_prefixes() {
        assert!(student_id().starts_with("student-"));
        assert!(tag_id().starts_with("custom-"));
        assert!(rule_id().starts_with("rule-"));
    }
}
