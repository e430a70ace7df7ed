//! ID prefix constants and generation.
//!
//! IDs look like `upd-a3f8b2c1`: a short entity prefix, a dash, and 8 lowercase
//! hex characters. The data-access layer draws every ID with [`generate_id`]
//! and draws again if the store reports the ID as taken.

use crate::errors::CoreError;

pub const PREFIX_WAITLIST: &str = "wl";
pub const PREFIX_UPDATE: &str = "upd";
pub const PREFIX_COMMENT: &str = "cmt";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_WAITLIST, PREFIX_UPDATE, PREFIX_COMMENT];

/// Generate a prefixed ID from the OS entropy source.
///
/// # Errors
///
/// Returns `CoreError::BackendUnavailable` if the entropy source fails.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::backend(format!("entropy source: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

/// Check that `id` has the given prefix followed by 8 hex characters.
#[must_use]
pub fn is_well_formed(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_well_formed() {
        for prefix in ALL_PREFIXES {
            let id = generate_id(prefix).unwrap();
            assert!(is_well_formed(&id, prefix), "malformed id: {id}");
        }
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = generate_id("tst").unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[test]
    fn rejects_foreign_prefix_and_bad_hex() {
        assert!(!is_well_formed("cmt-a3f8b2c1", PREFIX_UPDATE));
        assert!(!is_well_formed("upd-a3f8b2", PREFIX_UPDATE));
        assert!(!is_well_formed("upd-zzzzzzzz", PREFIX_UPDATE));
        assert!(is_well_formed("upd-a3f8b2c1", PREFIX_UPDATE));
    }
}
