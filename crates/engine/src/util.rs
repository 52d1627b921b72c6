//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API.

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Trim and NFC-normalize a display name, rejecting blank input.
///
/// Precomposed and combining spellings of a name normalize to the same string.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.nfc().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_composed() {
        let decomposed = "  Zoe\u{0301}  ";
        assert_eq!(
            normalize_required_name(decomposed, "person").unwrap(),
            "Zo\u{e9}"
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            normalize_required_name("   ", "group"),
            Err(EngineError::InvalidName(
                "group name must not be empty".to_string()
            ))
        );
    }

    #[test]
    fn stored_ids_must_be_uuids() {
        assert!(parse_uuid("not-a-uuid", "person").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), "person").unwrap(), id);
    }
}
