//! Property-based tests for candidate normalization and validation
//!
//! Uses proptest to generate random inputs and verify properties

use proptest::prelude::*;
use voicemate::shared::{normalize_candidate, Candidate, CandidateRules, ValidationError};

proptest! {
    #[test]
    fn test_normalization_is_idempotent(raw in ".*") {
        let once = normalize_candidate(&raw);
        prop_assert_eq!(normalize_candidate(&once), once);
    }

    #[test]
    fn test_normalized_has_no_whitespace_or_uppercase(raw in ".*") {
        let normalized = normalize_candidate(&raw);
        prop_assert!(!normalized.chars().any(char::is_whitespace));
        prop_assert!(!normalized.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_case_and_spacing_do_not_matter(handle in "[a-z0-9_]{3,30}") {
        let shouted = format!("  {} ", handle.to_uppercase());
        prop_assert_eq!(normalize_candidate(&shouted), handle);
    }

    #[test]
    fn test_valid_handles_parse(handle in "[a-z0-9_]{3,30}") {
        let candidate = Candidate::parse(&handle, &CandidateRules::default()).unwrap();
        prop_assert_eq!(candidate.as_str(), handle.as_str());
    }

    #[test]
    fn test_short_handles_are_too_short(handle in "[a-z0-9_]{0,2}") {
        let result = Candidate::parse(&handle, &CandidateRules::default());
        prop_assert_eq!(result, Err(ValidationError::TooShort { min: 3 }));
    }

    #[test]
    fn test_forbidden_characters_are_rejected(
        prefix in "[a-z]{3,10}",
        bad in "[!@#$%^&*().,-]",
    ) {
        let result = Candidate::parse(&format!("{}{}", prefix, bad), &CandidateRules::default());
        prop_assert_eq!(result, Err(ValidationError::InvalidCharacters));
    }
}
