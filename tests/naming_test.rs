//! Tests for the naming strategies.

use std::sync::Arc;

use proptest::prelude::*;
use transposer::naming::{
    split_words, CamelCase, CobolCase, FlatCase, Identity, KebabCase, PascalCase,
    ScreamingSnakeCase, SnakeCase, TrainCase, UpperFlatCase,
};
use transposer::{CachingNamingStrategy, NamingStrategy};

fn shared(strategy: impl NamingStrategy + 'static) -> Arc<dyn NamingStrategy> {
    Arc::new(strategy)
}

fn strategies() -> Vec<(&'static str, Arc<dyn NamingStrategy>)> {
    vec![
        ("identity", shared(Identity)),
        ("camel", shared(CamelCase)),
        ("pascal", shared(PascalCase)),
        ("snake", shared(SnakeCase)),
        ("screaming", shared(ScreamingSnakeCase)),
        ("kebab", shared(KebabCase)),
        ("cobol", shared(CobolCase)),
        ("train", shared(TrainCase)),
        ("flat", shared(FlatCase)),
        ("upper_flat", shared(UpperFlatCase)),
    ]
}

#[test]
fn test_documented_examples() {
    assert_eq!(CamelCase.format("SCREAMING_SNAKE_CASE"), "screamingSnakeCase");
    assert_eq!(SnakeCase.format(" whitespace-padded "), "whitespace_padded");
}

#[test]
fn test_every_strategy() {
    let expected = [
        "firstName",
        "firstName",
        "FirstName",
        "first_name",
        "FIRST_NAME",
        "first-name",
        "FIRST-NAME",
        "First-Name",
        "firstname",
        "FIRSTNAME",
    ];

    for ((label, strategy), expected) in strategies().iter().zip(expected) {
        assert_eq!(strategy.format("  firstName "), expected, "{}", label);
        if *label != "identity" {
            assert_eq!(strategy.format("first_name"), expected, "{}", label);
            assert_eq!(strategy.format("FIRST-NAME"), expected, "{}", label);
        }
    }
}

#[test]
fn test_acronyms_and_digits() {
    assert_eq!(SnakeCase.format("XMLHttpRequest"), "xml_http_request");
    assert_eq!(CamelCase.format("user_ID"), "userId");
    assert_eq!(KebabCase.format("addressLine2"), "address-line2");
    assert_eq!(PascalCase.format("api_v2_client"), "ApiV2Client");
    assert_eq!(split_words("HTTPServer404Error"), vec!["HTTP", "Server404", "Error"]);
}

#[test]
fn test_caching_wrapper_is_transparent() {
    let cached = CachingNamingStrategy::new(SnakeCase);
    for input in ["firstName", "lastName", "firstName"] {
        assert_eq!(cached.format(input), SnakeCase.format(input));
    }
    assert_eq!(cached.cached_len(), 2);
}

proptest! {
    /// Every strategy keeps the letters and digits of the identifier.
    #[test]
    fn format_preserves_normalised_form(identifier in "[a-zA-Z0-9_ -]{0,24}") {
        let expected = Identity.normalise(&identifier);
        for (label, strategy) in strategies() {
            let formatted = strategy.format(&identifier);
            prop_assert_eq!(
                Identity.normalise(&formatted),
                expected.clone(),
                "{} formatted '{}' as '{}'",
                label,
                identifier,
                formatted
            );
        }
    }

    /// Snake case output is lowercase words joined by single underscores.
    #[test]
    fn snake_case_shape(identifier in "[a-zA-Z0-9_ .-]{0,24}") {
        let formatted = SnakeCase.format(&identifier);
        prop_assert!(!formatted.starts_with('_'));
        prop_assert!(!formatted.ends_with('_'));
        prop_assert!(!formatted.contains("__"));
        prop_assert!(formatted
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }

    /// Formatting an already formatted key changes nothing.
    #[test]
    fn snake_and_kebab_are_idempotent(identifier in "[a-zA-Z0-9_ -]{0,24}") {
        let once = SnakeCase.format(&identifier);
        prop_assert_eq!(SnakeCase.format(&once), once);
        let once = KebabCase.format(&identifier);
        prop_assert_eq!(KebabCase.format(&once), once);
    }

    /// The cache returns what the wrapped strategy returns.
    #[test]
    fn cache_agrees_with_inner(identifier in ".{0,24}") {
        let cached = CachingNamingStrategy::new(CamelCase);
        let first = cached.format(&identifier);
        prop_assert_eq!(&first, &CamelCase.format(&identifier));
        prop_assert_eq!(cached.format(&identifier), first);
    }
}
