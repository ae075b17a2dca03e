//! Built-in naming strategies.

use super::{capitalize, split_words, NamingStrategy};

/// Keeps the identifier as declared, minus surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl NamingStrategy for Identity {
    fn format(&self, identifier: &str) -> String {
        identifier.trim().to_string()
    }
}

/// `camelCase`
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCase;

impl NamingStrategy for CamelCase {
    fn format(&self, identifier: &str) -> String {
        split_words(identifier)
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i == 0 {
                    word.to_lowercase()
                } else {
                    capitalize(word)
                }
            })
            .collect()
    }
}

/// `PascalCase`
#[derive(Debug, Clone, Copy, Default)]
pub struct PascalCase;

impl NamingStrategy for PascalCase {
    fn format(&self, identifier: &str) -> String {
        split_words(identifier)
            .iter()
            .map(|word| capitalize(word))
            .collect()
    }
}

/// `snake_case`
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCase;

impl NamingStrategy for SnakeCase {
    fn format(&self, identifier: &str) -> String {
        join_lower(identifier, "_")
    }
}

/// `SCREAMING_SNAKE_CASE`
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreamingSnakeCase;

impl NamingStrategy for ScreamingSnakeCase {
    fn format(&self, identifier: &str) -> String {
        join_upper(identifier, "_")
    }
}

/// `kebab-case`
#[derive(Debug, Clone, Copy, Default)]
pub struct KebabCase;

impl NamingStrategy for KebabCase {
    fn format(&self, identifier: &str) -> String {
        join_lower(identifier, "-")
    }
}

/// `COBOL-CASE`
#[derive(Debug, Clone, Copy, Default)]
pub struct CobolCase;

impl NamingStrategy for CobolCase {
    fn format(&self, identifier: &str) -> String {
        join_upper(identifier, "-")
    }
}

/// `Train-Case`
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainCase;

impl NamingStrategy for TrainCase {
    fn format(&self, identifier: &str) -> String {
        split_words(identifier)
            .iter()
            .map(|word| capitalize(word))
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// `flatcase`
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatCase;

impl NamingStrategy for FlatCase {
    fn format(&self, identifier: &str) -> String {
        join_lower(identifier, "")
    }
}

/// `UPPERFLATCASE`
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperFlatCase;

impl NamingStrategy for UpperFlatCase {
    fn format(&self, identifier: &str) -> String {
        join_upper(identifier, "")
    }
}

fn join_lower(identifier: &str, separator: &str) -> String {
    split_words(identifier)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn join_upper(identifier: &str, separator: &str) -> String {
    split_words(identifier)
        .iter()
        .map(|word| word.to_uppercase())
        .collect::<Vec<_>>()
        .join(separator)
}
