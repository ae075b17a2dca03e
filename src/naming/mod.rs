//! Naming strategies mapping declared identifiers to external JSON keys.
//!
//! Every strategy splits its input into words the same way (see
//! [`split_words`]) and joins them in its own case style. Separators and
//! surrounding whitespace never survive; digit runs are kept as written.
//!
//! # Example
//!
//! ```rust
//! use transposer::naming::{CamelCase, NamingStrategy, SnakeCase};
//!
//! assert_eq!(CamelCase.format("SCREAMING_SNAKE_CASE"), "screamingSnakeCase");
//! assert_eq!(SnakeCase.format(" whitespace-padded "), "whitespace_padded");
//! ```

mod cache;
mod strategies;

pub use cache::CachingNamingStrategy;
pub use strategies::{
    CamelCase, CobolCase, FlatCase, Identity, KebabCase, PascalCase, ScreamingSnakeCase,
    SnakeCase, TrainCase, UpperFlatCase,
};

/// Maps a declared identifier to its external key spelling.
pub trait NamingStrategy: Send + Sync {
    /// Returns the external form of `identifier`.
    fn format(&self, identifier: &str) -> String;

    /// Returns a spelling-independent form used for comparisons.
    fn normalise(&self, identifier: &str) -> String {
        split_words(identifier)
            .iter()
            .map(|word| word.to_lowercase())
            .collect()
    }
}

impl<N: NamingStrategy + ?Sized> NamingStrategy for std::sync::Arc<N> {
    fn format(&self, identifier: &str) -> String {
        (**self).format(identifier)
    }

    fn normalise(&self, identifier: &str) -> String {
        (**self).normalise(identifier)
    }
}

/// Splits an identifier into words.
///
/// Any non-alphanumeric character separates words. Inside a run of
/// alphanumerics a new word starts at a lowercase-or-digit to uppercase
/// transition (`camelCase`, `line2Total`) and at the last capital of an
/// acronym followed by lowercase (`XMLHttp` -> `XML`, `Http`).
pub fn split_words(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Canonical collection key: lowercased with whitespace, `-` and `_` removed.
///
/// `"First_Name"`, `"first name"` and `"FIRST-NAME"` all become `"firstname"`.
pub fn normalise_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
