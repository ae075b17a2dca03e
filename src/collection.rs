//! Sealed, name-normalizing property collection.
//!
//! A [`Collection`] is built once from an ordered list of properties and
//! cannot change afterwards. Lookups go through [`normalise_name`], so
//! `"First_Name"`, `"first name"` and `"FIRST-NAME"` all find the same
//! property.

use indexmap::IndexMap;

use crate::error::EngineError;
use crate::naming::normalise_name;
use crate::property::Property;

/// Attempted mutation of a sealed collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("cannot set '{key}': property collection is sealed")]
    Sealed { key: String },

    #[error("cannot unset '{key}': property collection is sealed")]
    SealedUnset { key: String },
}

/// An insertion-ordered map of properties keyed by normalised name.
///
/// When two properties normalise to the same key, the one added last wins
/// lookups and takes over the slot of the first, so iteration keeps the
/// position of the first declaration.
///
/// # Example
///
/// ```rust
/// use transposer::{Collection, Property};
///
/// let collection = Collection::new(vec![
///     Property::string("first_name"),
///     Property::integer("age"),
/// ])
/// .unwrap();
///
/// assert!(collection.exists("FirstName"));
/// assert_eq!(collection.get("first-name").unwrap().name(), "first_name");
/// assert!(collection.set("age", Property::string("age")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Collection {
    properties: IndexMap<String, Property>,
}

impl Collection {
    /// Builds and seals a collection.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidIdentifier` for a property whose name
    /// normalises to the empty string.
    pub fn new(properties: impl IntoIterator<Item = Property>) -> Result<Self, EngineError> {
        let mut map = IndexMap::new();
        for property in properties {
            let key = normalise_name(property.name());
            if key.is_empty() {
                return Err(EngineError::InvalidIdentifier(property.name().to_string()));
            }
            map.insert(key, property);
        }
        Ok(Self { properties: map })
    }

    /// Returns true if a property with a name normalising like `name` exists.
    pub fn exists(&self, name: &str) -> bool {
        self.properties.contains_key(&normalise_name(name))
    }

    /// Looks a property up by any spelling of its name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(&normalise_name(name))
    }

    /// Always fails: the collection is sealed.
    pub fn set(&self, name: &str, _property: Property) -> Result<(), CollectionError> {
        Err(CollectionError::Sealed {
            key: name.to_string(),
        })
    }

    /// Always fails: the collection is sealed.
    pub fn unset(&self, name: &str) -> Result<(), CollectionError> {
        Err(CollectionError::SealedUnset {
            key: name.to_string(),
        })
    }

    /// Iterates `(declared name, property)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties
            .values()
            .map(|property| (property.name(), property))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a str, &'a Property);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Property)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
