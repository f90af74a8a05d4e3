//! # Identifier Generation
//!
//! Strategies for minting node IRIs. Generators never touch a graph; they
//! only hand back strings that callers pass to the builders.

use crate::AifError;
use crate::primitives::{DEFAULT_IRI_BASE, PATH_SEPARATOR, PREFIX_SEPARATOR};
use uuid::Uuid;

/// A strategy for producing unique node IRIs.
pub trait IriGenerator {
    /// Produce the next IRI.
    fn next_iri(&self) -> String;
}

/// Appends a random UUID to a fixed base namespace.
///
/// The base must look like `<prefix>:<localname>`: non-empty, with a `:`
/// somewhere after the first character, and no trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuidIriGenerator {
    base: String,
}

impl UuidIriGenerator {
    /// Create a generator for `base`, rejecting malformed bases.
    pub fn new(base: impl Into<String>) -> Result<Self, AifError> {
        let base = base.into();
        if base.is_empty() {
            return Err(AifError::InvalidIriBase {
                base,
                reason: "base IRI cannot be empty",
            });
        }
        // The separator may not be the first character.
        let has_separator = base
            .char_indices()
            .any(|(i, c)| i > 0 && c == PREFIX_SEPARATOR);
        if !has_separator {
            return Err(AifError::InvalidIriBase {
                base,
                reason: "base IRI must contain a prefix followed by a colon separator",
            });
        }
        if base.ends_with(PATH_SEPARATOR) {
            return Err(AifError::InvalidIriBase {
                base,
                reason: "base IRI cannot end in /",
            });
        }
        Ok(Self { base })
    }
}

impl Default for UuidIriGenerator {
    fn default() -> Self {
        Self {
            base: DEFAULT_IRI_BASE.to_string(),
        }
    }
}

impl IriGenerator for UuidIriGenerator {
    fn next_iri(&self) -> String {
        format!("{}{}{}", self.base, PATH_SEPARATOR, Uuid::new_v4())
    }
}
