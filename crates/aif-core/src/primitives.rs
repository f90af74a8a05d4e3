//! # Construction Primitives
//!
//! Fixed constants the builders rely on. They are compiled in and do not
//! change at runtime.

/// Confidence of a cluster's prototype membership.
///
/// The prototype is, by definition, certainly a member of its own cluster.
pub const PROTOTYPE_CONFIDENCE: f64 = 1.0;

/// Minimum number of alternatives in a mutual exclusion.
pub const MIN_MUTEX_ALTERNATIVES: usize = 2;

/// Base namespace used by `UuidIriGenerator::default()`.
pub const DEFAULT_IRI_BASE: &str = "dummy:uri";

/// Separator between a prefix and the local name of an IRI base.
pub const PREFIX_SEPARATOR: char = ':';

/// Separator between an IRI base and a generated suffix.
pub const PATH_SEPARATOR: char = '/';

/// JSON keys of a vectorized private-data payload, in emission order.
pub const VECTOR_TYPE_KEY: &str = "vector_type";
pub const VECTOR_DATA_KEY: &str = "vector_data";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prototype_confidence_is_certain() {
        assert_eq!(PROTOTYPE_CONFIDENCE.to_bits(), 1.0_f64.to_bits());
    }

    #[test]
    fn mutex_needs_two() {
        assert_eq!(MIN_MUTEX_ALTERNATIVES, 2);
    }
}
