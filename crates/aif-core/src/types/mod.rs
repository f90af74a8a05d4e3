//! # Core Type Definitions
//!
//! This module contains the core types every builder passes around:
//! - Graph handles (`NodeId`, `System`)
//! - Typed literal values (`Literal`, `Datatype`) and statement objects (`Term`)
//! - Error types (`AifError`, `ErrorKind`)
//!
//! ## Ordering Guarantees
//!
//! Every type here implements `Ord` so the store can keep them in
//! `BTreeMap`/`BTreeSet`. Doubles are held in their canonical lexical form
//! for that reason.

use crate::ontology::xsd;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// GRAPH HANDLES
// =============================================================================

/// Handle to a node owned by a graph store.
///
/// Handles are only meaningful for the store that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node identifying the producer of assertions.
///
/// Only `resources::make_system_with_uri` hands these out, so holding a
/// `System` means the node was typed as an AIF system when it was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct System(NodeId);

impl System {
    pub(crate) const fn new(node: NodeId) -> Self {
        Self(node)
    }

    /// The underlying graph node.
    #[must_use]
    pub const fn node(self) -> NodeId {
        self.0
    }
}

// =============================================================================
// LITERALS
// =============================================================================

/// XSD datatype of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Datatype {
    String,
    Int,
    Long,
    Double,
}

impl Datatype {
    /// Full datatype IRI.
    #[must_use]
    pub const fn iri(self) -> &'static str {
        match self {
            Self::String => xsd::STRING,
            Self::Int => xsd::INT,
            Self::Long => xsd::LONG,
            Self::Double => xsd::DOUBLE,
        }
    }
}

/// A typed literal value.
///
/// The lexical form is computed once at construction; equality and
/// ordering are lexical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    datatype: Datatype,
}

impl Literal {
    /// An `xsd:string` literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: Datatype::String,
        }
    }

    /// An `xsd:int` literal (offsets, coordinates).
    #[must_use]
    pub fn int(value: i32) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: Datatype::Int,
        }
    }

    /// An `xsd:long` literal.
    #[must_use]
    pub fn long(value: i64) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: Datatype::Long,
        }
    }

    /// An `xsd:double` literal (confidences, timestamps).
    #[must_use]
    pub fn double(value: f64) -> Self {
        let lexical = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            if value.is_sign_positive() {
                "INF".to_string()
            } else {
                "-INF".to_string()
            }
        } else {
            format!("{:?}", value)
        };
        Self {
            lexical,
            datatype: Datatype::Double,
        }
    }

    /// The lexical form.
    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    #[must_use]
    pub const fn datatype(&self) -> Datatype {
        self.datatype
    }

    /// Numeric value of a double literal.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if self.datatype != Datatype::Double {
            return None;
        }
        match self.lexical.as_str() {
            "INF" => Some(f64::INFINITY),
            "-INF" => Some(f64::NEG_INFINITY),
            other => other.parse().ok(),
        }
    }
}

// =============================================================================
// TERMS
// =============================================================================

/// Object position of a statement: either a node or a literal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Node(NodeId),
    Literal(Literal),
}

impl Term {
    #[must_use]
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            Self::Literal(_) => None,
        }
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            Self::Node(_) => None,
        }
    }
}

impl From<NodeId> for Term {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Broad category of an [`AifError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed configuration, e.g. an identifier base namespace.
    Configuration,
    /// A value out of range or two values in the wrong order.
    Range,
    /// Too few elements in a collection that needs some.
    Cardinality,
    /// A payload that could not be encoded.
    Serialization,
    /// A handle the store does not know, or one of the wrong shape.
    Reference,
    /// A writer or file operation failed.
    Io,
}

/// Errors raised while building an AIF graph.
///
/// Every builder checks its arguments before writing, so any of these
/// leaves the graph exactly as it was before the failing call.
#[derive(Debug, Error)]
pub enum AifError {
    /// The IRI generator base namespace is malformed.
    #[error("Invalid IRI base {base:?}: {reason}")]
    InvalidIriBase { base: String, reason: &'static str },

    /// A namespace prefix or its namespace cannot be written as Turtle.
    #[error("Invalid prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },

    /// An IRI was empty.
    #[error("IRI must not be empty")]
    EmptyIri,

    /// An image/video coordinate was negative.
    #[error("Image/video coordinates must be non-negative but got {0}")]
    NegativeCoordinate(i32),

    /// Upper-left corner is not above and to the left of lower-right.
    #[error("Upper left of bounding box ({ulx}, {uly}) not above and to the left of lower right ({lrx}, {lry})")]
    InvertedBoundingBox { ulx: i32, uly: i32, lrx: i32, lry: i32 },

    /// A text offset was negative.
    #[error("Start offset must be non-negative but got {0}")]
    NegativeOffset(i32),

    /// End offset precedes start offset.
    #[error("End offset {end} precedes start offset {start}")]
    InvertedOffsets { start: i32, end: i32 },

    /// Audio end timestamp does not strictly follow the start.
    #[error("End timestamp {end} does not follow start timestamp {start}")]
    NonPositiveDuration { start: f64, end: f64 },

    /// A hypothesis was given no content.
    #[error("A hypothesis must have content")]
    EmptyHypothesis,

    /// A mutual exclusion needs at least two alternatives.
    #[error("Must have at least two mutually exclusive things when making a mutual exclusion constraint, but got {0}")]
    TooFewAlternatives(usize),

    /// A mutual-exclusion alternative had no edges.
    #[error("Mutual exclusion alternative {0} has no edges")]
    EmptyAlternative(usize),

    /// A compound justification was given nothing to contain.
    #[error("A compound justification must contain at least one justification")]
    EmptyCompoundJustification,

    /// A private-data payload could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The handle is not known to this store.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// The handle does not name a reified statement.
    #[error("Node {0} is not a reified statement")]
    NotAStatement(NodeId),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl AifError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIriBase { .. } | Self::InvalidPrefix { .. } | Self::ConfigError(_) => {
                ErrorKind::Configuration
            }
            Self::NegativeCoordinate(_)
            | Self::InvertedBoundingBox { .. }
            | Self::NegativeOffset(_)
            | Self::InvertedOffsets { .. }
            | Self::NonPositiveDuration { .. } => ErrorKind::Range,
            Self::EmptyHypothesis
            | Self::TooFewAlternatives(_)
            | Self::EmptyAlternative(_)
            | Self::EmptyCompoundJustification => ErrorKind::Cardinality,
            Self::SerializationError(_) => ErrorKind::Serialization,
            Self::EmptyIri | Self::NodeNotFound(_) | Self::NotAStatement(_) => {
                ErrorKind::Reference
            }
            Self::IoError(_) => ErrorKind::Io,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
