//! # Reified Statements
//!
//! A reified statement is a node standing in for a (subject, predicate,
//! object) triple so the triple itself can carry a confidence or a
//! justification. Builders hand these back as a dedicated type so a type
//! or argument assertion cannot be confused with an ordinary entity.

use crate::NodeId;

/// Which kind of triple a statement reifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatementKind {
    /// `subject rdf:type ontologyType`
    Type,
    /// `eventOrRelation role filler`
    Argument,
}

/// A statement node together with the triple it reifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReifiedStatement {
    id: NodeId,
    kind: StatementKind,
    subject: NodeId,
    predicate: NodeId,
    object: NodeId,
    confidence: Option<NodeId>,
}

impl ReifiedStatement {
    pub(crate) const fn new(
        id: NodeId,
        kind: StatementKind,
        subject: NodeId,
        predicate: NodeId,
        object: NodeId,
        confidence: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            kind,
            subject,
            predicate,
            object,
            confidence,
        }
    }

    /// The statement node itself; annotate this.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    #[must_use]
    pub const fn subject(&self) -> NodeId {
        self.subject
    }

    #[must_use]
    pub const fn predicate(&self) -> NodeId {
        self.predicate
    }

    #[must_use]
    pub const fn object(&self) -> NodeId {
        self.object
    }

    /// The confidence node attached at creation, if any.
    #[must_use]
    pub const fn confidence(&self) -> Option<NodeId> {
        self.confidence
    }
}
