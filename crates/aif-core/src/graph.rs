//! # Graph Store
//!
//! The node/statement store every builder writes into.
//!
//! `GraphStore` is the seam: builders are generic over it and never reach
//! behind it. `Graph` is the in-memory implementation. All of its data
//! structures are `BTreeMap`/`BTreeSet`, so iteration order depends only on
//! the order of construction calls.

use crate::{AifError, Literal, NodeId, Term};
use oxiri::Iri;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// GRAPHSTORE TRAIT
// =============================================================================

/// The capabilities the construction layer needs from a triple store.
///
/// Statements have set semantics: adding an identical statement twice
/// leaves a single copy. Statements naming a handle the store never issued
/// fail with `AifError::NodeNotFound`.
pub trait GraphStore {
    /// Create a node. `Some(iri)` is interned: the same IRI always yields
    /// the same handle. `None` creates a fresh blank node.
    fn create_node(&mut self, iri: Option<&str>) -> Result<NodeId, AifError>;

    /// Add a (subject, predicate, object) statement between nodes.
    fn add_statement(
        &mut self,
        subject: NodeId,
        predicate: NodeId,
        object: NodeId,
    ) -> Result<(), AifError>;

    /// Attach a typed literal to a node.
    fn add_literal(
        &mut self,
        subject: NodeId,
        predicate: NodeId,
        value: Literal,
    ) -> Result<(), AifError>;

    /// All objects of `predicate` for `subject`.
    fn list_objects(&self, subject: NodeId, predicate: NodeId) -> Result<Vec<Term>, AifError>;

    /// All subjects that have `object` as a node object of `predicate`.
    fn list_subjects(&self, predicate: NodeId, object: NodeId) -> Result<Vec<NodeId>, AifError>;

    /// The handle of an already-interned IRI. Infallible and read-only.
    fn node_for_iri(&self, iri: &str) -> Option<NodeId>;

    /// Check if a node exists in the graph.
    fn contains_node(&self, id: NodeId) -> Result<bool, AifError>;

    /// Check if an exact statement exists.
    fn contains_statement(
        &self,
        subject: NodeId,
        predicate: NodeId,
        object: &Term,
    ) -> Result<bool, AifError>;

    /// Register a namespace prefix for textual dumps.
    fn set_prefix(&mut self, prefix: &str, namespace: &str) -> Result<(), AifError>;

    /// Get the total number of nodes.
    fn node_count(&self) -> Result<usize, AifError>;

    /// Get the total number of statements.
    fn statement_count(&self) -> Result<usize, AifError>;

    /// Intern an IRI node.
    fn iri(&mut self, iri: &str) -> Result<NodeId, AifError> {
        self.create_node(Some(iri))
    }
}

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

/// What a node is, beyond its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Iri(String),
    Blank,
}

/// The in-memory graph.
///
/// Uses `BTreeMap` exclusively for deterministic ordering.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Node storage: NodeId -> kind
    nodes: BTreeMap<NodeId, NodeKind>,

    /// Reverse lookup: IRI -> NodeId
    iri_index: BTreeMap<String, NodeId>,

    /// Forward index: subject -> predicate -> objects
    statements: BTreeMap<NodeId, BTreeMap<NodeId, BTreeSet<Term>>>,

    /// Backward index over node objects: object -> predicate -> subjects
    incoming: BTreeMap<NodeId, BTreeMap<NodeId, BTreeSet<NodeId>>>,

    /// Namespace prefixes: prefix -> namespace
    prefixes: BTreeMap<String, String>,

    /// Next available NodeId
    next_node_id: u64,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node's kind.
    #[must_use]
    pub fn node_kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(&id)
    }

    /// The IRI of a node, if it is not blank.
    #[must_use]
    pub fn iri_of(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(&id)? {
            NodeKind::Iri(iri) => Some(iri.as_str()),
            NodeKind::Blank => None,
        }
    }

    /// Get all statements in deterministic order.
    pub fn statements(&self) -> impl Iterator<Item = (NodeId, NodeId, &Term)> + '_ {
        self.statements.iter().flat_map(|(subject, by_predicate)| {
            by_predicate.iter().flat_map(move |(predicate, objects)| {
                objects.iter().map(move |object| (*subject, *predicate, object))
            })
        })
    }

    /// Registered namespace prefixes.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, ns)| (prefix.as_str(), ns.as_str()))
    }

    fn require(&self, id: NodeId) -> Result<(), AifError> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(AifError::NodeNotFound(id))
        }
    }

    fn insert(&mut self, subject: NodeId, predicate: NodeId, object: Term) {
        if let Term::Node(target) = &object {
            self.incoming
                .entry(*target)
                .or_default()
                .entry(predicate)
                .or_default()
                .insert(subject);
        }
        self.statements
            .entry(subject)
            .or_default()
            .entry(predicate)
            .or_default()
            .insert(object);
    }
}

impl GraphStore for Graph {
    fn create_node(&mut self, iri: Option<&str>) -> Result<NodeId, AifError> {
        if let Some(iri) = iri {
            if iri.is_empty() {
                return Err(AifError::EmptyIri);
            }
            // Return existing node if IRI already mapped
            if let Some(&node_id) = self.iri_index.get(iri) {
                return Ok(node_id);
            }
        }

        let node_id = NodeId(self.next_node_id);
        self.next_node_id = self.next_node_id.saturating_add(1);

        match iri {
            Some(iri) => {
                self.nodes.insert(node_id, NodeKind::Iri(iri.to_string()));
                self.iri_index.insert(iri.to_string(), node_id);
            }
            None => {
                self.nodes.insert(node_id, NodeKind::Blank);
            }
        }

        Ok(node_id)
    }

    fn add_statement(
        &mut self,
        subject: NodeId,
        predicate: NodeId,
        object: NodeId,
    ) -> Result<(), AifError> {
        self.require(subject)?;
        self.require(predicate)?;
        self.require(object)?;
        self.insert(subject, predicate, Term::Node(object));
        Ok(())
    }

    fn add_literal(
        &mut self,
        subject: NodeId,
        predicate: NodeId,
        value: Literal,
    ) -> Result<(), AifError> {
        self.require(subject)?;
        self.require(predicate)?;
        self.insert(subject, predicate, Term::Literal(value));
        Ok(())
    }

    fn list_objects(&self, subject: NodeId, predicate: NodeId) -> Result<Vec<Term>, AifError> {
        Ok(self
            .statements
            .get(&subject)
            .and_then(|by_predicate| by_predicate.get(&predicate))
            .map(|objects| objects.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn list_subjects(&self, predicate: NodeId, object: NodeId) -> Result<Vec<NodeId>, AifError> {
        Ok(self
            .incoming
            .get(&object)
            .and_then(|by_predicate| by_predicate.get(&predicate))
            .map(|subjects| subjects.iter().copied().collect())
            .unwrap_or_default())
    }

    fn node_for_iri(&self, iri: &str) -> Option<NodeId> {
        self.iri_index.get(iri).copied()
    }

    fn contains_node(&self, id: NodeId) -> Result<bool, AifError> {
        Ok(self.nodes.contains_key(&id))
    }

    fn contains_statement(
        &self,
        subject: NodeId,
        predicate: NodeId,
        object: &Term,
    ) -> Result<bool, AifError> {
        Ok(self
            .statements
            .get(&subject)
            .and_then(|by_predicate| by_predicate.get(&predicate))
            .is_some_and(|objects| objects.contains(object)))
    }

    fn set_prefix(&mut self, prefix: &str, namespace: &str) -> Result<(), AifError> {
        if namespace.is_empty() {
            return Err(AifError::EmptyIri);
        }
        if !is_valid_prefix_name(prefix) {
            return Err(AifError::InvalidPrefix {
                prefix: prefix.to_string(),
                reason: "not a Turtle PN_PREFIX",
            });
        }
        if Iri::parse(namespace).is_err() {
            return Err(AifError::InvalidPrefix {
                prefix: prefix.to_string(),
                reason: "namespace is not an absolute IRI",
            });
        }
        self.prefixes
            .insert(prefix.to_string(), namespace.to_string());
        Ok(())
    }

    fn node_count(&self) -> Result<usize, AifError> {
        Ok(self.nodes.len())
    }

    fn statement_count(&self) -> Result<usize, AifError> {
        Ok(self
            .statements
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeSet::len)
            .sum())
    }
}

// =============================================================================
// PREFIX NAMES
// =============================================================================

/// Whether `prefix` matches Turtle's `PN_PREFIX` production.
///
/// The empty prefix is allowed (`@prefix : <...> .`).
pub fn is_valid_prefix_name(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    if !is_pn_chars_base(first) {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    match rest.split_last() {
        None => true,
        Some((last, middle)) => {
            is_pn_chars(*last) && middle.iter().all(|c| *c == '.' || is_pn_chars(*c))
        }
    }
}

fn is_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_pn_chars(c: char) -> bool {
    is_pn_chars_base(c)
        || matches!(c,
            '_' | '-' | '0'..='9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

// =============================================================================
// TESTS
// =============================================================================
