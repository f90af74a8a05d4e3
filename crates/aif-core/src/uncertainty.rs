//! # Mutual Exclusion and Hypotheses
//!
//! Structures that qualify whole groups of statements at once.
//!
//! A mutual exclusion says at most one of its alternatives holds. Each
//! alternative wraps a subgraph of reified statements and carries its own
//! confidence. A hypothesis wraps a subgraph of supporting resources and
//! may be depended on by other resources.
//!
//! Both are validated completely before the first write.

use crate::confidence::{attach_confidence, attach_optional_confidence};
use crate::graph::GraphStore;
use crate::ontology::{aida, rdf};
use crate::primitives::MIN_MUTEX_ALTERNATIVES;
use crate::resources::{make_aif_resource, require_nodes};
use crate::statement::ReifiedStatement;
use crate::{AifError, Literal, NodeId, System, Term};
use std::collections::BTreeSet;

// =============================================================================
// SUBGRAPHS
// =============================================================================

/// Write a blank `Subgraph` node containing every member.
fn make_subgraph<G: GraphStore>(
    graph: &mut G,
    members: impl IntoIterator<Item = NodeId>,
) -> Result<NodeId, AifError> {
    let rdf_type = graph.iri(rdf::TYPE)?;
    let subgraph_class = graph.iri(aida::SUBGRAPH)?;
    let contains = graph.iri(aida::SUBGRAPH_CONTAINS)?;

    let subgraph = graph.create_node(None)?;
    graph.add_statement(subgraph, rdf_type, subgraph_class)?;
    for member in members {
        graph.add_statement(subgraph, contains, member)?;
    }
    Ok(subgraph)
}

/// Fail unless `id` is a node typed `rdf:Statement` in this store.
fn require_statement<G: GraphStore>(graph: &G, id: NodeId) -> Result<(), AifError> {
    if !graph.contains_node(id)? {
        return Err(AifError::NodeNotFound(id));
    }
    let (Some(rdf_type), Some(statement)) = (
        graph.node_for_iri(rdf::TYPE),
        graph.node_for_iri(rdf::STATEMENT),
    ) else {
        return Err(AifError::NotAStatement(id));
    };
    if graph.contains_statement(id, rdf_type, &Term::Node(statement))? {
        Ok(())
    } else {
        Err(AifError::NotAStatement(id))
    }
}

// =============================================================================
// MUTUAL EXCLUSION
// =============================================================================

/// Mark single edges as mutually exclusive.
///
/// Each `(edge, confidence)` pair becomes a one-edge alternative.
pub fn mark_edges_as_mutually_exclusive<G: GraphStore>(
    graph: &mut G,
    system: System,
    alternatives: &[(ReifiedStatement, f64)],
    none_of_the_above: Option<f64>,
) -> Result<NodeId, AifError> {
    let wrapped: Vec<(Vec<ReifiedStatement>, f64)> = alternatives
        .iter()
        .map(|&(edge, confidence)| (vec![edge], confidence))
        .collect();
    mark_as_mutually_exclusive(graph, system, &wrapped, none_of_the_above)
}

/// Mark sets of edges as mutually exclusive.
///
/// At least two alternatives are required and none may be empty. Every
/// edge must be a reified statement of this store. `none_of_the_above`, if
/// given, is stored as a literal on the returned top-level node.
pub fn mark_as_mutually_exclusive<G: GraphStore>(
    graph: &mut G,
    system: System,
    alternatives: &[(Vec<ReifiedStatement>, f64)],
    none_of_the_above: Option<f64>,
) -> Result<NodeId, AifError> {
    if alternatives.len() < MIN_MUTEX_ALTERNATIVES {
        return Err(AifError::TooFewAlternatives(alternatives.len()));
    }
    if let Some(index) = alternatives.iter().position(|(edges, _)| edges.is_empty()) {
        return Err(AifError::EmptyAlternative(index));
    }
    require_nodes(graph, [system.node()])?;
    for (edges, _) in alternatives {
        for edge in edges {
            require_statement(graph, edge.id())?;
        }
    }

    let alternative_property = graph.iri(aida::ALTERNATIVE)?;
    let alternative_graph = graph.iri(aida::ALTERNATIVE_GRAPH)?;
    let rdf_type = graph.iri(rdf::TYPE)?;
    let alternative_class = graph.iri(aida::MUTUAL_EXCLUSION_ALTERNATIVE)?;

    let mutex = make_aif_resource(graph, None, aida::MUTUAL_EXCLUSION, system)?;
    for (edges, confidence) in alternatives {
        let alternative = graph.create_node(None)?;
        graph.add_statement(alternative, rdf_type, alternative_class)?;
        let subgraph = make_subgraph(graph, edges.iter().map(ReifiedStatement::id))?;
        graph.add_statement(alternative, alternative_graph, subgraph)?;
        attach_confidence(graph, system, alternative, *confidence)?;
        graph.add_statement(mutex, alternative_property, alternative)?;
    }

    if let Some(probability) = none_of_the_above {
        let none = graph.iri(aida::NONE_OF_THE_ABOVE)?;
        graph.add_literal(mutex, none, Literal::double(probability))?;
    }

    tracing::debug!(
        mutex = %mutex,
        alternatives = alternatives.len(),
        "marked mutual exclusion"
    );
    Ok(mutex)
}

// =============================================================================
// HYPOTHESES
// =============================================================================

/// Create a hypothesis wrapping a non-empty set of resources.
pub fn make_hypothesis<G: GraphStore>(
    graph: &mut G,
    system: System,
    uri: &str,
    content: &BTreeSet<NodeId>,
    confidence: Option<f64>,
) -> Result<NodeId, AifError> {
    if content.is_empty() {
        return Err(AifError::EmptyHypothesis);
    }
    if uri.is_empty() {
        return Err(AifError::EmptyIri);
    }
    require_nodes(graph, content.iter().copied().chain([system.node()]))?;

    let hypothesis_content = graph.iri(aida::HYPOTHESIS_CONTENT)?;
    let hypothesis = make_aif_resource(graph, Some(uri), aida::HYPOTHESIS, system)?;
    let subgraph = make_subgraph(graph, content.iter().copied())?;
    graph.add_statement(hypothesis, hypothesis_content, subgraph)?;
    attach_optional_confidence(graph, system, hypothesis, confidence)?;

    tracing::debug!(hypothesis = uri, size = content.len(), "created hypothesis");
    Ok(hypothesis)
}

/// Mark `dependent` as holding only if `hypothesis` holds.
pub fn mark_depends_on_hypothesis<G: GraphStore>(
    graph: &mut G,
    dependent: NodeId,
    hypothesis: NodeId,
) -> Result<(), AifError> {
    require_nodes(graph, [dependent, hypothesis])?;
    let depends_on = graph.iri(aida::DEPENDS_ON_HYPOTHESIS)?;
    graph.add_statement(dependent, depends_on, hypothesis)
}

// =============================================================================
// TESTS
// =============================================================================
