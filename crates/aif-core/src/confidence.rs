//! # Confidence
//!
//! Confidence nodes qualify exactly one resource each. They carry a double
//! value and the producing system, and are never shared between resources;
//! two resources with the same confidence get two nodes.

use crate::graph::GraphStore;
use crate::ontology::{aida, rdf};
use crate::resources::require_nodes;
use crate::{AifError, Literal, NodeId, System};

/// Attach a new confidence node to `target`.
///
/// Returns the confidence node.
pub fn mark_confidence<G: GraphStore>(
    graph: &mut G,
    system: System,
    target: NodeId,
    value: f64,
) -> Result<NodeId, AifError> {
    require_nodes(graph, [system.node(), target])?;
    attach_confidence(graph, system, target, value)
}

/// Write a confidence node without re-checking handles.
///
/// Callers must already have validated `target` and `system`.
pub(crate) fn attach_confidence<G: GraphStore>(
    graph: &mut G,
    system: System,
    target: NodeId,
    value: f64,
) -> Result<NodeId, AifError> {
    let rdf_type = graph.iri(rdf::TYPE)?;
    let confidence_class = graph.iri(aida::CONFIDENCE_CLASS)?;
    let confidence_value = graph.iri(aida::CONFIDENCE_VALUE)?;
    let system_property = graph.iri(aida::SYSTEM_PROPERTY)?;
    let confidence = graph.iri(aida::CONFIDENCE)?;

    let node = graph.create_node(None)?;
    graph.add_statement(node, rdf_type, confidence_class)?;
    graph.add_literal(node, confidence_value, Literal::double(value))?;
    graph.add_statement(node, system_property, system.node())?;
    graph.add_statement(target, confidence, node)?;

    tracing::debug!(target_node = %target, confidence = value, "marked confidence");
    Ok(node)
}

/// Optional confidence, for builders whose confidence argument is optional.
pub(crate) fn attach_optional_confidence<G: GraphStore>(
    graph: &mut G,
    system: System,
    target: NodeId,
    value: Option<f64>,
) -> Result<Option<NodeId>, AifError> {
    value
        .map(|value| attach_confidence(graph, system, target, value))
        .transpose()
}

/// Read the value of a confidence node.
pub fn confidence_value<G: GraphStore>(
    graph: &G,
    confidence: NodeId,
) -> Result<Option<f64>, AifError> {
    let Some(predicate) = graph.node_for_iri(aida::CONFIDENCE_VALUE) else {
        return Ok(None);
    };
    Ok(graph
        .list_objects(confidence, predicate)?
        .iter()
        .find_map(|term| term.as_literal().and_then(Literal::as_f64)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::query::get_confidence_assertions;
    use crate::resources::{make_entity, make_system_with_uri};
    use crate::Term;

    fn setup() -> (Graph, System, NodeId) {
        let mut graph = Graph::new();
        let system = make_system_with_uri(&mut graph, "ex:system").expect("system");
        let entity = make_entity(&mut graph, system, "ex:entity").expect("entity");
        (graph, system, entity)
    }

    #[test]
    fn confidence_is_typed_valued_and_owned() {
        let (mut graph, system, entity) = setup();
        let conf = mark_confidence(&mut graph, system, entity, 0.75).expect("confidence");

        let rdf_type = graph.node_for_iri(rdf::TYPE).expect("rdf:type");
        let class = graph.node_for_iri(aida::CONFIDENCE_CLASS).expect("class");
        let sys_prop = graph.node_for_iri(aida::SYSTEM_PROPERTY).expect("system");
        assert!(graph
            .contains_statement(conf, rdf_type, &Term::Node(class))
            .expect("contains"));
        assert!(graph
            .contains_statement(conf, sys_prop, &Term::Node(system.node()))
            .expect("contains"));
        assert_eq!(confidence_value(&graph, conf).expect("value"), Some(0.75));
    }

    #[test]
    fn mark_then_query_returns_node() {
        let (mut graph, system, entity) = setup();
        let conf = mark_confidence(&mut graph, system, entity, 0.5).expect("confidence");
        let found = get_confidence_assertions(&graph, entity).expect("query");
        assert!(found.contains(&conf));
    }

    #[test]
    fn equal_values_do_not_share_nodes() {
        let (mut graph, system, entity) = setup();
        let other = make_entity(&mut graph, system, "ex:other").expect("entity");
        let a = mark_confidence(&mut graph, system, entity, 0.5).expect("confidence");
        let b = mark_confidence(&mut graph, system, other, 0.5).expect("confidence");
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_target_leaves_graph_untouched() {
        let (mut graph, system, _) = setup();
        let before = graph.statement_count().expect("count");
        let err = mark_confidence(&mut graph, system, NodeId(999), 0.5).expect_err("unknown");
        assert!(matches!(err, AifError::NodeNotFound(NodeId(999))));
        assert_eq!(graph.statement_count().expect("count"), before);
    }
}
