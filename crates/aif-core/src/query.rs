//! # Fixed Lookups
//!
//! The two graph-pattern matches the construction layer offers. Neither is
//! general query evaluation. Both return an empty set, never an error, when
//! nothing matches.

use crate::graph::GraphStore;
use crate::ontology::{aida, rdf};
use crate::{AifError, NodeId, Term};
use std::collections::BTreeSet;

/// All type assertions whose subject is `node`.
///
/// Matches `?s rdf:type rdf:Statement ; rdf:subject node ; rdf:predicate rdf:type`.
pub fn get_type_assertions<G: GraphStore>(
    graph: &G,
    node: NodeId,
) -> Result<BTreeSet<NodeId>, AifError> {
    let (Some(rdf_type), Some(statement), Some(rdf_subject), Some(rdf_predicate)) = (
        graph.node_for_iri(rdf::TYPE),
        graph.node_for_iri(rdf::STATEMENT),
        graph.node_for_iri(rdf::SUBJECT),
        graph.node_for_iri(rdf::PREDICATE),
    ) else {
        return Ok(BTreeSet::new());
    };

    let mut found = BTreeSet::new();
    for candidate in graph.list_subjects(rdf_subject, node)? {
        if graph.contains_statement(candidate, rdf_type, &Term::Node(statement))?
            && graph.contains_statement(candidate, rdf_predicate, &Term::Node(rdf_type))?
        {
            found.insert(candidate);
        }
    }
    Ok(found)
}

/// All confidence nodes directly attached to `node`.
pub fn get_confidence_assertions<G: GraphStore>(
    graph: &G,
    node: NodeId,
) -> Result<BTreeSet<NodeId>, AifError> {
    let Some(confidence) = graph.node_for_iri(aida::CONFIDENCE) else {
        return Ok(BTreeSet::new());
    };
    Ok(graph
        .list_objects(node, confidence)?
        .iter()
        .filter_map(Term::as_node)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::mark_confidence;
    use crate::graph::Graph;
    use crate::resources::{make_entity, make_event, make_system_with_uri, mark_as_argument, mark_type};

    #[test]
    fn empty_graph_has_no_assertions() {
        let graph = Graph::new();
        assert!(get_type_assertions(&graph, NodeId(0)).expect("query").is_empty());
        assert!(get_confidence_assertions(&graph, NodeId(0))
            .expect("query")
            .is_empty());
    }

    #[test]
    fn type_assertions_scoped_to_subject() {
        let mut graph = Graph::new();
        let system = make_system_with_uri(&mut graph, "ex:system").expect("system");
        let bob = make_entity(&mut graph, system, "ex:bob").expect("entity");
        let alice = make_entity(&mut graph, system, "ex:alice").expect("entity");
        let person = graph.iri("ex:Person").expect("type");

        let bob_type = mark_type(&mut graph, system, bob, person, Some(0.9), None).expect("type");
        let alice_type = mark_type(&mut graph, system, alice, person, None, None).expect("type");

        assert_eq!(
            get_type_assertions(&graph, bob).expect("query"),
            BTreeSet::from([bob_type.id()])
        );
        assert_eq!(
            get_type_assertions(&graph, alice).expect("query"),
            BTreeSet::from([alice_type.id()])
        );
    }

    #[test]
    fn argument_assertions_are_not_type_assertions() {
        let mut graph = Graph::new();
        let system = make_system_with_uri(&mut graph, "ex:system").expect("system");
        let event = make_event(&mut graph, system, "ex:event").expect("event");
        let filler = make_entity(&mut graph, system, "ex:filler").expect("entity");
        let role = graph.iri("ex:role").expect("role");
        mark_as_argument(&mut graph, system, event, role, filler, None, None).expect("argument");

        assert!(get_type_assertions(&graph, event).expect("query").is_empty());
    }

    #[test]
    fn confidence_assertions_accumulate() {
        let mut graph = Graph::new();
        let system = make_system_with_uri(&mut graph, "ex:system").expect("system");
        let bob = make_entity(&mut graph, system, "ex:bob").expect("entity");
        let a = mark_confidence(&mut graph, system, bob, 0.2).expect("confidence");
        let b = mark_confidence(&mut graph, system, bob, 0.4).expect("confidence");
        assert_eq!(
            get_confidence_assertions(&graph, bob).expect("query"),
            BTreeSet::from([a, b])
        );
    }
}
