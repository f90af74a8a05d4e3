//! # Construction Scenario Tests (T0-T4)
//!
//! Each tier builds on the one before it. A failure in a lower tier
//! usually explains failures above it.
//!
//! ## Tiers
//! - T0: Value Objects & Identifiers
//! - T1: Resources & Assertions
//! - T2: Justifications
//! - T3: Uncertainty & Clusters
//! - T4: End-to-End Graphs

use aif_core::ontology::{aida, rdf};
use aif_core::{
    AifError, BoundingBox, ErrorKind, Graph, GraphStore, IriGenerator, Literal, NodeId, System,
    Term, UuidIriGenerator,
};
use std::collections::BTreeSet;

fn new_graph() -> (Graph, System) {
    let mut graph = Graph::new();
    aif_core::add_standard_namespaces(&mut graph).expect("namespaces");
    let system = aif_core::make_system_with_uri(&mut graph, "http://ex.org/testSystem")
        .expect("system");
    (graph, system)
}

fn node_objects(graph: &Graph, subject: NodeId, property: &str) -> Vec<NodeId> {
    let Some(p) = graph.node_for_iri(property) else {
        return Vec::new();
    };
    graph
        .list_objects(subject, p)
        .expect("objects")
        .iter()
        .filter_map(Term::as_node)
        .collect()
}

fn single_confidence(graph: &Graph, node: NodeId) -> Option<f64> {
    let confidences = aif_core::get_confidence_assertions(graph, node).expect("query");
    assert!(confidences.len() <= 1, "more than one confidence on {node}");
    let confidence = confidences.into_iter().next()?;
    aif_core::confidence_value(graph, confidence).expect("value")
}

// =============================================================================
// TIER T0: VALUE OBJECTS & IDENTIFIERS
// =============================================================================

mod t0_values_and_identifiers {
    use super::*;

    /// T0.1: Ordered boxes are accepted, inverted ones rejected.
    #[test]
    fn bounding_box_order() {
        assert!(BoundingBox::from_coords(5, 5, 20, 20).is_ok());
        let err = BoundingBox::from_coords(10, 10, 5, 20).expect_err("inverted");
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    /// T0.2: Generated IRIs extend the base with a unique suffix.
    #[test]
    fn generated_iris_are_unique() {
        let generator = UuidIriGenerator::new("http://ex.org/entities").expect("generator");
        let a = generator.next_iri();
        let b = generator.next_iri();
        assert!(a.starts_with("http://ex.org/entities/"));
        assert_ne!(a, b);
    }

    /// T0.3: Malformed bases are configuration errors.
    #[test]
    fn malformed_bases_rejected() {
        for base in ["", ":foo", "nocolon", "ex:trailing/"] {
            let err = UuidIriGenerator::new(base).expect_err(base);
            assert_eq!(err.kind(), ErrorKind::Configuration, "{base}");
        }
    }
}

// =============================================================================
// TIER T1: RESOURCES & ASSERTIONS
// =============================================================================

mod t1_resources_and_assertions {
    use super::*;

    /// T1.1: Type assertions are found for their subject only.
    #[test]
    fn type_assertion_round_trip() {
        let (mut graph, system) = new_graph();
        let bob = aif_core::make_entity(&mut graph, system, "http://ex.org/bob").expect("entity");
        let other = aif_core::make_entity(&mut graph, system, "http://ex.org/x").expect("entity");
        let person = graph.iri("http://ex.org/ontology#Person").expect("type");

        let first = aif_core::mark_type(&mut graph, system, bob, person, Some(0.9), None)
            .expect("type");
        aif_core::mark_type(&mut graph, system, other, person, None, None).expect("type");
        let second = aif_core::mark_type(&mut graph, system, bob, person, None, None)
            .expect("type");

        assert_eq!(
            aif_core::get_type_assertions(&graph, bob).expect("query"),
            BTreeSet::from([first.id(), second.id()])
        );
    }

    /// T1.2: Arguments with caller identifiers keep them.
    #[test]
    fn argument_with_uri() {
        let (mut graph, system) = new_graph();
        let event = aif_core::make_event(&mut graph, system, "http://ex.org/e").expect("event");
        let bob = aif_core::make_entity(&mut graph, system, "http://ex.org/bob").expect("entity");
        let role = graph.iri("http://ex.org/ontology#Attacker").expect("role");

        let arg = aif_core::mark_as_argument(
            &mut graph,
            system,
            event,
            role,
            bob,
            Some(0.5),
            Some("http://ex.org/arg-1"),
        )
        .expect("argument");
        assert_eq!(graph.node_for_iri("http://ex.org/arg-1"), Some(arg.id()));
        assert_eq!(single_confidence(&graph, arg.id()), Some(0.5));
    }

    /// T1.3: Unknown handles fail as reference errors and write nothing.
    #[test]
    fn unknown_handles_are_reference_errors() {
        let (mut graph, system) = new_graph();
        let before = graph.statement_count().expect("count");
        let err = aif_core::mark_type(&mut graph, system, NodeId(9999), NodeId(9998), None, None)
            .expect_err("unknown");
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(graph.statement_count().expect("count"), before);
    }
}

// =============================================================================
// TIER T2: JUSTIFICATIONS
// =============================================================================

mod t2_justifications {
    use super::*;

    /// T2.1: Text offset boundaries.
    #[test]
    fn text_offsets() {
        let (mut graph, system) = new_graph();
        assert!(aif_core::make_text_justification(&mut graph, system, "doc", 0, 0, 1.0).is_ok());
        assert!(matches!(
            aif_core::make_text_justification(&mut graph, system, "doc", 10, 4, 1.0),
            Err(AifError::InvertedOffsets { .. })
        ));
    }

    /// T2.2: Audio intervals must strictly increase.
    #[test]
    fn audio_interval() {
        let (mut graph, system) = new_graph();
        assert!(aif_core::make_audio_justification(&mut graph, system, "a", 2.0, 2.0, 1.0).is_err());
        assert!(aif_core::make_audio_justification(&mut graph, system, "a", 1.0, 2.0, 1.0).is_ok());
    }

    /// T2.3: A justified argument assertion, the common chaining pattern.
    #[test]
    fn justify_an_argument() {
        let (mut graph, system) = new_graph();
        let event = aif_core::make_event(&mut graph, system, "http://ex.org/e").expect("event");
        let bob = aif_core::make_entity(&mut graph, system, "http://ex.org/bob").expect("entity");
        let role = graph.iri("http://ex.org/ontology#Victim").expect("role");
        let arg = aif_core::mark_as_argument(&mut graph, system, event, role, bob, None, None)
            .expect("argument");

        let bbox = BoundingBox::from_coords(0, 0, 100, 50).expect("bbox");
        let image =
            aif_core::mark_image_justification(&mut graph, system, &[arg.id()], "img", bbox, 0.7)
                .expect("image");
        assert_eq!(node_objects(&graph, arg.id(), aida::JUSTIFIED_BY), vec![image]);
    }

    /// T2.4: A compound justification stands in for its parts.
    #[test]
    fn compound_justification() {
        let (mut graph, system) = new_graph();
        let bob = aif_core::make_entity(&mut graph, system, "http://ex.org/bob").expect("entity");
        let text = aif_core::make_text_justification(&mut graph, system, "doc", 1, 5, 0.9)
            .expect("text");
        let audio = aif_core::make_audio_justification(&mut graph, system, "aud", 0.5, 3.0, 0.4)
            .expect("audio");

        let compound =
            aif_core::mark_compound_justification(&mut graph, system, &[bob], &[text, audio], 0.6)
                .expect("compound");
        assert_eq!(node_objects(&graph, bob, aida::JUSTIFIED_BY), vec![compound]);
        assert_eq!(single_confidence(&graph, compound), Some(0.6));
    }
}

// =============================================================================
// TIER T3: UNCERTAINTY & CLUSTERS
// =============================================================================

mod t3_uncertainty_and_clusters {
    use super::*;

    /// T3.1: Competing types become a two-way mutual exclusion.
    #[test]
    fn competing_types() {
        let (mut graph, system) = new_graph();
        let thing = aif_core::make_entity(&mut graph, system, "http://ex.org/t").expect("entity");
        let person = graph.iri("http://ex.org/ontology#Person").expect("type");
        let org = graph.iri("http://ex.org/ontology#Organization").expect("type");
        let as_person = aif_core::mark_type(&mut graph, system, thing, person, None, None)
            .expect("type");
        let as_org = aif_core::mark_type(&mut graph, system, thing, org, None, None).expect("type");

        let mutex = aif_core::mark_edges_as_mutually_exclusive(
            &mut graph,
            system,
            &[(as_person, 0.7), (as_org, 0.2)],
            Some(0.1),
        )
        .expect("mutex");
        let alternatives = node_objects(&graph, mutex, aida::ALTERNATIVE);
        assert_eq!(alternatives.len(), 2);
        assert_eq!(single_confidence(&graph, alternatives[0]), Some(0.7));
        assert_eq!(single_confidence(&graph, alternatives[1]), Some(0.2));
    }

    /// T3.2: Raw entities cannot stand in for statements.
    #[test]
    fn alternatives_must_be_statements() {
        let (mut graph, system) = new_graph();
        let bob = aif_core::make_entity(&mut graph, system, "http://ex.org/bob").expect("entity");
        let person = graph.iri("http://ex.org/ontology#Person").expect("type");
        let typed = aif_core::mark_type(&mut graph, system, bob, person, None, None).expect("type");
        let carol =
            aif_core::make_entity(&mut graph, system, "http://ex.org/carol").expect("entity");

        // A statement from another graph whose handle collides with `carol` here.
        let mut other = Graph::new();
        let other_system =
            aif_core::make_system_with_uri(&mut other, "http://ex.org/other").expect("system");
        aif_core::make_entity(&mut other, other_system, "http://ex.org/alice").expect("entity");
        let other_bob =
            aif_core::make_entity(&mut other, other_system, "http://ex.org/bob").expect("entity");
        let other_type = other.iri("http://ex.org/ontology#Person").expect("type");
        let foreign =
            aif_core::mark_type(&mut other, other_system, other_bob, other_type, None, None)
                .expect("type");
        assert_eq!(foreign.id(), carol);

        let before = graph.statement_count().expect("count");
        let err = aif_core::mark_edges_as_mutually_exclusive(
            &mut graph,
            system,
            &[(typed, 0.5), (foreign, 0.5)],
            None,
        )
        .expect_err("foreign statement");
        assert!(matches!(err, AifError::NotAStatement(id) if id == carol));
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(graph.statement_count().expect("count"), before);
    }

    /// T3.3: A hypothesis can be depended on.
    #[test]
    fn hypothesis_then_dependency() {
        let (mut graph, system) = new_graph();
        let bob = aif_core::make_entity(&mut graph, system, "http://ex.org/bob").expect("entity");
        let person = graph.iri("http://ex.org/ontology#Person").expect("type");
        let typed = aif_core::mark_type(&mut graph, system, bob, person, None, None).expect("type");

        let hypothesis = aif_core::make_hypothesis(
            &mut graph,
            system,
            "http://ex.org/hypothesis-1",
            &BTreeSet::from([typed.id()]),
            Some(0.8),
        )
        .expect("hypothesis");
        aif_core::mark_depends_on_hypothesis(&mut graph, bob, hypothesis).expect("depends");

        assert_eq!(
            node_objects(&graph, bob, aida::DEPENDS_ON_HYPOTHESIS),
            vec![hypothesis]
        );
        assert_eq!(single_confidence(&graph, hypothesis), Some(0.8));
    }

    /// T3.4: Prototype membership is certain and created with the cluster.
    #[test]
    fn cluster_prototype() {
        let (mut graph, system) = new_graph();
        let bob = aif_core::make_entity(&mut graph, system, "http://ex.org/bob").expect("entity");
        let cluster =
            aif_core::make_cluster_with_prototype(&mut graph, system, "http://ex.org/c", bob)
                .expect("cluster");

        let cluster_property = graph.node_for_iri(aida::CLUSTER).expect("cluster property");
        let memberships = graph
            .list_subjects(cluster_property, cluster)
            .expect("subjects");
        assert_eq!(memberships.len(), 1);
        assert_eq!(single_confidence(&graph, memberships[0]), Some(1.0));
    }
}

// =============================================================================
// TIER T4: END-TO-END GRAPHS
// =============================================================================

mod t4_end_to_end {
    use super::*;
    use aif_core::{NTriples, Turtle};
    use rio_api::model::{Literal as RioLiteral, Term as RioTerm};
    use rio_api::parser::TriplesParser;
    use rio_turtle::{TurtleError, TurtleParser};

    /// T4.1: System, entity, typed with confidence, justified by text.
    #[test]
    fn entity_with_type_and_text_justification() {
        let (mut graph, system) = new_graph();
        let entity = aif_core::make_entity(&mut graph, system, "http://ex.org/E").expect("entity");
        let person = graph.iri("http://ex.org/ontology#Person").expect("type");
        let type_assertion =
            aif_core::mark_type(&mut graph, system, entity, person, Some(0.9), None)
                .expect("type");
        let justification = aif_core::mark_text_justification(
            &mut graph,
            system,
            &[entity],
            "doc1",
            10,
            20,
            0.8,
        )
        .expect("justification");

        // E is an Entity owned by S
        let entity_class = graph.node_for_iri(aida::ENTITY).expect("class");
        assert_eq!(node_objects(&graph, entity, rdf::TYPE), vec![entity_class]);
        assert_eq!(
            node_objects(&graph, entity, aida::SYSTEM_PROPERTY),
            vec![system.node()]
        );

        // One type assertion with confidence 0.9
        let assertions = aif_core::get_type_assertions(&graph, entity).expect("query");
        assert_eq!(assertions, BTreeSet::from([type_assertion.id()]));
        assert_eq!(node_objects(&graph, type_assertion.id(), rdf::OBJECT), vec![person]);
        assert_eq!(single_confidence(&graph, type_assertion.id()), Some(0.9));

        // One text justification linked via justifiedBy
        assert_eq!(
            node_objects(&graph, entity, aida::JUSTIFIED_BY),
            vec![justification]
        );
        let source = graph.node_for_iri(aida::SOURCE).expect("source");
        assert_eq!(
            graph.list_objects(justification, source).expect("objects"),
            vec![Term::Literal(Literal::string("doc1"))]
        );
        assert_eq!(single_confidence(&graph, justification), Some(0.8));

        assert!(aif_core::audit_graph(&graph).expect("audit").is_clean());
    }

    /// T4.2: Identical construction sequences dump identically.
    #[test]
    fn dumps_are_deterministic() {
        let build = || {
            let (mut graph, system) = new_graph();
            let bob =
                aif_core::make_entity(&mut graph, system, "http://ex.org/bob").expect("entity");
            aif_core::mark_name(&mut graph, bob, "Bob \"the builder\"").expect("name");
            aif_core::mark_text_justification(&mut graph, system, &[bob], "doc", 0, 2, 0.5)
                .expect("text");
            graph
        };
        let (a, b) = (build(), build());
        assert_eq!(
            NTriples::to_string(&a).expect("dump"),
            NTriples::to_string(&b).expect("dump")
        );
        let turtle = Turtle::to_string(&a).expect("dump");
        assert_eq!(turtle, Turtle::to_string(&b).expect("dump"));

        let mut names = Vec::new();
        let mut count = 0;
        TurtleParser::new(turtle.as_bytes(), None)
            .parse_all(&mut |triple| -> Result<(), TurtleError> {
                count += 1;
                if triple.predicate.iri == aida::HAS_NAME {
                    if let RioTerm::Literal(RioLiteral::Simple { value }) = triple.object {
                        names.push(value.to_string());
                    }
                }
                Ok(())
            })
            .expect("turtle parses");
        assert_eq!(count, a.statement_count().expect("count"));
        assert_eq!(names, vec!["Bob \"the builder\"".to_string()]);
    }
}
