//! # Node and Edge Builders
//!
//! Systems, entities, events, relations, and the reified type and argument
//! assertions that connect them.
//!
//! Every builder takes the store and the producing `System` explicitly,
//! checks all caller-supplied handles first, and only then writes.

use crate::confidence::attach_optional_confidence;
use crate::graph::GraphStore;
use crate::ontology::{STANDARD_PREFIXES, aida, rdf};
use crate::statement::{ReifiedStatement, StatementKind};
use crate::{AifError, Literal, NodeId, System};

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Fail with `NodeNotFound` on the first handle the store does not know.
pub(crate) fn require_nodes<G: GraphStore>(
    graph: &G,
    ids: impl IntoIterator<Item = NodeId>,
) -> Result<(), AifError> {
    for id in ids {
        if !graph.contains_node(id)? {
            return Err(AifError::NodeNotFound(id));
        }
    }
    Ok(())
}

/// Create a node typed with `class_iri` and stamped with `system`.
pub(crate) fn make_aif_resource<G: GraphStore>(
    graph: &mut G,
    uri: Option<&str>,
    class_iri: &str,
    system: System,
) -> Result<NodeId, AifError> {
    let rdf_type = graph.iri(rdf::TYPE)?;
    let class = graph.iri(class_iri)?;
    let resource = graph.create_node(uri)?;
    graph.add_statement(resource, rdf_type, class)?;
    stamp_system(graph, resource, system)?;
    Ok(resource)
}

fn stamp_system<G: GraphStore>(
    graph: &mut G,
    resource: NodeId,
    system: System,
) -> Result<(), AifError> {
    let system_property = graph.iri(aida::SYSTEM_PROPERTY)?;
    graph.add_statement(resource, system_property, system.node())
}

fn check_uri(uri: Option<&str>) -> Result<(), AifError> {
    match uri {
        Some("") => Err(AifError::EmptyIri),
        _ => Ok(()),
    }
}

// =============================================================================
// NAMESPACES & SYSTEMS
// =============================================================================

/// Register the `rdf`, `xsd`, `aida` and `skos` prefixes.
///
/// Only affects the readability of textual dumps.
pub fn add_standard_namespaces<G: GraphStore>(graph: &mut G) -> Result<(), AifError> {
    for (prefix, namespace) in STANDARD_PREFIXES {
        graph.set_prefix(prefix, namespace)?;
    }
    Ok(())
}

/// Create the node representing the system which produced some data.
///
/// Create this once per producer and pass the returned handle to every
/// other builder.
pub fn make_system_with_uri<G: GraphStore>(graph: &mut G, uri: &str) -> Result<System, AifError> {
    check_uri(Some(uri))?;
    let rdf_type = graph.iri(rdf::TYPE)?;
    let system_class = graph.iri(aida::SYSTEM)?;
    let node = graph.create_node(Some(uri))?;
    graph.add_statement(node, rdf_type, system_class)?;
    tracing::debug!(system = uri, "created system");
    Ok(System::new(node))
}

/// Mark a resource as coming from `system`.
pub fn mark_system<G: GraphStore>(
    graph: &mut G,
    system: System,
    resource: NodeId,
) -> Result<(), AifError> {
    require_nodes(graph, [system.node(), resource])?;
    stamp_system(graph, resource, system)
}

// =============================================================================
// ENTITIES, EVENTS, RELATIONS
// =============================================================================

/// Create an entity. `uri` can be any unique string.
pub fn make_entity<G: GraphStore>(
    graph: &mut G,
    system: System,
    uri: &str,
) -> Result<NodeId, AifError> {
    make_typed(graph, system, uri, aida::ENTITY)
}

/// Create an event. `uri` can be any unique string.
pub fn make_event<G: GraphStore>(
    graph: &mut G,
    system: System,
    uri: &str,
) -> Result<NodeId, AifError> {
    make_typed(graph, system, uri, aida::EVENT)
}

/// Create a relation. `uri` can be any unique string.
pub fn make_relation<G: GraphStore>(
    graph: &mut G,
    system: System,
    uri: &str,
) -> Result<NodeId, AifError> {
    make_typed(graph, system, uri, aida::RELATION)
}

fn make_typed<G: GraphStore>(
    graph: &mut G,
    system: System,
    uri: &str,
    class_iri: &str,
) -> Result<NodeId, AifError> {
    check_uri(Some(uri))?;
    require_nodes(graph, [system.node()])?;
    let node = make_aif_resource(graph, Some(uri), class_iri, system)?;
    tracing::debug!(uri, class = class_iri, "created resource");
    Ok(node)
}

// =============================================================================
// TYPE & ARGUMENT ASSERTIONS
// =============================================================================

/// Assert that an entity, event or relation has `ontology_type`.
///
/// The assertion is always reified, even without a confidence, so that
/// competing types can later be bundled with
/// `uncertainty::mark_as_mutually_exclusive`. `uri` of `None` creates a
/// blank assertion node.
pub fn mark_type<G: GraphStore>(
    graph: &mut G,
    system: System,
    subject: NodeId,
    ontology_type: NodeId,
    confidence: Option<f64>,
    uri: Option<&str>,
) -> Result<ReifiedStatement, AifError> {
    check_uri(uri)?;
    require_nodes(graph, [system.node(), subject, ontology_type])?;
    let rdf_type = graph.iri(rdf::TYPE)?;
    reify(
        graph,
        system,
        StatementKind::Type,
        (subject, rdf_type, ontology_type),
        confidence,
        uri,
    )
}

/// Mark `filler` as filling `role` of an event or relation.
///
/// Returns the argument assertion; `uri` of `None` creates a blank node.
pub fn mark_as_argument<G: GraphStore>(
    graph: &mut G,
    system: System,
    event_or_relation: NodeId,
    role: NodeId,
    filler: NodeId,
    confidence: Option<f64>,
    uri: Option<&str>,
) -> Result<ReifiedStatement, AifError> {
    check_uri(uri)?;
    require_nodes(graph, [system.node(), event_or_relation, role, filler])?;
    reify(
        graph,
        system,
        StatementKind::Argument,
        (event_or_relation, role, filler),
        confidence,
        uri,
    )
}

fn reify<G: GraphStore>(
    graph: &mut G,
    system: System,
    kind: StatementKind,
    (subject, predicate, object): (NodeId, NodeId, NodeId),
    confidence: Option<f64>,
    uri: Option<&str>,
) -> Result<ReifiedStatement, AifError> {
    let rdf_subject = graph.iri(rdf::SUBJECT)?;
    let rdf_predicate = graph.iri(rdf::PREDICATE)?;
    let rdf_object = graph.iri(rdf::OBJECT)?;

    let node = make_aif_resource(graph, uri, rdf::STATEMENT, system)?;
    graph.add_statement(node, rdf_subject, subject)?;
    graph.add_statement(node, rdf_predicate, predicate)?;
    graph.add_statement(node, rdf_object, object)?;
    let confidence = attach_optional_confidence(graph, system, node, confidence)?;

    tracing::debug!(statement = %node, ?kind, "reified statement");
    Ok(ReifiedStatement::new(
        node, kind, subject, predicate, object, confidence,
    ))
}

/// Everything `make_relation_in_event_form` creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFormRelation {
    pub relation: NodeId,
    pub type_assertion: ReifiedStatement,
    pub subject_argument: ReifiedStatement,
    pub object_argument: ReifiedStatement,
}

/// Make a relation of `relation_type` between two fillers, linked to the
/// relation through explicit roles the way an event's arguments are.
///
/// The same `confidence`, if any, is put on the type assertion and on both
/// argument assertions.
pub fn make_relation_in_event_form<G: GraphStore>(
    graph: &mut G,
    system: System,
    relation_uri: &str,
    relation_type: NodeId,
    (subject_role, subject): (NodeId, NodeId),
    (object_role, object): (NodeId, NodeId),
    type_assertion_uri: Option<&str>,
    confidence: Option<f64>,
) -> Result<EventFormRelation, AifError> {
    check_uri(Some(relation_uri))?;
    check_uri(type_assertion_uri)?;
    require_nodes(
        graph,
        [
            system.node(),
            relation_type,
            subject_role,
            subject,
            object_role,
            object,
        ],
    )?;

    let relation = make_aif_resource(graph, Some(relation_uri), aida::RELATION, system)?;
    let type_assertion = mark_type(
        graph,
        system,
        relation,
        relation_type,
        confidence,
        type_assertion_uri,
    )?;
    let subject_argument =
        mark_as_argument(graph, system, relation, subject_role, subject, confidence, None)?;
    let object_argument =
        mark_as_argument(graph, system, relation, object_role, object, confidence, None)?;

    Ok(EventFormRelation {
        relation,
        type_assertion,
        subject_argument,
        object_argument,
    })
}

// =============================================================================
// NAMES & VALUES
// =============================================================================

/// Mark an entity as having `name`.
pub fn mark_name<G: GraphStore>(graph: &mut G, entity: NodeId, name: &str) -> Result<(), AifError> {
    add_value(graph, entity, aida::HAS_NAME, Literal::string(name))
}

/// Mark an entity as having a text value.
pub fn mark_text_value<G: GraphStore>(
    graph: &mut G,
    entity: NodeId,
    text_value: &str,
) -> Result<(), AifError> {
    add_value(graph, entity, aida::TEXT_VALUE, Literal::string(text_value))
}

/// Mark an entity as having a numeric value, kept as written.
pub fn mark_numeric_value_as_string<G: GraphStore>(
    graph: &mut G,
    entity: NodeId,
    numeric_value: &str,
) -> Result<(), AifError> {
    add_value(
        graph,
        entity,
        aida::NUMERIC_VALUE,
        Literal::string(numeric_value),
    )
}

/// Mark an entity as having a numeric value, as a double.
pub fn mark_numeric_value_as_double<G: GraphStore>(
    graph: &mut G,
    entity: NodeId,
    numeric_value: f64,
) -> Result<(), AifError> {
    add_value(
        graph,
        entity,
        aida::NUMERIC_VALUE,
        Literal::double(numeric_value),
    )
}

/// Mark an entity as having a numeric value, as a long.
pub fn mark_numeric_value_as_long<G: GraphStore>(
    graph: &mut G,
    entity: NodeId,
    numeric_value: i64,
) -> Result<(), AifError> {
    add_value(
        graph,
        entity,
        aida::NUMERIC_VALUE,
        Literal::long(numeric_value),
    )
}

fn add_value<G: GraphStore>(
    graph: &mut G,
    entity: NodeId,
    property_iri: &str,
    value: Literal,
) -> Result<(), AifError> {
    require_nodes(graph, [entity])?;
    let property = graph.iri(property_iri)?;
    graph.add_literal(entity, property, value)
}

// =============================================================================
// TESTS
// =============================================================================
