//! # Integrity Audit
//!
//! Re-checks a finished graph against the structural rules the builders
//! enforce when they write. A graph built only through this crate's
//! builders produces an empty report; a graph assembled by hand through
//! `GraphStore` directly may not.
//!
//! This is a pre-flight check, not an ontology shape validator. It only
//! looks at the AIF scaffolding: reification, confidences, system stamps,
//! clusters, mutual exclusions and hypotheses.

use crate::graph::GraphStore;
use crate::ontology::{aida, rdf};
use crate::primitives::{MIN_MUTEX_ALTERNATIVES, PROTOTYPE_CONFIDENCE};
use crate::{AifError, Literal, NodeId, Term};
use serde::Serialize;
use std::fmt;

/// Classes whose instances must carry `aida:system`.
const SYSTEM_STAMPED_CLASSES: [&str; 16] = [
    aida::ENTITY,
    aida::EVENT,
    aida::RELATION,
    rdf::STATEMENT,
    aida::CONFIDENCE_CLASS,
    aida::TEXT_JUSTIFICATION,
    aida::IMAGE_JUSTIFICATION,
    aida::KEY_FRAME_VIDEO_JUSTIFICATION,
    aida::SHOT_VIDEO_JUSTIFICATION,
    aida::AUDIO_JUSTIFICATION,
    aida::COMPOUND_JUSTIFICATION,
    aida::SAME_AS_CLUSTER,
    aida::CLUSTER_MEMBERSHIP,
    aida::MUTUAL_EXCLUSION,
    aida::HYPOTHESIS,
    aida::LINK_ASSERTION,
];

// =============================================================================
// REPORT
// =============================================================================

/// Which rule a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditRule {
    /// A statement node lacks exactly one subject, predicate or object.
    MalformedStatement,
    /// A confidence node lacks exactly one value.
    ConfidenceValue,
    /// A confidence node is attached to zero or several resources.
    ConfidenceOwner,
    /// A typed resource has no producing system.
    MissingSystem,
    /// A cluster lacks exactly one prototype.
    ClusterPrototype,
    /// A cluster's prototype has no membership at confidence 1.0.
    PrototypeMembership,
    /// A mutual exclusion has fewer than two alternatives.
    TooFewAlternatives,
    /// A hypothesis has no content, or its content subgraph is empty.
    EmptyHypothesis,
}

impl fmt::Display for AuditRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedStatement => "malformed_statement",
            Self::ConfidenceValue => "confidence_value",
            Self::ConfidenceOwner => "confidence_owner",
            Self::MissingSystem => "missing_system",
            Self::ClusterPrototype => "cluster_prototype",
            Self::PrototypeMembership => "prototype_membership",
            Self::TooFewAlternatives => "too_few_alternatives",
            Self::EmptyHypothesis => "empty_hypothesis",
        };
        f.write_str(name)
    }
}

/// One broken rule on one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub node: NodeId,
    pub rule: AuditRule,
    pub detail: String,
}

/// Everything the audit found, in node order per rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub violations: Vec<Violation>,
}

impl AuditReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, node: NodeId, rule: AuditRule, detail: impl Into<String>) {
        self.violations.push(Violation {
            node,
            rule,
            detail: detail.into(),
        });
    }
}

// =============================================================================
// AUDIT
// =============================================================================

/// Run every check over `graph`.
pub fn audit_graph<G: GraphStore>(graph: &G) -> Result<AuditReport, AifError> {
    let mut report = AuditReport::default();
    check_statements(graph, &mut report)?;
    check_confidences(graph, &mut report)?;
    check_system_stamps(graph, &mut report)?;
    check_clusters(graph, &mut report)?;
    check_mutual_exclusions(graph, &mut report)?;
    check_hypotheses(graph, &mut report)?;

    tracing::debug!(violations = report.violations.len(), "audit finished");
    Ok(report)
}

/// Instances of `class_iri`, or none if the class was never used.
fn instances_of<G: GraphStore>(graph: &G, class_iri: &str) -> Result<Vec<NodeId>, AifError> {
    match (graph.node_for_iri(rdf::TYPE), graph.node_for_iri(class_iri)) {
        (Some(rdf_type), Some(class)) => graph.list_subjects(rdf_type, class),
        _ => Ok(Vec::new()),
    }
}

fn objects<G: GraphStore>(graph: &G, subject: NodeId, property: &str) -> Result<Vec<Term>, AifError> {
    match graph.node_for_iri(property) {
        Some(p) => graph.list_objects(subject, p),
        None => Ok(Vec::new()),
    }
}

fn node_objects<G: GraphStore>(
    graph: &G,
    subject: NodeId,
    property: &str,
) -> Result<Vec<NodeId>, AifError> {
    Ok(objects(graph, subject, property)?
        .iter()
        .filter_map(Term::as_node)
        .collect())
}

fn subjects<G: GraphStore>(graph: &G, property: &str, object: NodeId) -> Result<Vec<NodeId>, AifError> {
    match graph.node_for_iri(property) {
        Some(p) => graph.list_subjects(p, object),
        None => Ok(Vec::new()),
    }
}

fn check_statements<G: GraphStore>(graph: &G, report: &mut AuditReport) -> Result<(), AifError> {
    for statement in instances_of(graph, rdf::STATEMENT)? {
        for part in [rdf::SUBJECT, rdf::PREDICATE, rdf::OBJECT] {
            let count = node_objects(graph, statement, part)?.len();
            if count != 1 {
                report.push(
                    statement,
                    AuditRule::MalformedStatement,
                    format!("{count} values for {part}"),
                );
            }
        }
    }
    Ok(())
}

fn check_confidences<G: GraphStore>(graph: &G, report: &mut AuditReport) -> Result<(), AifError> {
    for confidence in instances_of(graph, aida::CONFIDENCE_CLASS)? {
        let values: Vec<_> = objects(graph, confidence, aida::CONFIDENCE_VALUE)?
            .iter()
            .filter_map(|t| t.as_literal().and_then(Literal::as_f64))
            .collect();
        if values.len() != 1 {
            report.push(
                confidence,
                AuditRule::ConfidenceValue,
                format!("{} numeric values", values.len()),
            );
        }
        let owners = subjects(graph, aida::CONFIDENCE, confidence)?.len();
        if owners != 1 {
            report.push(
                confidence,
                AuditRule::ConfidenceOwner,
                format!("attached to {owners} resources"),
            );
        }
    }
    Ok(())
}

fn check_system_stamps<G: GraphStore>(graph: &G, report: &mut AuditReport) -> Result<(), AifError> {
    for class_iri in SYSTEM_STAMPED_CLASSES {
        for resource in instances_of(graph, class_iri)? {
            if node_objects(graph, resource, aida::SYSTEM_PROPERTY)?.is_empty() {
                report.push(
                    resource,
                    AuditRule::MissingSystem,
                    format!("{class_iri} without a system"),
                );
            }
        }
    }
    Ok(())
}

fn check_clusters<G: GraphStore>(graph: &G, report: &mut AuditReport) -> Result<(), AifError> {
    let certain = Term::Literal(Literal::double(PROTOTYPE_CONFIDENCE));
    let confidence_value = graph.node_for_iri(aida::CONFIDENCE_VALUE);

    for cluster in instances_of(graph, aida::SAME_AS_CLUSTER)? {
        let prototypes = node_objects(graph, cluster, aida::PROTOTYPE)?;
        let [prototype] = prototypes.as_slice() else {
            report.push(
                cluster,
                AuditRule::ClusterPrototype,
                format!("{} prototypes", prototypes.len()),
            );
            continue;
        };

        let mut found = false;
        for membership in subjects(graph, aida::CLUSTER, cluster)? {
            if !node_objects(graph, membership, aida::CLUSTER_MEMBER)?.contains(prototype) {
                continue;
            }
            let Some(value_property) = confidence_value else {
                break;
            };
            for confidence in node_objects(graph, membership, aida::CONFIDENCE)? {
                if graph.contains_statement(confidence, value_property, &certain)? {
                    found = true;
                }
            }
        }
        if !found {
            report.push(
                cluster,
                AuditRule::PrototypeMembership,
                format!("no certain membership for prototype {prototype}"),
            );
        }
    }
    Ok(())
}

fn check_mutual_exclusions<G: GraphStore>(
    graph: &G,
    report: &mut AuditReport,
) -> Result<(), AifError> {
    for mutex in instances_of(graph, aida::MUTUAL_EXCLUSION)? {
        let count = node_objects(graph, mutex, aida::ALTERNATIVE)?.len();
        if count < MIN_MUTEX_ALTERNATIVES {
            report.push(
                mutex,
                AuditRule::TooFewAlternatives,
                format!("{count} alternatives"),
            );
        }
    }
    Ok(())
}

fn check_hypotheses<G: GraphStore>(graph: &G, report: &mut AuditReport) -> Result<(), AifError> {
    for hypothesis in instances_of(graph, aida::HYPOTHESIS)? {
        let mut size = 0;
        for subgraph in node_objects(graph, hypothesis, aida::HYPOTHESIS_CONTENT)? {
            size += node_objects(graph, subgraph, aida::SUBGRAPH_CONTAINS)?.len();
        }
        if size == 0 {
            report.push(hypothesis, AuditRule::EmptyHypothesis, "no content");
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
