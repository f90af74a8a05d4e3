//! # Same-As Clusters
//!
//! A cluster groups nodes believed to denote the same real-world thing. It
//! always has one prototype, whose membership is written together with the
//! cluster at confidence 1.0. Further members are only possible members and
//! carry their own confidence.

use crate::confidence::attach_confidence;
use crate::graph::GraphStore;
use crate::ontology::aida;
use crate::primitives::PROTOTYPE_CONFIDENCE;
use crate::resources::{make_aif_resource, require_nodes};
use crate::{AifError, NodeId, System};

/// Create a cluster with `prototype` as its prototype member.
pub fn make_cluster_with_prototype<G: GraphStore>(
    graph: &mut G,
    system: System,
    cluster_uri: &str,
    prototype: NodeId,
) -> Result<NodeId, AifError> {
    if cluster_uri.is_empty() {
        return Err(AifError::EmptyIri);
    }
    require_nodes(graph, [system.node(), prototype])?;

    let prototype_property = graph.iri(aida::PROTOTYPE)?;
    let cluster = make_aif_resource(graph, Some(cluster_uri), aida::SAME_AS_CLUSTER, system)?;
    graph.add_statement(cluster, prototype_property, prototype)?;
    write_membership(graph, system, prototype, cluster, PROTOTYPE_CONFIDENCE)?;

    tracing::debug!(cluster = cluster_uri, prototype = %prototype, "created cluster");
    Ok(cluster)
}

/// Mark `member` as possibly belonging to `cluster`.
///
/// Repeated calls for the same pair each add a new membership.
pub fn mark_as_possible_cluster_member<G: GraphStore>(
    graph: &mut G,
    system: System,
    member: NodeId,
    cluster: NodeId,
    confidence: f64,
) -> Result<NodeId, AifError> {
    require_nodes(graph, [system.node(), member, cluster])?;
    write_membership(graph, system, member, cluster, confidence)
}

fn write_membership<G: GraphStore>(
    graph: &mut G,
    system: System,
    member: NodeId,
    cluster: NodeId,
    confidence: f64,
) -> Result<NodeId, AifError> {
    let cluster_property = graph.iri(aida::CLUSTER)?;
    let member_property = graph.iri(aida::CLUSTER_MEMBER)?;

    let membership = make_aif_resource(graph, None, aida::CLUSTER_MEMBERSHIP, system)?;
    graph.add_statement(membership, cluster_property, cluster)?;
    graph.add_statement(membership, member_property, member)?;
    attach_confidence(graph, system, membership, confidence)?;
    Ok(membership)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::confidence_value;
    use crate::graph::Graph;
    use crate::query::get_confidence_assertions;
    use crate::resources::{make_entity, make_system_with_uri};
    use crate::Term;

    fn memberships(graph: &Graph, cluster: NodeId) -> Vec<NodeId> {
        let p = graph.node_for_iri(aida::CLUSTER).expect("cluster property");
        graph.list_subjects(p, cluster).expect("subjects")
    }

    fn membership_confidence(graph: &Graph, membership: NodeId) -> Option<f64> {
        let confs = get_confidence_assertions(graph, membership).expect("query");
        let conf = confs.into_iter().next()?;
        confidence_value(graph, conf).expect("value")
    }

    #[test]
    fn prototype_membership_created_with_cluster() {
        let mut graph = Graph::new();
        let system = make_system_with_uri(&mut graph, "ex:system").expect("system");
        let bob = make_entity(&mut graph, system, "ex:bob").expect("entity");

        let cluster = make_cluster_with_prototype(&mut graph, system, "ex:cluster", bob)
            .expect("cluster");

        let prototype = graph.node_for_iri(aida::PROTOTYPE).expect("prototype");
        assert!(graph
            .contains_statement(cluster, prototype, &Term::Node(bob))
            .expect("contains"));

        let members = memberships(&graph, cluster);
        assert_eq!(members.len(), 1);
        assert_eq!(membership_confidence(&graph, members[0]), Some(1.0));
        let member_property = graph.node_for_iri(aida::CLUSTER_MEMBER).expect("member");
        assert!(graph
            .contains_statement(members[0], member_property, &Term::Node(bob))
            .expect("contains"));
    }

    #[test]
    fn possible_members_keep_their_confidence_and_repeat() {
        let mut graph = Graph::new();
        let system = make_system_with_uri(&mut graph, "ex:system").expect("system");
        let bob = make_entity(&mut graph, system, "ex:bob").expect("entity");
        let robert = make_entity(&mut graph, system, "ex:robert").expect("entity");
        let cluster = make_cluster_with_prototype(&mut graph, system, "ex:cluster", bob)
            .expect("cluster");

        let first = mark_as_possible_cluster_member(&mut graph, system, robert, cluster, 0.7)
            .expect("member");
        let second = mark_as_possible_cluster_member(&mut graph, system, robert, cluster, 0.7)
            .expect("member");
        assert_ne!(first, second);
        assert_eq!(memberships(&graph, cluster).len(), 3);
        assert_eq!(membership_confidence(&graph, first), Some(0.7));
    }

    #[test]
    fn unknown_prototype_creates_nothing() {
        let mut graph = Graph::new();
        let system = make_system_with_uri(&mut graph, "ex:system").expect("system");
        let err = make_cluster_with_prototype(&mut graph, system, "ex:cluster", NodeId(77))
            .expect_err("unknown");
        assert!(matches!(err, AifError::NodeNotFound(NodeId(77))));
        assert!(graph.node_for_iri("ex:cluster").is_none());
    }
}
