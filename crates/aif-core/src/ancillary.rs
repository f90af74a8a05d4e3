//! # Private Data and External Links
//!
//! Private data is an opaque JSON payload a system attaches to one of its
//! resources. By convention it holds only content not derived from the
//! source documents; nothing here enforces that.

use crate::confidence::attach_optional_confidence;
use crate::graph::GraphStore;
use crate::ontology::aida;
use crate::primitives::{VECTOR_DATA_KEY, VECTOR_TYPE_KEY};
use crate::resources::{make_aif_resource, require_nodes};
use crate::{AifError, Literal, NodeId, System};
use serde_json::{Map, Number, Value};

/// Attach a raw JSON payload to `resource`.
pub fn mark_private_data<G: GraphStore>(
    graph: &mut G,
    system: System,
    resource: NodeId,
    json_content: &str,
) -> Result<NodeId, AifError> {
    require_nodes(graph, [system.node(), resource])?;
    write_private_data(graph, system, resource, json_content)
}

/// Attach a typed vector to `resource`, encoded as
/// `{"vector_type": ..., "vector_data": [...]}`.
///
/// Non-finite values cannot be encoded and fail with a serialization error
/// before anything is written.
pub fn mark_private_data_vector<G: GraphStore>(
    graph: &mut G,
    system: System,
    resource: NodeId,
    vector_type: &str,
    vector_data: &[f64],
) -> Result<NodeId, AifError> {
    let json = private_data_json(vector_type, vector_data)?;
    mark_private_data(graph, system, resource, &json)
}

/// Encode the fixed vector payload shape.
pub fn private_data_json(vector_type: &str, vector_data: &[f64]) -> Result<String, AifError> {
    let data = vector_data
        .iter()
        .map(|&value| {
            Number::from_f64(value).map(Value::Number).ok_or_else(|| {
                AifError::SerializationError(format!("cannot encode {value} as JSON"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut payload = Map::new();
    payload.insert(VECTOR_TYPE_KEY.to_string(), Value::from(vector_type));
    payload.insert(VECTOR_DATA_KEY.to_string(), Value::Array(data));
    serde_json::to_string(&Value::Object(payload))
        .map_err(|e| AifError::SerializationError(e.to_string()))
}

fn write_private_data<G: GraphStore>(
    graph: &mut G,
    system: System,
    resource: NodeId,
    json_content: &str,
) -> Result<NodeId, AifError> {
    let json_property = graph.iri(aida::JSON_CONTENT)?;
    let private_data_property = graph.iri(aida::PRIVATE_DATA_PROPERTY)?;

    let private_data = make_aif_resource(graph, None, aida::PRIVATE_DATA, system)?;
    graph.add_literal(private_data, json_property, Literal::string(json_content))?;
    graph.add_statement(resource, private_data_property, private_data)?;
    Ok(private_data)
}

/// Link `resource` to an entry of an external knowledge base.
pub fn link_to_external_kb<G: GraphStore>(
    graph: &mut G,
    system: System,
    resource: NodeId,
    external_kb_id: &str,
    confidence: Option<f64>,
) -> Result<NodeId, AifError> {
    require_nodes(graph, [system.node(), resource])?;
    let link_property = graph.iri(aida::LINK)?;
    let link_target = graph.iri(aida::LINK_TARGET)?;

    let link = make_aif_resource(graph, None, aida::LINK_ASSERTION, system)?;
    graph.add_statement(resource, link_property, link)?;
    graph.add_literal(link, link_target, Literal::string(external_kb_id))?;
    attach_optional_confidence(graph, system, link, confidence)?;

    tracing::debug!(resource = %resource, kb_id = external_kb_id, "linked to external kb");
    Ok(link)
}
