//! # Extraction Manifests
//!
//! A manifest is the JSON an extraction pipeline emits: resources with local
//! ids, their candidate types, arguments, justifications, clusters and
//! hypotheses. `Manifest::build` turns it into an AIF graph through the
//! `aif_core` builders.
//!
//! Local ids (`"bob"`) only live inside the manifest; a resource without an
//! explicit `uri` gets one from the configured identifier generator. Type,
//! role and relation names may use any configured `prefix:local` form.

use crate::config::Config;
use aif_core::{
    AifError, BoundingBox, Graph, GraphStore, IriGenerator, NodeId, ReifiedStatement, System,
    UuidIriGenerator,
};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Confidence given to a competing type that does not state its own.
pub const DEFAULT_ALTERNATIVE_CONFIDENCE: f64 = 1.0;

// =============================================================================
// MANIFEST FORMAT
// =============================================================================

/// Top-level manifest document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub entities: Vec<ResourceSpec>,
    pub events: Vec<ResourceSpec>,
    pub relations: Vec<RelationSpec>,
    pub clusters: Vec<ClusterSpec>,
    pub hypotheses: Vec<HypothesisSpec>,
}

/// An entity or an event.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResourceSpec {
    pub id: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub text_value: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    /// Make the type assertions mutually exclusive.
    #[serde(default)]
    pub exclusive_types: bool,
    #[serde(default)]
    pub none_of_the_above: Option<f64>,
    /// Event arguments; entities must leave this empty.
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    #[serde(default)]
    pub justifications: Vec<JustificationSpec>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
    #[serde(default)]
    pub private_data: Option<PrivateDataSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub justifications: Vec<JustificationSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArgumentSpec {
    /// Optional local id, so hypotheses can include the argument assertion.
    #[serde(default)]
    pub id: Option<String>,
    pub role: String,
    pub filler: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub justifications: Vec<JustificationSpec>,
}

/// A relation written in event form: a type plus two role fillers.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RelationSpec {
    pub id: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(rename = "type")]
    pub relation_type: String,
    pub subject: RoleFiller,
    pub object: RoleFiller,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub justifications: Vec<JustificationSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RoleFiller {
    pub role: String,
    pub filler: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClusterSpec {
    pub id: String,
    #[serde(default)]
    pub uri: Option<String>,
    pub prototype: String,
    #[serde(default)]
    pub members: Vec<MemberSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MemberSpec {
    pub member: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HypothesisSpec {
    pub id: String,
    #[serde(default)]
    pub uri: Option<String>,
    pub content: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Local ids of resources that hold only under this hypothesis.
    #[serde(default)]
    pub dependents: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LinkSpec {
    pub kb_id: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Either a typed vector or arbitrary JSON, stored verbatim.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PrivateDataSpec {
    Vector {
        vector_type: String,
        vector_data: Vec<f64>,
    },
    Raw(serde_json::Value),
}

/// Evidence for a claim. Bounding boxes are `[ulx, uly, lrx, lry]`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum JustificationSpec {
    Text {
        source: String,
        start: i32,
        end_inclusive: i32,
        confidence: f64,
    },
    Image {
        source: String,
        bbox: [i32; 4],
        confidence: f64,
    },
    KeyFrame {
        source: String,
        key_frame: String,
        bbox: [i32; 4],
        confidence: f64,
    },
    Shot {
        source: String,
        shot: String,
        confidence: f64,
    },
    Audio {
        source: String,
        start: f64,
        end: f64,
        confidence: f64,
    },
    Compound {
        parts: Vec<JustificationSpec>,
        confidence: f64,
    },
}

impl Manifest {
    /// Read a manifest from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, AifError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AifError::IoError(format!("Read {}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Parse a manifest from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, AifError> {
        serde_json::from_str(content)
            .map_err(|e| AifError::SerializationError(format!("Invalid manifest: {}", e)))
    }

    /// Build the AIF graph this manifest describes.
    pub fn build(&self, config: &Config) -> Result<Graph, AifError> {
        let mut graph = Graph::new();
        for (prefix, namespace) in config.prefixes() {
            graph.set_prefix(&prefix, &namespace)?;
        }
        let system = aif_core::make_system_with_uri(&mut graph, &config.system.uri)?;

        let mut builder = ManifestBuilder {
            graph,
            system,
            config,
            generator: config.iri_generator()?,
            ids: BTreeMap::new(),
            uris: BTreeMap::from([(config.system.uri.clone(), "system".to_string())]),
        };
        builder.build(self)?;

        tracing::info!(
            nodes = builder.graph.node_count()?,
            statements = builder.graph.statement_count()?,
            "built graph from manifest"
        );
        Ok(builder.graph)
    }
}

// =============================================================================
// BUILDER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResourceKind {
    Entity,
    Event,
}

struct ManifestBuilder<'a> {
    graph: Graph,
    system: System,
    config: &'a Config,
    generator: UuidIriGenerator,
    /// Local id -> node, for every resource and named argument.
    ids: BTreeMap<String, NodeId>,
    /// Explicit IRI -> the local id that claimed it.
    uris: BTreeMap<String, String>,
}

impl ManifestBuilder<'_> {
    fn build(&mut self, manifest: &Manifest) -> Result<(), AifError> {
        // Resources first, so arguments, relations and clusters can refer
        // to any of them regardless of order.
        let mut created = Vec::new();
        for spec in &manifest.entities {
            created.push((self.resource(spec, ResourceKind::Entity)?, spec));
        }
        for spec in &manifest.events {
            created.push((self.resource(spec, ResourceKind::Event)?, spec));
        }
        for (node, spec) in created {
            self.annotate(node, spec)?;
        }
        for spec in &manifest.relations {
            self.relation(spec)?;
        }
        for spec in &manifest.clusters {
            self.cluster(spec)?;
        }
        for spec in &manifest.hypotheses {
            self.hypothesis(spec)?;
        }
        Ok(())
    }

    fn register(&mut self, id: &str, node: NodeId) -> Result<(), AifError> {
        if self.ids.insert(id.to_string(), node).is_some() {
            return Err(AifError::ConfigError(format!(
                "Duplicate manifest id '{}'",
                id
            )));
        }
        Ok(())
    }

    fn lookup(&self, id: &str) -> Result<NodeId, AifError> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| AifError::ConfigError(format!("Unknown manifest id '{}'", id)))
    }

    /// The IRI for local `id`: its expanded explicit `uri`, or a generated one.
    ///
    /// Two local ids may not share an explicit IRI.
    fn uri_for(&mut self, id: &str, uri: Option<&String>) -> Result<String, AifError> {
        let Some(uri) = uri else {
            return Ok(self.generator.next_iri());
        };
        let expanded = self.config.expand(uri);
        if let Some(owner) = self.uris.get(&expanded) {
            return Err(AifError::ConfigError(format!(
                "Duplicate manifest uri '{}' on '{}', already used by '{}'",
                expanded, id, owner
            )));
        }
        self.uris.insert(expanded.clone(), id.to_string());
        Ok(expanded)
    }

    fn term(&mut self, name: &str) -> Result<NodeId, AifError> {
        let iri = self.config.expand(name);
        self.graph.iri(&iri)
    }

    fn resource(&mut self, spec: &ResourceSpec, kind: ResourceKind) -> Result<NodeId, AifError> {
        if kind == ResourceKind::Entity && !spec.arguments.is_empty() {
            return Err(AifError::ConfigError(format!(
                "Entity '{}' cannot have arguments",
                spec.id
            )));
        }
        let uri = self.uri_for(&spec.id, spec.uri.as_ref())?;
        let node = match kind {
            ResourceKind::Entity => aif_core::make_entity(&mut self.graph, self.system, &uri)?,
            ResourceKind::Event => aif_core::make_event(&mut self.graph, self.system, &uri)?,
        };
        self.register(&spec.id, node)?;
        Ok(node)
    }

    fn annotate(&mut self, node: NodeId, spec: &ResourceSpec) -> Result<(), AifError> {
        for name in &spec.names {
            aif_core::mark_name(&mut self.graph, node, name)?;
        }
        if let Some(text) = &spec.text_value {
            aif_core::mark_text_value(&mut self.graph, node, text)?;
        }

        let mut assertions: Vec<(ReifiedStatement, f64)> = Vec::new();
        for type_spec in &spec.types {
            let ontology_type = self.term(&type_spec.type_name)?;
            let assertion = aif_core::mark_type(
                &mut self.graph,
                self.system,
                node,
                ontology_type,
                type_spec.confidence,
                None,
            )?;
            self.justify_all(&[assertion.id()], &type_spec.justifications)?;
            assertions.push((
                assertion,
                type_spec.confidence.unwrap_or(DEFAULT_ALTERNATIVE_CONFIDENCE),
            ));
        }
        if spec.exclusive_types {
            aif_core::mark_edges_as_mutually_exclusive(
                &mut self.graph,
                self.system,
                &assertions,
                spec.none_of_the_above,
            )?;
        }

        for argument in &spec.arguments {
            let role = self.term(&argument.role)?;
            let filler = self.lookup(&argument.filler)?;
            let assertion = aif_core::mark_as_argument(
                &mut self.graph,
                self.system,
                node,
                role,
                filler,
                argument.confidence,
                None,
            )?;
            if let Some(id) = &argument.id {
                self.register(id, assertion.id())?;
            }
            self.justify_all(&[assertion.id()], &argument.justifications)?;
        }

        self.justify_all(&[node], &spec.justifications)?;
        for link in &spec.links {
            aif_core::link_to_external_kb(
                &mut self.graph,
                self.system,
                node,
                &link.kb_id,
                link.confidence,
            )?;
        }
        match &spec.private_data {
            Some(PrivateDataSpec::Vector {
                vector_type,
                vector_data,
            }) => {
                aif_core::mark_private_data_vector(
                    &mut self.graph,
                    self.system,
                    node,
                    vector_type,
                    vector_data,
                )?;
            }
            Some(PrivateDataSpec::Raw(value)) => {
                let json = serde_json::to_string(value)
                    .map_err(|e| AifError::SerializationError(e.to_string()))?;
                aif_core::mark_private_data(&mut self.graph, self.system, node, &json)?;
            }
            None => {}
        }
        Ok(())
    }

    fn relation(&mut self, spec: &RelationSpec) -> Result<(), AifError> {
        let uri = self.uri_for(&spec.id, spec.uri.as_ref())?;
        let relation_type = self.term(&spec.relation_type)?;
        let subject_role = self.term(&spec.subject.role)?;
        let object_role = self.term(&spec.object.role)?;
        let subject = self.lookup(&spec.subject.filler)?;
        let object = self.lookup(&spec.object.filler)?;

        let built = aif_core::make_relation_in_event_form(
            &mut self.graph,
            self.system,
            &uri,
            relation_type,
            (subject_role, subject),
            (object_role, object),
            None,
            spec.confidence,
        )?;
        self.register(&spec.id, built.relation)?;
        self.justify_all(&[built.relation], &spec.justifications)
    }

    fn cluster(&mut self, spec: &ClusterSpec) -> Result<(), AifError> {
        let uri = self.uri_for(&spec.id, spec.uri.as_ref())?;
        let prototype = self.lookup(&spec.prototype)?;
        let cluster =
            aif_core::make_cluster_with_prototype(&mut self.graph, self.system, &uri, prototype)?;
        self.register(&spec.id, cluster)?;
        for member in &spec.members {
            let node = self.lookup(&member.member)?;
            aif_core::mark_as_possible_cluster_member(
                &mut self.graph,
                self.system,
                node,
                cluster,
                member.confidence,
            )?;
        }
        Ok(())
    }

    fn hypothesis(&mut self, spec: &HypothesisSpec) -> Result<(), AifError> {
        let content = spec
            .content
            .iter()
            .map(|id| self.lookup(id))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let dependents = spec
            .dependents
            .iter()
            .map(|id| self.lookup(id))
            .collect::<Result<Vec<_>, _>>()?;

        let uri = self.uri_for(&spec.id, spec.uri.as_ref())?;
        let hypothesis =
            aif_core::make_hypothesis(&mut self.graph, self.system, &uri, &content, spec.confidence)?;
        self.register(&spec.id, hypothesis)?;
        for dependent in dependents {
            aif_core::mark_depends_on_hypothesis(&mut self.graph, dependent, hypothesis)?;
        }
        Ok(())
    }

    fn justify_all(
        &mut self,
        targets: &[NodeId],
        specs: &[JustificationSpec],
    ) -> Result<(), AifError> {
        for spec in specs {
            self.justify(targets, spec)?;
        }
        Ok(())
    }

    /// Create one justification and link every target to it.
    ///
    /// Compound parts are created unlinked and reach the targets only
    /// through the compound.
    fn justify(&mut self, targets: &[NodeId], spec: &JustificationSpec) -> Result<NodeId, AifError> {
        let system = self.system;
        match spec {
            JustificationSpec::Text {
                source,
                start,
                end_inclusive,
                confidence,
            } => aif_core::mark_text_justification(
                &mut self.graph,
                system,
                targets,
                source,
                *start,
                *end_inclusive,
                *confidence,
            ),
            JustificationSpec::Image {
                source,
                bbox,
                confidence,
            } => aif_core::mark_image_justification(
                &mut self.graph,
                system,
                targets,
                source,
                bounding_box(*bbox)?,
                *confidence,
            ),
            JustificationSpec::KeyFrame {
                source,
                key_frame,
                bbox,
                confidence,
            } => aif_core::mark_key_frame_video_justification(
                &mut self.graph,
                system,
                targets,
                source,
                key_frame,
                bounding_box(*bbox)?,
                *confidence,
            ),
            JustificationSpec::Shot {
                source,
                shot,
                confidence,
            } => aif_core::mark_shot_video_justification(
                &mut self.graph,
                system,
                targets,
                source,
                shot,
                *confidence,
            ),
            JustificationSpec::Audio {
                source,
                start,
                end,
                confidence,
            } => aif_core::mark_audio_justification(
                &mut self.graph,
                system,
                targets,
                source,
                *start,
                *end,
                *confidence,
            ),
            JustificationSpec::Compound { parts, confidence } => {
                let mut contained = Vec::with_capacity(parts.len());
                for part in parts {
                    contained.push(self.justify(&[], part)?);
                }
                aif_core::mark_compound_justification(
                    &mut self.graph,
                    system,
                    targets,
                    &contained,
                    *confidence,
                )
            }
        }
    }
}

fn bounding_box([ulx, uly, lrx, lry]: [i32; 4]) -> Result<BoundingBox, AifError> {
    BoundingBox::from_coords(ulx, uly, lrx, lry)
}
