//! # aif-core
//!
//! Construction API for AIF knowledge graphs: extracted entities, events
//! and relations together with the uncertainty metadata around them.
//!
//! ## Model
//!
//! Builders are free functions over a `GraphStore` and a `System` handle.
//! They return lightweight `NodeId` handles (or a `ReifiedStatement` for
//! type and argument assertions) that callers thread into later calls:
//! a returned type assertion can be given a justification, bundled into a
//! mutual exclusion, or placed in a hypothesis.
//!
//! ## Architectural Constraints
//!
//! - Validate-then-write: every builder checks all of its inputs before
//!   the first mutation, so a failed call leaves the graph untouched
//! - Deterministic: the in-memory `Graph` uses BTreeMap/BTreeSet only
//! - Single writer: builders take `&mut` store access and hold no state
//! - No async, no network, no file I/O

// =============================================================================
// MODULES
// =============================================================================

pub mod ancillary;
pub mod audit;
pub mod cluster;
pub mod confidence;
pub mod formats;
pub mod geometry;
pub mod graph;
pub mod identifier;
pub mod justification;
pub mod ontology;
pub mod primitives;
pub mod query;
pub mod resources;
pub mod statement;
pub mod types;
pub mod uncertainty;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{AifError, Datatype, ErrorKind, Literal, NodeId, System, Term};

// =============================================================================
// RE-EXPORTS: Store & Values
// =============================================================================

pub use audit::{AuditReport, AuditRule, Violation, audit_graph};
pub use geometry::{BoundingBox, Point};
pub use graph::{Graph, GraphStore, NodeKind, is_valid_prefix_name};
pub use identifier::{IriGenerator, UuidIriGenerator};
pub use statement::{ReifiedStatement, StatementKind};

// =============================================================================
// RE-EXPORTS: Builders
// =============================================================================

pub use ancillary::{
    link_to_external_kb, mark_private_data, mark_private_data_vector, private_data_json,
};
pub use cluster::{make_cluster_with_prototype, mark_as_possible_cluster_member};
pub use confidence::{confidence_value, mark_confidence};
pub use justification::{
    make_audio_justification, make_image_justification, make_key_frame_video_justification,
    make_shot_video_justification, make_text_justification, mark_audio_justification,
    mark_compound_justification, mark_image_justification, mark_justification,
    mark_key_frame_video_justification, mark_shot_video_justification, mark_single_justification,
    mark_text_justification,
};
pub use query::{get_confidence_assertions, get_type_assertions};
pub use resources::{
    EventFormRelation, add_standard_namespaces, make_entity, make_event, make_relation,
    make_relation_in_event_form, make_system_with_uri, mark_as_argument, mark_name,
    mark_numeric_value_as_double, mark_numeric_value_as_long, mark_numeric_value_as_string,
    mark_system, mark_text_value, mark_type,
};
pub use uncertainty::{
    make_hypothesis, mark_as_mutually_exclusive, mark_depends_on_hypothesis,
    mark_edges_as_mutually_exclusive,
};

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{NTriples, Turtle};

#[cfg(feature = "crypto-hash")]
pub use formats::graph_digest;
