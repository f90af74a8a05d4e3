//! # Justifications
//!
//! Provenance pointers from a claim to the evidence behind it: a text span,
//! an image region, a video key frame or shot, an audio interval, or a
//! compound of several of these.
//!
//! Each `make_*` builder validates its shape-specific fields before writing
//! anything. Each `mark_*` builder makes the justification and links every
//! target to it through `justifiedBy`. Targets are a slice; pass `&[node]`
//! for a single target.

use crate::confidence::attach_confidence;
use crate::geometry::BoundingBox;
use crate::graph::GraphStore;
use crate::ontology::{aida, rdf};
use crate::resources::{make_aif_resource, require_nodes};
use crate::{AifError, Literal, NodeId, System};
use std::cmp::Ordering;

// =============================================================================
// COMMON
// =============================================================================

/// Create the shared part of every justification: class, system, source
/// document and confidence.
fn make_aif_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    doc_id: &str,
    class_iri: &str,
    confidence: f64,
) -> Result<NodeId, AifError> {
    let source = graph.iri(aida::SOURCE)?;
    let justification = make_aif_resource(graph, None, class_iri, system)?;
    graph.add_literal(justification, source, Literal::string(doc_id))?;
    attach_confidence(graph, system, justification, confidence)?;
    Ok(justification)
}

/// Mark every target as justified by an existing `justification`.
pub fn mark_justification<G: GraphStore>(
    graph: &mut G,
    targets: &[NodeId],
    justification: NodeId,
) -> Result<(), AifError> {
    require_nodes(graph, targets.iter().copied().chain([justification]))?;
    link_targets(graph, targets, justification)
}

/// Mark a single target as justified by an existing `justification`.
///
/// Pair it with any `make_*_justification` for the one-target case.
pub fn mark_single_justification<G: GraphStore>(
    graph: &mut G,
    target: NodeId,
    justification: NodeId,
) -> Result<(), AifError> {
    mark_justification(graph, std::slice::from_ref(&target), justification)
}

fn link_targets<G: GraphStore>(
    graph: &mut G,
    targets: &[NodeId],
    justification: NodeId,
) -> Result<(), AifError> {
    let justified_by = graph.iri(aida::JUSTIFIED_BY)?;
    for &target in targets {
        graph.add_statement(target, justified_by, justification)?;
    }
    Ok(())
}

// =============================================================================
// TEXT
// =============================================================================

fn check_text_span(start_offset: i32, end_offset_inclusive: i32) -> Result<(), AifError> {
    if start_offset < 0 {
        return Err(AifError::NegativeOffset(start_offset));
    }
    if end_offset_inclusive < start_offset {
        return Err(AifError::InvertedOffsets {
            start: start_offset,
            end: end_offset_inclusive,
        });
    }
    Ok(())
}

/// Create a justification from a span of text. Both offsets are inclusive,
/// so `start == end` is a single character.
pub fn make_text_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    doc_id: &str,
    start_offset: i32,
    end_offset_inclusive: i32,
    confidence: f64,
) -> Result<NodeId, AifError> {
    check_text_span(start_offset, end_offset_inclusive)?;
    require_nodes(graph, [system.node()])?;
    write_text_justification(
        graph,
        system,
        doc_id,
        start_offset,
        end_offset_inclusive,
        confidence,
    )
}

fn write_text_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    doc_id: &str,
    start_offset: i32,
    end_offset_inclusive: i32,
    confidence: f64,
) -> Result<NodeId, AifError> {
    let start = graph.iri(aida::START_OFFSET)?;
    let end = graph.iri(aida::END_OFFSET_INCLUSIVE)?;
    let justification =
        make_aif_justification(graph, system, doc_id, aida::TEXT_JUSTIFICATION, confidence)?;
    graph.add_literal(justification, start, Literal::int(start_offset))?;
    graph.add_literal(justification, end, Literal::int(end_offset_inclusive))?;
    tracing::debug!(doc_id, start_offset, end_offset_inclusive, "text justification");
    Ok(justification)
}

/// Mark targets as justified by a span of text.
pub fn mark_text_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    targets: &[NodeId],
    doc_id: &str,
    start_offset: i32,
    end_offset_inclusive: i32,
    confidence: f64,
) -> Result<NodeId, AifError> {
    check_text_span(start_offset, end_offset_inclusive)?;
    require_nodes(graph, targets.iter().copied().chain([system.node()]))?;
    let justification = write_text_justification(
        graph,
        system,
        doc_id,
        start_offset,
        end_offset_inclusive,
        confidence,
    )?;
    link_targets(graph, targets, justification)?;
    Ok(justification)
}

// =============================================================================
// IMAGE & VIDEO
// =============================================================================

/// Write a bounding box node and link it from `target`.
fn mark_bounding_box<G: GraphStore>(
    graph: &mut G,
    target: NodeId,
    bbox: BoundingBox,
) -> Result<NodeId, AifError> {
    let rdf_type = graph.iri(rdf::TYPE)?;
    let class = graph.iri(aida::BOUNDING_BOX)?;
    let bbox_property = graph.iri(aida::BOUNDING_BOX_PROPERTY)?;
    let corners = [
        (aida::BOUNDING_BOX_UPPER_LEFT_X, bbox.upper_left().x()),
        (aida::BOUNDING_BOX_UPPER_LEFT_Y, bbox.upper_left().y()),
        (aida::BOUNDING_BOX_LOWER_RIGHT_X, bbox.lower_right().x()),
        (aida::BOUNDING_BOX_LOWER_RIGHT_Y, bbox.lower_right().y()),
    ];

    let node = graph.create_node(None)?;
    graph.add_statement(node, rdf_type, class)?;
    for (property_iri, value) in corners {
        let property = graph.iri(property_iri)?;
        graph.add_literal(node, property, Literal::int(value))?;
    }
    graph.add_statement(target, bbox_property, node)?;
    Ok(node)
}

/// Create a justification from a region of an image.
pub fn make_image_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    doc_id: &str,
    bbox: BoundingBox,
    confidence: f64,
) -> Result<NodeId, AifError> {
    require_nodes(graph, [system.node()])?;
    let justification =
        make_aif_justification(graph, system, doc_id, aida::IMAGE_JUSTIFICATION, confidence)?;
    mark_bounding_box(graph, justification, bbox)?;
    Ok(justification)
}

/// Mark targets as justified by a region of an image.
pub fn mark_image_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    targets: &[NodeId],
    doc_id: &str,
    bbox: BoundingBox,
    confidence: f64,
) -> Result<NodeId, AifError> {
    require_nodes(graph, targets.iter().copied())?;
    let justification = make_image_justification(graph, system, doc_id, bbox, confidence)?;
    link_targets(graph, targets, justification)?;
    Ok(justification)
}

/// Create a justification from a region of a video key frame.
pub fn make_key_frame_video_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    doc_id: &str,
    key_frame: &str,
    bbox: BoundingBox,
    confidence: f64,
) -> Result<NodeId, AifError> {
    require_nodes(graph, [system.node()])?;
    let key_frame_property = graph.iri(aida::KEY_FRAME)?;
    let justification = make_aif_justification(
        graph,
        system,
        doc_id,
        aida::KEY_FRAME_VIDEO_JUSTIFICATION,
        confidence,
    )?;
    graph.add_literal(justification, key_frame_property, Literal::string(key_frame))?;
    mark_bounding_box(graph, justification, bbox)?;
    Ok(justification)
}

/// Mark targets as justified by a region of a video key frame.
pub fn mark_key_frame_video_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    targets: &[NodeId],
    doc_id: &str,
    key_frame: &str,
    bbox: BoundingBox,
    confidence: f64,
) -> Result<NodeId, AifError> {
    require_nodes(graph, targets.iter().copied())?;
    let justification =
        make_key_frame_video_justification(graph, system, doc_id, key_frame, bbox, confidence)?;
    link_targets(graph, targets, justification)?;
    Ok(justification)
}

/// Create a justification from a video shot outside any key frame.
pub fn make_shot_video_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    doc_id: &str,
    shot_id: &str,
    confidence: f64,
) -> Result<NodeId, AifError> {
    require_nodes(graph, [system.node()])?;
    let shot = graph.iri(aida::SHOT)?;
    let justification = make_aif_justification(
        graph,
        system,
        doc_id,
        aida::SHOT_VIDEO_JUSTIFICATION,
        confidence,
    )?;
    graph.add_literal(justification, shot, Literal::string(shot_id))?;
    Ok(justification)
}

/// Mark targets as justified by a video shot.
pub fn mark_shot_video_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    targets: &[NodeId],
    doc_id: &str,
    shot_id: &str,
    confidence: f64,
) -> Result<NodeId, AifError> {
    require_nodes(graph, targets.iter().copied())?;
    let justification = make_shot_video_justification(graph, system, doc_id, shot_id, confidence)?;
    link_targets(graph, targets, justification)?;
    Ok(justification)
}

// =============================================================================
// AUDIO
// =============================================================================

fn check_audio_interval(start_timestamp: f64, end_timestamp: f64) -> Result<(), AifError> {
    // NaN on either side compares as None and is rejected.
    if end_timestamp.partial_cmp(&start_timestamp) != Some(Ordering::Greater) {
        return Err(AifError::NonPositiveDuration {
            start: start_timestamp,
            end: end_timestamp,
        });
    }
    Ok(())
}

/// Create a justification from an audio interval. The end must strictly
/// follow the start.
pub fn make_audio_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    doc_id: &str,
    start_timestamp: f64,
    end_timestamp: f64,
    confidence: f64,
) -> Result<NodeId, AifError> {
    check_audio_interval(start_timestamp, end_timestamp)?;
    require_nodes(graph, [system.node()])?;
    let start = graph.iri(aida::START_TIMESTAMP)?;
    let end = graph.iri(aida::END_TIMESTAMP)?;
    let justification =
        make_aif_justification(graph, system, doc_id, aida::AUDIO_JUSTIFICATION, confidence)?;
    graph.add_literal(justification, start, Literal::double(start_timestamp))?;
    graph.add_literal(justification, end, Literal::double(end_timestamp))?;
    Ok(justification)
}

/// Mark targets as justified by an audio interval.
pub fn mark_audio_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    targets: &[NodeId],
    doc_id: &str,
    start_timestamp: f64,
    end_timestamp: f64,
    confidence: f64,
) -> Result<NodeId, AifError> {
    check_audio_interval(start_timestamp, end_timestamp)?;
    require_nodes(graph, targets.iter().copied())?;
    let justification = make_audio_justification(
        graph,
        system,
        doc_id,
        start_timestamp,
        end_timestamp,
        confidence,
    )?;
    link_targets(graph, targets, justification)?;
    Ok(justification)
}

// =============================================================================
// COMPOUND
// =============================================================================

/// Bundle existing justifications under one confidence and mark targets as
/// justified by the bundle as a whole.
///
/// Targets link to the compound node, not to the contained justifications.
pub fn mark_compound_justification<G: GraphStore>(
    graph: &mut G,
    system: System,
    targets: &[NodeId],
    justifications: &[NodeId],
    confidence: f64,
) -> Result<NodeId, AifError> {
    if justifications.is_empty() {
        return Err(AifError::EmptyCompoundJustification);
    }
    require_nodes(
        graph,
        targets
            .iter()
            .chain(justifications)
            .copied()
            .chain([system.node()]),
    )?;

    let contained = graph.iri(aida::CONTAINED_JUSTIFICATION)?;
    let compound = make_aif_resource(graph, None, aida::COMPOUND_JUSTIFICATION, system)?;
    attach_confidence(graph, system, compound, confidence)?;
    for &justification in justifications {
        graph.add_statement(compound, contained, justification)?;
    }
    link_targets(graph, targets, compound)?;
    Ok(compound)
}

// =============================================================================
// TESTS
// =============================================================================
