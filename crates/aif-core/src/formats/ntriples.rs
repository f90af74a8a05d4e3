//! N-Triples writer.
//!
//! Each line is `<subject> <predicate> <object> .`; typed literals are
//! written as `"lexical"^^<datatype>` and `xsd:string` literals bare.

use super::{format_statements, into_utf8, io_error};
use crate::AifError;
use crate::graph::Graph;
use rio_turtle::NTriplesFormatter;
use std::io::Write;

/// N-Triples format handler.
pub struct NTriples;

impl NTriples {
    /// Write every statement of `graph`, one per line.
    pub fn write<W: Write>(graph: &Graph, writer: W) -> Result<(), AifError> {
        let mut formatter = NTriplesFormatter::new(writer);
        format_statements(graph, &mut formatter)?;
        formatter.finish().map_err(io_error)?;
        Ok(())
    }

    /// Convert to string.
    pub fn to_string(graph: &Graph) -> Result<String, AifError> {
        let mut buf = Vec::new();
        Self::write(graph, &mut buf)?;
        into_utf8(buf)
    }
}
