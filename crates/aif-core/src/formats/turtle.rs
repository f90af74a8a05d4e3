//! Turtle writer.
//!
//! The registered prefixes come first, then the statements grouped by
//! subject:
//! ```turtle
//! @prefix aida: <https://tac.nist.gov/tracks/SM-KBP/2019/ontologies/InterchangeOntology#> .
//!
//! <http://ex.org/bob> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <https://tac.nist.gov/tracks/SM-KBP/2019/ontologies/InterchangeOntology#Entity> ;
//!     <https://tac.nist.gov/tracks/SM-KBP/2019/ontologies/InterchangeOntology#system> <http://ex.org/system> .
//! ```
//! IRIs are written in full; the prefix block only declares the registered
//! namespaces. Prefix names and namespaces are validated when they are
//! registered, so the header always parses.

use super::{format_statements, into_utf8, io_error};
use crate::AifError;
use crate::graph::Graph;
use rio_turtle::TurtleFormatter;
use std::io::Write;

/// Turtle format handler.
pub struct Turtle;

impl Turtle {
    /// Write `graph`, declaring its registered prefixes.
    pub fn write<W: Write>(graph: &Graph, mut writer: W) -> Result<(), AifError> {
        let mut declared = false;
        for (prefix, namespace) in graph.prefixes() {
            writeln!(writer, "@prefix {}: <{}> .", prefix, namespace).map_err(io_error)?;
            declared = true;
        }
        if declared && graph.statements().next().is_some() {
            writeln!(writer).map_err(io_error)?;
        }

        let mut formatter = TurtleFormatter::new(&mut writer);
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
