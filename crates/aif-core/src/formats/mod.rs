//! # Textual Dumps
//!
//! Writers for a finished `Graph`, built on the `rio_turtle` formatters:
//! - N-Triples: one statement per line, no prefixes
//! - Turtle: the registered prefixes, then statements grouped by subject
//!
//! Both walk the graph's `BTreeMap` indexes, so the same construction
//! sequence always yields byte-identical output. Blank nodes are labelled
//! from their handle (`_:b12`). Every IRI is checked with `oxiri` before it
//! is written; a node whose IRI does not parse fails the dump with
//! `AifError::SerializationError`.

mod ntriples;
mod turtle;

pub use ntriples::NTriples;
pub use turtle::Turtle;

use crate::graph::{Graph, NodeKind};
use crate::{AifError, Datatype, Literal, NodeId, Term};
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::model::{self as rio, BlankNode, NamedNode, Subject, Triple};

/// BLAKE3 hex digest of the graph's N-Triples dump.
///
/// Requires the `crypto-hash` feature.
#[cfg(feature = "crypto-hash")]
pub fn graph_digest(graph: &Graph) -> Result<String, AifError> {
    let dump = NTriples::to_string(graph)?;
    Ok(blake3::hash(dump.as_bytes()).to_hex().to_string())
}

// =============================================================================
// GRAPH -> RIO MODEL
// =============================================================================

/// A graph node ready to be borrowed as a rio term.
enum Label<'g> {
    Named(&'g str),
    Blank(String),
}

impl<'g> Label<'g> {
    fn of(graph: &'g Graph, id: NodeId) -> Result<Self, AifError> {
        match graph.node_kind(id) {
            Some(NodeKind::Iri(iri)) => {
                Iri::parse(iri.as_str()).map_err(|e| {
                    AifError::SerializationError(format!("Cannot write {:?} as an IRI: {}", iri, e))
                })?;
                Ok(Self::Named(iri))
            }
            Some(NodeKind::Blank) => Ok(Self::Blank(format!("b{}", id.0))),
            None => Err(AifError::NodeNotFound(id)),
        }
    }

    fn subject(&self) -> Subject<'_> {
        match self {
            Self::Named(iri) => Subject::NamedNode(NamedNode { iri: *iri }),
            Self::Blank(id) => Subject::BlankNode(BlankNode { id: id.as_str() }),
        }
    }

    fn predicate(&self) -> Result<NamedNode<'_>, AifError> {
        match self {
            Self::Named(iri) => Ok(NamedNode { iri: *iri }),
            Self::Blank(id) => Err(AifError::SerializationError(format!(
                "Blank node _:{} cannot be a predicate",
                id
            ))),
        }
    }

    fn term(&self) -> rio::Term<'_> {
        match self {
            Self::Named(iri) => rio::Term::NamedNode(NamedNode { iri: *iri }),
            Self::Blank(id) => rio::Term::BlankNode(BlankNode { id: id.as_str() }),
        }
    }
}

/// `xsd:string` literals are written as simple literals.
fn literal_term(literal: &Literal) -> rio::Term<'_> {
    let value = literal.lexical();
    match literal.datatype() {
        Datatype::String => rio::Term::Literal(rio::Literal::Simple { value }),
        datatype => rio::Term::Literal(rio::Literal::Typed {
            value,
            datatype: NamedNode {
                iri: datatype.iri(),
            },
        }),
    }
}

/// Object position: a node label or a borrowed literal.
enum Object<'g> {
    Node(Label<'g>),
    Literal(&'g Literal),
}

impl Object<'_> {
    fn term(&self) -> rio::Term<'_> {
        match self {
            Self::Node(label) => label.term(),
            Self::Literal(literal) => literal_term(literal),
        }
    }
}

/// Feed every statement of `graph` to `formatter`, in store order.
fn format_statements<F>(graph: &Graph, formatter: &mut F) -> Result<(), AifError>
where
    F: TriplesFormatter<Error = std::io::Error>,
{
    for (subject, predicate, object) in graph.statements() {
        let subject = Label::of(graph, subject)?;
        let predicate = Label::of(graph, predicate)?;
        let object = match object {
            Term::Node(id) => Object::Node(Label::of(graph, *id)?),
            Term::Literal(literal) => Object::Literal(literal),
        };
        formatter
            .format(&Triple {
                subject: subject.subject(),
                predicate: predicate.predicate()?,
                object: object.term(),
            })
            .map_err(io_error)?;
    }
    Ok(())
}

fn io_error(e: std::io::Error) -> AifError {
    AifError::IoError(e.to_string())
}

fn into_utf8(buf: Vec<u8>) -> Result<String, AifError> {
    String::from_utf8(buf).map_err(|e| AifError::SerializationError(e.to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::graph::GraphStore;
    use rio_api::parser::TriplesParser;
    use rio_turtle::{NTriplesParser, TurtleError, TurtleParser};

    /// Parse a Turtle document, returning its triple count and simple literal values.
    pub(crate) fn parse_turtle(text: &str) -> (usize, Vec<String>) {
        let mut count = 0;
        let mut values = Vec::new();
        TurtleParser::new(text.as_bytes(), None)
            .parse_all(&mut |triple| -> Result<(), TurtleError> {
                count += 1;
                if let rio::Term::Literal(rio::Literal::Simple { value }) = triple.object {
                    values.push(value.to_string());
                }
                Ok(())
            })
            .expect("valid turtle");
        (count, values)
    }

    /// Parse an N-Triples document, returning its triple count and simple literal values.
    pub(crate) fn parse_ntriples(text: &str) -> (usize, Vec<String>) {
        let mut count = 0;
        let mut values = Vec::new();
        NTriplesParser::new(text.as_bytes())
            .parse_all(&mut |triple| -> Result<(), TurtleError> {
                count += 1;
                if let rio::Term::Literal(rio::Literal::Simple { value }) = triple.object {
                    values.push(value.to_string());
                }
                Ok(())
            })
            .expect("valid n-triples");
        (count, values)
    }

    #[test]
    fn blank_nodes_labelled_by_handle() {
        let mut graph = Graph::new();
        let iri = graph.iri("ex:a").expect("iri");
        let blank = graph.create_node(None).expect("blank");
        assert!(matches!(Label::of(&graph, iri), Ok(Label::Named("ex:a"))));
        assert!(matches!(Label::of(&graph, blank), Ok(Label::Blank(ref id)) if id == "b1"));
        assert!(matches!(
            Label::of(&graph, NodeId(9)),
            Err(AifError::NodeNotFound(NodeId(9)))
        ));
    }

    #[test]
    fn non_iri_node_fails_the_dump() {
        let mut graph = Graph::new();
        let s = graph.iri("not an iri").expect("node");
        let p = graph.iri("http://ex.org/p").expect("iri");
        graph.add_literal(s, p, Literal::int(1)).expect("add");

        let err = NTriples::to_string(&graph).expect_err("invalid IRI");
        assert_eq!(err.kind(), crate::ErrorKind::Serialization);
        assert!(Turtle::to_string(&graph).is_err());
    }

    #[test]
    fn string_literals_are_simple() {
        let plain = Literal::string("x");
        assert!(matches!(
            literal_term(&plain),
            rio::Term::Literal(rio::Literal::Simple { value: "x" })
        ));
        let int = Literal::int(3);
        assert!(matches!(
            literal_term(&int),
            rio::Term::Literal(rio::Literal::Typed { value: "3", .. })
        ));
    }

    #[cfg(feature = "crypto-hash")]
    #[test]
    fn digest_is_stable() {
        let build = || {
            let mut graph = Graph::new();
            let s = graph.iri("ex:s").expect("iri");
            let p = graph.iri("ex:p").expect("iri");
            graph.add_literal(s, p, Literal::int(1)).expect("add");
            graph
        };
        let a = graph_digest(&build()).expect("digest");
        let b = graph_digest(&build()).expect("digest");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
