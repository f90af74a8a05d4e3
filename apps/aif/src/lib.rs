//! # aif
//!
//! Command-line front end for `aif-core`: turns extraction manifests into
//! AIF graphs, audits them, and writes them as Turtle or N-Triples.
//!
//! Exposed as a library so the integration tests can drive commands
//! without spawning the binary.

pub mod cli;
pub mod config;
pub mod manifest;
