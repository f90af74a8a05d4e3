//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::{Config, OutputFormat};
use crate::manifest::Manifest;
use aif_core::{AifError, Graph, GraphStore, NTriples, Turtle, audit_graph, graph_digest};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code of `check` when the audit finds violations.
pub const EXIT_VIOLATIONS: u8 = 2;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum manifest size (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_MANIFEST_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Output flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub quiet: bool,
    pub json: bool,
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), AifError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| AifError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(AifError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path, rejecting anything that is not a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, AifError> {
    // Canonicalize resolves "..", symlinks, and validates existence
    let canonical = path.canonicalize().map_err(|e| {
        AifError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(AifError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path whose parent directory must already exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, AifError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        AifError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        AifError::IoError(format!("Output path '{}' has no file name", path.display()))
    })?;

    Ok(canonical_parent.join(file_name))
}

/// Load a manifest from disk and build its graph.
pub fn load_graph(config: &Config, input: &Path) -> Result<Graph, AifError> {
    let input = validate_file_path(input)?;
    validate_file_size(&input, MAX_MANIFEST_FILE_SIZE)?;
    tracing::info!("Building graph from {:?}", input);
    Manifest::from_file(&input)?.build(config)
}

/// Render `graph` in `format`.
pub fn render(graph: &Graph, format: OutputFormat) -> Result<String, AifError> {
    match format {
        OutputFormat::Turtle => Turtle::to_string(graph),
        OutputFormat::Ntriples => NTriples::to_string(graph),
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), AifError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AifError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Turtle => "turtle",
        OutputFormat::Ntriples => "ntriples",
    }
}

// =============================================================================
// BUILD COMMAND
// =============================================================================

/// Build a graph and write it to `output`, or to stdout.
pub fn cmd_build(
    config: &Config,
    options: Options,
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<ExitCode, AifError> {
    let graph = load_graph(config, input)?;
    let dump = render(&graph, format)?;
    let nodes = graph.node_count()?;
    let statements = graph.statement_count()?;

    let Some(output) = output else {
        if options.json {
            print_json(&serde_json::json!({
                "format": format_name(format),
                "nodes": nodes,
                "statements": statements,
                "graph": dump,
            }))?;
        } else {
            print!("{}", dump);
        }
        return Ok(ExitCode::SUCCESS);
    };

    let validated_output = validate_output_path(output)?;
    std::fs::write(&validated_output, dump.as_bytes())
        .map_err(|e| AifError::IoError(format!("Write file: {}", e)))?;

    if options.json {
        print_json(&serde_json::json!({
            "format": format_name(format),
            "nodes": nodes,
            "statements": statements,
            "output": validated_output.to_string_lossy(),
        }))?;
    } else if !options.quiet {
        println!(
            "Wrote {} statements ({} nodes) to {:?}",
            statements, nodes, validated_output
        );
    }
    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Build a graph and audit it. Violations give exit code `EXIT_VIOLATIONS`.
pub fn cmd_check(config: &Config, options: Options, input: &Path) -> Result<ExitCode, AifError> {
    let graph = load_graph(config, input)?;
    let report = audit_graph(&graph)?;

    if options.json {
        let value = serde_json::to_value(&report)
            .map_err(|e| AifError::SerializationError(e.to_string()))?;
        print_json(&value)?;
    } else if !options.quiet || !report.is_clean() {
        println!("AIF Integrity Audit");
        println!("===================");
        println!("Nodes:      {}", graph.node_count()?);
        println!("Statements: {}", graph.statement_count()?);
        println!("Violations: {}", report.violations.len());
        for violation in &report.violations {
            println!("  {} {}: {}", violation.node, violation.rule, violation.detail);
        }
    }

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(violations = report.violations.len(), "audit found violations");
        Ok(ExitCode::from(EXIT_VIOLATIONS))
    }
}

// =============================================================================
// HASH COMMAND
// =============================================================================

/// Print the BLAKE3 digest of the graph's N-Triples dump.
pub fn cmd_hash(config: &Config, options: Options, input: &Path) -> Result<ExitCode, AifError> {
    let graph = load_graph(config, input)?;
    let digest = graph_digest(&graph)?;

    if options.json {
        print_json(&serde_json::json!({
            "algorithm": "blake3",
            "hash": digest,
        }))?;
    } else {
        println!("{}", digest);
    }
    Ok(ExitCode::SUCCESS)
}
