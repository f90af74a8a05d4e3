//! # Configuration
//!
//! Optional TOML file read with `--config`. Every field has a default, so an
//! empty file and no file at all behave the same.
//!
//! ```toml
//! [system]
//! uri = "http://www.example.org/aif/system"
//!
//! [identifiers]
//! base = "http://www.example.org/aif/resources"
//!
//! [namespaces]
//! ldc = "https://tac.nist.gov/tracks/SM-KBP/2019/ontologies/LDCOntology#"
//!
//! [output]
//! format = "turtle"
//! ```

use aif_core::ontology::STANDARD_PREFIXES;
use aif_core::primitives::DEFAULT_IRI_BASE;
use aif_core::{AifError, Graph, GraphStore, UuidIriGenerator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Producing-system IRI used when none is configured.
pub const DEFAULT_SYSTEM_URI: &str = "http://www.example.org/aif/system";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub system: SystemConfig,
    pub identifiers: IdentifierConfig,
    /// Extra prefix -> namespace pairs, on top of rdf/xsd/aida/skos.
    pub namespaces: BTreeMap<String, String>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    pub uri: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_SYSTEM_URI.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct IdentifierConfig {
    /// Base namespace for generated resource IRIs.
    pub base: String,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_IRI_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Textual dump format.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Turtle,
    Ntriples,
}

impl Config {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, AifError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, AifError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AifError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, AifError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AifError::ConfigError(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), AifError> {
        if self.system.uri.is_empty() {
            return Err(AifError::ConfigError("system.uri must not be empty".into()));
        }
        UuidIriGenerator::new(self.identifiers.base.as_str())?;
        if let Some((prefix, _)) = self.namespaces.iter().find(|(_, ns)| ns.is_empty()) {
            return Err(AifError::ConfigError(format!(
                "namespace for prefix '{}' must not be empty",
                prefix
            )));
        }
        let mut scratch = Graph::new();
        for (prefix, namespace) in &self.namespaces {
            scratch.set_prefix(prefix, namespace)?;
        }
        Ok(())
    }

    /// The identifier generator for resources without an explicit IRI.
    pub fn iri_generator(&self) -> Result<UuidIriGenerator, AifError> {
        UuidIriGenerator::new(self.identifiers.base.as_str())
    }

    /// Standard prefixes overlaid with the configured ones.
    pub fn prefixes(&self) -> BTreeMap<String, String> {
        let mut prefixes: BTreeMap<String, String> = STANDARD_PREFIXES
            .iter()
            .map(|(p, ns)| ((*p).to_string(), (*ns).to_string()))
            .collect();
        prefixes.extend(self.namespaces.clone());
        prefixes
    }

    /// Expand `prefix:local` against the known prefixes.
    ///
    /// Names with an unknown prefix, or none, are returned unchanged.
    pub fn expand(&self, name: &str) -> String {
        let prefixes = self.prefixes();
        name.split_once(':')
            .and_then(|(prefix, local)| {
                prefixes
                    .get(prefix)
                    .map(|namespace| format!("{}{}", namespace, local))
            })
            .unwrap_or_else(|| name.to_string())
    }
}
