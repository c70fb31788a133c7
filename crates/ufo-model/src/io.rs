//! Model files: the symbol declarations and raw vertex table of one UFO export.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ufo_core::errors::{ErrorInfo, UfoError};
use ufo_core::SchemaVersion;

use crate::config::RegistryConfig;
use crate::record::RawVertex;
use crate::registry::{LoadReport, Registry};
use crate::serde::{from_json_slice, serde_error};
use crate::symbols::{CouplingInfo, LorentzInfo, ParticleInfo, SymbolTables};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default)]
    pub schema_version: SchemaVersion,
    #[serde(default)]
    pub particles: Vec<ParticleInfo>,
    #[serde(default)]
    pub lorentz: Vec<LorentzInfo>,
    #[serde(default)]
    pub couplings: Vec<CouplingInfo>,
    #[serde(default)]
    pub vertices: Vec<RawVertex>,
}

impl ModelFile {
    pub fn from_json_slice(data: &[u8]) -> Result<Self, UfoError> {
        let model: Self = from_json_slice(data)?;
        model.check_schema()
    }

    pub fn to_json(&self) -> Result<String, UfoError> {
        serde_json::to_string_pretty(self).map_err(|err| serde_error("json-encode", err))
    }

    /// Compact binary encoding for caching a parsed export between runs.
    pub fn to_bytes(&self) -> Result<Vec<u8>, UfoError> {
        bincode::serialize(self).map_err(|err| serde_error("serialize-bytes", err))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, UfoError> {
        let model: Self =
            bincode::deserialize(bytes).map_err(|err| serde_error("deserialize-bytes", err))?;
        model.check_schema()
    }

    /// Reads a model file; `.bin` paths are decoded as binary, anything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UfoError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            UfoError::Serde(
                ErrorInfo::new("model-io", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read model file");
        let decoded = match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => Self::from_bytes(&bytes),
            _ => Self::from_json_slice(&bytes),
        };
        decoded.map_err(|err| err.with_context("path", path.display()))
    }

    fn check_schema(self) -> Result<Self, UfoError> {
        if !self.schema_version.is_compatible() {
            return Err(UfoError::Serde(
                ErrorInfo::new("schema-version", "unsupported model file schema")
                    .with_context("found", self.schema_version)
                    .with_context("supported", SchemaVersion::current()),
            ));
        }
        Ok(self)
    }

    pub fn symbols(&self) -> SymbolTables {
        let mut symbols = SymbolTables::new();
        symbols.declare_all(
            self.particles.iter().cloned(),
            self.lorentz.iter().cloned(),
            self.couplings.iter().cloned(),
        );
        symbols
    }

    /// Declares every symbol, then loads the vertex table.
    pub fn into_registry(self, config: RegistryConfig) -> (Registry, LoadReport) {
        let mut registry = Registry::with_symbols(config, self.symbols());
        let report = registry.load(self.vertices);
        (registry, report)
    }

    /// Captures a loaded registry, symbols included, as a model file.
    pub fn from_registry(registry: &Registry) -> Result<Self, UfoError> {
        let symbols = registry.symbols();
        Ok(Self {
            schema_version: SchemaVersion::current(),
            particles: symbols.particles.iter().map(|(_, info)| info.clone()).collect(),
            lorentz: symbols.lorentz.iter().map(|(_, info)| info.clone()).collect(),
            couplings: symbols.couplings.iter().map(|(_, info)| info.clone()).collect(),
            vertices: registry.export()?,
        })
    }
}
