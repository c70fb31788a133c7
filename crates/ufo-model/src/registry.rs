//! In-memory vertex store with name and particle-content indexes.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};
use ufo_core::errors::{ErrorInfo, ErrorKind, UfoError};
use ufo_core::{Handle, ParticleId, VertexId};

use crate::config::RegistryConfig;
use crate::record::{RawCoupling, RawVertex};
use crate::symbols::SymbolTables;
use crate::vertex::{build_vertex, ParticleKey, Vertex};

/// Lifecycle of a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryState {
    /// Nothing has been loaded yet.
    Empty,
    /// A `load` call is in progress.
    Loading,
    /// At least one `load` call has completed; queries reflect every accepted vertex.
    Ready,
}

/// A record rejected during [`Registry::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    pub name: String,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl LoadFailure {
    fn new(name: &str, err: &UfoError) -> Self {
        Self {
            name: name.to_string(),
            kind: err.kind(),
            message: err.info().message.clone(),
            context: err.info().context.clone(),
        }
    }

    /// Rebuilds the error that rejected the record.
    pub fn to_error(&self) -> UfoError {
        let mut info = ErrorInfo::new(self.kind.label(), self.message.clone());
        info.context = self.context.clone();
        UfoError::from_kind(self.kind, info)
    }
}

/// Outcome of one [`Registry::load`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Names of accepted vertices, in input order.
    pub succeeded: Vec<String>,
    /// Rejected records, in input order.
    pub failed: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn failure(&self, name: &str) -> Option<&LoadFailure> {
        self.failed.iter().find(|failure| failure.name == name)
    }

    pub fn counts_by_kind(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failed {
            *counts.entry(failure.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Validated vertex table plus the symbol tables its records resolve against.
///
/// `load` is the only mutating operation and takes `&mut self`, so a registry
/// shared behind `Arc` is read-only and needs no locking.
#[derive(Debug, Clone)]
pub struct Registry {
    config: RegistryConfig,
    symbols: SymbolTables,
    vertices: Vec<Vertex>,
    by_name: HashMap<String, VertexId>,
    by_particles: HashMap<ParticleKey, Vec<VertexId>>,
    by_member: HashMap<ParticleId, Vec<VertexId>>,
    state: RegistryState,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_symbols(config, SymbolTables::default())
    }

    /// Creates a registry over symbol tables declared by the particle database.
    pub fn with_symbols(config: RegistryConfig, symbols: SymbolTables) -> Self {
        Self {
            config,
            symbols,
            vertices: Vec::new(),
            by_name: HashMap::new(),
            by_particles: HashMap::new(),
            by_member: HashMap::new(),
            state: RegistryState::Empty,
        }
    }

    /// Validates and inserts every record. Rejected records are reported, never fatal.
    ///
    /// Loading again is additive; a name already present is rejected with
    /// [`UfoError::DuplicateVertexName`] and the existing vertex is left untouched.
    pub fn load<I>(&mut self, records: I) -> LoadReport
    where
        I: IntoIterator,
        I::Item: Borrow<RawVertex>,
    {
        let span = info_span!("registry.load", existing = self.vertices.len());
        let _guard = span.enter();
        self.state = RegistryState::Loading;

        let mut report = LoadReport::default();
        for record in records {
            let raw = record.borrow();
            match self.insert(raw) {
                Ok(id) => {
                    debug!(vertex = %raw.name, id = id.as_raw(), "accepted vertex record");
                    report.succeeded.push(raw.name.clone());
                }
                Err(err) => {
                    warn!(vertex = %raw.name, kind = %err.kind(), "rejected vertex record: {}", err.info());
                    report.failed.push(LoadFailure::new(&raw.name, &err));
                }
            }
        }

        self.state = RegistryState::Ready;
        info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            total = self.vertices.len(),
            "registry load finished"
        );
        report
    }

    fn insert(&mut self, raw: &RawVertex) -> Result<VertexId, UfoError> {
        if self.by_name.contains_key(&raw.name) {
            return Err(UfoError::DuplicateVertexName(
                ErrorInfo::new(
                    "duplicate-vertex-name",
                    format!("vertex `{}` is already registered", raw.name),
                )
                .with_context("vertex", &raw.name),
            ));
        }
        let vertex = build_vertex(raw, &mut self.symbols, &self.config)?;
        let id = VertexId::from_index(self.vertices.len());
        self.by_name.insert(vertex.name().to_string(), id);
        self.by_particles
            .entry(vertex.particle_key())
            .or_default()
            .push(id);
        let mut members = vertex.particles().to_vec();
        members.sort_unstable();
        members.dedup();
        for particle in members {
            self.by_member.entry(particle).or_default().push(id);
        }
        self.vertices.push(vertex);
        Ok(id)
    }

    pub fn get(&self, name: &str) -> Result<&Vertex, UfoError> {
        self.id_of(name)
            .and_then(|id| self.vertex(id))
            .ok_or_else(|| {
                UfoError::VertexNotFound(
                    ErrorInfo::new("vertex-not-found", format!("no vertex named `{name}`"))
                        .with_context("vertex", name),
                )
            })
    }

    pub fn id_of(&self, name: &str) -> Option<VertexId> {
        self.by_name.get(name).copied()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Every vertex whose particles, as a multiset, equal `particles`.
    /// Results are in insertion order.
    pub fn find_by_particles(&self, particles: &[ParticleId]) -> Vec<&Vertex> {
        self.vertices_for(self.by_particles.get(&ParticleKey::from_particles(particles)))
    }

    /// Every vertex in which `particle` appears on at least one leg.
    pub fn containing(&self, particle: ParticleId) -> Vec<&Vertex> {
        self.vertices_for(self.by_member.get(&particle))
    }

    fn vertices_for(&self, ids: Option<&Vec<VertexId>>) -> Vec<&Vertex> {
        ids.map(|ids| ids.iter().filter_map(|id| self.vertex(*id)).collect())
            .unwrap_or_default()
    }

    /// Iterates over all vertices in insertion order. Each call starts afresh.
    pub fn all(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTables {
        &self.symbols
    }

    /// Renders a vertex back into the raw, name-based record layout.
    pub fn to_raw(&self, vertex: &Vertex) -> Result<RawVertex, UfoError> {
        let particles = vertex
            .particles()
            .iter()
            .map(|id| self.symbols.particles.name_of(*id).map(str::to_string))
            .collect::<Result<_, _>>()?;
        let lorentz = vertex
            .lorentz_structures()
            .iter()
            .map(|id| self.symbols.lorentz.name_of(*id).map(str::to_string))
            .collect::<Result<_, _>>()?;
        let couplings = vertex
            .couplings()
            .iter()
            .map(|((l, c), id)| {
                self.symbols
                    .couplings
                    .name_of(id)
                    .map(|name| RawCoupling::new(l as i64, c as i64, name))
            })
            .collect::<Result<_, _>>()?;
        Ok(RawVertex {
            name: vertex.name().to_string(),
            particles,
            color: vertex
                .color_structures()
                .iter()
                .map(|expr| expr.to_string())
                .collect(),
            lorentz,
            couplings,
        })
    }

    /// Renders every vertex back into raw records, in insertion order.
    pub fn export(&self) -> Result<Vec<RawVertex>, UfoError> {
        self.vertices.iter().map(|vertex| self.to_raw(vertex)).collect()
    }
}
