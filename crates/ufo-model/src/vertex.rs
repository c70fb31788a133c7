//! Validated vertex records and their construction from raw table entries.

use std::collections::{BTreeMap, BTreeSet};

use ufo_color::{parse, ColorExpr};
use ufo_core::errors::{ErrorInfo, UfoError};
use ufo_core::{CouplingId, LorentzId, ParticleId, MIN_VERTEX_LEGS};

use crate::config::{RegistryConfig, SymbolPolicy};
use crate::record::RawVertex;
use crate::symbols::{Descriptor, SymbolTable, SymbolTables};

/// Sparse `(lorentz_index, color_index) -> coupling` map with bounds fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouplingMatrix {
    lorentz_len: usize,
    color_len: usize,
    entries: BTreeMap<(usize, usize), CouplingId>,
}

impl CouplingMatrix {
    /// Returns the `(lorentz_len, color_len)` bounds every key lies within.
    pub fn shape(&self) -> (usize, usize) {
        (self.lorentz_len, self.color_len)
    }

    pub fn get(&self, lorentz: usize, color: usize) -> Option<CouplingId> {
        self.entries.get(&(lorentz, color)).copied()
    }

    /// Iterates over entries ordered by `(lorentz_index, color_index)`.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CouplingId)> + '_ {
        self.entries.iter().map(|(key, id)| (*key, *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry refers to `coupling`.
    pub fn references(&self, coupling: CouplingId) -> bool {
        self.entries.values().any(|id| *id == coupling)
    }
}

/// Canonical, order-independent form of a vertex's particle content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleKey(Box<[ParticleId]>);

impl ParticleKey {
    pub fn from_particles(particles: &[ParticleId]) -> Self {
        let mut sorted = particles.to_vec();
        sorted.sort_unstable();
        Self(sorted.into_boxed_slice())
    }

    pub fn particles(&self) -> &[ParticleId] {
        &self.0
    }
}

/// An interaction vertex whose invariants have been checked. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    name: String,
    particles: Vec<ParticleId>,
    color: Vec<ColorExpr>,
    lorentz: Vec<LorentzId>,
    couplings: CouplingMatrix,
}

impl Vertex {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Particles in leg order; position `i` is leg `i + 1` of the color structures.
    pub fn particles(&self) -> &[ParticleId] {
        &self.particles
    }

    pub fn legs(&self) -> usize {
        self.particles.len()
    }

    pub fn color_structures(&self) -> &[ColorExpr] {
        &self.color
    }

    pub fn lorentz_structures(&self) -> &[LorentzId] {
        &self.lorentz
    }

    pub fn couplings(&self) -> &CouplingMatrix {
        &self.couplings
    }

    pub fn particle_key(&self) -> ParticleKey {
        ParticleKey::from_particles(&self.particles)
    }
}

fn record_error(kind: fn(ErrorInfo) -> UfoError, code: &str, vertex: &str, message: String) -> UfoError {
    kind(ErrorInfo::new(code, message).with_context("vertex", vertex))
}

/// Validates `raw` and turns it into a [`Vertex`].
///
/// Symbol names are checked first, then particle count, list emptiness, color
/// expressions, coupling keys and Lorentz arities. Names are interned only once
/// every check has passed, so a rejected record leaves `symbols` untouched.
/// Name uniqueness is the registry's concern and is not checked here.
pub fn build_vertex(
    raw: &RawVertex,
    symbols: &mut SymbolTables,
    config: &RegistryConfig,
) -> Result<Vertex, UfoError> {
    let name = raw.name.as_str();
    if config.symbol_policy == SymbolPolicy::Strict {
        require_all(&symbols.particles, &raw.particles, name, "particles")?;
        require_all(&symbols.lorentz, &raw.lorentz, name, "lorentz")?;
        let coupling_names: Vec<String> =
            raw.couplings.iter().map(|entry| entry.2.clone()).collect();
        require_all(&symbols.couplings, &coupling_names, name, "couplings")?;
    }

    let legs = raw.particles.len();
    if legs < MIN_VERTEX_LEGS {
        return Err(record_error(
            UfoError::TooFewParticles,
            "too-few-particles",
            name,
            format!("vertex has {legs} particles, at least {MIN_VERTEX_LEGS} are required"),
        )
        .with_context("particles", raw.particles.join(",")));
    }
    for (field, len) in [
        ("color", raw.color.len()),
        ("lorentz", raw.lorentz.len()),
        ("couplings", raw.couplings.len()),
    ] {
        if len == 0 {
            return Err(record_error(
                UfoError::EmptyStructureList,
                "empty-structure-list",
                name,
                format!("vertex has no {field} entries"),
            )
            .with_context("field", field));
        }
    }

    let mut color = Vec::with_capacity(raw.color.len());
    for (pos, expr) in raw.color.iter().enumerate() {
        let parsed = parse(expr, legs).map_err(|err| {
            err.with_context("vertex", name)
                .with_context("field", format!("color[{pos}]"))
        })?;
        color.push(parsed);
    }

    let keys = check_coupling_keys(raw, name)?;

    if config.check_lorentz_arity {
        for (pos, structure) in raw.lorentz.iter().enumerate() {
            let arity = symbols
                .lorentz
                .lookup(structure)
                .and_then(|id| symbols.lorentz.resolve(id).ok())
                .and_then(|info| info.arity());
            if let Some(arity) = arity.filter(|arity| *arity != legs) {
                return Err(record_error(
                    UfoError::LorentzArityMismatch,
                    "lorentz-arity-mismatch",
                    name,
                    format!("lorentz structure `{structure}` expects {arity} legs, vertex has {legs}"),
                )
                .with_context("field", format!("lorentz[{pos}]")));
            }
        }
    }

    let particles = raw
        .particles
        .iter()
        .map(|particle| symbols.particles.intern(particle))
        .collect();
    let lorentz = raw
        .lorentz
        .iter()
        .map(|structure| symbols.lorentz.intern(structure))
        .collect();
    let entries = keys
        .into_iter()
        .zip(&raw.couplings)
        .map(|(key, entry)| (key, symbols.couplings.intern(entry.coupling())))
        .collect();

    Ok(Vertex {
        name: raw.name.clone(),
        particles,
        color,
        lorentz,
        couplings: CouplingMatrix {
            lorentz_len: raw.lorentz.len(),
            color_len: raw.color.len(),
            entries,
        },
    })
}

fn require_all<D: Descriptor>(
    table: &SymbolTable<D>,
    names: &[String],
    vertex: &str,
    field: &str,
) -> Result<(), UfoError> {
    for name in names {
        table
            .require(name)
            .map_err(|err| err.with_context("vertex", vertex).with_context("field", field))?;
    }
    Ok(())
}

/// Checks every raw key against the list bounds, returning them in record order.
fn check_coupling_keys(raw: &RawVertex, name: &str) -> Result<Vec<(usize, usize)>, UfoError> {
    let lorentz_len = raw.lorentz.len();
    let color_len = raw.color.len();
    let mut seen = BTreeSet::new();
    let mut keys = Vec::with_capacity(raw.couplings.len());
    for entry in &raw.couplings {
        let in_range = |value: i64, len: usize| usize::try_from(value).ok().filter(|v| *v < len);
        let key = match (
            in_range(entry.lorentz(), lorentz_len),
            in_range(entry.color(), color_len),
        ) {
            (Some(lorentz), Some(color)) => (lorentz, color),
            _ => {
                return Err(record_error(
                    UfoError::CouplingIndexOutOfRange,
                    "coupling-index-out-of-range",
                    name,
                    format!(
                        "coupling key ({}, {}) outside {lorentz_len} lorentz x {color_len} color structures",
                        entry.lorentz(),
                        entry.color()
                    ),
                )
                .with_context("coupling", entry.coupling())
                .with_context("lorentz_index", entry.lorentz())
                .with_context("color_index", entry.color()))
            }
        };
        if !seen.insert(key) {
            return Err(record_error(
                UfoError::DuplicateCouplingKey,
                "duplicate-coupling-key",
                name,
                format!("coupling key ({}, {}) appears more than once", key.0, key.1),
            )
            .with_context("coupling", entry.coupling()));
        }
        keys.push(key);
    }
    Ok(keys)
}
