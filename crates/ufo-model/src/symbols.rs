//! Append-only symbol tables for particles, Lorentz structures and couplings.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use ufo_core::errors::{ErrorInfo, UfoError};
use ufo_core::{CouplingId, Handle, LorentzId, ParticleId};

/// Entry type stored in a [`SymbolTable`].
pub trait Descriptor: Clone + fmt::Debug {
    /// Handle type returned when the descriptor is interned.
    type Id: Handle;

    /// Table label used in diagnostics.
    const KIND: &'static str;

    /// Symbolic name the descriptor is registered under.
    fn name(&self) -> &str;

    /// Descriptor recorded for a name that was referenced but never declared.
    fn placeholder(name: &str) -> Self;

    /// Whether the descriptor carries nothing beyond its name.
    fn is_placeholder(&self) -> bool;
}

/// Particle metadata owned by the external particle database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleInfo {
    pub name: String,
    #[serde(default)]
    pub antiname: Option<String>,
    #[serde(default)]
    pub pdg_code: Option<i64>,
    /// Spin as `2s+1`, following the UFO convention.
    #[serde(default)]
    pub spin: Option<i32>,
    /// SU(3) representation (1, 3, -3, 6, -6, 8).
    #[serde(default)]
    pub color: Option<i32>,
}

impl ParticleInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            antiname: None,
            pdg_code: None,
            spin: None,
            color: None,
        }
    }

    pub fn with_pdg_code(mut self, pdg_code: i64) -> Self {
        self.pdg_code = Some(pdg_code);
        self
    }

    pub fn with_antiname(mut self, antiname: impl Into<String>) -> Self {
        self.antiname = Some(antiname.into());
        self
    }

    pub fn with_spin(mut self, spin: i32) -> Self {
        self.spin = Some(spin);
        self
    }

    pub fn with_color(mut self, color: i32) -> Self {
        self.color = Some(color);
        self
    }
}

impl Descriptor for ParticleInfo {
    type Id = ParticleId;
    const KIND: &'static str = "particle";

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(name: &str) -> Self {
        Self::new(name)
    }

    fn is_placeholder(&self) -> bool {
        self.antiname.is_none()
            && self.pdg_code.is_none()
            && self.spin.is_none()
            && self.color.is_none()
    }
}

/// Lorentz structure metadata. Only the spin list is inspected by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LorentzInfo {
    pub name: String,
    /// Spins of the legs the structure expects; its length is the arity tag.
    #[serde(default)]
    pub spins: Vec<i32>,
    #[serde(default)]
    pub structure: Option<String>,
}

impl LorentzInfo {
    pub fn new(name: impl Into<String>, spins: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            spins,
            structure: None,
        }
    }

    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = Some(structure.into());
        self
    }

    /// Number of legs the structure expects, when declared.
    pub fn arity(&self) -> Option<usize> {
        (!self.spins.is_empty()).then_some(self.spins.len())
    }
}

impl Descriptor for LorentzInfo {
    type Id = LorentzId;
    const KIND: &'static str = "lorentz";

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(name: &str) -> Self {
        Self::new(name, Vec::new())
    }

    fn is_placeholder(&self) -> bool {
        self.spins.is_empty() && self.structure.is_none()
    }
}

/// Named coupling constant. The value is an opaque symbolic expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplingInfo {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    /// Coupling orders, e.g. `{"QCD": 1}`.
    #[serde(default)]
    pub order: BTreeMap<String, u32>,
}

impl CouplingInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            order: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_order(mut self, kind: impl Into<String>, power: u32) -> Self {
        self.order.insert(kind.into(), power);
        self
    }
}

impl Descriptor for CouplingInfo {
    type Id = CouplingId;
    const KIND: &'static str = "coupling";

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(name: &str) -> Self {
        Self::new(name)
    }

    fn is_placeholder(&self) -> bool {
        self.value.is_none() && self.order.is_empty()
    }
}

/// Name-to-handle registry for one kind of descriptor.
///
/// Handles are dense positions and stay valid for the lifetime of the table;
/// entries are never removed.
#[derive(Debug, Clone)]
pub struct SymbolTable<D: Descriptor> {
    entries: Vec<D>,
    index: HashMap<String, D::Id>,
}

impl<D: Descriptor> Default for SymbolTable<D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<D: Descriptor> SymbolTable<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `name`, registering a placeholder when absent.
    pub fn intern(&mut self, name: &str) -> D::Id {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        self.push(D::placeholder(name))
    }

    /// Registers a full descriptor. Re-declaring a name keeps its handle; a
    /// placeholder is replaced, an existing declaration is kept.
    pub fn declare(&mut self, descriptor: D) -> D::Id {
        match self.index.get(descriptor.name()).copied() {
            Some(id) => {
                let slot = &mut self.entries[id.index()];
                if slot.is_placeholder() {
                    *slot = descriptor;
                }
                id
            }
            None => self.push(descriptor),
        }
    }

    fn push(&mut self, descriptor: D) -> D::Id {
        let id = D::Id::from_index(self.entries.len());
        self.index.insert(descriptor.name().to_string(), id);
        self.entries.push(descriptor);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<D::Id> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Like [`lookup`](Self::lookup) but surfaces a missing name as an error.
    pub fn require(&self, name: &str) -> Result<D::Id, UfoError> {
        self.lookup(name).ok_or_else(|| {
            UfoError::UnknownSymbol(
                ErrorInfo::new("unknown-symbol", format!("{} `{name}` is not declared", D::KIND))
                    .with_context("table", D::KIND)
                    .with_context("name", name),
            )
        })
    }

    pub fn resolve(&self, id: D::Id) -> Result<&D, UfoError> {
        self.entries.get(id.index()).ok_or_else(|| {
            UfoError::UnknownSymbol(
                ErrorInfo::new("unknown-handle", format!("{} handle is not registered", D::KIND))
                    .with_context("table", D::KIND)
                    .with_context("handle", id.index()),
            )
        })
    }

    pub fn name_of(&self, id: D::Id) -> Result<&str, UfoError> {
        self.resolve(id).map(|descriptor| descriptor.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries. Callers must not rely on the order.
    pub fn iter(&self) -> impl Iterator<Item = (D::Id, &D)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, descriptor)| (D::Id::from_index(idx), descriptor))
    }
}

/// The three tables a registry resolves vertex records against.
#[derive(Debug, Clone, Default)]
pub struct SymbolTables {
    pub particles: SymbolTable<ParticleInfo>,
    pub lorentz: SymbolTable<LorentzInfo>,
    pub couplings: SymbolTable<CouplingInfo>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares every descriptor of the three iterators.
    pub fn declare_all(
        &mut self,
        particles: impl IntoIterator<Item = ParticleInfo>,
        lorentz: impl IntoIterator<Item = LorentzInfo>,
        couplings: impl IntoIterator<Item = CouplingInfo>,
    ) {
        for particle in particles {
            self.particles.declare(particle);
        }
        for structure in lorentz {
            self.lorentz.declare(structure);
        }
        for coupling in couplings {
            self.couplings.declare(coupling);
        }
    }
}
