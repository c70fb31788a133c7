#![doc = "Feynman-rule vertex registry: symbol tables, validated vertices and indexed lookup."]

//! A [`Registry`] is built once from a generated vertex table via
//! [`Registry::load`], which validates every record and reports the rejects,
//! then shared read-only through [`ModelQuery`].

mod config;
mod hash;
mod io;
mod query;
mod record;
mod registry;
mod serde;
mod symbols;
mod vertex;

pub use config::{RegistryConfig, SymbolPolicy};
pub use hash::canonical_hash;
pub use io::ModelFile;
pub use query::{ModelQuery, VertexView};
pub use record::{RawCoupling, RawVertex};
pub use registry::{LoadFailure, LoadReport, Registry, RegistryState};
pub use crate::serde::{from_json_slice, to_canonical_json_bytes};
pub use symbols::{
    CouplingInfo, Descriptor, LorentzInfo, ParticleInfo, SymbolTable, SymbolTables,
};
pub use vertex::{build_vertex, CouplingMatrix, ParticleKey, Vertex};

pub use ufo_color::{ColorExpr, ColorIndex, ColorTerm};
pub use ufo_core::{CouplingId, ErrorKind, LorentzId, ParticleId, UfoError, VertexId};
