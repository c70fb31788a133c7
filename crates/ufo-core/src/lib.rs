#![deny(missing_docs)]
#![doc = "Core handles and error types for the UFO vertex registry."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;

pub use errors::{ErrorInfo, ErrorKind, UfoError};
pub use provenance::SchemaVersion;

/// Implemented by every interned handle so symbol tables can stay generic.
pub trait Handle: Copy + Eq + Ord + std::hash::Hash + std::fmt::Debug {
    /// Creates a handle from its dense table position.
    fn from_index(index: usize) -> Self;

    /// Returns the dense table position wrapped by the handle.
    fn index(&self) -> usize;
}

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new handle from its raw integer representation.
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw integer representation of the handle.
            pub const fn as_raw(&self) -> u32 {
                self.0
            }
        }

        impl Handle for $name {
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            fn index(&self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

handle!(
    /// Interned reference to an entry of the particle table.
    ParticleId
);
handle!(
    /// Interned reference to an entry of the Lorentz-structure table.
    LorentzId
);
handle!(
    /// Interned reference to an entry of the coupling table.
    CouplingId
);
handle!(
    /// Position of a vertex inside a registry, stable for the registry lifetime.
    VertexId
);

/// Minimum number of legs an interaction vertex may have.
pub const MIN_VERTEX_LEGS: usize = 3;
