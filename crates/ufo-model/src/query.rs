//! Read-only lookup API for amplitude and diagram generators.

use std::sync::Arc;

use ufo_color::ColorExpr;
use ufo_core::errors::UfoError;
use ufo_core::ParticleId;

use crate::record::RawVertex;
use crate::registry::Registry;
use crate::vertex::Vertex;

/// Shared, read-only handle over a loaded [`Registry`].
///
/// Clones are cheap and may be sent to other threads.
#[derive(Debug, Clone)]
pub struct ModelQuery {
    registry: Arc<Registry>,
}

impl From<Registry> for ModelQuery {
    fn from(registry: Registry) -> Self {
        Self::new(Arc::new(registry))
    }
}

impl ModelQuery {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn view<'a>(&'a self, vertex: &'a Vertex) -> VertexView<'a> {
        VertexView {
            registry: &self.registry,
            vertex,
        }
    }

    pub fn get(&self, name: &str) -> Result<VertexView<'_>, UfoError> {
        self.registry.get(name).map(|vertex| self.view(vertex))
    }

    pub fn find_by_particles(&self, particles: &[ParticleId]) -> Vec<VertexView<'_>> {
        self.registry
            .find_by_particles(particles)
            .into_iter()
            .map(|vertex| self.view(vertex))
            .collect()
    }

    /// Like [`find_by_particles`](Self::find_by_particles) but by particle name.
    /// A name the model never mentions is an error rather than an empty result.
    pub fn find_by_names(&self, names: &[&str]) -> Result<Vec<VertexView<'_>>, UfoError> {
        let particles = names
            .iter()
            .map(|name| self.particle(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.find_by_particles(&particles))
    }

    pub fn all(&self) -> impl Iterator<Item = VertexView<'_>> + '_ {
        self.registry.all().map(move |vertex| self.view(vertex))
    }

    /// Vertices in which the named particle appears on any leg.
    pub fn containing(&self, particle: &str) -> Result<Vec<VertexView<'_>>, UfoError> {
        let id = self.particle(particle)?;
        Ok(self
            .registry
            .containing(id)
            .into_iter()
            .map(|vertex| self.view(vertex))
            .collect())
    }

    /// Vertices whose coupling matrix references the named coupling.
    pub fn with_coupling(&self, coupling: &str) -> Result<Vec<VertexView<'_>>, UfoError> {
        let id = self.registry.symbols().couplings.require(coupling)?;
        Ok(self
            .registry
            .all()
            .filter(|vertex| vertex.couplings().references(id))
            .map(|vertex| self.view(vertex))
            .collect())
    }

    pub fn particle(&self, name: &str) -> Result<ParticleId, UfoError> {
        self.registry.symbols().particles.require(name)
    }
}

/// A vertex paired with the symbol tables needed to name its handles.
#[derive(Debug, Clone, Copy)]
pub struct VertexView<'a> {
    registry: &'a Registry,
    vertex: &'a Vertex,
}

impl<'a> VertexView<'a> {
    pub fn vertex(&self) -> &'a Vertex {
        self.vertex
    }

    pub fn name(&self) -> &'a str {
        self.vertex.name()
    }

    pub fn color_structures(&self) -> &'a [ColorExpr] {
        self.vertex.color_structures()
    }

    pub fn particle_names(&self) -> Result<Vec<&'a str>, UfoError> {
        let table = &self.registry.symbols().particles;
        self.vertex
            .particles()
            .iter()
            .map(|id| table.name_of(*id))
            .collect()
    }

    pub fn lorentz_names(&self) -> Result<Vec<&'a str>, UfoError> {
        let table = &self.registry.symbols().lorentz;
        self.vertex
            .lorentz_structures()
            .iter()
            .map(|id| table.name_of(*id))
            .collect()
    }

    /// `(lorentz_index, color_index, coupling_name)` triples ordered by key.
    pub fn coupling_entries(&self) -> Result<Vec<(usize, usize, &'a str)>, UfoError> {
        let table = &self.registry.symbols().couplings;
        self.vertex
            .couplings()
            .iter()
            .map(|((l, c), id)| table.name_of(id).map(|name| (l, c, name)))
            .collect()
    }

    pub fn to_raw(&self) -> Result<RawVertex, UfoError> {
        self.registry.to_raw(self.vertex)
    }
}
