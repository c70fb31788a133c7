use serde::{Deserialize, Serialize};

/// One `(lorentz_index, color_index) -> coupling` entry as emitted by the source table.
///
/// Indices are signed so negative keys survive decoding and can be rejected
/// with a precise diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCoupling(pub i64, pub i64, pub String);

impl RawCoupling {
    pub fn new(lorentz: i64, color: i64, coupling: impl Into<String>) -> Self {
        Self(lorentz, color, coupling.into())
    }

    pub fn lorentz(&self) -> i64 {
        self.0
    }

    pub fn color(&self) -> i64 {
        self.1
    }

    pub fn coupling(&self) -> &str {
        &self.2
    }
}

/// Unvalidated vertex record, referring to symbols by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVertex {
    pub name: String,
    pub particles: Vec<String>,
    pub color: Vec<String>,
    pub lorentz: Vec<String>,
    pub couplings: Vec<RawCoupling>,
}

impl RawVertex {
    /// Convenience constructor mirroring the layout of a generated vertex table entry.
    pub fn new(
        name: impl Into<String>,
        particles: &[&str],
        color: &[&str],
        lorentz: &[&str],
        couplings: &[(i64, i64, &str)],
    ) -> Self {
        Self {
            name: name.into(),
            particles: particles.iter().map(|p| p.to_string()).collect(),
            color: color.iter().map(|c| c.to_string()).collect(),
            lorentz: lorentz.iter().map(|l| l.to_string()).collect(),
            couplings: couplings
                .iter()
                .map(|(l, c, name)| RawCoupling::new(*l, *c, *name))
                .collect(),
        }
    }
}
