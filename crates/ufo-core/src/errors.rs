//! Structured error types shared across the registry crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`UfoError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (vertex name, offending field, raw value).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Field-less discriminant of [`UfoError`], recorded in load reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Malformed color expression.
    ColorParse,
    /// Color expression references a leg the vertex does not have.
    ColorIndexOutOfRange,
    /// Coupling key outside the Lorentz or color list bounds.
    CouplingIndexOutOfRange,
    /// The same coupling key appears twice in one record.
    DuplicateCouplingKey,
    /// Color, Lorentz or coupling list is empty.
    EmptyStructureList,
    /// Fewer than three particles.
    TooFewParticles,
    /// Vertex name already present in the registry.
    DuplicateVertexName,
    /// Name or handle not present in a symbol table.
    UnknownSymbol,
    /// Lorentz structure declares a different number of legs.
    LorentzArityMismatch,
    /// Lookup of a vertex name that was never loaded.
    VertexNotFound,
    /// Model file encoding or decoding failure.
    Serde,
}

impl ErrorKind {
    /// Returns the stable kebab-case label of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::ColorParse => "color-parse",
            ErrorKind::ColorIndexOutOfRange => "color-index-out-of-range",
            ErrorKind::CouplingIndexOutOfRange => "coupling-index-out-of-range",
            ErrorKind::DuplicateCouplingKey => "duplicate-coupling-key",
            ErrorKind::EmptyStructureList => "empty-structure-list",
            ErrorKind::TooFewParticles => "too-few-particles",
            ErrorKind::DuplicateVertexName => "duplicate-vertex-name",
            ErrorKind::UnknownSymbol => "unknown-symbol",
            ErrorKind::LorentzArityMismatch => "lorentz-arity-mismatch",
            ErrorKind::VertexNotFound => "vertex-not-found",
            ErrorKind::Serde => "serde",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical error type for the vertex registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum UfoError {
    /// Malformed color expression.
    #[error("color parse error: {0}")]
    ColorParse(ErrorInfo),
    /// Color expression references a leg the vertex does not have.
    #[error("color index out of range: {0}")]
    ColorIndexOutOfRange(ErrorInfo),
    /// Coupling key outside the Lorentz or color list bounds.
    #[error("coupling index out of range: {0}")]
    CouplingIndexOutOfRange(ErrorInfo),
    /// The same coupling key appears twice in one record.
    #[error("duplicate coupling key: {0}")]
    DuplicateCouplingKey(ErrorInfo),
    /// Color, Lorentz or coupling list is empty.
    #[error("empty structure list: {0}")]
    EmptyStructureList(ErrorInfo),
    /// Fewer than three particles.
    #[error("too few particles: {0}")]
    TooFewParticles(ErrorInfo),
    /// Vertex name already present in the registry.
    #[error("duplicate vertex name: {0}")]
    DuplicateVertexName(ErrorInfo),
    /// Name or handle not present in a symbol table.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(ErrorInfo),
    /// Lorentz structure declares a different number of legs.
    #[error("lorentz arity mismatch: {0}")]
    LorentzArityMismatch(ErrorInfo),
    /// Lookup of a vertex name that was never loaded.
    #[error("vertex not found: {0}")]
    VertexNotFound(ErrorInfo),
    /// Model file encoding or decoding failure.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl UfoError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            UfoError::ColorParse(info)
            | UfoError::ColorIndexOutOfRange(info)
            | UfoError::CouplingIndexOutOfRange(info)
            | UfoError::DuplicateCouplingKey(info)
            | UfoError::EmptyStructureList(info)
            | UfoError::TooFewParticles(info)
            | UfoError::DuplicateVertexName(info)
            | UfoError::UnknownSymbol(info)
            | UfoError::LorentzArityMismatch(info)
            | UfoError::VertexNotFound(info)
            | UfoError::Serde(info) => info,
        }
    }

    /// Returns the field-less kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UfoError::ColorParse(_) => ErrorKind::ColorParse,
            UfoError::ColorIndexOutOfRange(_) => ErrorKind::ColorIndexOutOfRange,
            UfoError::CouplingIndexOutOfRange(_) => ErrorKind::CouplingIndexOutOfRange,
            UfoError::DuplicateCouplingKey(_) => ErrorKind::DuplicateCouplingKey,
            UfoError::EmptyStructureList(_) => ErrorKind::EmptyStructureList,
            UfoError::TooFewParticles(_) => ErrorKind::TooFewParticles,
            UfoError::DuplicateVertexName(_) => ErrorKind::DuplicateVertexName,
            UfoError::UnknownSymbol(_) => ErrorKind::UnknownSymbol,
            UfoError::LorentzArityMismatch(_) => ErrorKind::LorentzArityMismatch,
            UfoError::VertexNotFound(_) => ErrorKind::VertexNotFound,
            UfoError::Serde(_) => ErrorKind::Serde,
        }
    }

    /// Builds an error of the given kind around `info`.
    pub fn from_kind(kind: ErrorKind, info: ErrorInfo) -> Self {
        match kind {
            ErrorKind::ColorParse => UfoError::ColorParse(info),
            ErrorKind::ColorIndexOutOfRange => UfoError::ColorIndexOutOfRange(info),
            ErrorKind::CouplingIndexOutOfRange => UfoError::CouplingIndexOutOfRange(info),
            ErrorKind::DuplicateCouplingKey => UfoError::DuplicateCouplingKey(info),
            ErrorKind::EmptyStructureList => UfoError::EmptyStructureList(info),
            ErrorKind::TooFewParticles => UfoError::TooFewParticles(info),
            ErrorKind::DuplicateVertexName => UfoError::DuplicateVertexName(info),
            ErrorKind::UnknownSymbol => UfoError::UnknownSymbol(info),
            ErrorKind::LorentzArityMismatch => UfoError::LorentzArityMismatch(info),
            ErrorKind::VertexNotFound => UfoError::VertexNotFound(info),
            ErrorKind::Serde => UfoError::Serde(info),
        }
    }

    /// Returns the same error with an extra context entry.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        let kind = self.kind();
        let info = self.into_info().with_context(key, value);
        UfoError::from_kind(kind, info)
    }

    fn into_info(self) -> ErrorInfo {
        match self {
            UfoError::ColorParse(info)
            | UfoError::ColorIndexOutOfRange(info)
            | UfoError::CouplingIndexOutOfRange(info)
            | UfoError::DuplicateCouplingKey(info)
            | UfoError::EmptyStructureList(info)
            | UfoError::TooFewParticles(info)
            | UfoError::DuplicateVertexName(info)
            | UfoError::UnknownSymbol(info)
            | UfoError::LorentzArityMismatch(info)
            | UfoError::VertexNotFound(info)
            | UfoError::Serde(info) => info,
        }
    }
}
