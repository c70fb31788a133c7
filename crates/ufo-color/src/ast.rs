use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ufo_core::errors::{ErrorInfo, UfoError};

/// Index slot of a color tensor.
///
/// Positive values name a leg of the owning vertex (1-based), negative values
/// are contraction labels summed over inside the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColorIndex(i32);

impl ColorIndex {
    /// Creates an index, rejecting zero which names neither a leg nor a contraction.
    pub fn new(raw: i32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    /// Returns the raw signed value.
    pub fn raw(&self) -> i32 {
        self.0
    }

    /// Returns whether the index names a vertex leg.
    pub fn is_leg(&self) -> bool {
        self.0 > 0
    }

    /// Returns whether the index is an internal contraction label.
    pub fn is_contracted(&self) -> bool {
        self.0 < 0
    }

    /// Returns the 1-based leg number for positive indices.
    pub fn leg(&self) -> Option<usize> {
        self.is_leg().then_some(self.0 as usize)
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One factor of a color expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorTerm {
    /// The literal `1`, a color singlet.
    Unit,
    /// `Identity(i,j)`, the Kronecker delta between a triplet and an antitriplet.
    Identity([ColorIndex; 2]),
    /// `T(a,i,j,...)`, an SU(3) generator, possibly a product chain of generators.
    Generator(Vec<ColorIndex>),
    /// `f(a,b,c)`, the antisymmetric structure constant.
    StructureF([ColorIndex; 3]),
    /// `d(a,b,c)`, the symmetric structure constant.
    StructureD([ColorIndex; 3]),
    /// `Epsilon(i,j,k)`, the totally antisymmetric tensor on triplets.
    Epsilon([ColorIndex; 3]),
    /// `EpsilonBar(i,j,k)`, the totally antisymmetric tensor on antitriplets.
    EpsilonBar([ColorIndex; 3]),
}

impl ColorTerm {
    /// Returns the tensor symbol as written in model files.
    pub fn symbol(&self) -> &'static str {
        match self {
            ColorTerm::Unit => "1",
            ColorTerm::Identity(_) => "Identity",
            ColorTerm::Generator(_) => "T",
            ColorTerm::StructureF(_) => "f",
            ColorTerm::StructureD(_) => "d",
            ColorTerm::Epsilon(_) => "Epsilon",
            ColorTerm::EpsilonBar(_) => "EpsilonBar",
        }
    }

    /// Returns the index slots in source order.
    pub fn indices(&self) -> &[ColorIndex] {
        match self {
            ColorTerm::Unit => &[],
            ColorTerm::Identity(indices) => indices,
            ColorTerm::Generator(indices) => indices,
            ColorTerm::StructureF(indices)
            | ColorTerm::StructureD(indices)
            | ColorTerm::Epsilon(indices)
            | ColorTerm::EpsilonBar(indices) => indices,
        }
    }
}

impl fmt::Display for ColorTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let ColorTerm::Unit = self {
            return f.write_str("1");
        }
        write!(f, "{}(", self.symbol())?;
        for (idx, index) in self.indices().iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{index}")?;
        }
        f.write_str(")")
    }
}

/// Parsed color structure: a product of [`ColorTerm`]s.
///
/// The `Display` implementation is the canonical printer; its output parses
/// back to an equal expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorExpr {
    terms: Vec<ColorTerm>,
}

impl ColorExpr {
    /// Builds an expression from at least one term.
    pub fn from_terms(terms: Vec<ColorTerm>) -> Option<Self> {
        (!terms.is_empty()).then_some(Self { terms })
    }

    /// The singlet expression `1`.
    pub fn unit() -> Self {
        Self {
            terms: vec![ColorTerm::Unit],
        }
    }

    /// Returns the factors in source order.
    pub fn terms(&self) -> &[ColorTerm] {
        &self.terms
    }

    /// Returns whether the expression is the bare singlet `1`.
    pub fn is_unit(&self) -> bool {
        self.terms.iter().all(|term| matches!(term, ColorTerm::Unit))
    }

    /// Iterates over every index slot of every term.
    pub fn indices(&self) -> impl Iterator<Item = ColorIndex> + '_ {
        self.terms
            .iter()
            .flat_map(|term| term.indices().iter().copied())
    }

    /// Returns the distinct legs (positive indices) referenced by the expression.
    pub fn legs(&self) -> BTreeSet<usize> {
        self.indices().filter_map(|index| index.leg()).collect()
    }

    /// Returns the distinct contraction labels (negative indices).
    pub fn contracted(&self) -> BTreeSet<i32> {
        self.indices()
            .filter(ColorIndex::is_contracted)
            .map(|index| index.raw())
            .collect()
    }

    /// Returns the largest leg referenced, if any.
    pub fn max_leg(&self) -> Option<usize> {
        self.legs().into_iter().next_back()
    }

    /// Checks that every leg index lies in `1..=num_legs`.
    pub fn check_legs(&self, num_legs: usize) -> Result<(), UfoError> {
        match self.max_leg() {
            Some(leg) if leg > num_legs => Err(UfoError::ColorIndexOutOfRange(
                ErrorInfo::new(
                    "color-index-out-of-range",
                    format!("color index {leg} exceeds the {num_legs} legs of the vertex"),
                )
                .with_context("expression", self)
                .with_context("index", leg)
                .with_context("legs", num_legs),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ColorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, term) in self.terms.iter().enumerate() {
            if idx > 0 {
                f.write_str("*")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ColorExpr {
    type Err = UfoError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_expr(raw)
    }
}

impl TryFrom<String> for ColorExpr {
    type Error = UfoError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<ColorExpr> for String {
    fn from(expr: ColorExpr) -> Self {
        expr.to_string()
    }
}
