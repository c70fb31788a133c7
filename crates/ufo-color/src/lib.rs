#![deny(missing_docs)]
#![doc = "Parser, AST and canonical printer for UFO color-algebra expressions."]

//! Expressions are products of SU(3) tensors written as in UFO model exports,
//! e.g. `f(-1,1,2)*f(3,4,-1)` or `Identity(2,3)`. Positive indices name vertex
//! legs, negative ones are contraction labels and carry no further meaning here.

mod ast;
mod lexer;
mod parser;

pub use ast::{ColorExpr, ColorIndex, ColorTerm};
pub use parser::{parse, parse_expr};
