//! Expression Module
//!
//! Binding expressions as produced by the render layer's expression parser.

pub mod ast;
pub mod serializer;

pub use ast::*;
pub use serializer::serialize;
