#![deny(clippy::all)]

//! Angular View Compiler
//!
//! Compiles render proto view trees, as produced by the template compiler, into
//! app proto views: flat, indexed view descriptors carrying change detector
//! definitions and the element injector hierarchy needed to instantiate them.

pub mod change_detection;
pub mod config;
pub mod core;
pub mod error;
pub mod expression_parser;
pub mod reflection;
pub mod render;
pub mod view;

// Re-exports
pub use config::CompilerOptions;
pub use error::{CompilerError, Result};
pub use view::{AppProtoView, ProtoViewFactory};
