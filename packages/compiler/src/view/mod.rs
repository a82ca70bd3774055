//! View Module
//!
//! Compilation of render proto views into app proto views.

pub mod binding_records;
pub mod element_injector;
pub mod proto_view;
pub mod proto_view_factory;

// Re-exports
pub use binding_records::*;
pub use element_injector::*;
pub use proto_view::*;
pub use proto_view_factory::*;
