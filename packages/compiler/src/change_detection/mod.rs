//! Change Detection Module
//!
//! Records and definitions consumed by the change detection collaborator.

pub mod binding_record;
pub mod change_detector;
pub mod directive_record;

pub use binding_record::*;
pub use change_detector::*;
pub use directive_record::*;
