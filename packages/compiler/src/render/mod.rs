//! Render Module
//!
//! Boundary types shared with the render layer.

pub mod api;

pub use api::*;
