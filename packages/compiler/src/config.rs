//! Compiler Options
//!
//! Options controlling the proto view compilation pass. They can be built in code
//! or read from a JSON file with camelCase keys.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::ChangeDetectionStrategy;
use crate::error::Result;

/// Number of directive slots per element the legacy numeric directive key
/// (`element_index * 100 + slot`) can address.
pub const LEGACY_DIRECTIVE_SLOTS_PER_ELEMENT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Strategy used for host and embedded views. Component views always use the
    /// strategy of their host component.
    pub default_change_detection: ChangeDetectionStrategy,
    /// Log a warning for elements carrying more directives than
    /// [`LEGACY_DIRECTIVE_SLOTS_PER_ELEMENT`].
    pub warn_on_legacy_slot_overflow: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            default_change_detection: ChangeDetectionStrategy::Default,
            warn_on_legacy_slot_overflow: true,
        }
    }
}

impl CompilerOptions {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let options: CompilerOptions = serde_json::from_str(&content)?;
        Ok(options)
    }
}
