//! Core Types
//!
//! Types shared between the render layer, change detection and the view compiler.

use serde::{Deserialize, Serialize};

/// Strategy a change detector uses to decide when a view needs checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeDetectionStrategy {
    /// Checked once after hydration, then marked `Checked`.
    CheckOnce,
    /// Skipped until marked `CheckOnce` again.
    Checked,
    /// Checked on every change detection run.
    CheckAlways,
    /// Detached from the change detector tree.
    Detached,
    /// Checked only when one of its inputs changes.
    OnPush,
    #[default]
    Default,
}

impl ChangeDetectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeDetectionStrategy::CheckOnce => "CHECK_ONCE",
            ChangeDetectionStrategy::Checked => "CHECKED",
            ChangeDetectionStrategy::CheckAlways => "CHECK_ALWAYS",
            ChangeDetectionStrategy::Detached => "DETACHED",
            ChangeDetectionStrategy::OnPush => "ON_PUSH",
            ChangeDetectionStrategy::Default => "DEFAULT",
        }
    }
}

impl std::fmt::Display for ChangeDetectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
