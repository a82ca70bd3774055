//! Directive Records
//!
//! Per-slot change detection metadata, shared by every binding record that targets
//! the same directive.

use bitflags::bitflags;

use crate::core::ChangeDetectionStrategy;

/// Position of a directive: the bound element and the directive slot on it.
///
/// The pair is the identity of a directive within a view. It replaces the numeric
/// `element_index * 100 + directive_index` key, which collided once an element
/// carried more than 100 directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectiveIndex {
    pub element_index: usize,
    pub directive_index: usize,
}

impl DirectiveIndex {
    pub fn new(element_index: usize, directive_index: usize) -> Self {
        DirectiveIndex {
            element_index,
            directive_index,
        }
    }

    pub fn name(&self) -> String {
        format!("directive_{}_{}", self.element_index, self.directive_index)
    }
}

bitflags! {
    /// Lifecycle callbacks change detection has to invoke on a directive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LifecycleHooks: u8 {
        const ON_CHANGE = 1 << 0;
        const ON_ALL_CHANGES_DONE = 1 << 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveRecord {
    pub directive_index: DirectiveIndex,
    pub hooks: LifecycleHooks,
    pub change_detection: ChangeDetectionStrategy,
}

impl DirectiveRecord {
    pub fn new(
        directive_index: DirectiveIndex,
        call_on_all_changes_done: bool,
        call_on_change: bool,
        change_detection: ChangeDetectionStrategy,
    ) -> Self {
        let mut hooks = LifecycleHooks::empty();
        hooks.set(LifecycleHooks::ON_CHANGE, call_on_change);
        hooks.set(LifecycleHooks::ON_ALL_CHANGES_DONE, call_on_all_changes_done);
        DirectiveRecord {
            directive_index,
            hooks,
            change_detection,
        }
    }

    pub fn call_on_change(&self) -> bool {
        self.hooks.contains(LifecycleHooks::ON_CHANGE)
    }

    pub fn call_on_all_changes_done(&self) -> bool {
        self.hooks.contains(LifecycleHooks::ON_ALL_CHANGES_DONE)
    }

    /// Whether the directive is a component checked only when its inputs change.
    pub fn is_on_push_change_detection(&self) -> bool {
        self.change_detection == ChangeDetectionStrategy::OnPush
    }
}
