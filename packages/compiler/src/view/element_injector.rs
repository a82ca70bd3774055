//! Proto Element Injectors
//!
//! The injector hierarchy is sparser than the element tree: only elements that carry
//! directives or declare variables get a `ProtoElementInjector`, and each one links
//! to its closest ancestor that has one.

use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::render::DirectiveMetadata;

/// Distance recorded when an injector has no parent injector.
pub const NO_PARENT_DISTANCE: i32 = -1;

/// A directive as seen by dependency injection.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveBinding {
    pub metadata: Arc<DirectiveMetadata>,
    /// Injection tokens of the directive's constructor dependencies.
    pub dependencies: Vec<String>,
}

impl DirectiveBinding {
    pub fn new(metadata: DirectiveMetadata) -> Self {
        DirectiveBinding {
            metadata: Arc::new(metadata),
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(metadata: DirectiveMetadata, dependencies: Vec<String>) -> Self {
        DirectiveBinding {
            metadata: Arc::new(metadata),
            dependencies,
        }
    }

    pub fn is_component(&self) -> bool {
        self.metadata.is_component()
    }
}

pub type DirectiveBindings = SmallVec<[DirectiveBinding; 4]>;

#[derive(Debug, Clone, PartialEq)]
pub struct ProtoElementInjector {
    pub parent: Option<Arc<ProtoElementInjector>>,
    /// Index of the element this injector belongs to.
    pub index: usize,
    pub directives: DirectiveBindings,
    /// Whether the first directive is a component.
    pub first_binding_is_component: bool,
    /// DOM distance to `parent`, or [`NO_PARENT_DISTANCE`].
    pub distance_to_parent: i32,
    /// An unqualified local variable on the element resolves to the component.
    pub export_component: bool,
    /// An unqualified local variable on the element resolves to the element.
    pub export_element: bool,
    /// Local name bound to `$implicit` on this element.
    pub export_implicit_name: Option<String>,
    pub attributes: IndexMap<String, String>,
}

impl ProtoElementInjector {
    pub fn new(
        parent: Option<Arc<ProtoElementInjector>>,
        index: usize,
        directives: DirectiveBindings,
        first_binding_is_component: bool,
        distance_to_parent: i32,
    ) -> Self {
        ProtoElementInjector {
            parent,
            index,
            directives,
            first_binding_is_component,
            distance_to_parent,
            export_component: false,
            export_element: false,
            export_implicit_name: None,
            attributes: IndexMap::new(),
        }
    }

    pub fn parent_index(&self) -> Option<usize> {
        self.parent.as_ref().map(|parent| parent.index)
    }

    pub fn directive_at(&self, slot: usize) -> Option<&DirectiveBinding> {
        self.directives.get(slot)
    }

    /// Number of injectors between this one and the root of the hierarchy.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.as_deref();
        while let Some(injector) = current {
            depth += 1;
            current = injector.parent.as_deref();
        }
        depth
    }
}
