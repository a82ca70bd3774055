//! App Proto Views
//!
//! The compiled form of a view: element binders linked into the injector hierarchy,
//! the proto change detector, the scope template for local variables and the host
//! listeners of each element.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::change_detection::ProtoChangeDetector;
use crate::expression_parser::ASTWithSource;
use crate::render::{EventBinding, RenderProtoViewRef, ViewType};

use super::element_injector::{DirectiveBinding, ProtoElementInjector};

/// Who handles an event bound on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// Bound in the template on the element itself.
    Element,
    /// Declared by the directive in the given slot of the element.
    Directive(usize),
}

pub type HostListeners = IndexMap<String, IndexMap<EventTarget, ASTWithSource>>;

#[derive(Debug, Clone, PartialEq)]
pub struct ElementBinder {
    pub index: usize,
    /// Index of the compiled parent element binder in the same view.
    pub parent_index: Option<usize>,
    pub distance_to_parent: usize,
    pub proto_element_injector: Option<Arc<ProtoElementInjector>>,
    pub component_directive: Option<DirectiveBinding>,
    /// Index of the view hosted by this element, in the compilation's view list.
    pub nested_proto_view: Option<usize>,
    /// Event name to handler, per handling directive slot or the element itself.
    pub host_listeners: HostListeners,
}

impl ElementBinder {
    pub fn has_static_component(&self) -> bool {
        self.component_directive.is_some() && self.nested_proto_view.is_some()
    }

    pub fn has_embedded_proto_view(&self) -> bool {
        self.component_directive.is_none() && self.nested_proto_view.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct AppProtoView {
    pub index: usize,
    pub render: RenderProtoViewRef,
    pub view_type: ViewType,
    /// Source name to local name, merged from the view and its elements.
    pub variable_bindings: IndexMap<String, String>,
    proto_change_detector: Arc<dyn ProtoChangeDetector>,
    proto_locals: IndexSet<String>,
    element_binders: Vec<ElementBinder>,
}

impl AppProtoView {
    pub fn new(
        index: usize,
        render: RenderProtoViewRef,
        view_type: ViewType,
        proto_change_detector: Arc<dyn ProtoChangeDetector>,
        variable_bindings: IndexMap<String, String>,
    ) -> Self {
        let proto_locals = variable_bindings.values().cloned().collect();
        AppProtoView {
            index,
            render,
            view_type,
            variable_bindings,
            proto_change_detector,
            proto_locals,
            element_binders: Vec::new(),
        }
    }

    pub fn element_binders(&self) -> &[ElementBinder] {
        &self.element_binders
    }

    pub fn element_binder(&self, index: usize) -> Option<&ElementBinder> {
        self.element_binders.get(index)
    }

    pub fn proto_change_detector(&self) -> &Arc<dyn ProtoChangeDetector> {
        &self.proto_change_detector
    }

    /// Every local name a view instance will hold. Locals are created with all of
    /// these unset; no other name can be added later.
    pub fn proto_locals(&self) -> &IndexSet<String> {
        &self.proto_locals
    }

    pub fn bind_element(
        &mut self,
        parent_index: Option<usize>,
        distance_to_parent: usize,
        proto_element_injector: Option<Arc<ProtoElementInjector>>,
        component_directive: Option<DirectiveBinding>,
    ) -> &ElementBinder {
        let index = self.element_binders.len();
        self.element_binders.push(ElementBinder {
            index,
            parent_index,
            distance_to_parent,
            proto_element_injector,
            component_directive,
            nested_proto_view: None,
            host_listeners: IndexMap::new(),
        });
        &self.element_binders[index]
    }

    pub(crate) fn add_local(&mut self, name: &str) {
        self.proto_locals.insert(name.to_string());
    }

    /// Registers handlers for `events` on an element; `directive_index` is the slot
    /// of the declaring directive, or `None` for template event bindings.
    pub fn bind_event(
        &mut self,
        events: &[EventBinding],
        element_index: usize,
        directive_index: Option<usize>,
    ) {
        let target = match directive_index {
            Some(slot) => EventTarget::Directive(slot),
            None => EventTarget::Element,
        };
        let binder = &mut self.element_binders[element_index];
        for event in events {
            binder
                .host_listeners
                .entry(event.full_name.clone())
                .or_default()
                .insert(target, event.source.clone());
        }
    }

    pub(crate) fn set_nested_proto_view(&mut self, element_index: usize, view_index: usize) {
        self.element_binders[element_index].nested_proto_view = Some(view_index);
    }
}

/// Proto change detectors are compared by id; the id identifies the template
/// shape the detector was generated for.
impl PartialEq for AppProtoView {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.render == other.render
            && self.view_type == other.view_type
            && self.variable_bindings == other.variable_bindings
            && self.proto_change_detector.id() == other.proto_change_detector.id()
            && self.proto_locals == other.proto_locals
            && self.element_binders == other.element_binders
    }
}
