//! Render API
//!
//! The data the render layer hands to the view compiler: a tree of proto views with
//! per-element binding metadata, plus the directive catalog the binders index into.
//! Everything here is immutable input.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::ChangeDetectionStrategy;
use crate::expression_parser::ASTWithSource;

/// Key under which an element or view exposes its default export.
pub const IMPLICIT_EXPORT: &str = "$implicit";

/// Opaque handle to the render-side proto view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderProtoViewRef(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewType {
    /// The view that hosts the root component of a compilation.
    RootHost,
    /// The template of a component.
    Component,
    /// A view declared inline through a `<template>` element.
    Embedded,
}

impl ViewType {
    /// Name used in change detector ids.
    pub fn detector_name(&self) -> &'static str {
        match self {
            ViewType::RootHost => "host",
            ViewType::Component => "comp",
            ViewType::Embedded => "embedded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtoViewDto {
    #[serde(default)]
    pub render: RenderProtoViewRef,
    #[serde(rename = "type")]
    pub view_type: ViewType,
    #[serde(default)]
    pub element_binders: Vec<ElementBinder>,
    /// Source name (e.g. `$implicit`, `index`) to the local name it is exposed as.
    #[serde(default)]
    pub variable_bindings: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBinder {
    pub index: usize,
    /// Index of the closest bound ancestor element in the same view.
    #[serde(default)]
    pub parent_index: Option<usize>,
    /// Number of DOM levels between this element and its bound parent.
    #[serde(default)]
    pub distance_to_parent: usize,
    #[serde(default)]
    pub directives: Vec<DirectiveBinder>,
    #[serde(default)]
    pub nested_proto_view: Option<Box<ProtoViewDto>>,
    #[serde(default)]
    pub property_bindings: IndexMap<String, ASTWithSource>,
    #[serde(default)]
    pub variable_bindings: IndexMap<String, String>,
    #[serde(default)]
    pub event_bindings: Vec<EventBinding>,
    #[serde(default)]
    pub text_bindings: Vec<ASTWithSource>,
    /// Static attribute values requested by directives on this element.
    #[serde(default)]
    pub read_attributes: IndexMap<String, String>,
}

impl ElementBinder {
    pub fn new(index: usize, parent_index: Option<usize>, distance_to_parent: usize) -> Self {
        ElementBinder {
            index,
            parent_index,
            distance_to_parent,
            directives: Vec::new(),
            nested_proto_view: None,
            property_bindings: IndexMap::new(),
            variable_bindings: IndexMap::new(),
            event_bindings: Vec::new(),
            text_bindings: Vec::new(),
            read_attributes: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveBinder {
    /// Index into the directive catalog of the compilation.
    pub directive_index: usize,
    #[serde(default)]
    pub property_bindings: IndexMap<String, ASTWithSource>,
    #[serde(default)]
    pub host_property_bindings: IndexMap<String, ASTWithSource>,
    #[serde(default)]
    pub event_bindings: Vec<EventBinding>,
}

impl DirectiveBinder {
    pub fn new(directive_index: usize) -> Self {
        DirectiveBinder {
            directive_index,
            property_bindings: IndexMap::new(),
            host_property_bindings: IndexMap::new(),
            event_bindings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBinding {
    /// Event name including its target prefix, e.g. `window:resize`.
    pub full_name: String,
    pub source: ASTWithSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectiveKind {
    Component,
    Directive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveMetadata {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DirectiveKind,
    #[serde(default)]
    pub change_detection: ChangeDetectionStrategy,
    #[serde(default)]
    pub call_on_change: bool,
    #[serde(default)]
    pub call_on_all_changes_done: bool,
}

impl DirectiveMetadata {
    pub fn new(id: impl Into<String>, kind: DirectiveKind) -> Self {
        DirectiveMetadata {
            id: id.into(),
            kind,
            change_detection: ChangeDetectionStrategy::Default,
            call_on_change: false,
            call_on_all_changes_done: false,
        }
    }

    pub fn is_component(&self) -> bool {
        self.kind == DirectiveKind::Component
    }
}
