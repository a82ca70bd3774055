//! Render Proto View Fixtures for Tests
//!
//! Builders for render proto view trees and a factory wired to test collaborators.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use angular_view_compiler::change_detection::DynamicChangeDetection;
use angular_view_compiler::error::Result;
use angular_view_compiler::expression_parser::{
    ASTWithSource, ImplicitReceiver, ParseSpan, PropertyRead, AST,
};
use angular_view_compiler::reflection::{Reflector, Setter, SetterFn};
use angular_view_compiler::render::{
    DirectiveBinder, DirectiveKind, DirectiveMetadata, ElementBinder, EventBinding, ProtoViewDto,
    RenderProtoViewRef, ViewType,
};
use angular_view_compiler::view::{DirectiveBinding, ProtoViewFactory};
use indexmap::IndexMap;

/// A reflector that hands out a no-op setter for any property.
pub struct AnyPropertyReflector;

impl Reflector for AnyPropertyReflector {
    fn setter(&self, property: &str) -> Result<Setter> {
        let func: SetterFn = Arc::new(|_: &mut dyn Any, _: Box<dyn Any>| {});
        Ok(Setter::new(property, func))
    }
}

pub fn factory() -> ProtoViewFactory {
    ProtoViewFactory::new(Arc::new(DynamicChangeDetection), Arc::new(AnyPropertyReflector))
}

/// `name` read from the implicit receiver, with `name` as its source.
pub fn ast(name: &str) -> ASTWithSource {
    let read = AST::PropertyRead(PropertyRead {
        span: ParseSpan::new(0, name.len()),
        receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {
            span: ParseSpan::new(0, 0),
        })),
        name: name.to_string(),
    });
    ASTWithSource::new(read, Some(name.to_string()), "TestCmp".to_string(), 0)
}

pub fn proto_view(view_type: ViewType, element_binders: Vec<ElementBinder>) -> ProtoViewDto {
    ProtoViewDto {
        render: RenderProtoViewRef(0),
        view_type,
        element_binders,
        variable_bindings: IndexMap::new(),
    }
}

pub fn element(index: usize) -> ElementBinder {
    ElementBinder::new(index, None, 0)
}

pub fn child_element(index: usize, parent_index: usize, distance_to_parent: usize) -> ElementBinder {
    ElementBinder::new(index, Some(parent_index), distance_to_parent)
}

pub fn with_nested(mut binder: ElementBinder, nested: ProtoViewDto) -> ElementBinder {
    binder.nested_proto_view = Some(Box::new(nested));
    binder
}

pub fn with_variable(mut binder: ElementBinder, source: &str, local: &str) -> ElementBinder {
    binder
        .variable_bindings
        .insert(source.to_string(), local.to_string());
    binder
}

pub fn with_directive(mut binder: ElementBinder, directive: DirectiveBinder) -> ElementBinder {
    binder.directives.push(directive);
    binder
}

pub fn with_property(mut binder: ElementBinder, property: &str, expression: &str) -> ElementBinder {
    binder
        .property_bindings
        .insert(property.to_string(), ast(expression));
    binder
}

pub fn with_text(mut binder: ElementBinder, expression: &str) -> ElementBinder {
    binder.text_bindings.push(ast(expression));
    binder
}

pub fn event(full_name: &str, handler: &str) -> EventBinding {
    EventBinding {
        full_name: full_name.to_string(),
        source: ast(handler),
    }
}

pub fn directive(directive_index: usize) -> DirectiveBinder {
    DirectiveBinder::new(directive_index)
}

pub fn directive_with_input(directive_index: usize, property: &str, expression: &str) -> DirectiveBinder {
    let mut binder = DirectiveBinder::new(directive_index);
    binder
        .property_bindings
        .insert(property.to_string(), ast(expression));
    binder
}

pub fn with_host_property(
    mut binder: DirectiveBinder,
    property: &str,
    expression: &str,
) -> DirectiveBinder {
    binder
        .host_property_bindings
        .insert(property.to_string(), ast(expression));
    binder
}

pub fn component_metadata(id: &str) -> DirectiveMetadata {
    DirectiveMetadata::new(id, DirectiveKind::Component)
}

pub fn directive_metadata(id: &str) -> DirectiveMetadata {
    DirectiveMetadata::new(id, DirectiveKind::Directive)
}

pub fn bindings(metadata: &[DirectiveMetadata]) -> Vec<DirectiveBinding> {
    metadata.iter().cloned().map(DirectiveBinding::new).collect()
}

/// Catalog used by most tests: a component at 0 and plain directives at 1 and 2.
pub fn default_catalog() -> Vec<DirectiveMetadata> {
    vec![
        component_metadata("SomeComp"),
        directive_metadata("SomeDir"),
        directive_metadata("OtherDir"),
    ]
}
