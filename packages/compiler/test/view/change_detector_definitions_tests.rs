//! Change Detector Definition Tests
//!
//! Ids, strategies and variable names of the definitions produced per view, on their
//! own and in batch.

use std::sync::Arc;

use angular_view_compiler::change_detection::DynamicChangeDetection;
use angular_view_compiler::core::ChangeDetectionStrategy;
use angular_view_compiler::error::CompilerError;
use angular_view_compiler::reflection::SetterRegistry;
use angular_view_compiler::render::{ProtoViewDto, ViewType};
use angular_view_compiler::view::{ComponentTemplate, ProtoViewFactory};
use angular_view_compiler::CompilerOptions;

#[path = "util.rs"]
mod view_util;
use view_util::*;

/// Host view with the component at element 0, its component view, and an
/// embedded view under the component view's first element.
fn component_tree() -> ProtoViewDto {
    let mut embedded = proto_view(
        ViewType::Embedded,
        vec![with_text(element(0), "item.name")],
    );
    embedded
        .variable_bindings
        .insert("$implicit".to_string(), "item".to_string());
    let component_view = proto_view(
        ViewType::Component,
        vec![
            with_nested(with_variable(element(0), "$implicit", "list"), embedded),
            with_directive(element(1), directive_with_input(1, "value", "title")),
        ],
    );
    proto_view(
        ViewType::RootHost,
        vec![with_nested(with_directive(element(0), directive(0)), component_view)],
    )
}

#[test]
fn should_name_definitions_after_host_and_view_type() {
    let catalog = default_catalog();
    let definitions = factory()
        .get_change_detector_definitions(&catalog[0], &component_tree(), &catalog)
        .unwrap();

    let ids: Vec<&str> = definitions.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["SomeComp_host_0", "SomeComp_comp_1", "SomeComp_embedded_2"]
    );
}

#[test]
fn should_use_host_strategy_only_for_component_views() {
    let mut catalog = default_catalog();
    catalog[0].change_detection = ChangeDetectionStrategy::OnPush;

    let definitions = factory()
        .get_change_detector_definitions(&catalog[0], &component_tree(), &catalog)
        .unwrap();
    let strategies: Vec<ChangeDetectionStrategy> =
        definitions.iter().map(|d| d.strategy).collect();
    assert_eq!(
        strategies,
        vec![
            ChangeDetectionStrategy::Default,
            ChangeDetectionStrategy::OnPush,
            ChangeDetectionStrategy::Default
        ]
    );

    let options = CompilerOptions {
        default_change_detection: ChangeDetectionStrategy::CheckAlways,
        ..CompilerOptions::default()
    };
    let definitions = factory()
        .with_options(options)
        .get_change_detector_definitions(&catalog[0], &component_tree(), &catalog)
        .unwrap();
    let strategies: Vec<ChangeDetectionStrategy> =
        definitions.iter().map(|d| d.strategy).collect();
    assert_eq!(
        strategies,
        vec![
            ChangeDetectionStrategy::CheckAlways,
            ChangeDetectionStrategy::OnPush,
            ChangeDetectionStrategy::CheckAlways
        ]
    );
}

#[test]
fn should_prefix_inherited_variable_names() {
    let catalog = default_catalog();
    let definitions = factory()
        .get_change_detector_definitions(&catalog[0], &component_tree(), &catalog)
        .unwrap();

    assert!(definitions[0].variable_names.is_empty());
    assert_eq!(definitions[1].variable_names, vec!["list"]);
    assert_eq!(definitions[2].variable_names, vec!["list", "item"]);
}

#[test]
fn should_carry_records_of_each_view() {
    let catalog = default_catalog();
    let definitions = factory()
        .get_change_detector_definitions(&catalog[0], &component_tree(), &catalog)
        .unwrap();

    // Host view: the component slot has no bindings but still gets a record.
    assert!(definitions[0].binding_records.is_empty());
    assert_eq!(definitions[0].directive_records.len(), 1);
    // Component view: one directive input.
    assert_eq!(definitions[1].binding_records.len(), 1);
    assert!(definitions[1].binding_records[0].is_directive());
    assert_eq!(definitions[1].directive_records.len(), 1);
    // Embedded view: one text binding.
    assert_eq!(definitions[2].binding_records.len(), 1);
    assert!(definitions[2].binding_records[0].is_text_node());
    assert!(definitions[2].directive_records.is_empty());
}

#[test]
fn should_match_definitions_of_assembled_views() {
    let catalog = default_catalog();
    let root = component_tree();
    let definitions = factory()
        .get_change_detector_definitions(&catalog[0], &root, &catalog)
        .unwrap();
    let views = factory()
        .create_app_proto_views(&bindings(&catalog)[0], &root, &bindings(&catalog))
        .unwrap();

    assert_eq!(definitions.len(), views.len());
    for (definition, view) in definitions.iter().zip(&views) {
        assert_eq!(definition.id, view.proto_change_detector().id());
    }
}

#[test]
fn should_compile_batch_like_individual_components() {
    let catalog = default_catalog();
    let mut other_catalog = default_catalog();
    other_catalog[0] = component_metadata("OtherComp");
    let first = component_tree();
    let second = proto_view(
        ViewType::Component,
        vec![with_text(element(0), "label")],
    );

    let templates = vec![
        ComponentTemplate {
            host_component: &catalog[0],
            root_proto_view: &first,
            directives: &catalog,
        },
        ComponentTemplate {
            host_component: &other_catalog[0],
            root_proto_view: &second,
            directives: &other_catalog,
        },
    ];
    let factory = factory();
    let batch = factory
        .get_change_detector_definitions_batch(&templates)
        .unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(
        batch[0],
        factory
            .get_change_detector_definitions(&catalog[0], &first, &catalog)
            .unwrap()
    );
    assert_eq!(batch[1].len(), 1);
    assert_eq!(batch[1][0].id, "OtherComp_comp_0");
}

#[test]
fn should_fail_batch_when_any_component_fails() {
    let catalog = default_catalog();
    let good = proto_view(ViewType::Component, vec![with_text(element(0), "label")]);
    let bad = proto_view(
        ViewType::Component,
        vec![with_directive(element(0), directive_with_input(1, "value", "model"))],
    );
    let templates = vec![
        ComponentTemplate {
            host_component: &catalog[0],
            root_proto_view: &good,
            directives: &catalog,
        },
        ComponentTemplate {
            host_component: &catalog[0],
            root_proto_view: &bad,
            directives: &catalog,
        },
    ];
    let factory = ProtoViewFactory::new(
        Arc::new(DynamicChangeDetection),
        Arc::new(SetterRegistry::new()),
    );

    let err = factory
        .get_change_detector_definitions_batch(&templates)
        .unwrap_err();
    match err {
        CompilerError::MissingSetter { property } => assert_eq!(property, "value"),
        other => panic!("expected a missing setter error, got {}", other),
    }
}

#[test]
fn should_compile_empty_batch() {
    let batch = factory().get_change_detector_definitions_batch(&[]).unwrap();
    assert!(batch.is_empty());
}
