//! Proto View Factory
//!
//! Compiles a tree of render proto views into a flat list of [`AppProtoView`]s.
//!
//! The pass runs in four steps over the same flattened view list:
//! 1. the tree is flattened in pre-order, so a view's parent always has a smaller
//!    index than the view itself;
//! 2. every view gets its variable bindings and the ordered list of local names
//!    visible to its expressions (the parent's names, then its own);
//! 3. binding and directive records are built per view and turned into change
//!    detector definitions;
//! 4. views are assembled in index order. Once a child view exists, the element
//!    hosting it in the parent view is pointed at the child's index.

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, instrument, trace, warn};

use crate::change_detection::{ChangeDetection, ChangeDetectorDefinition, ProtoChangeDetector};
use crate::config::{CompilerOptions, LEGACY_DIRECTIVE_SLOTS_PER_ELEMENT};
use crate::error::Result;
use crate::reflection::Reflector;
use crate::render::{self, DirectiveMetadata, ProtoViewDto, ViewType, IMPLICIT_EXPORT};

use super::binding_records::BindingRecordsCreator;
use super::element_injector::{
    DirectiveBinding, DirectiveBindings, ProtoElementInjector, NO_PARENT_DISTANCE,
};
use super::proto_view::{AppProtoView, ElementBinder};

/// A render proto view with its position in the flattened view list.
#[derive(Debug, Clone, Copy)]
pub struct RenderProtoViewWithIndex<'a> {
    pub render_proto_view: &'a ProtoViewDto,
    pub index: usize,
    pub parent_index: Option<usize>,
    /// Index of the element in the parent view that hosts this view.
    pub bound_element_index: Option<usize>,
}

/// Input of one component for batch compilation.
#[derive(Debug, Clone, Copy)]
pub struct ComponentTemplate<'a> {
    pub host_component: &'a DirectiveMetadata,
    pub root_proto_view: &'a ProtoViewDto,
    pub directives: &'a [DirectiveMetadata],
}

#[derive(Debug, Clone)]
struct ParentProtoElementInjectorWithDistance {
    proto_element_injector: Option<Arc<ProtoElementInjector>>,
    distance: i32,
}

pub struct ProtoViewFactory {
    change_detection: Arc<dyn ChangeDetection>,
    reflector: Arc<dyn Reflector>,
    options: CompilerOptions,
}

impl ProtoViewFactory {
    pub fn new(change_detection: Arc<dyn ChangeDetection>, reflector: Arc<dyn Reflector>) -> Self {
        ProtoViewFactory {
            change_detection,
            reflector,
            options: CompilerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Returns the data needed to create change detectors for the given proto view
    /// and all of its nested proto views, without assembling any view.
    #[instrument(skip_all, fields(host = %host_component_metadata.id))]
    pub fn get_change_detector_definitions(
        &self,
        host_component_metadata: &DirectiveMetadata,
        root_render_proto_view: &ProtoViewDto,
        all_render_directive_metadata: &[DirectiveMetadata],
    ) -> Result<Vec<ChangeDetectorDefinition>> {
        let nested_pvs_with_index = collect_nested_proto_views(root_render_proto_view);
        let nested_pv_variable_bindings =
            collect_nested_proto_views_variable_bindings(&nested_pvs_with_index);
        let nested_pv_variable_names = collect_nested_proto_views_variable_names(
            &nested_pvs_with_index,
            &nested_pv_variable_bindings,
        );

        self.build_change_detector_definitions(
            host_component_metadata,
            &nested_pvs_with_index,
            &nested_pv_variable_names,
            all_render_directive_metadata,
        )
    }

    /// Change detector definitions of many components, compiled in parallel. Each
    /// component is an independent compilation.
    pub fn get_change_detector_definitions_batch(
        &self,
        templates: &[ComponentTemplate<'_>],
    ) -> Result<Vec<Vec<ChangeDetectorDefinition>>> {
        debug!(components = templates.len(), "compiling change detector definitions");
        templates
            .par_iter()
            .map(|template| {
                self.get_change_detector_definitions(
                    template.host_component,
                    template.root_proto_view,
                    template.directives,
                )
            })
            .collect()
    }

    /// Compiles the proto view tree rooted at `root_render_proto_view`. The result is
    /// indexed like the flattened tree: the root is at index 0.
    #[instrument(skip_all, fields(host = %host_component_binding.metadata.id))]
    pub fn create_app_proto_views(
        &self,
        host_component_binding: &DirectiveBinding,
        root_render_proto_view: &ProtoViewDto,
        all_directives: &[DirectiveBinding],
    ) -> Result<Vec<AppProtoView>> {
        let all_render_directive_metadata: Vec<DirectiveMetadata> = all_directives
            .iter()
            .map(|binding| binding.metadata.as_ref().clone())
            .collect();
        let nested_pvs_with_index = collect_nested_proto_views(root_render_proto_view);
        let nested_pv_variable_bindings =
            collect_nested_proto_views_variable_bindings(&nested_pvs_with_index);
        let nested_pv_variable_names = collect_nested_proto_views_variable_names(
            &nested_pvs_with_index,
            &nested_pv_variable_bindings,
        );
        let change_detector_defs = self.build_change_detector_definitions(
            &host_component_binding.metadata,
            &nested_pvs_with_index,
            &nested_pv_variable_names,
            &all_render_directive_metadata,
        )?;
        let proto_change_detectors = change_detector_defs
            .iter()
            .map(|definition| self.change_detection.create_proto_change_detector(definition))
            .collect::<Result<Vec<_>>>()?;

        let mut app_proto_views: Vec<AppProtoView> = Vec::with_capacity(nested_pvs_with_index.len());
        for (pv_with_index, variable_bindings) in nested_pvs_with_index
            .iter()
            .zip(nested_pv_variable_bindings)
        {
            let app_proto_view = create_app_proto_view(
                pv_with_index,
                proto_change_detectors[pv_with_index.index].clone(),
                variable_bindings,
                all_directives,
            );
            app_proto_views.push(app_proto_view);
            if let (Some(parent_index), Some(bound_element_index)) =
                (pv_with_index.parent_index, pv_with_index.bound_element_index)
            {
                app_proto_views[parent_index]
                    .set_nested_proto_view(bound_element_index, pv_with_index.index);
            }
        }

        debug!(views = app_proto_views.len(), "created app proto views");
        Ok(app_proto_views)
    }

    fn build_change_detector_definitions(
        &self,
        host_component_metadata: &DirectiveMetadata,
        nested_pvs_with_index: &[RenderProtoViewWithIndex<'_>],
        nested_pv_variable_names: &[Vec<String>],
        all_render_directive_metadata: &[DirectiveMetadata],
    ) -> Result<Vec<ChangeDetectorDefinition>> {
        nested_pvs_with_index
            .iter()
            .map(|pv_with_index| -> Result<ChangeDetectorDefinition> {
                let element_binders = &pv_with_index.render_proto_view.element_binders;
                if self.options.warn_on_legacy_slot_overflow {
                    for element_index in elements_over_legacy_slot_limit(element_binders) {
                        warn!(
                            element_index,
                            directives = element_binders[element_index].directives.len(),
                            limit = LEGACY_DIRECTIVE_SLOTS_PER_ELEMENT,
                            "element exceeds the directive slots addressable by numeric directive keys"
                        );
                    }
                }

                let mut creator = BindingRecordsCreator::new(self.reflector.as_ref());
                let binding_records =
                    creator.get_binding_records(element_binders, all_render_directive_metadata)?;
                let directive_records =
                    creator.get_directive_records(element_binders, all_render_directive_metadata);

                let view_type = pv_with_index.render_proto_view.view_type;
                let strategy = match view_type {
                    ViewType::Component => host_component_metadata.change_detection,
                    ViewType::RootHost | ViewType::Embedded => {
                        self.options.default_change_detection
                    }
                };
                let id = format!(
                    "{}_{}_{}",
                    host_component_metadata.id,
                    view_type.detector_name(),
                    pv_with_index.index
                );
                debug!(
                    %id,
                    bindings = binding_records.len(),
                    directives = directive_records.len(),
                    "built change detector definition"
                );

                Ok(ChangeDetectorDefinition::new(
                    id,
                    strategy,
                    nested_pv_variable_names[pv_with_index.index].clone(),
                    binding_records,
                    directive_records,
                ))
            })
            .collect()
    }
}

/// Flattens the proto view tree in pre-order. Nested proto views of a view follow it
/// directly, in the order of their hosting elements.
///
/// The tree must be acyclic; the render layer never produces self-nesting views.
pub fn collect_nested_proto_views(root: &ProtoViewDto) -> Vec<RenderProtoViewWithIndex<'_>> {
    let mut result = Vec::new();
    collect_nested_proto_views_into(root, None, None, &mut result);
    result
}

fn collect_nested_proto_views_into<'a>(
    render_proto_view: &'a ProtoViewDto,
    parent_index: Option<usize>,
    bound_element_index: Option<usize>,
    result: &mut Vec<RenderProtoViewWithIndex<'a>>,
) {
    let current_index = result.len();
    result.push(RenderProtoViewWithIndex {
        render_proto_view,
        index: current_index,
        parent_index,
        bound_element_index,
    });
    for (child_bound_element_index, element_binder) in
        render_proto_view.element_binders.iter().enumerate()
    {
        if let Some(nested_proto_view) = element_binder.nested_proto_view.as_deref() {
            collect_nested_proto_views_into(
                nested_proto_view,
                Some(current_index),
                Some(child_bound_element_index),
                result,
            );
        }
    }
}

pub fn collect_nested_proto_views_variable_bindings(
    nested_pvs_with_index: &[RenderProtoViewWithIndex<'_>],
) -> Vec<IndexMap<String, String>> {
    nested_pvs_with_index
        .iter()
        .map(|pv_with_index| create_variable_bindings(pv_with_index.render_proto_view))
        .collect()
}

/// Merges the view's variable bindings with those of its elements. A source name
/// declared twice keeps its first position and takes the last local name.
pub fn create_variable_bindings(render_proto_view: &ProtoViewDto) -> IndexMap<String, String> {
    let mut variable_bindings = IndexMap::new();
    for (var_name, mapped_name) in &render_proto_view.variable_bindings {
        variable_bindings.insert(var_name.clone(), mapped_name.clone());
    }
    for binder in &render_proto_view.element_binders {
        for (var_name, mapped_name) in &binder.variable_bindings {
            variable_bindings.insert(var_name.clone(), mapped_name.clone());
        }
    }
    variable_bindings
}

pub fn collect_nested_proto_views_variable_names(
    nested_pvs_with_index: &[RenderProtoViewWithIndex<'_>],
    nested_pv_variable_bindings: &[IndexMap<String, String>],
) -> Vec<Vec<String>> {
    let mut nested_pv_variable_names: Vec<Vec<String>> =
        Vec::with_capacity(nested_pvs_with_index.len());
    for pv_with_index in nested_pvs_with_index {
        let parent_variable_names = pv_with_index
            .parent_index
            .map(|parent_index| nested_pv_variable_names[parent_index].as_slice());
        let variable_names = create_variable_names(
            parent_variable_names,
            &nested_pv_variable_bindings[pv_with_index.index],
        );
        nested_pv_variable_names.push(variable_names);
    }
    nested_pv_variable_names
}

pub fn create_variable_names(
    parent_variable_names: Option<&[String]>,
    variable_bindings: &IndexMap<String, String>,
) -> Vec<String> {
    let mut variable_names = parent_variable_names.map(<[String]>::to_vec).unwrap_or_default();
    variable_names.extend(variable_bindings.values().cloned());
    variable_names
}

/// Indices of elements carrying more directives than the legacy numeric directive
/// key can address.
pub(crate) fn elements_over_legacy_slot_limit(
    element_binders: &[render::ElementBinder],
) -> Vec<usize> {
    element_binders
        .iter()
        .enumerate()
        .filter(|(_, binder)| binder.directives.len() > LEGACY_DIRECTIVE_SLOTS_PER_ELEMENT)
        .map(|(element_index, _)| element_index)
        .collect()
}

fn create_app_proto_view(
    pv_with_index: &RenderProtoViewWithIndex<'_>,
    proto_change_detector: Arc<dyn ProtoChangeDetector>,
    variable_bindings: IndexMap<String, String>,
    all_directives: &[DirectiveBinding],
) -> AppProtoView {
    let render_proto_view = pv_with_index.render_proto_view;
    let element_binders = &render_proto_view.element_binders;
    let mut proto_view = AppProtoView::new(
        pv_with_index.index,
        render_proto_view.render,
        render_proto_view.view_type,
        proto_change_detector,
        variable_bindings,
    );

    create_element_binders(&mut proto_view, element_binders, all_directives);
    bind_events(&mut proto_view, element_binders);

    proto_view
}

fn create_element_binders(
    proto_view: &mut AppProtoView,
    element_binders: &[render::ElementBinder],
    all_directive_bindings: &[DirectiveBinding],
) {
    for (i, render_element_binder) in element_binders.iter().enumerate() {
        let parent_pei_with_distance = find_parent_proto_element_injector_with_distance(
            i,
            proto_view.element_binders(),
            element_binders,
        );
        let directive_bindings: DirectiveBindings = render_element_binder
            .directives
            .iter()
            .map(|dir| all_directive_bindings[dir.directive_index].clone())
            .collect();
        let component_directive_binding = directive_bindings
            .first()
            .filter(|binding| binding.is_component())
            .cloned();

        let proto_element_injector = create_proto_element_injector(
            i,
            parent_pei_with_distance,
            render_element_binder,
            component_directive_binding.is_some(),
            directive_bindings,
        );

        create_element_binder(
            proto_view,
            render_element_binder,
            proto_element_injector,
            component_directive_binding,
        );
    }
}

/// Walks up the render element tree, summing distances, until an element that
/// already has a compiled injector is found.
fn find_parent_proto_element_injector_with_distance(
    binder_index: usize,
    element_binders: &[ElementBinder],
    render_element_binders: &[render::ElementBinder],
) -> ParentProtoElementInjectorWithDistance {
    let mut distance = 0;
    let mut current = binder_index;
    while let Some(parent_index) = render_element_binders[current].parent_index {
        distance += render_element_binders[current].distance_to_parent;
        let parent_injector = element_binders
            .get(parent_index)
            .and_then(|binder| binder.proto_element_injector.as_ref());
        if let Some(injector) = parent_injector {
            return ParentProtoElementInjectorWithDistance {
                proto_element_injector: Some(injector.clone()),
                distance: distance as i32,
            };
        }
        current = parent_index;
    }
    ParentProtoElementInjectorWithDistance {
        proto_element_injector: None,
        distance: NO_PARENT_DISTANCE,
    }
}

fn create_proto_element_injector(
    binder_index: usize,
    parent_pei_with_distance: ParentProtoElementInjectorWithDistance,
    render_element_binder: &render::ElementBinder,
    has_component: bool,
    directive_bindings: DirectiveBindings,
) -> Option<Arc<ProtoElementInjector>> {
    // Elements with variables need an injector even without directives, so that
    // hydration has a place to resolve `$implicit` to the element.
    let has_variables = !render_element_binder.variable_bindings.is_empty();
    if directive_bindings.is_empty() && !has_variables {
        return None;
    }

    trace!(
        element = binder_index,
        parent = ?parent_pei_with_distance.proto_element_injector.as_ref().map(|p| p.index),
        distance = parent_pei_with_distance.distance,
        "linking element injector"
    );
    let mut proto_element_injector = ProtoElementInjector::new(
        parent_pei_with_distance.proto_element_injector,
        binder_index,
        directive_bindings,
        has_component,
        parent_pei_with_distance.distance,
    );
    proto_element_injector.attributes = render_element_binder.read_attributes.clone();
    if has_variables {
        proto_element_injector.export_component = has_component;
        proto_element_injector.export_element = !has_component;
        if let Some(export_implicit_name) = render_element_binder.variable_bindings.get(IMPLICIT_EXPORT) {
            proto_element_injector.export_implicit_name = Some(export_implicit_name.clone());
        }
    }
    Some(Arc::new(proto_element_injector))
}

fn create_element_binder(
    proto_view: &mut AppProtoView,
    render_element_binder: &render::ElementBinder,
    proto_element_injector: Option<Arc<ProtoElementInjector>>,
    component_directive_binding: Option<DirectiveBinding>,
) {
    proto_view.bind_element(
        render_element_binder.parent_index,
        render_element_binder.distance_to_parent,
        proto_element_injector,
        component_directive_binding,
    );
    // Locals cannot gain names after construction, so element variables that
    // only resolve to the element itself are added up front.
    for mapped_name in render_element_binder.variable_bindings.values() {
        proto_view.add_local(mapped_name);
    }
}

fn bind_events(proto_view: &mut AppProtoView, element_binders: &[render::ElementBinder]) {
    for (bound_element_index, element_binder) in element_binders.iter().enumerate() {
        proto_view.bind_event(&element_binder.event_bindings, bound_element_index, None);
        for (i, directive_binder) in element_binder.directives.iter().enumerate() {
            proto_view.bind_event(&directive_binder.event_bindings, bound_element_index, Some(i));
        }
    }
}
