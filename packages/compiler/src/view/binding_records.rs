//! Binding Record Creation
//!
//! Builds the binding and directive records of a single view. A creator must not be
//! reused across views: text node indices and the directive record cache are both
//! scoped to one view.

use std::collections::HashMap;
use std::sync::Arc;

use crate::change_detection::{BindingRecord, DirectiveIndex, DirectiveRecord};
use crate::error::Result;
use crate::reflection::Reflector;
use crate::render::{DirectiveBinder, DirectiveMetadata, ElementBinder};

pub struct BindingRecordsCreator<'a> {
    reflector: &'a dyn Reflector,
    directive_records: HashMap<DirectiveIndex, Arc<DirectiveRecord>>,
    text_node_index: usize,
}

impl<'a> BindingRecordsCreator<'a> {
    pub fn new(reflector: &'a dyn Reflector) -> Self {
        BindingRecordsCreator {
            reflector,
            directive_records: HashMap::new(),
            text_node_index: 0,
        }
    }

    /// Binding records of all element binders, per element: text nodes, element
    /// properties, then directive inputs and host properties slot by slot.
    pub fn get_binding_records(
        &mut self,
        element_binders: &[ElementBinder],
        all_directive_metadatas: &[DirectiveMetadata],
    ) -> Result<Vec<BindingRecord>> {
        let mut bindings = Vec::new();
        for (bound_element_index, element_binder) in element_binders.iter().enumerate() {
            self.create_text_node_records(element_binder, &mut bindings);
            create_element_property_records(bound_element_index, element_binder, &mut bindings);
            self.create_directive_records(
                bound_element_index,
                &element_binder.directives,
                all_directive_metadatas,
                &mut bindings,
            )?;
        }
        Ok(bindings)
    }

    /// One directive record per directive slot of every element, in document order.
    pub fn get_directive_records(
        &mut self,
        element_binders: &[ElementBinder],
        all_directive_metadatas: &[DirectiveMetadata],
    ) -> Vec<Arc<DirectiveRecord>> {
        let mut records = Vec::new();
        for (element_index, element_binder) in element_binders.iter().enumerate() {
            for (slot, directive) in element_binder.directives.iter().enumerate() {
                let metadata = &all_directive_metadatas[directive.directive_index];
                records.push(self.get_directive_record(element_index, slot, metadata));
            }
        }
        records
    }

    fn create_text_node_records(&mut self, element_binder: &ElementBinder, out: &mut Vec<BindingRecord>) {
        for text_binding in &element_binder.text_bindings {
            out.push(BindingRecord::create_for_text_node(
                text_binding.clone(),
                self.text_node_index,
            ));
            self.text_node_index += 1;
        }
    }

    fn create_directive_records(
        &mut self,
        bound_element_index: usize,
        directive_binders: &[DirectiveBinder],
        all_directive_metadatas: &[DirectiveMetadata],
        out: &mut Vec<BindingRecord>,
    ) -> Result<()> {
        for (slot, directive_binder) in directive_binders.iter().enumerate() {
            let metadata = &all_directive_metadatas[directive_binder.directive_index];

            for (property_name, ast) in &directive_binder.property_bindings {
                let setter = self.reflector.setter(property_name)?;
                let directive_record = self.get_directive_record(bound_element_index, slot, metadata);
                out.push(BindingRecord::create_for_directive(
                    ast.clone(),
                    property_name,
                    setter,
                    directive_record,
                ));
            }

            for (property_name, ast) in &directive_binder.host_property_bindings {
                let directive_record = self.get_directive_record(bound_element_index, slot, metadata);
                out.push(BindingRecord::create_for_host_property(
                    directive_record,
                    ast.clone(),
                    property_name,
                ));
            }
        }
        Ok(())
    }

    fn get_directive_record(
        &mut self,
        bound_element_index: usize,
        directive_index: usize,
        metadata: &DirectiveMetadata,
    ) -> Arc<DirectiveRecord> {
        let key = DirectiveIndex::new(bound_element_index, directive_index);
        self.directive_records
            .entry(key)
            .or_insert_with(|| {
                Arc::new(DirectiveRecord::new(
                    key,
                    metadata.call_on_all_changes_done,
                    metadata.call_on_change,
                    metadata.change_detection,
                ))
            })
            .clone()
    }

    /// Number of distinct directive records created so far.
    pub fn cached_directive_records(&self) -> usize {
        self.directive_records.len()
    }
}

fn create_element_property_records(
    bound_element_index: usize,
    element_binder: &ElementBinder,
    out: &mut Vec<BindingRecord>,
) {
    for (property_name, ast) in &element_binder.property_bindings {
        out.push(BindingRecord::create_for_element(
            ast.clone(),
            bound_element_index,
            property_name,
        ));
    }
}
