//! Change Detector Definitions
//!
//! The interface to the change detection collaborator: a definition describing one
//! view's bindings, and the factory turning definitions into proto change detectors.

use std::fmt;
use std::sync::Arc;

use crate::core::ChangeDetectionStrategy;
use crate::error::Result;

use super::binding_record::BindingRecord;
use super::directive_record::DirectiveRecord;

/// Everything change detection needs to build the detector of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeDetectorDefinition {
    /// `{host component id}_{comp|host|embedded}_{view index}`; stable for a given
    /// template so generated detectors can be cached.
    pub id: String,
    pub strategy: ChangeDetectionStrategy,
    /// Local variable slots of the view: inherited names first, then its own.
    pub variable_names: Vec<String>,
    pub binding_records: Vec<BindingRecord>,
    pub directive_records: Vec<Arc<DirectiveRecord>>,
}

impl ChangeDetectorDefinition {
    pub fn new(
        id: String,
        strategy: ChangeDetectionStrategy,
        variable_names: Vec<String>,
        binding_records: Vec<BindingRecord>,
        directive_records: Vec<Arc<DirectiveRecord>>,
    ) -> Self {
        ChangeDetectorDefinition {
            id,
            strategy,
            variable_names,
            binding_records,
            directive_records,
        }
    }
}

/// Compiled, instantiable form of a change detector.
pub trait ProtoChangeDetector: fmt::Debug + Send + Sync {
    fn id(&self) -> &str;
}

pub trait ChangeDetection: Send + Sync {
    fn create_proto_change_detector(
        &self,
        definition: &ChangeDetectorDefinition,
    ) -> Result<Arc<dyn ProtoChangeDetector>>;
}

/// A proto change detector that keeps its definition and leaves interpretation of
/// the records to the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicProtoChangeDetector {
    definition: ChangeDetectorDefinition,
}

impl DynamicProtoChangeDetector {
    pub fn new(definition: ChangeDetectorDefinition) -> Self {
        DynamicProtoChangeDetector { definition }
    }

    pub fn definition(&self) -> &ChangeDetectorDefinition {
        &self.definition
    }
}

impl ProtoChangeDetector for DynamicProtoChangeDetector {
    fn id(&self) -> &str {
        &self.definition.id
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicChangeDetection;

impl ChangeDetection for DynamicChangeDetection {
    fn create_proto_change_detector(
        &self,
        definition: &ChangeDetectorDefinition,
    ) -> Result<Arc<dyn ProtoChangeDetector>> {
        Ok(Arc::new(DynamicProtoChangeDetector::new(definition.clone())))
    }
}
