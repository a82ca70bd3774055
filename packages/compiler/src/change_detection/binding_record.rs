//! Binding Records
//!
//! One compiled reactive expression and the place its value is written to.

use std::sync::Arc;

use crate::expression_parser::ASTWithSource;
use crate::reflection::Setter;

use super::directive_record::{DirectiveIndex, DirectiveRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum BindingTarget {
    /// A text interpolation; `index` counts text bindings across the whole view.
    TextNode { index: usize },
    ElementProperty {
        element_index: usize,
        property_name: String,
    },
    /// A directive input, written through `setter`.
    Directive {
        directive_record: Arc<DirectiveRecord>,
        property_name: String,
        setter: Setter,
    },
    /// A property of the host element bound by a directive.
    HostProperty {
        directive_record: Arc<DirectiveRecord>,
        property_name: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindingRecord {
    pub ast: ASTWithSource,
    pub target: BindingTarget,
}

impl BindingRecord {
    pub fn create_for_text_node(ast: ASTWithSource, index: usize) -> Self {
        BindingRecord {
            ast,
            target: BindingTarget::TextNode { index },
        }
    }

    pub fn create_for_element(ast: ASTWithSource, element_index: usize, property_name: &str) -> Self {
        BindingRecord {
            ast,
            target: BindingTarget::ElementProperty {
                element_index,
                property_name: property_name.to_string(),
            },
        }
    }

    pub fn create_for_directive(
        ast: ASTWithSource,
        property_name: &str,
        setter: Setter,
        directive_record: Arc<DirectiveRecord>,
    ) -> Self {
        BindingRecord {
            ast,
            target: BindingTarget::Directive {
                directive_record,
                property_name: property_name.to_string(),
                setter,
            },
        }
    }

    pub fn create_for_host_property(
        directive_record: Arc<DirectiveRecord>,
        ast: ASTWithSource,
        property_name: &str,
    ) -> Self {
        BindingRecord {
            ast,
            target: BindingTarget::HostProperty {
                directive_record,
                property_name: property_name.to_string(),
            },
        }
    }

    pub fn is_text_node(&self) -> bool {
        matches!(self.target, BindingTarget::TextNode { .. })
    }

    pub fn is_element(&self) -> bool {
        matches!(self.target, BindingTarget::ElementProperty { .. })
    }

    pub fn is_directive(&self) -> bool {
        matches!(self.target, BindingTarget::Directive { .. })
    }

    pub fn is_host_property(&self) -> bool {
        matches!(self.target, BindingTarget::HostProperty { .. })
    }

    /// Index of the bound element; `None` for text nodes.
    pub fn element_index(&self) -> Option<usize> {
        match &self.target {
            BindingTarget::TextNode { .. } => None,
            BindingTarget::ElementProperty { element_index, .. } => Some(*element_index),
            BindingTarget::Directive {
                directive_record, ..
            }
            | BindingTarget::HostProperty {
                directive_record, ..
            } => Some(directive_record.directive_index.element_index),
        }
    }

    pub fn property_name(&self) -> Option<&str> {
        match &self.target {
            BindingTarget::TextNode { .. } => None,
            BindingTarget::ElementProperty { property_name, .. }
            | BindingTarget::Directive { property_name, .. }
            | BindingTarget::HostProperty { property_name, .. } => Some(property_name),
        }
    }

    pub fn directive_record(&self) -> Option<&Arc<DirectiveRecord>> {
        match &self.target {
            BindingTarget::Directive {
                directive_record, ..
            }
            | BindingTarget::HostProperty {
                directive_record, ..
            } => Some(directive_record),
            _ => None,
        }
    }

    pub fn directive_index(&self) -> Option<DirectiveIndex> {
        self.directive_record().map(|record| record.directive_index)
    }

    pub fn source(&self) -> String {
        self.ast.source_text()
    }
}
