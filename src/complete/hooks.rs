//! Extensibility hooks
//!
//! Hosts plug in dynamic value suggestions (database lookups, lists of known
//! ids, ...) that depend on where in the document the caret is. A hook sees
//! the open shadow element, the chain of open elements with their effective
//! types, and the schema. It pushes candidates; the engine prefix-filters
//! them and turns them into suggestions.

use super::suggestion::Annotation;
use crate::dom::ElementRef;
use crate::schema::{AttributeDecl, SchemaSet, TypeId};

/// One open element on the path from the root to the caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ancestor<'c> {
    /// Effective type of the element
    pub type_id: TypeId,
    /// Declared element name
    pub name: &'c str,
}

/// A value proposed by a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub annotation: Annotation,
}

impl Candidate {
    /// Candidate with no annotation
    pub fn new(value: impl Into<String>) -> Self {
        Candidate {
            value: value.into(),
            annotation: Annotation::default(),
        }
    }

    /// Attach display metadata
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }
}

/// Context for completing an element's text content
#[derive(Debug, Clone, Copy)]
pub struct ValueContext<'c, 'a> {
    /// The element whose text is being typed
    pub element: ElementRef<'c, 'a>,
    /// Open elements, outermost first; the last entry is `element`
    pub ancestors: &'c [Ancestor<'c>],
    pub schema: &'c SchemaSet,
}

impl<'c, 'a> ValueContext<'c, 'a> {
    /// Effective type of the element being completed
    pub fn type_id(&self) -> Option<TypeId> {
        self.ancestors.last().map(|a| a.type_id)
    }
}

/// Context for completing an attribute value
#[derive(Debug, Clone, Copy)]
pub struct AttributeValueContext<'c, 'a> {
    /// The element carrying the attribute
    pub element: ElementRef<'c, 'a>,
    /// Open elements, outermost first; the last entry is `element`
    pub ancestors: &'c [Ancestor<'c>],
    pub schema: &'c SchemaSet,
    /// The attribute being completed
    pub attribute: &'c AttributeDecl,
}

/// Supplies text content candidates
pub trait ValueHook: Send + Sync {
    fn complete_value(&self, ctx: &ValueContext<'_, '_>, out: &mut Vec<Candidate>);
}

/// Supplies attribute value candidates
pub trait AttributeValueHook: Send + Sync {
    fn complete_attribute_value(&self, ctx: &AttributeValueContext<'_, '_>, out: &mut Vec<Candidate>);
}

impl<F> ValueHook for F
where
    F: Fn(&ValueContext<'_, '_>, &mut Vec<Candidate>) + Send + Sync,
{
    fn complete_value(&self, ctx: &ValueContext<'_, '_>, out: &mut Vec<Candidate>) {
        self(ctx, out)
    }
}

impl<F> AttributeValueHook for F
where
    F: Fn(&AttributeValueContext<'_, '_>, &mut Vec<Candidate>) + Send + Sync,
{
    fn complete_attribute_value(&self, ctx: &AttributeValueContext<'_, '_>, out: &mut Vec<Candidate>) {
        self(ctx, out)
    }
}
