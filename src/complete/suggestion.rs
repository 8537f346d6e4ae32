//! Suggestion Model
//!
//! Every suggestion shares an [`Annotation`]; what is inserted depends on
//! the [`SuggestionKind`].

use crate::schema::{
    AttributeDecl, ComplexType, ContentModel, Documentation, ElementDecl, Facet, SchemaSet,
    SchemaType,
};

/// Display metadata shared by all suggestion kinds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub display_name: Option<String>,
}

impl Annotation {
    /// Annotation with a fixed title and description
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Annotation {
            title: Some(title.into()),
            description: Some(description.into()),
            display_name: None,
        }
    }

    /// Set the display name shown instead of the inserted text
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

impl From<&Documentation> for Annotation {
    fn from(doc: &Documentation) -> Self {
        Annotation {
            title: doc.title.clone(),
            description: doc.description.clone(),
            display_name: None,
        }
    }
}

/// What a suggestion inserts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionKind {
    /// A start tag
    Element {
        name: String,
        /// The element's type has empty content
        self_closing: bool,
        /// The element's type declares attributes
        has_attributes: bool,
    },
    /// A closing tag
    EndElement {
        name: String,
        /// The `/` has not been typed yet
        include_slash: bool,
    },
    /// An attribute name
    Attribute { name: String },
    /// An attribute value
    AttributeValue {
        value: String,
        /// No quote has been typed yet
        include_quotes: bool,
        quote_char: char,
    },
    /// Text content
    Value { value: String },
}

/// A single completion proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub annotation: Annotation,
}

impl Suggestion {
    /// Create a suggestion
    pub fn new(kind: SuggestionKind, annotation: Annotation) -> Self {
        Suggestion { kind, annotation }
    }

    /// Text the suggestion inserts, without quotes or slashes
    pub fn text(&self) -> &str {
        match &self.kind {
            SuggestionKind::Element { name, .. }
            | SuggestionKind::EndElement { name, .. }
            | SuggestionKind::Attribute { name } => name,
            SuggestionKind::AttributeValue { value, .. } | SuggestionKind::Value { value } => value,
        }
    }

    /// Start tag suggestion for an element declaration
    pub fn element(schema: &SchemaSet, decl: &ElementDecl) -> Self {
        let (self_closing, has_attributes) = match schema.complex_type(decl.type_id) {
            Some(complex) => (
                complex.content == ContentModel::Empty,
                !schema.attribute_uses(decl.type_id).is_empty(),
            ),
            None => (false, false),
        };
        Suggestion::new(
            SuggestionKind::Element {
                name: decl.name.clone(),
                self_closing,
                has_attributes,
            },
            annotation_for_element(schema, decl),
        )
    }

    /// End tag suggestion for an element declaration
    pub fn end_element(schema: &SchemaSet, decl: &ElementDecl, include_slash: bool) -> Self {
        Suggestion::new(
            SuggestionKind::EndElement {
                name: decl.name.clone(),
                include_slash,
            },
            annotation_for_element(schema, decl),
        )
    }

    /// Attribute name suggestion for a declared attribute
    pub fn attribute(schema: &SchemaSet, decl: &AttributeDecl) -> Self {
        Suggestion::new(
            SuggestionKind::Attribute { name: decl.name.clone() },
            annotation_for_attribute(schema, decl),
        )
    }

    /// Attribute name suggestion with fixed metadata
    pub fn pseudo_attribute(name: &str, title: &str, description: &str) -> Self {
        Suggestion::new(
            SuggestionKind::Attribute { name: name.to_string() },
            Annotation::new(title, description),
        )
    }
}

/// Suggestions plus the number of characters they replace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub suggestions: Vec<Suggestion>,
    /// Length in characters of the partial fragment before the caret
    pub length: usize,
}

impl Completion {
    /// No suggestions
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there is nothing to suggest
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Inserted texts, in order
    pub fn texts(&self) -> Vec<&str> {
        self.suggestions.iter().map(Suggestion::text).collect()
    }
}

// ============================================================================
// Annotation lookup
// ============================================================================

fn from_documentation(doc: Option<&Documentation>) -> Annotation {
    doc.map(Annotation::from).unwrap_or_default()
}

fn type_documentation(schema: &SchemaSet, ty: u32) -> Option<&Documentation> {
    schema.get_type(ty).and_then(SchemaType::documentation)
}

/// Element documentation, falling back to its type's
pub fn annotation_for_element(schema: &SchemaSet, decl: &ElementDecl) -> Annotation {
    from_documentation(
        decl.documentation
            .as_ref()
            .or_else(|| type_documentation(schema, decl.type_id)),
    )
}

/// Attribute documentation, falling back to its type's
pub fn annotation_for_attribute(schema: &SchemaSet, decl: &AttributeDecl) -> Annotation {
    from_documentation(
        decl.documentation
            .as_ref()
            .or_else(|| type_documentation(schema, decl.type_id)),
    )
}

/// Enumeration facet documentation
pub fn annotation_for_facet(facet: &Facet) -> Annotation {
    from_documentation(facet.documentation.as_ref())
}

/// Documentation of a type offered as an `xsi:type` value
pub fn annotation_for_type(ty: &ComplexType) -> Annotation {
    from_documentation(ty.documentation.as_ref())
}
