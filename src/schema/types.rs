//! Schema object types
//!
//! Compiled declarations referenced by id from a [`SchemaSet`](super::SchemaSet).

use crate::error::{Result, SchemaError};

/// Type identifier (index into the type arena)
pub type TypeId = u32;

/// Element declaration identifier (index into the element arena)
pub type ElementId = u32;

/// Attribute declaration identifier (index into the attribute arena)
pub type AttributeId = u32;

/// Title and description attached to a schema object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Documentation {
    /// Create documentation with both a title and a description
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Documentation {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }
}

/// minOccurs/maxOccurs pair; `max: None` is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    pub min: u32,
    pub max: Option<u32>,
}

impl Occurs {
    /// Exactly once (the XSD default)
    pub const ONCE: Occurs = Occurs { min: 1, max: Some(1) };

    /// Zero or one
    pub const OPTIONAL: Occurs = Occurs { min: 0, max: Some(1) };

    /// Zero or more
    pub const ANY: Occurs = Occurs { min: 0, max: None };

    /// Bounded range, rejecting `max < min`
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if max < min {
            return Err(SchemaError::InvalidOccurs { min, max });
        }
        Ok(Occurs { min, max: Some(max) })
    }

    /// `min` or more, no upper bound
    pub const fn at_least(min: u32) -> Self {
        Occurs { min, max: None }
    }

    /// Check if `count` occurrences have used up the maximum
    #[inline]
    pub fn is_exhausted(&self, count: u32) -> bool {
        self.max.is_some_and(|max| count >= max)
    }

    /// Check if `count` occurrences satisfy the minimum
    #[inline]
    pub fn is_satisfied(&self, count: u32) -> bool {
        count >= self.min
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Occurs::ONCE
    }
}

/// Built-in type code of a simple type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeCode {
    #[default]
    String,
    Boolean,
    Integer,
    Decimal,
    Double,
    Date,
    DateTime,
    Other,
}

/// One enumeration facet value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub value: String,
    pub documentation: Option<Documentation>,
}

/// Simple type: a type code plus optional enumeration facets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleType {
    pub name: Option<String>,
    pub code: TypeCode,
    pub enumeration: Vec<Facet>,
    pub documentation: Option<Documentation>,
}

impl SimpleType {
    /// Create an anonymous simple type
    pub fn new(code: TypeCode) -> Self {
        SimpleType {
            code,
            ..Default::default()
        }
    }

    /// Set the type name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restrict the type to an ordered list of values
    pub fn with_enumeration<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumeration = values
            .into_iter()
            .map(|value| Facet {
                value: value.into(),
                documentation: None,
            })
            .collect();
        self
    }

    /// Attach documentation
    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    /// Check if the type is `xs:boolean`
    pub fn is_boolean(&self) -> bool {
        self.code == TypeCode::Boolean
    }
}

/// A term inside a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Element(ElementId),
    Choice(Choice),
}

/// A term with its occurrence range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Particle {
    pub term: Term,
    pub occurs: Occurs,
}

impl Particle {
    /// Element particle
    pub fn element(id: ElementId, occurs: Occurs) -> Self {
        Particle {
            term: Term::Element(id),
            occurs,
        }
    }

    /// Nested choice particle; the choice's own range is the particle's range
    pub fn choice(choice: Choice) -> Self {
        Particle {
            occurs: choice.occurs,
            term: Term::Choice(choice),
        }
    }
}

/// Ordered group of particles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub particles: Vec<Particle>,
    pub occurs: Occurs,
}

impl Sequence {
    /// Create a sequence that occurs once
    pub fn new(particles: Vec<Particle>) -> Self {
        Sequence {
            particles,
            occurs: Occurs::ONCE,
        }
    }

    /// Set the sequence's own occurrence range
    pub fn repeated(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }
}

/// Group requiring one alternative per occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub alternatives: Vec<ElementId>,
    pub occurs: Occurs,
}

impl Choice {
    /// Create a choice that occurs once
    pub fn new(alternatives: Vec<ElementId>) -> Self {
        Choice {
            alternatives,
            occurs: Occurs::ONCE,
        }
    }

    /// Set the choice's own occurrence range
    pub fn repeated(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }
}

/// Content model of a complex type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentModel {
    /// No children, no text
    #[default]
    Empty,
    /// Text content of the given simple type
    Simple(TypeId),
    Sequence(Sequence),
    Choice(Choice),
    /// Unordered group; not completed
    All(Vec<ElementId>),
}

/// Complex type: content model, attributes, optional base type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexType {
    pub name: Option<String>,
    pub base: Option<TypeId>,
    pub content: ContentModel,
    pub attributes: Vec<AttributeId>,
    pub documentation: Option<Documentation>,
}

impl ComplexType {
    /// Create an anonymous complex type
    pub fn new(content: ContentModel) -> Self {
        ComplexType {
            content,
            ..Default::default()
        }
    }

    /// Set the type name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Derive from a base type
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Declare attributes
    pub fn with_attributes(mut self, attributes: Vec<AttributeId>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Attach documentation
    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }
}

/// Entry in the type arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Simple(SimpleType),
    Complex(ComplexType),
}

impl SchemaType {
    /// Type name, if not anonymous
    pub fn name(&self) -> Option<&str> {
        match self {
            SchemaType::Simple(t) => t.name.as_deref(),
            SchemaType::Complex(t) => t.name.as_deref(),
        }
    }

    /// Attached documentation
    pub fn documentation(&self) -> Option<&Documentation> {
        match self {
            SchemaType::Simple(t) => t.documentation.as_ref(),
            SchemaType::Complex(t) => t.documentation.as_ref(),
        }
    }

    pub(crate) fn documentation_mut(&mut self) -> &mut Option<Documentation> {
        match self {
            SchemaType::Simple(t) => &mut t.documentation,
            SchemaType::Complex(t) => &mut t.documentation,
        }
    }

    /// Get as complex type if applicable
    pub fn as_complex(&self) -> Option<&ComplexType> {
        match self {
            SchemaType::Complex(t) => Some(t),
            SchemaType::Simple(_) => None,
        }
    }

    /// Get as simple type if applicable
    pub fn as_simple(&self) -> Option<&SimpleType> {
        match self {
            SchemaType::Simple(t) => Some(t),
            SchemaType::Complex(_) => None,
        }
    }
}

/// Element declaration (global or local)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDecl {
    pub name: String,
    pub type_id: TypeId,
    pub nillable: bool,
    pub documentation: Option<Documentation>,
}

impl ElementDecl {
    /// Declare an element of the given type
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        ElementDecl {
            name: name.into(),
            type_id,
            nillable: false,
            documentation: None,
        }
    }

    /// Allow `xsi:nil`
    pub fn nillable(mut self) -> Self {
        self.nillable = true;
        self
    }

    /// Attach documentation
    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }
}

/// Attribute declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDecl {
    pub name: String,
    /// Simple type of the value
    pub type_id: TypeId,
    pub required: bool,
    pub documentation: Option<Documentation>,
}

impl AttributeDecl {
    /// Declare an optional attribute of the given simple type
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        AttributeDecl {
            name: name.into(),
            type_id,
            required: false,
            documentation: None,
        }
    }

    /// Mark the attribute as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach documentation
    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }
}
