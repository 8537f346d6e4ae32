//! Setup and schema-construction errors
//!
//! Document content never produces an error: a mismatch against the schema
//! only means there is nothing to suggest. These variants cover programmer
//! mistakes made while building or annotating a [`SchemaSet`](crate::schema::SchemaSet).

/// Errors raised by schema setup operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No named type with this name exists.
    #[error("unknown type name {0}")]
    UnknownType(String),

    /// The named type exists but is a simple type.
    #[error("type {0} is not a complex type")]
    NotComplexType(String),

    /// The complex type's content is neither a sequence nor a choice.
    #[error("type {0} must be a sequence or choice")]
    UnsupportedContent(String),

    /// The complex type has no such child element.
    #[error("unknown element name {element} in type {type_name}")]
    UnknownElement { type_name: String, element: String },

    /// The complex type has no such attribute, declared or inherited.
    #[error("unknown attribute name {attribute} in type {type_name}")]
    UnknownAttribute { type_name: String, attribute: String },

    /// The schema object already carries documentation.
    #[error("{0} already has an annotation")]
    AlreadyDocumented(String),

    /// An occurrence range with a maximum below its minimum.
    #[error("invalid occurrence range: max {max} is below min {min}")]
    InvalidOccurs { min: u32, max: u32 },
}

/// Result alias for setup operations
pub type Result<T, E = SchemaError> = std::result::Result<T, E>;
