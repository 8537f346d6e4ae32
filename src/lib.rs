//! xmlcomplete - Schema-driven autocomplete for partially typed XML
//!
//! Given the text of a document up to the caret, proposes the element names,
//! attribute names, attribute values or text values the schema allows next.
//!
//! Layers:
//! - core: byte scanner and partial tokenizer (never fails)
//! - reader: node types produced by the tokenizer
//! - schema: compiled content-model arena
//! - dom: shadow elements handed to hooks
//! - complete: replay engine, classification, suggestions, hooks
//! - strategy: parallel evaluation of many requests
//!
//! # Example
//!
//! ```
//! use xmlcomplete::schema::{ElementDecl, SchemaSet, SimpleType, TypeCode};
//! use xmlcomplete::Autocomplete;
//!
//! let mut schema = SchemaSet::new();
//! let flag = schema.add_simple_type(SimpleType::new(TypeCode::Boolean));
//! schema.add_global_element(ElementDecl::new("enabled", flag));
//!
//! let engine = Autocomplete::new(schema);
//! assert_eq!(engine.suggest("<en").texts(), vec!["enabled"]);
//! assert_eq!(engine.suggest("<enabled>").texts(), vec!["false", "true"]);
//! ```

pub mod complete;
pub mod core;
pub mod dom;
pub mod error;
pub mod options;
pub mod reader;
pub mod schema;
pub mod strategy;

pub use complete::{
    Annotation, Autocomplete, Candidate, Completion, Suggestion, SuggestionKind, XSI_NAMESPACE,
};
pub use error::{Result, SchemaError};
pub use options::AutocompleteOptions;
pub use schema::SchemaSet;
pub use strategy::suggest_parallel;
