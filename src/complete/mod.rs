//! Completion Engine
//!
//! [`Autocomplete`] owns a compiled [`SchemaSet`], the engine options and the
//! registered hooks. Each call to [`Autocomplete::suggest`] replays the text
//! from scratch; nothing is cached between keystrokes.

pub mod classify;
pub mod hooks;
pub mod replay;
pub mod suggestion;

pub use classify::XSI_NAMESPACE;
pub use hooks::{
    Ancestor, AttributeValueContext, AttributeValueHook, Candidate, ValueContext, ValueHook,
};
pub use replay::{ElementState, FoldOutcome, ParseContext};
pub use suggestion::{Annotation, Completion, Suggestion, SuggestionKind};

use crate::error::Result;
use crate::options::AutocompleteOptions;
use crate::schema::SchemaSet;

/// Registered hooks, run in registration order
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) value: Vec<Box<dyn ValueHook>>,
    pub(crate) attribute_value: Vec<Box<dyn AttributeValueHook>>,
}

/// Schema-driven autocomplete engine
pub struct Autocomplete {
    schema: SchemaSet,
    options: AutocompleteOptions,
    hooks: Hooks,
}

impl Autocomplete {
    /// Create an engine with default options
    pub fn new(schema: SchemaSet) -> Self {
        Self::with_options(schema, AutocompleteOptions::default())
    }

    /// Create an engine with the given options
    pub fn with_options(schema: SchemaSet, options: AutocompleteOptions) -> Self {
        Autocomplete {
            schema,
            options,
            hooks: Hooks::default(),
        }
    }

    /// Current options
    pub fn options(&self) -> &AutocompleteOptions {
        &self.options
    }

    /// Replace the options
    pub fn set_options(&mut self, options: AutocompleteOptions) {
        self.options = options;
    }

    /// The compiled schema
    pub fn schema(&self) -> &SchemaSet {
        &self.schema
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Attach a title and description to a named type
    pub fn add_type_description(&mut self, type_name: &str, title: &str, description: &str) -> Result<()> {
        self.schema.annotate_type(type_name, title, description)
    }

    /// Attach a title and description to an element of a named complex type
    pub fn add_element_description(
        &mut self,
        type_name: &str,
        element_name: &str,
        title: &str,
        description: &str,
    ) -> Result<()> {
        self.schema.annotate_element(type_name, element_name, title, description)
    }

    /// Attach a title and description to an attribute of a named complex type
    pub fn add_attribute_description(
        &mut self,
        type_name: &str,
        attribute_name: &str,
        title: &str,
        description: &str,
    ) -> Result<()> {
        self.schema.annotate_attribute(type_name, attribute_name, title, description)
    }

    /// Register a text value hook
    pub fn add_value_hook(&mut self, hook: Box<dyn ValueHook>) {
        self.hooks.value.push(hook);
    }

    /// Register an attribute value hook
    pub fn add_attribute_value_hook(&mut self, hook: Box<dyn AttributeValueHook>) {
        self.hooks.attribute_value.push(hook);
    }

    /// Register a closure as a text value hook
    pub fn on_value<F>(&mut self, hook: F)
    where
        F: Fn(&ValueContext<'_, '_>, &mut Vec<Candidate>) + Send + Sync + 'static,
    {
        self.add_value_hook(Box::new(hook));
    }

    /// Register a closure as an attribute value hook
    pub fn on_attribute_value<F>(&mut self, hook: F)
    where
        F: Fn(&AttributeValueContext<'_, '_>, &mut Vec<Candidate>) + Send + Sync + 'static,
    {
        self.add_attribute_value_hook(Box::new(hook));
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    /// Suggestions for the caret at the end of `text`
    #[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub fn suggest(&self, text: &str) -> Completion {
        let mut ctx = ParseContext::new(&self.schema, text);
        let completion = match ctx.fold() {
            FoldOutcome::Complete => ctx.classify(&self.options, &self.hooks),
            FoldOutcome::Aborted => Completion::empty(),
        };
        tracing::debug!(count = completion.suggestions.len(), length = completion.length, "suggest");
        completion
    }
}

impl std::fmt::Debug for Autocomplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autocomplete")
            .field("options", &self.options)
            .field("value_hooks", &self.hooks.value.len())
            .field("attribute_value_hooks", &self.hooks.attribute_value.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ComplexType, ContentModel, ElementDecl, SimpleType, TypeCode};

    fn engine() -> Autocomplete {
        let mut schema = SchemaSet::new();
        let string = schema.add_simple_type(SimpleType::new(TypeCode::String).named("Code"));
        let empty = schema.add_complex_type(ComplexType::new(ContentModel::Empty).named("Marker"));
        schema.add_global_element(ElementDecl::new("code", string));
        schema.add_global_element(ElementDecl::new("marker", empty));
        Autocomplete::new(schema)
    }

    #[test]
    fn test_root_suggestions() {
        let engine = engine();
        assert_eq!(engine.suggest("<").texts(), vec!["code", "marker"]);
        assert_eq!(engine.suggest("<m").texts(), vec!["marker"]);
        assert!(engine.suggest("").is_empty());
    }

    #[test]
    fn test_value_hook_closure() {
        let mut engine = engine();
        engine.on_value(|ctx: &ValueContext<'_, '_>, out: &mut Vec<Candidate>| {
            if ctx.element.name() == "code" {
                out.extend(["A1", "A2", "B1"].map(Candidate::new));
            }
        });

        let completion = engine.suggest("<code>A");
        assert_eq!(completion.texts(), vec!["A1", "A2"]);
        assert_eq!(completion.length, 1);
    }

    #[test]
    fn test_setup_delegates_to_schema() {
        let mut engine = engine();
        engine.add_type_description("Marker", "Marker", "An empty marker").unwrap();
        assert!(engine.add_type_description("Marker", "Again", "Again").is_err());

        let completion = engine.suggest("<m");
        assert_eq!(completion.suggestions[0].annotation.title.as_deref(), Some("Marker"));
    }

    #[test]
    fn test_engine_is_sync() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Autocomplete>();
    }
}
