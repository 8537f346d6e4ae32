//! Engine options
//!
//! # Example
//!
//! ```
//! use xmlcomplete::AutocompleteOptions;
//!
//! let opts = AutocompleteOptions::default().with_uses_xsi(true);
//! assert!(opts.uses_xsi());
//! ```

/// Options controlling which suggestions the engine may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutocompleteOptions {
    pub(crate) uses_xsi: bool,
}

impl AutocompleteOptions {
    /// Allow the `xmlns:xsi` declaration to be suggested on the root element.
    ///
    /// Off by default. Even when enabled it is only offered if some complex
    /// type in the schema extends a base type.
    pub fn with_uses_xsi(mut self, uses_xsi: bool) -> Self {
        self.uses_xsi = uses_xsi;
        self
    }

    /// Whether `xmlns:xsi` may be suggested
    pub fn uses_xsi(&self) -> bool {
        self.uses_xsi
    }
}
