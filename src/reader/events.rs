//! Partial XML Node Types
//!
//! Nodes produced by the partial tokenizer. They borrow from the input text
//! and describe whatever has been typed so far, so a start tag may be missing
//! its closing `>` and an attribute may be missing its value.

/// A node read from in-progress XML text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    /// `<?...?>`, content not inspected
    ProcessingInstruction,
    /// Start tag, possibly still being typed
    StartElement(StartElement<'a>),
    /// End tag, possibly still being typed
    EndElement(EndElement<'a>),
    /// Text up to the next `<`, verbatim
    Text(&'a str),
}

impl<'a> Node<'a> {
    /// Check if this node is skipped when folding: processing instructions
    /// and whitespace-only text
    pub fn is_insignificant(&self) -> bool {
        match self {
            Node::ProcessingInstruction => true,
            Node::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Get as start element if applicable
    pub fn as_start_element(&self) -> Option<&StartElement<'a>> {
        match self {
            Node::StartElement(e) => Some(e),
            _ => None,
        }
    }
}

/// Start element data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartElement<'a> {
    /// Element name as typed (may be empty or partial)
    pub name: &'a str,
    /// Attributes in the order they were typed
    pub attributes: AttributeMap<'a>,
    /// The attribute whose name or value is being typed at the end of input
    pub current_attribute: Option<&'a str>,
    /// True once `/>` has been seen
    pub self_closing: bool,
}

impl<'a> StartElement<'a> {
    /// Create a new start element with no attributes
    pub fn new(name: &'a str) -> Self {
        StartElement {
            name,
            ..Default::default()
        }
    }

    /// Get the value typed for the current attribute, if any
    pub fn current_value(&self) -> Option<&'a str> {
        self.current_attribute
            .and_then(|name| self.attributes.get(name))
            .and_then(AttributeValue::as_str)
    }

    /// Get a completed attribute value, ignoring the attribute still being typed
    pub fn completed_value(&self, name: &str) -> Option<&'a str> {
        if self.current_attribute == Some(name) {
            return None;
        }
        self.attributes.get(name).and_then(AttributeValue::as_str)
    }
}

/// End element data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndElement<'a> {
    /// Element name as typed (may be empty or partial)
    pub name: &'a str,
}

/// Value of an attribute that has been seen on a start tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue<'a> {
    /// `name=` typed, no value opened yet
    Pending,
    /// A value (complete, or partial when it is the current attribute)
    Value(&'a str),
}

impl<'a> AttributeValue<'a> {
    /// Get the value as a string, if one has been opened
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            AttributeValue::Pending => None,
            AttributeValue::Value(v) => Some(v),
        }
    }
}

/// Insertion-ordered attribute map
///
/// An attribute that was never typed is absent; one whose `=` was typed but
/// whose value was not opened is [`AttributeValue::Pending`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap<'a> {
    entries: Vec<(&'a str, AttributeValue<'a>)>,
}

impl<'a> AttributeMap<'a> {
    /// Create an empty map
    pub fn new() -> Self {
        AttributeMap { entries: Vec::new() }
    }

    /// Insert or overwrite an attribute; an overwrite keeps the original position
    pub fn insert(&mut self, name: &'a str, value: AttributeValue<'a>) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get an attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeValue<'a>> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Check if an attribute is present in any state
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, AttributeValue<'a>)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
