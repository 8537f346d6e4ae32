//! Partial XML Reader Module
//!
//! Node types produced while reading in-progress text:
//! - Node: processing instruction, start/end element, text
//! - AttributeMap: ordered attributes with a pending (no value yet) state

pub mod events;

pub use events::{AttributeMap, AttributeValue, EndElement, Node, StartElement};
