//! DOM Module - Arena-based shadow document
//!
//! A lightweight copy of the elements folded so far:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for parent/child/sibling links
//! - Names and attribute values borrowed from the input text

pub mod document;
pub mod node;

pub use document::{ElementRef, ShadowDocument};
pub use node::{NodeId, ShadowNode};
