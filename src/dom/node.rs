//! Shadow node representation
//!
//! Uses NodeId (u32) for compact node references into the document arena.

use crate::reader::AttributeMap;

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// A shadow element: name plus the attributes typed so far
#[derive(Debug, Clone)]
pub struct ShadowNode<'a> {
    /// Element name
    pub name: &'a str,
    /// Attributes as typed, in order
    pub attributes: AttributeMap<'a>,
    /// Parent node (None for the root element)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Depth in document tree (root is 0)
    pub depth: u16,
}

impl<'a> ShadowNode<'a> {
    /// Create a new element node
    pub fn element(name: &'a str, attributes: AttributeMap<'a>, parent: Option<NodeId>, depth: u16) -> Self {
        ShadowNode {
            name,
            attributes,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            depth,
        }
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Check if this node has attributes
    #[inline]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}
