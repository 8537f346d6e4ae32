//! Shadow Document - Arena of elements built during replay
//!
//! Holds only what completion hooks need to see: each open or closed element's
//! name, its typed attributes, and its place in the tree. Text, processing
//! instructions and namespace resolution are not kept.

use super::node::{NodeId, ShadowNode};
use crate::reader::{AttributeMap, AttributeValue, StartElement};

/// A document of shadow elements stored in arena format
#[derive(Debug, Default)]
pub struct ShadowDocument<'a> {
    /// Arena of nodes
    nodes: Vec<ShadowNode<'a>>,
    /// Root element node ID
    root_element: Option<NodeId>,
}

impl<'a> ShadowDocument<'a> {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element built from a start tag under `parent` (None for the root)
    pub fn append_element(&mut self, parent: Option<NodeId>, start: &StartElement<'a>) -> NodeId {
        let id = self.nodes.len() as NodeId;
        let depth = parent
            .and_then(|p| self.get_node(p))
            .map_or(0, |p| p.depth.saturating_add(1));

        self.nodes.push(ShadowNode::element(start.name, start.attributes.clone(), parent, depth));

        match parent {
            Some(parent_id) => self.link_child(parent_id, id),
            None => {
                if self.root_element.is_none() {
                    self.root_element = Some(id);
                }
            }
        }

        id
    }

    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let prev_last = match self.nodes.get_mut(parent_id as usize) {
            Some(parent) => {
                let prev = parent.last_child;
                if parent.first_child.is_none() {
                    parent.first_child = Some(child_id);
                }
                parent.last_child = Some(child_id);
                prev
            }
            None => return,
        };

        if let Some(prev) = prev_last.and_then(|p| self.nodes.get_mut(p as usize)) {
            prev.next_sibling = Some(child_id);
        }
    }

    /// Get a node by ID
    #[inline]
    pub fn get_node(&self, id: NodeId) -> Option<&ShadowNode<'a>> {
        self.nodes.get(id as usize)
    }

    /// Get root element ID
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Number of elements created so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no elements were created
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow an element as a navigable reference
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_, 'a>> {
        self.get_node(id).map(|_| ElementRef { doc: self, id })
    }
}

/// Navigable view of one shadow element, handed to completion hooks
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'d, 'a> {
    doc: &'d ShadowDocument<'a>,
    id: NodeId,
}

impl<'d, 'a> ElementRef<'d, 'a> {
    fn node(&self) -> &'d ShadowNode<'a> {
        // ElementRef is only constructed for ids present in the arena
        &self.doc.nodes[self.id as usize]
    }

    /// Node ID of this element
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Element name
    pub fn name(&self) -> &'a str {
        self.node().name
    }

    /// Attribute value by name; None when absent or when no value was opened
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node().attributes.get(name).and_then(AttributeValue::as_str)
    }

    /// All attributes as typed
    pub fn attributes(&self) -> &'d AttributeMap<'a> {
        &self.node().attributes
    }

    /// Depth in the tree (root is 0)
    pub fn depth(&self) -> u16 {
        self.node().depth
    }

    /// Parent element
    pub fn parent(&self) -> Option<ElementRef<'d, 'a>> {
        self.node().parent.and_then(|p| self.doc.element(p))
    }

    /// Child elements in document order
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'d, 'a>> + 'd {
        let doc = self.doc;
        std::iter::successors(self.node().first_child, move |&id| {
            doc.get_node(id).and_then(|n| n.next_sibling)
        })
        .filter_map(move |id| doc.element(id))
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = ElementRef<'d, 'a>> + 'd {
        std::iter::successors(self.parent(), |e| e.parent())
    }
}
