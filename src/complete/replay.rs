//! Replay Engine - Folds tokenizer nodes against the schema
//!
//! Each request builds a fresh [`ParseContext`], pulls every node out of the
//! tokenizer and maintains a stack of open elements whose content models are
//! matched as children arrive. A structural mismatch never errors; it flags
//! the replay invalid, which later surfaces as an empty suggestion list.

use tracing::{debug, trace};

use crate::core::{ReaderState, Tokenizer};
use crate::dom::{NodeId, ShadowDocument};
use crate::reader::{EndElement, Node, StartElement};
use crate::schema::{ContentModel, ElementId, SchemaSet, Sequence, Term, TypeId};

/// Name of the attribute selecting a derived type
pub const XSI_TYPE: &str = "xsi:type";

/// One open element on the replay stack
#[derive(Debug, Clone)]
pub struct ElementState {
    /// Matched declaration
    pub element: ElementId,
    /// Effective type (after `xsi:type` substitution)
    pub type_id: TypeId,
    pub nillable: bool,
    /// Match counter per sequence particle, by position
    pub counts: Vec<u32>,
    /// Resume point for sequence scanning
    pub next_child: usize,
    /// Sequence restarts, or alternatives accepted by a choice
    pub repeat_count: u32,
    /// Shadow element for this state
    pub node: NodeId,
}

impl ElementState {
    /// Match count of the particle at `index`
    #[inline]
    pub fn count(&self, index: usize) -> u32 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    fn set_count(&mut self, index: usize, count: u32) {
        if index >= self.counts.len() {
            self.counts.resize(index + 1, 0);
        }
        self.counts[index] = count;
    }

    fn restart(&mut self) {
        self.repeat_count = self.repeat_count.saturating_add(1);
        self.next_child = 0;
        self.counts.iter_mut().for_each(|c| *c = 0);
    }
}

/// Result of folding the whole input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    /// Input exhausted; classify the trailing node
    Complete,
    /// Nothing can be suggested
    Aborted,
}

/// Per-request replay state
pub struct ParseContext<'s, 'a> {
    pub(crate) schema: &'s SchemaSet,
    pub(crate) text: &'a str,
    tokenizer: Tokenizer<'a>,
    pub(crate) stack: Vec<ElementState>,
    pub(crate) document: ShadowDocument<'a>,
    valid: bool,
    started: bool,
    pub(crate) last_node: Option<Node<'a>>,
    /// The last node is the first significant one
    pub(crate) last_is_root: bool,
}

impl<'s, 'a> ParseContext<'s, 'a> {
    /// Create a replay over `text`
    pub fn new(schema: &'s SchemaSet, text: &'a str) -> Self {
        ParseContext {
            schema,
            text,
            tokenizer: Tokenizer::new(text),
            stack: Vec::new(),
            document: ShadowDocument::new(),
            valid: true,
            started: false,
            last_node: None,
            last_is_root: false,
        }
    }

    /// Check if the replay still agrees with the schema
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of open elements
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Lexical state after the last node
    pub fn state(&self) -> ReaderState {
        self.tokenizer.state()
    }

    /// Quote character of an attribute value still open at end of input
    pub fn open_quote(&self) -> Option<char> {
        self.tokenizer.open_quote()
    }

    /// Top of the stack
    pub fn top(&self) -> Option<&ElementState> {
        self.stack.last()
    }

    /// Shadow document built so far
    pub fn document(&self) -> &ShadowDocument<'a> {
        &self.document
    }

    /// Fold every node of the input onto the stack
    pub fn fold(&mut self) -> FoldOutcome {
        while let Some(node) = self.tokenizer.next_node() {
            trace!(?node, state = ?self.tokenizer.state(), depth = self.stack.len(), "fold");
            self.last_is_root = false;

            if !node.is_insignificant() {
                if !self.valid {
                    return FoldOutcome::Aborted;
                }

                let outcome = if self.started {
                    match &node {
                        Node::StartElement(start) => self.fold_start(start),
                        Node::EndElement(end) => self.fold_end(end),
                        _ => FoldOutcome::Complete,
                    }
                } else {
                    self.started = true;
                    self.last_is_root = true;
                    match &node {
                        Node::StartElement(start) => {
                            self.fold_root(start);
                            FoldOutcome::Complete
                        }
                        _ => FoldOutcome::Aborted,
                    }
                };

                if outcome == FoldOutcome::Aborted {
                    return outcome;
                }
            }

            self.last_node = Some(node);
        }

        FoldOutcome::Complete
    }

    fn invalidate(&mut self, element: &str, reason: &str) {
        if self.valid {
            debug!(element, reason, "replay invalid");
        }
        self.valid = false;
    }

    fn fold_root(&mut self, start: &StartElement<'a>) {
        // Left for classification while the name is still being typed
        if self.tokenizer.state() == ReaderState::InStartElement {
            return;
        }

        match self.schema.find_global(start.name) {
            Some(element) => self.push(element, start),
            None => self.invalidate(start.name, "unknown root element"),
        }
    }

    fn fold_end(&mut self, end: &EndElement<'a>) -> FoldOutcome {
        let Some(state) = self.stack.pop() else {
            return FoldOutcome::Aborted;
        };

        let expected = self.element_name(state.element);
        if expected == Some(end.name) {
            return FoldOutcome::Complete;
        }

        if self.tokenizer.state() == ReaderState::InEndElement {
            self.stack.push(state);
            self.invalidate(end.name, "end tag still being typed");
            FoldOutcome::Complete
        } else {
            debug!(element = end.name, ?expected, "mismatched end tag");
            FoldOutcome::Aborted
        }
    }

    fn fold_start(&mut self, start: &StartElement<'a>) -> FoldOutcome {
        if self.tokenizer.state() == ReaderState::InStartElement {
            return FoldOutcome::Complete;
        }

        let schema = self.schema;
        let Some(state) = self.stack.last_mut() else {
            return FoldOutcome::Aborted;
        };

        let content = schema.complex_type(state.type_id).map(|t| &t.content);
        let matched = match content {
            Some(ContentModel::Sequence(seq)) => match_sequence(schema, state, seq, start.name),
            Some(ContentModel::Choice(choice)) => {
                if choice.occurs.is_exhausted(state.repeat_count) {
                    Err("choice exhausted")
                } else {
                    match match_alternative(schema, &choice.alternatives, start.name) {
                        Some(element) => {
                            state.repeat_count = state.repeat_count.saturating_add(1);
                            Ok(element)
                        }
                        None => Err("no matching alternative"),
                    }
                }
            }
            _ => Err("parent does not accept child elements"),
        };

        match matched {
            Ok(element) => self.push(element, start),
            Err(reason) => self.invalidate(start.name, reason),
        }
        FoldOutcome::Complete
    }

    fn push(&mut self, element: ElementId, start: &StartElement<'a>) {
        let Some(decl) = self.schema.element(element) else {
            self.invalidate(start.name, "missing element declaration");
            return;
        };

        let type_id = self.effective_type(decl.type_id, start);
        let parent = self.stack.last().map(|s| s.node);
        let node = self.document.append_element(parent, start);
        let particles = match self.schema.complex_type(type_id).map(|t| &t.content) {
            Some(ContentModel::Sequence(seq)) => seq.particles.len(),
            _ => 0,
        };

        trace!(element = start.name, type_id, depth = self.stack.len() + 1, "push");
        self.stack.push(ElementState {
            element,
            type_id,
            nillable: decl.nillable,
            counts: vec![0; particles],
            next_child: 0,
            repeat_count: 0,
            node,
        });

        if start.self_closing {
            self.stack.pop();
        }
    }

    /// Declared type, or the derived type selected by a completed `xsi:type`
    fn effective_type(&self, declared: TypeId, start: &StartElement<'a>) -> TypeId {
        start
            .completed_value(XSI_TYPE)
            .and_then(|name| self.schema.find_type(name))
            .filter(|&ty| {
                ty != declared
                    && self.schema.complex_type(ty).is_some()
                    && self.schema.is_derived_from(ty, declared)
            })
            .unwrap_or(declared)
    }

    pub(crate) fn element_name(&self, element: ElementId) -> Option<&'s str> {
        self.schema.element(element).map(|d| d.name.as_str())
    }
}

/// Name of an alternative matching `name` exactly
fn match_alternative(schema: &SchemaSet, alternatives: &[ElementId], name: &str) -> Option<ElementId> {
    alternatives
        .iter()
        .copied()
        .find(|&e| schema.element(e).is_some_and(|d| d.name == name))
}

/// Element a term accepts for `name`
pub(crate) fn match_term(schema: &SchemaSet, term: &Term, name: &str) -> Option<ElementId> {
    match term {
        Term::Element(e) => schema.element(*e).filter(|d| d.name == name).map(|_| *e),
        Term::Choice(choice) => match_alternative(schema, &choice.alternatives, name),
    }
}

/// Match `name` against a sequence, restarting the sequence when it repeats
fn match_sequence(
    schema: &SchemaSet,
    state: &mut ElementState,
    seq: &Sequence,
    name: &str,
) -> Result<ElementId, &'static str> {
    let mut skipped_required = false;

    loop {
        if seq.occurs.is_exhausted(state.repeat_count) {
            return Err("sequence exhausted");
        }

        let at_start = state.next_child == 0;
        for (i, particle) in seq.particles.iter().enumerate().skip(state.next_child) {
            let count = state.count(i);

            if let Some(element) = match_term(schema, &particle.term, name) {
                let count = count.saturating_add(1);
                state.set_count(i, count);
                state.next_child = if particle.occurs.is_exhausted(count) { i + 1 } else { i };
                return if skipped_required {
                    Err("required element skipped")
                } else {
                    Ok(element)
                };
            }

            if !particle.occurs.is_satisfied(count) {
                skipped_required = true;
            }
        }

        if skipped_required {
            return Err("required element missing");
        }

        state.restart();
        if at_start {
            return Err("no particle matches");
        }
    }
}
