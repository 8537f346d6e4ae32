//! Trailing-node classification
//!
//! Once folding has consumed the whole input, the reader state and the last
//! node decide what is being typed: an element name, an attribute name, an
//! attribute value, text content or a closing tag.

use tracing::trace;

use super::hooks::{Ancestor, AttributeValueContext, Candidate, ValueContext};
use super::replay::{ElementState, ParseContext, XSI_TYPE};
use super::suggestion::{
    annotation_for_facet, annotation_for_type, Completion, Suggestion, SuggestionKind,
};
use super::Hooks;
use crate::core::scanner::is_whitespace;
use crate::core::ReaderState;
use crate::options::AutocompleteOptions;
use crate::reader::{Node, StartElement};
use crate::schema::{ContentModel, ElementId, Sequence, SimpleType, Term};

/// Namespace URI of XML Schema Instance
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

const XMLNS_XSI: &str = "xmlns:xsi";
const XSI_NIL: &str = "xsi:nil";

impl<'s, 'a> ParseContext<'s, 'a> {
    /// Suggestions for the trailing node of a completed fold
    pub(crate) fn classify(&self, options: &AutocompleteOptions, hooks: &Hooks) -> Completion {
        let state = self.state();
        trace!(?state, valid = self.is_valid(), depth = self.depth(), "classify");

        match (&self.last_node, state) {
            (Some(Node::EndElement(end)), ReaderState::InEndElement) => self.complete_end_tag(end.name),
            _ if !self.is_valid() => Completion::empty(),
            (Some(Node::StartElement(start)), ReaderState::InStartElement) => self.complete_element(start.name),
            (Some(Node::StartElement(start)), ReaderState::AwaitingAttribute)
                if self.text.bytes().last().is_some_and(is_whitespace) =>
            {
                self.complete_attribute(start, options)
            }
            (Some(Node::StartElement(start)), ReaderState::InAttributeName) => {
                self.complete_attribute(start, options)
            }
            (Some(Node::StartElement(start)), ReaderState::InAttributeEquals | ReaderState::InAttributeValue) => {
                self.complete_attribute_value(start, hooks)
            }
            (Some(Node::StartElement(_)), ReaderState::InText) => self.complete_text("", hooks),
            (Some(Node::Text(text)), _) => self.complete_text(text, hooks),
            _ => Completion::empty(),
        }
    }

    fn ancestors(&self) -> Vec<Ancestor<'s>> {
        self.stack
            .iter()
            .map(|s| Ancestor {
                type_id: s.type_id,
                name: self.element_name(s.element).unwrap_or_default(),
            })
            .collect()
    }

    // ========================================================================
    // Closing tags
    // ========================================================================

    fn complete_end_tag(&self, typed: &str) -> Completion {
        let Some(decl) = self.top().and_then(|top| self.schema.element(top.element)) else {
            return Completion::empty();
        };

        if !decl.name.starts_with(typed) {
            return Completion::empty();
        }

        Completion {
            suggestions: vec![Suggestion::end_element(self.schema, decl, false)],
            length: typed.chars().count(),
        }
    }

    // ========================================================================
    // Element names
    // ========================================================================

    fn complete_element(&self, typed: &str) -> Completion {
        let length = typed.chars().count();

        if self.last_is_root {
            let suggestions = self
                .schema
                .global_elements()
                .filter(|(_, decl)| decl.name.starts_with(typed))
                .map(|(_, decl)| Suggestion::element(self.schema, decl))
                .collect();
            return Completion { suggestions, length };
        }

        let Some(top) = self.top() else {
            return Completion::empty();
        };

        let mut names = Vec::new();
        let can_close = match self.schema.complex_type(top.type_id).map(|t| &t.content) {
            Some(ContentModel::Sequence(seq)) => {
                self.scan_sequence(top, seq, &mut names);
                seq.particles
                    .iter()
                    .enumerate()
                    .skip(top.next_child)
                    .all(|(i, p)| p.occurs.is_satisfied(top.count(i)))
            }
            Some(ContentModel::Choice(choice)) => {
                if !choice.occurs.is_exhausted(top.repeat_count) {
                    names.extend(choice.alternatives.iter().copied());
                }
                choice.occurs.is_satisfied(top.repeat_count)
            }
            _ => true,
        };

        let mut suggestions: Vec<Suggestion> = names
            .into_iter()
            .filter_map(|e| self.schema.element(e))
            .filter(|decl| decl.name.starts_with(typed))
            .map(|decl| Suggestion::element(self.schema, decl))
            .collect();

        if typed.is_empty() && can_close {
            if let Some(decl) = self.schema.element(top.element) {
                suggestions.push(Suggestion::end_element(self.schema, decl, true));
            }
        }

        Completion { suggestions, length }
    }

    /// Elements acceptable at the resume point, up to and including the
    /// first particle still below its minimum
    fn scan_sequence(&self, top: &ElementState, seq: &Sequence, out: &mut Vec<ElementId>) {
        let mut blocked = false;
        for (i, particle) in seq.particles.iter().enumerate().skip(top.next_child) {
            push_term(&particle.term, out);
            if !particle.occurs.is_satisfied(top.count(i)) {
                blocked = true;
                break;
            }
        }

        let matched_this_round = top.next_child > 0 || top.counts.iter().any(|&c| c > 0);
        let can_repeat = !seq.occurs.is_exhausted(top.repeat_count.saturating_add(1));
        if blocked || !matched_this_round || !can_repeat {
            return;
        }

        // The next repetition of the sequence starts from fresh counters
        for particle in &seq.particles {
            let before = out.len();
            push_term(&particle.term, out);
            let mut i = before;
            while i < out.len() {
                if out[..before].contains(&out[i]) {
                    out.remove(i);
                } else {
                    i += 1;
                }
            }
            if particle.occurs.min > 0 {
                break;
            }
        }
    }

    // ========================================================================
    // Attribute names
    // ========================================================================

    fn complete_attribute(&self, start: &StartElement<'a>, options: &AutocompleteOptions) -> Completion {
        let typed = start.current_attribute.unwrap_or_default();
        let length = typed.chars().count();

        let Some(top) = self.top() else {
            return Completion { suggestions: Vec::new(), length };
        };

        let mut suggestions: Vec<Suggestion> = self
            .schema
            .attribute_uses(top.type_id)
            .into_iter()
            .filter_map(|id| self.schema.attribute(id))
            .map(|decl| Suggestion::attribute(self.schema, decl))
            .collect();
        suggestions.sort_by(|a, b| a.text().cmp(b.text()));

        if self.schema.has_derived_types(top.type_id) {
            suggestions.insert(
                0,
                Suggestion::pseudo_attribute(XSI_TYPE, "Type", "Indicates the derived type to use for this element"),
            );
        }
        if top.nillable {
            suggestions.insert(
                0,
                Suggestion::pseudo_attribute(XSI_NIL, "Nil", "Indicates that this element has no value"),
            );
        }
        if options.uses_xsi() && self.last_is_root && self.schema.has_extension_types() {
            suggestions.insert(
                0,
                Suggestion::pseudo_attribute(
                    XMLNS_XSI,
                    "XML Schema Instance",
                    "Includes the XML Schema Instance namespace",
                ),
            );
        }

        suggestions.retain(|s| s.text().starts_with(typed) && !start.attributes.contains(s.text()));
        Completion { suggestions, length }
    }

    // ========================================================================
    // Attribute values
    // ========================================================================

    fn complete_attribute_value(&self, start: &StartElement<'a>, hooks: &Hooks) -> Completion {
        let (typed, include_quotes, quote_char) = match self.state() {
            ReaderState::InAttributeEquals => ("", true, '"'),
            _ => (
                start.current_value().unwrap_or_default(),
                false,
                self.open_quote().unwrap_or('"'),
            ),
        };
        let length = typed.chars().count();
        let name = start.current_attribute.unwrap_or_default();

        let Some(top) = self.top() else {
            return Completion { suggestions: Vec::new(), length };
        };

        let mut values: Vec<Candidate> = Vec::new();

        let declared = self
            .schema
            .find_attribute_use(top.type_id, name)
            .and_then(|id| self.schema.attribute(id));
        if let Some(attribute) = declared {
            match self.schema.text_type(attribute.type_id) {
                Some(simple) if simple.is_boolean() => values.extend(boolean_pair()),
                Some(simple) if !simple.enumeration.is_empty() => values.extend(facet_values(simple)),
                _ => {
                    if let Some(element) = self.document.element(top.node) {
                        let ancestors = self.ancestors();
                        let ctx = AttributeValueContext {
                            element,
                            ancestors: &ancestors,
                            schema: self.schema,
                            attribute,
                        };
                        for hook in &hooks.attribute_value {
                            hook.complete_attribute_value(&ctx, &mut values);
                        }
                    }
                }
            }
        }

        match name {
            XMLNS_XSI => values.push(Candidate::new(XSI_NAMESPACE)),
            XSI_TYPE => values.extend(self.schema.derived_types(top.type_id).filter_map(|(_, ty)| {
                ty.name
                    .as_ref()
                    .map(|n| Candidate::new(n.clone()).with_annotation(annotation_for_type(ty)))
            })),
            XSI_NIL => values.extend([Candidate::new("true"), Candidate::new("false")]),
            _ => {}
        }

        let suggestions = values
            .into_iter()
            .filter(|c| c.value.starts_with(typed))
            .map(|c| {
                Suggestion::new(
                    SuggestionKind::AttributeValue {
                        value: c.value,
                        include_quotes,
                        quote_char,
                    },
                    c.annotation,
                )
            })
            .collect();

        Completion { suggestions, length }
    }

    // ========================================================================
    // Text content
    // ========================================================================

    fn complete_text(&self, text: &str, hooks: &Hooks) -> Completion {
        let length = text.chars().count();
        let typed = text.trim();

        let Some(top) = self.top() else {
            return Completion { suggestions: Vec::new(), length };
        };

        let values: Vec<Candidate> = match self.schema.text_type(top.type_id) {
            Some(simple) if simple.is_boolean() => boolean_pair().collect(),
            Some(simple) if !simple.enumeration.is_empty() => facet_values(simple).collect(),
            _ => {
                let mut values = Vec::new();
                if let Some(element) = self.document.element(top.node) {
                    let ancestors = self.ancestors();
                    let ctx = ValueContext {
                        element,
                        ancestors: &ancestors,
                        schema: self.schema,
                    };
                    for hook in &hooks.value {
                        hook.complete_value(&ctx, &mut values);
                    }
                }
                values
            }
        };

        let suggestions = values
            .into_iter()
            .filter(|c| c.value.starts_with(typed))
            .map(|c| Suggestion::new(SuggestionKind::Value { value: c.value }, c.annotation))
            .collect();

        Completion { suggestions, length }
    }
}

fn push_term(term: &Term, out: &mut Vec<ElementId>) {
    match term {
        Term::Element(e) => out.push(*e),
        Term::Choice(choice) => out.extend(choice.alternatives.iter().copied()),
    }
}

fn boolean_pair() -> impl Iterator<Item = Candidate> {
    ["false", "true"].into_iter().map(Candidate::new)
}

fn facet_values(simple: &SimpleType) -> impl Iterator<Item = Candidate> + '_ {
    simple
        .enumeration
        .iter()
        .map(|f| Candidate::new(f.value.clone()).with_annotation(annotation_for_facet(f)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complete::replay::FoldOutcome;
    use crate::schema::{
        AttributeDecl, Choice, ComplexType, ElementDecl, Occurs, Particle, SchemaSet, TypeCode,
    };

    /// list: sequence(head 1..1, item 0..unbounded); items: choice(x|y) 0..1
    fn schema() -> SchemaSet {
        let mut schema = SchemaSet::new();
        let string = schema.add_simple_type(SimpleType::new(TypeCode::String));
        let boolean = schema.add_simple_type(SimpleType::new(TypeCode::Boolean));
        let flag = schema.add_attribute(AttributeDecl::new("flag", boolean));
        let head = schema.add_element(ElementDecl::new("head", string));
        let item = schema.add_element(ElementDecl::new("item", boolean));
        let x = schema.add_element(ElementDecl::new("x", string));
        let y = schema.add_element(ElementDecl::new("y", string));

        let items = schema.add_complex_type(ComplexType::new(ContentModel::Choice(
            Choice::new(vec![x, y]).repeated(Occurs::OPTIONAL),
        )));
        let list = schema.add_complex_type(
            ComplexType::new(ContentModel::Sequence(Sequence::new(vec![
                Particle::element(head, Occurs::ONCE),
                Particle::element(item, Occurs::ANY),
            ])))
            .with_attributes(vec![flag]),
        );
        schema.add_global_element(ElementDecl::new("list", list));
        schema.add_global_element(ElementDecl::new("items", items));
        schema
    }

    fn complete(schema: &SchemaSet, text: &str) -> Completion {
        let mut ctx = ParseContext::new(schema, text);
        match ctx.fold() {
            FoldOutcome::Complete => ctx.classify(&AutocompleteOptions::default(), &Hooks::default()),
            FoldOutcome::Aborted => Completion::empty(),
        }
    }

    #[test]
    fn test_required_particle_blocks_scan_and_close() {
        let schema = schema();
        let completion = complete(&schema, "<list><");
        assert_eq!(completion.texts(), vec!["head"]);

        let completion = complete(&schema, "<list><head/><");
        assert_eq!(completion.texts(), vec!["item", "list"]);
        assert!(matches!(
            completion.suggestions[1].kind,
            SuggestionKind::EndElement { include_slash: true, .. }
        ));
    }

    #[test]
    fn test_typed_name_suppresses_close() {
        let schema = schema();
        let completion = complete(&schema, "<list><head/><i");
        assert_eq!(completion.texts(), vec!["item"]);
        assert_eq!(completion.length, 1);
    }

    #[test]
    fn test_choice_stops_when_exhausted() {
        let schema = schema();
        assert_eq!(complete(&schema, "<items><").texts(), vec!["x", "y", "items"]);
        assert_eq!(complete(&schema, "<items><x/><").texts(), vec!["items"]);
    }

    #[test]
    fn test_end_tag_while_typing() {
        let schema = schema();
        let completion = complete(&schema, "<list></li");
        assert_eq!(completion.texts(), vec!["list"]);
        assert_eq!(completion.length, 2);
        assert!(matches!(
            completion.suggestions[0].kind,
            SuggestionKind::EndElement { include_slash: false, .. }
        ));

        assert!(complete(&schema, "<list></x").is_empty());
    }

    #[test]
    fn test_attribute_position_needs_whitespace() {
        let schema = schema();
        assert_eq!(complete(&schema, "<list ").texts(), vec!["flag"]);
        assert!(complete(&schema, "<list flag='true'").is_empty());
        assert!(complete(&schema, "<list flag='true' ").is_empty());
    }

    #[test]
    fn test_attribute_value_quotes() {
        let schema = schema();
        let completion = complete(&schema, "<list flag=");
        assert_eq!(completion.texts(), vec!["false", "true"]);
        assert!(matches!(
            completion.suggestions[0].kind,
            SuggestionKind::AttributeValue { include_quotes: true, quote_char: '"', .. }
        ));

        let completion = complete(&schema, "<list flag='t");
        assert_eq!(completion.texts(), vec!["true"]);
        assert_eq!(completion.length, 1);
        assert!(matches!(
            completion.suggestions[0].kind,
            SuggestionKind::AttributeValue { include_quotes: false, quote_char: '\'', .. }
        ));
    }

    #[test]
    fn test_text_value_trimmed_prefix() {
        let schema = schema();
        let completion = complete(&schema, "<list><head/><item> t");
        assert_eq!(completion.texts(), vec!["true"]);
        assert_eq!(completion.length, 2);

        let completion = complete(&schema, "<list><head/><item>");
        assert_eq!(completion.texts(), vec!["false", "true"]);
        assert_eq!(completion.length, 0);
    }

    #[test]
    fn test_invalid_replay_is_silent() {
        let schema = schema();
        assert!(complete(&schema, "<list><item/><").is_empty());
        assert!(complete(&schema, "<nope ").is_empty());
    }

    #[test]
    fn test_repeating_sequence_wraps() {
        let mut schema = SchemaSet::new();
        let string = schema.add_simple_type(SimpleType::new(TypeCode::String));
        let a = schema.add_element(ElementDecl::new("a", string));
        let b = schema.add_element(ElementDecl::new("b", string));
        let pair = schema.add_complex_type(ComplexType::new(ContentModel::Sequence(
            Sequence::new(vec![Particle::element(a, Occurs::ONCE), Particle::element(b, Occurs::OPTIONAL)])
                .repeated(Occurs::ANY),
        )));
        schema.add_global_element(ElementDecl::new("pairs", pair));

        assert_eq!(complete(&schema, "<pairs><a/><").texts(), vec!["b", "a", "pairs"]);
        assert_eq!(complete(&schema, "<pairs><a/><b/><").texts(), vec!["a", "pairs"]);
    }
}
