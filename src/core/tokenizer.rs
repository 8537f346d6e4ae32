//! Partial XML Tokenizer - State machine over in-progress text
//!
//! Implements a pull-parser style tokenizer that never fails. Text typed into
//! an editor is malformed most of the time, so every input produces a
//! best-effort node stream, and the [`ReaderState`] after the last node says
//! where the caret sits inside that node:
//! - Start tags, including partially typed names and attributes
//! - End tags
//! - Text content
//! - Processing instructions (opaque)

use super::scanner::{is_whitespace, Scanner};
use crate::reader::{AttributeValue, EndElement, Node, StartElement};

/// Lexical position of the caret within the last node produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaderState {
    /// Nothing read yet
    #[default]
    Bof,
    /// Inside an unterminated `<?...`
    InProcessingInstruction,
    /// Typing a start tag name
    InStartElement,
    /// Inside a start tag, between attributes
    AwaitingAttribute,
    /// Typing an end tag
    InEndElement,
    /// Typing an attribute name
    InAttributeName,
    /// After `name=`, before the opening quote
    InAttributeEquals,
    /// Inside a quoted attribute value
    InAttributeValue,
    /// After a closed tag, or inside text content
    InText,
}

/// Partial XML tokenizer
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    state: ReaderState,
    open_quote: Option<char>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given text
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            state: ReaderState::Bof,
            open_quote: None,
        }
    }

    /// Get the current reader state
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Check if all input has been consumed
    pub fn is_eof(&self) -> bool {
        self.scanner.is_eof()
    }

    /// Quote character of the attribute value still open at end of input
    pub fn open_quote(&self) -> Option<char> {
        match self.state {
            ReaderState::InAttributeValue => self.open_quote,
            _ => None,
        }
    }

    /// Get the next node, or None at end of input
    pub fn next_node(&mut self) -> Option<Node<'a>> {
        if self.scanner.is_eof() {
            return None;
        }

        self.open_quote = None;

        if self.scanner.peek() != Some(b'<') {
            return Some(self.read_text());
        }

        self.scanner.advance(1);

        // A lone '<' at the end is the start of an element name
        match self.scanner.peek() {
            None => {
                self.state = ReaderState::InStartElement;
                Some(Node::StartElement(StartElement::new("")))
            }
            Some(b'?') => {
                self.scanner.advance(1);
                Some(self.read_processing_instruction())
            }
            Some(b'/') => {
                self.scanner.advance(1);
                Some(self.read_end_tag())
            }
            Some(_) => Some(self.read_start_tag()),
        }
    }

    fn read_text(&mut self) -> Node<'a> {
        let start = self.scanner.position();
        let end = self.scanner.find_tag_start().unwrap_or(self.scanner.input_len());
        self.scanner.set_position(end);
        self.state = ReaderState::InText;
        Node::Text(self.scanner.slice(start, end))
    }

    fn read_processing_instruction(&mut self) -> Node<'a> {
        match self.scanner.find_pi_end() {
            Some(end) => {
                self.scanner.set_position(end + 1);
                self.state = ReaderState::InText;
            }
            None => {
                self.scanner.set_position(self.scanner.input_len());
                self.state = ReaderState::InProcessingInstruction;
            }
        }
        Node::ProcessingInstruction
    }

    fn read_end_tag(&mut self) -> Node<'a> {
        let start = self.scanner.position();
        let name_end = self.scanner.find_name_end().unwrap_or(self.scanner.input_len());
        let name = self.scanner.slice(start, name_end);

        self.scanner.set_position(name_end);
        match self.scanner.find_tag_end() {
            Some(end) => {
                self.scanner.set_position(end + 1);
                self.state = ReaderState::InText;
            }
            None => {
                self.scanner.set_position(self.scanner.input_len());
                self.state = ReaderState::InEndElement;
            }
        }

        Node::EndElement(EndElement { name })
    }

    fn read_start_tag(&mut self) -> Node<'a> {
        let start = self.scanner.position();

        let Some(name_end) = self.scanner.find_name_end() else {
            // Still typing the name
            self.scanner.set_position(self.scanner.input_len());
            self.state = ReaderState::InStartElement;
            return Node::StartElement(StartElement::new(self.scanner.slice_from(start)));
        };

        if self.scanner.byte_at(name_end) == Some(b'>') {
            let self_closing = name_end > start && self.scanner.byte_at(name_end - 1) == Some(b'/');
            let name = if self_closing {
                self.scanner.slice(start, name_end - 1)
            } else {
                self.scanner.slice(start, name_end)
            };
            self.scanner.set_position(name_end + 1);
            self.state = ReaderState::InText;
            let mut element = StartElement::new(name);
            element.self_closing = self_closing;
            return Node::StartElement(element);
        }

        let mut element = StartElement::new(self.scanner.slice(start, name_end));
        self.scanner.set_position(name_end);
        self.state = ReaderState::AwaitingAttribute;
        self.read_attributes(&mut element);
        Node::StartElement(element)
    }

    /// Scan attributes until the tag closes or input runs out
    fn read_attributes(&mut self, element: &mut StartElement<'a>) {
        let mut attribute_name = "";
        let mut start = self.scanner.position();
        let mut quote = b'"';

        while let Some(b) = self.scanner.peek() {
            let pos = self.scanner.position();

            match self.state {
                ReaderState::AwaitingAttribute => {
                    if b == b'>' {
                        self.close_tag(element, pos);
                        return;
                    }
                    if !is_whitespace(b) && b != b'/' {
                        start = pos;
                        self.state = ReaderState::InAttributeName;
                    }
                }
                ReaderState::InAttributeName => {
                    if b == b'>' {
                        // Malformed, drop the attribute and close the tag
                        self.close_tag(element, pos);
                        return;
                    }
                    if is_whitespace(b) {
                        // Malformed, drop this attribute and carry on
                        self.state = ReaderState::AwaitingAttribute;
                    } else if b == b'=' {
                        attribute_name = self.scanner.slice(start, pos);
                        self.state = ReaderState::InAttributeEquals;
                    }
                }
                ReaderState::InAttributeEquals => {
                    if b == b'>' {
                        self.close_tag(element, pos);
                        return;
                    }
                    if b == b'"' || b == b'\'' {
                        quote = b;
                        start = pos + 1;
                        self.state = ReaderState::InAttributeValue;
                    }
                }
                ReaderState::InAttributeValue => {
                    if b == quote {
                        let value = self.scanner.slice(start, pos);
                        element.attributes.insert(attribute_name, AttributeValue::Value(value));
                        self.state = ReaderState::AwaitingAttribute;
                    }
                }
                _ => {}
            }

            self.scanner.advance(1);
        }

        // Input ended inside the tag: record whatever is live
        match self.state {
            ReaderState::InAttributeValue => {
                let value = self.scanner.slice_from(start);
                element.attributes.insert(attribute_name, AttributeValue::Value(value));
                element.current_attribute = Some(attribute_name);
                self.open_quote = Some(char::from(quote));
            }
            ReaderState::InAttributeEquals => {
                element.attributes.insert(attribute_name, AttributeValue::Pending);
                element.current_attribute = Some(attribute_name);
            }
            ReaderState::InAttributeName => {
                element.current_attribute = Some(self.scanner.slice_from(start));
            }
            _ => {}
        }
    }

    fn close_tag(&mut self, element: &mut StartElement<'a>, gt: usize) {
        if gt > 0 && self.scanner.byte_at(gt - 1) == Some(b'/') {
            element.self_closing = true;
        }
        self.scanner.set_position(gt + 1);
        self.state = ReaderState::InText;
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(text: &str) -> (Vec<Node<'_>>, ReaderState) {
        let mut tokenizer = Tokenizer::new(text);
        let nodes: Vec<_> = tokenizer.by_ref().collect();
        (nodes, tokenizer.state())
    }

    fn last_start(text: &str) -> (StartElement<'_>, ReaderState) {
        let (nodes, state) = read_all(text);
        match nodes.last() {
            Some(Node::StartElement(e)) => (e.clone(), state),
            other => panic!("expected start element, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let (nodes, state) = read_all("");
        assert!(nodes.is_empty());
        assert_eq!(state, ReaderState::Bof);
    }

    #[test]
    fn test_lone_open_bracket() {
        let (elem, state) = last_start("<");
        assert_eq!(elem.name, "");
        assert_eq!(state, ReaderState::InStartElement);
    }

    #[test]
    fn test_partial_start_tag_name() {
        let (elem, state) = last_start("<MyD");
        assert_eq!(elem.name, "MyD");
        assert_eq!(state, ReaderState::InStartElement);
    }

    #[test]
    fn test_complete_document() {
        let (nodes, state) = read_all("<a x='1'><b/>text</a>");
        assert_eq!(nodes.len(), 4);
        assert!(matches!(&nodes[1], Node::StartElement(e) if e.name == "b" && e.self_closing));
        assert_eq!(nodes[2], Node::Text("text"));
        assert_eq!(nodes[3], Node::EndElement(EndElement { name: "a" }));
        assert_eq!(state, ReaderState::InText);
    }

    #[test]
    fn test_self_closing_after_attributes() {
        let (elem, state) = last_start("<entity name='x' />");
        assert!(elem.self_closing);
        assert_eq!(elem.attributes.get("name"), Some(&AttributeValue::Value("x")));
        assert_eq!(state, ReaderState::InText);
    }

    #[test]
    fn test_processing_instruction() {
        let (nodes, state) = read_all("<?xml version='1.0'?>");
        assert_eq!(nodes, vec![Node::ProcessingInstruction]);
        assert_eq!(state, ReaderState::InText);

        let (nodes, state) = read_all("<?xml vers");
        assert_eq!(nodes, vec![Node::ProcessingInstruction]);
        assert_eq!(state, ReaderState::InProcessingInstruction);
    }

    #[test]
    fn test_partial_end_tag() {
        let (nodes, state) = read_all("<fetch></fe");
        assert_eq!(nodes.last(), Some(&Node::EndElement(EndElement { name: "fe" })));
        assert_eq!(state, ReaderState::InEndElement);
    }

    #[test]
    fn test_awaiting_attribute() {
        let (elem, state) = last_start("<MyDoc ");
        assert_eq!(elem.name, "MyDoc");
        assert!(elem.current_attribute.is_none());
        assert_eq!(state, ReaderState::AwaitingAttribute);
    }

    #[test]
    fn test_partial_attribute_name() {
        let (elem, state) = last_start("<p a='1' sur");
        assert_eq!(elem.current_attribute, Some("sur"));
        assert_eq!(elem.attributes.len(), 1);
        assert_eq!(state, ReaderState::InAttributeName);
    }

    #[test]
    fn test_attribute_equals() {
        let (elem, state) = last_start("<p gender=");
        assert_eq!(elem.current_attribute, Some("gender"));
        assert_eq!(elem.attributes.get("gender"), Some(&AttributeValue::Pending));
        assert_eq!(state, ReaderState::InAttributeEquals);
    }

    #[test]
    fn test_partial_attribute_value() {
        let mut tokenizer = Tokenizer::new("<p gender='Ma");
        let node = tokenizer.next_node();
        let elem = node.as_ref().and_then(Node::as_start_element).unwrap();
        assert_eq!(elem.current_value(), Some("Ma"));
        assert_eq!(tokenizer.state(), ReaderState::InAttributeValue);
        assert_eq!(tokenizer.open_quote(), Some('\''));
    }

    #[test]
    fn test_space_aborts_only_that_attribute() {
        let (elem, state) = last_start("<p junk surname=\"x\" ");
        assert!(!elem.attributes.contains("junk"));
        assert_eq!(elem.attributes.get("surname"), Some(&AttributeValue::Value("x")));
        assert_eq!(state, ReaderState::AwaitingAttribute);
    }

    #[test]
    fn test_quote_inside_other_quote() {
        let (elem, _) = last_start("<p a=\"it's\">");
        assert_eq!(elem.attributes.get("a"), Some(&AttributeValue::Value("it's")));
    }

    #[test]
    fn test_gt_in_equals_closes_tag() {
        let (nodes, state) = read_all("<a x=><b>");
        assert_eq!(nodes.len(), 2);
        assert!(matches!(&nodes[1], Node::StartElement(e) if e.name == "b"));
        assert_eq!(state, ReaderState::InText);
    }

    #[test]
    fn test_text_is_verbatim() {
        let (nodes, state) = read_all("<a>  Ma");
        assert_eq!(nodes.last(), Some(&Node::Text("  Ma")));
        assert_eq!(state, ReaderState::InText);
    }

    #[test]
    fn test_newline_separates_attributes() {
        let (elem, state) = last_start("<p\n  surname='x'\n  ");
        assert_eq!(elem.name, "p");
        assert_eq!(elem.attributes.get("surname"), Some(&AttributeValue::Value("x")));
        assert_eq!(state, ReaderState::AwaitingAttribute);
    }
}
