//! Property-based tests for the tokenizer and the replay engine.
//!
//! 1. The tokenizer terminates and never panics on arbitrary text.
//! 2. Every prefix of a document that is valid against the schema replays
//!    without being marked invalid (except while a close tag is being typed).

mod common;

use proptest::prelude::*;
use xmlcomplete::complete::{FoldOutcome, ParseContext};
use xmlcomplete::core::{ReaderState, Tokenizer};

// -- Document Generation Strategies --

/// Attribute list for a Person-typed element, in random order
fn attributes() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        prop::option::of(prop_oneof![Just("Male"), Just("Female")]),
        prop::option::of(any::<bool>()),
        any::<bool>(),
    )
        .prop_map(|(surname, gender, manager, reversed)| {
            let mut attrs: Vec<String> = Vec::new();
            if surname {
                attrs.push(" surname=\"Smith\"".to_string());
            }
            if let Some(gender) = gender {
                attrs.push(format!(" gender='{gender}'"));
            }
            if let Some(manager) = manager {
                attrs.push(format!(" manager=\"{manager}\""));
            }
            if reversed {
                attrs.reverse();
            }
            attrs.concat()
        })
}

/// Content of a Person, or of a Child when `child` is set
fn person_body(child: bool) -> impl Strategy<Value = String> {
    (any::<bool>(), 0u8..100, any::<bool>()).prop_map(move |(forename, age, toy)| {
        let mut body = String::new();
        if forename {
            body.push_str("<forename>Ann</forename>");
        }
        body.push_str(&format!("<Age>{age}</Age>"));
        if child && toy {
            body.push_str("<FavouriteToy>Ball</FavouriteToy>");
        }
        body
    })
}

fn person(name: &'static str, prefix: &'static str, child: bool) -> impl Strategy<Value = String> {
    (attributes(), person_body(child))
        .prop_map(move |(attrs, body)| format!("<{name}{prefix}{attrs}>{body}</{name}>"))
}

fn staff() -> impl Strategy<Value = String> {
    prop_oneof![
        person("Staff", "", false),
        person("Staff", " xsi:type=\"Child\"", true),
        Just("<Staff xsi:nil=\"true\" />".to_string()),
    ]
}

fn member() -> impl Strategy<Value = String> {
    prop_oneof![person("Person", "", false), person("Child", "", true)]
}

/// A complete document valid against the staff schema
fn document() -> impl Strategy<Value = String> {
    (
        prop::option::of(prop::collection::vec(member(), 0..3)),
        prop::collection::vec(staff(), 0..3),
        prop_oneof![Just(""), Just("\n  ")],
    )
        .prop_map(|(members, staff, sep)| {
            let mut doc = String::from("<?xml version=\"1.0\"?>\n<MyDoc>");
            if let Some(members) = members {
                doc.push_str(sep);
                doc.push_str("<Members>");
                doc.push_str(&members.join(sep));
                doc.push_str("</Members>");
            }
            for s in staff {
                doc.push_str(sep);
                doc.push_str(&s);
            }
            doc.push_str(sep);
            doc.push_str("</MyDoc>");
            doc
        })
}

// -- Properties --

proptest! {
    #[test]
    fn tokenizer_terminates(text in "[<>/=?'\" a-zA-Z:\t\n]{0,64}") {
        let mut tokenizer = Tokenizer::new(&text);
        let mut nodes = 0usize;
        while tokenizer.next_node().is_some() {
            nodes += 1;
            prop_assert!(nodes <= text.len(), "more nodes than bytes in {:?}", text);
        }
        prop_assert!(tokenizer.is_eof());
    }

    #[test]
    fn suggest_never_panics(text in any::<String>()) {
        let engine = common::staff_engine_with_xsi();
        let _ = engine.suggest(&text);
    }

    #[test]
    fn valid_prefixes_replay_cleanly(doc in document()) {
        let schema = common::staff_schema();
        let cuts = doc.char_indices().map(|(i, _)| i).chain(std::iter::once(doc.len()));

        for cut in cuts {
            let prefix = &doc[..cut];
            let mut ctx = ParseContext::new(&schema, prefix);
            prop_assert_eq!(ctx.fold(), FoldOutcome::Complete, "prefix {:?}", prefix);
            prop_assert!(
                ctx.is_valid() || ctx.state() == ReaderState::InEndElement,
                "prefix {:?} marked invalid",
                prefix
            );
        }
    }
}
