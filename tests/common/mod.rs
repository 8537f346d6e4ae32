//! Shared schema fixtures for integration tests

#![allow(dead_code)]

use std::sync::Once;

use xmlcomplete::schema::{
    AttributeDecl, Choice, ComplexType, ContentModel, ElementDecl, Occurs, Particle, SchemaSet,
    Sequence, SimpleType, TypeCode,
};
use xmlcomplete::{Autocomplete, AutocompleteOptions};

static TRACING_INIT: Once = Once::new();

/// Install a test subscriber when `RUST_LOG` is set
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        }
    });
}

/// Staff document schema
///
/// ```text
/// MyDoc (nillable): Root = sequence(Members 0..1, Staff 0..unbounded)
/// Members: ArrayOfPerson = choice(Person | Child) 0..unbounded
/// Staff (nillable): Person
/// Person = sequence(forename 0..1, Age 1..1) @surname @gender @manager
/// Child extends Person = sequence(forename, Age, FavouriteToy 0..1) @school
/// ```
pub fn staff_schema() -> SchemaSet {
    let mut schema = SchemaSet::new();

    let string = schema.add_simple_type(SimpleType::new(TypeCode::String).named("string"));
    let int = schema.add_simple_type(SimpleType::new(TypeCode::Integer).named("int"));
    let boolean = schema.add_simple_type(SimpleType::new(TypeCode::Boolean).named("boolean"));
    let gender = schema.add_simple_type(
        SimpleType::new(TypeCode::String)
            .named("Gender")
            .with_enumeration(["Male", "Female"]),
    );

    let surname = schema.add_attribute(AttributeDecl::new("surname", string));
    let gender_attr = schema.add_attribute(AttributeDecl::new("gender", gender));
    let manager = schema.add_attribute(AttributeDecl::new("manager", boolean));
    let school = schema.add_attribute(AttributeDecl::new("school", string));

    let forename = schema.add_element(ElementDecl::new("forename", string));
    let age = schema.add_element(ElementDecl::new("Age", int));
    let toy = schema.add_element(ElementDecl::new("FavouriteToy", string));

    let person = schema.add_complex_type(
        ComplexType::new(ContentModel::Sequence(Sequence::new(vec![
            Particle::element(forename, Occurs::OPTIONAL),
            Particle::element(age, Occurs::ONCE),
        ])))
        .named("Person")
        .with_attributes(vec![surname, gender_attr, manager]),
    );
    let child = schema.add_complex_type(
        ComplexType::new(ContentModel::Sequence(Sequence::new(vec![
            Particle::element(forename, Occurs::OPTIONAL),
            Particle::element(age, Occurs::ONCE),
            Particle::element(toy, Occurs::OPTIONAL),
        ])))
        .named("Child")
        .with_base(person)
        .with_attributes(vec![school]),
    );

    let person_item = schema.add_element(ElementDecl::new("Person", person));
    let child_item = schema.add_element(ElementDecl::new("Child", child));
    let array = schema.add_complex_type(
        ComplexType::new(ContentModel::Choice(
            Choice::new(vec![person_item, child_item]).repeated(Occurs::ANY),
        ))
        .named("ArrayOfPerson"),
    );

    let members = schema.add_element(ElementDecl::new("Members", array));
    let staff = schema.add_element(ElementDecl::new("Staff", person).nillable());
    let root = schema.add_complex_type(
        ComplexType::new(ContentModel::Sequence(Sequence::new(vec![
            Particle::element(members, Occurs::OPTIONAL),
            Particle::element(staff, Occurs::ANY),
        ])))
        .named("Root"),
    );

    schema.add_global_element(ElementDecl::new("MyDoc", root).nillable());
    schema
}

/// Query schema
///
/// ```text
/// fetch: sequence(choice(entity | order) min..unbounded)
/// entity: Entity (empty) @name
/// order: Order (empty) @attribute @descending
/// ```
pub fn fetch_schema(min_items: u32) -> SchemaSet {
    let mut schema = SchemaSet::new();

    let string = schema.add_simple_type(SimpleType::new(TypeCode::String).named("string"));
    let boolean = schema.add_simple_type(SimpleType::new(TypeCode::Boolean).named("boolean"));

    let name = schema.add_attribute(AttributeDecl::new("name", string).required());
    let attribute = schema.add_attribute(AttributeDecl::new("attribute", string));
    let descending = schema.add_attribute(AttributeDecl::new("descending", boolean));

    let entity_type = schema.add_complex_type(
        ComplexType::new(ContentModel::Empty)
            .named("Entity")
            .with_attributes(vec![name]),
    );
    let order_type = schema.add_complex_type(
        ComplexType::new(ContentModel::Empty)
            .named("Order")
            .with_attributes(vec![attribute, descending]),
    );

    let entity = schema.add_element(ElementDecl::new("entity", entity_type));
    let order = schema.add_element(ElementDecl::new("order", order_type));
    let fetch = schema.add_complex_type(
        ComplexType::new(ContentModel::Sequence(Sequence::new(vec![Particle::choice(
            Choice::new(vec![entity, order]).repeated(Occurs::at_least(min_items)),
        )])))
        .named("Fetch"),
    );

    schema.add_global_element(ElementDecl::new("fetch", fetch));
    schema
}

/// Engine over the staff schema
pub fn staff_engine() -> Autocomplete {
    init_tracing();
    Autocomplete::new(staff_schema())
}

/// Engine over the staff schema with `xmlns:xsi` enabled
pub fn staff_engine_with_xsi() -> Autocomplete {
    init_tracing();
    Autocomplete::with_options(staff_schema(), AutocompleteOptions::default().with_uses_xsi(true))
}

/// Engine over the query schema
pub fn fetch_engine(min_items: u32) -> Autocomplete {
    init_tracing();
    Autocomplete::new(fetch_schema(min_items))
}
