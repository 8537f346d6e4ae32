//! Documentation setup for schema objects
//!
//! Attaches a title and description to a named type, to an element inside a
//! named complex type, or to an attribute of a named complex type. These run
//! once during setup, before the schema is handed to the completion engine.

use super::{ContentModel, Documentation, ElementId, SchemaSet, SchemaType, Term, TypeId};
use crate::error::{Result, SchemaError};

impl SchemaSet {
    /// Document a named type
    pub fn annotate_type(&mut self, type_name: &str, title: &str, description: &str) -> Result<()> {
        let id = self.require_type(type_name)?;
        let slot = self
            .types
            .get_mut(id as usize)
            .map(SchemaType::documentation_mut)
            .ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))?;
        set_once(slot, format!("type {type_name}"), title, description)
    }

    /// Document an element declared in a named complex type's sequence or choice
    pub fn annotate_element(
        &mut self,
        type_name: &str,
        element_name: &str,
        title: &str,
        description: &str,
    ) -> Result<()> {
        let id = self.require_type(type_name)?;
        let complex = self
            .complex_type(id)
            .ok_or_else(|| SchemaError::NotComplexType(type_name.to_string()))?;

        let candidates: Vec<ElementId> = match &complex.content {
            ContentModel::Sequence(seq) => seq
                .particles
                .iter()
                .flat_map(|p| match &p.term {
                    Term::Element(e) => vec![*e],
                    Term::Choice(choice) => choice.alternatives.clone(),
                })
                .collect(),
            ContentModel::Choice(choice) => choice.alternatives.clone(),
            _ => return Err(SchemaError::UnsupportedContent(type_name.to_string())),
        };

        let element = candidates
            .into_iter()
            .find(|&e| self.element(e).is_some_and(|decl| decl.name == element_name))
            .ok_or_else(|| SchemaError::UnknownElement {
                type_name: type_name.to_string(),
                element: element_name.to_string(),
            })?;

        let slot = &mut self.elements[element as usize].documentation;
        set_once(slot, format!("element {element_name}"), title, description)
    }

    /// Document an attribute (declared or inherited) of a named complex type
    pub fn annotate_attribute(
        &mut self,
        type_name: &str,
        attribute_name: &str,
        title: &str,
        description: &str,
    ) -> Result<()> {
        let id = self.require_type(type_name)?;
        if self.complex_type(id).is_none() {
            return Err(SchemaError::NotComplexType(type_name.to_string()));
        }

        let attribute = self
            .find_attribute_use(id, attribute_name)
            .ok_or_else(|| SchemaError::UnknownAttribute {
                type_name: type_name.to_string(),
                attribute: attribute_name.to_string(),
            })?;

        let slot = &mut self.attributes[attribute as usize].documentation;
        set_once(slot, format!("attribute {attribute_name}"), title, description)
    }

    fn require_type(&self, type_name: &str) -> Result<TypeId> {
        self.find_type(type_name)
            .ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))
    }
}

fn set_once(
    slot: &mut Option<Documentation>,
    what: String,
    title: &str,
    description: &str,
) -> Result<()> {
    if slot.is_some() {
        return Err(SchemaError::AlreadyDocumented(what));
    }
    *slot = Some(Documentation::new(title, description));
    Ok(())
}
