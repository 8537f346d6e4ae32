//! Schema Model - Arena of compiled declarations
//!
//! The content-model graph the completion engine walks. Types, element
//! declarations and attribute declarations live in flat arenas addressed by
//! `u32` ids. Compiling XSD text into this shape is the host's job; the
//! engine only ever reads it.
//!
//! A derived complex type stores its full effective content model. Attribute
//! uses are merged along the base chain at lookup time.

pub mod annotate;
pub mod types;

pub use types::{
    AttributeDecl, AttributeId, Choice, ComplexType, ContentModel, Documentation, ElementDecl,
    ElementId, Facet, Occurs, Particle, SchemaType, Sequence, SimpleType, Term, TypeCode, TypeId,
};

/// A compiled set of schema declarations
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    types: Vec<SchemaType>,
    elements: Vec<ElementDecl>,
    attributes: Vec<AttributeDecl>,
    globals: Vec<ElementId>,
}

impl SchemaSet {
    /// Create an empty schema set
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Add a simple type
    pub fn add_simple_type(&mut self, ty: SimpleType) -> TypeId {
        self.push_type(SchemaType::Simple(ty))
    }

    /// Add a complex type
    pub fn add_complex_type(&mut self, ty: ComplexType) -> TypeId {
        self.push_type(SchemaType::Complex(ty))
    }

    fn push_type(&mut self, ty: SchemaType) -> TypeId {
        let id = self.types.len() as TypeId;
        self.types.push(ty);
        id
    }

    /// Get a complex type for further construction (e.g. recursive content)
    pub fn complex_type_mut(&mut self, id: TypeId) -> Option<&mut ComplexType> {
        match self.types.get_mut(id as usize)? {
            SchemaType::Complex(t) => Some(t),
            SchemaType::Simple(_) => None,
        }
    }

    /// Add a local element declaration
    pub fn add_element(&mut self, decl: ElementDecl) -> ElementId {
        let id = self.elements.len() as ElementId;
        self.elements.push(decl);
        id
    }

    /// Add a global (root) element declaration
    pub fn add_global_element(&mut self, decl: ElementDecl) -> ElementId {
        let id = self.add_element(decl);
        self.globals.push(id);
        id
    }

    /// Add an attribute declaration
    pub fn add_attribute(&mut self, decl: AttributeDecl) -> AttributeId {
        let id = self.attributes.len() as AttributeId;
        self.attributes.push(decl);
        id
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Get a type by id
    pub fn get_type(&self, id: TypeId) -> Option<&SchemaType> {
        self.types.get(id as usize)
    }

    /// Get a complex type by id
    pub fn complex_type(&self, id: TypeId) -> Option<&ComplexType> {
        self.get_type(id)?.as_complex()
    }

    /// Get an element declaration by id
    pub fn element(&self, id: ElementId) -> Option<&ElementDecl> {
        self.elements.get(id as usize)
    }

    /// Get an attribute declaration by id
    pub fn attribute(&self, id: AttributeId) -> Option<&AttributeDecl> {
        self.attributes.get(id as usize)
    }

    /// Global element declarations in declaration order
    pub fn global_elements(&self) -> impl Iterator<Item = (ElementId, &ElementDecl)> + '_ {
        self.globals
            .iter()
            .filter_map(|&id| self.element(id).map(|decl| (id, decl)))
    }

    /// Find a global element by exact name
    pub fn find_global(&self, name: &str) -> Option<ElementId> {
        self.global_elements()
            .find(|(_, decl)| decl.name == name)
            .map(|(id, _)| id)
    }

    /// Find a named type
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .position(|t| t.name() == Some(name))
            .map(|i| i as TypeId)
    }

    /// All complex types in the set
    pub fn complex_types(&self) -> impl Iterator<Item = (TypeId, &ComplexType)> + '_ {
        self.types
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_complex().map(|c| (i as TypeId, c)))
    }

    /// Complex types whose direct base is `base`
    pub fn derived_types(&self, base: TypeId) -> impl Iterator<Item = (TypeId, &ComplexType)> + '_ {
        self.complex_types().filter(move |(_, t)| t.base == Some(base))
    }

    /// Check if any complex type directly derives from `base`
    pub fn has_derived_types(&self, base: TypeId) -> bool {
        self.derived_types(base).next().is_some()
    }

    /// Check if any complex type in the set extends a base type
    pub fn has_extension_types(&self) -> bool {
        self.complex_types().any(|(_, t)| t.base.is_some())
    }

    /// Check if `ty` is `base` or derives from it through the base chain
    pub fn is_derived_from(&self, ty: TypeId, base: TypeId) -> bool {
        let mut current = Some(ty);
        // Bounded by the arena size so a cyclic base chain cannot loop forever
        for _ in 0..=self.types.len() {
            match current {
                Some(id) if id == base => return true,
                Some(id) => current = self.complex_type(id).and_then(|t| t.base),
                None => return false,
            }
        }
        false
    }

    /// Attribute uses of a type, own declarations first, then inherited ones
    ///
    /// A name declared on a derived type hides the same name on its bases.
    pub fn attribute_uses(&self, ty: TypeId) -> Vec<AttributeId> {
        let mut uses: Vec<AttributeId> = Vec::new();
        let mut current = self.complex_type(ty);
        let mut depth = 0;

        while let Some(complex) = current {
            for &id in &complex.attributes {
                let Some(decl) = self.attribute(id) else { continue };
                let hidden = uses
                    .iter()
                    .any(|&u| self.attribute(u).is_some_and(|a| a.name == decl.name));
                if !hidden {
                    uses.push(id);
                }
            }

            depth += 1;
            if depth > self.types.len() {
                break;
            }
            current = complex.base.and_then(|b| self.complex_type(b));
        }

        uses
    }

    /// Find an attribute use of a type by name
    pub fn find_attribute_use(&self, ty: TypeId, name: &str) -> Option<AttributeId> {
        self.attribute_uses(ty)
            .into_iter()
            .find(|&id| self.attribute(id).is_some_and(|a| a.name == name))
    }

    /// Simple type governing the text content of `ty`
    ///
    /// That is `ty` itself when simple, or the simple content of a complex type.
    pub fn text_type(&self, ty: TypeId) -> Option<&SimpleType> {
        match self.get_type(ty)? {
            SchemaType::Simple(simple) => Some(simple),
            SchemaType::Complex(ComplexType {
                content: ContentModel::Simple(inner),
                ..
            }) => self.get_type(*inner)?.as_simple(),
            SchemaType::Complex(_) => None,
        }
    }
}
