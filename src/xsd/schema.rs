use std::collections::HashMap;

use roxmltree::Node;
use tracing::debug;

use super::builtins::{self, SimpleKind};
use super::error::RefKind;
use super::{Attribute, ComplexType, Element, SimpleType, XsdError};

/// The resolved root container: the top-level declarations of one XSD
/// document plus three name indices built once at construction.
///
/// Declarations are held in flat vectors; cross-references between them are
/// resolved by name through the indices, never by owning pointers. The schema
/// is immutable after construction.
#[derive(Debug)]
pub struct Schema {
    pub name: String,
    pub complex_types: Vec<ComplexType>,
    pub simple_types: Vec<SimpleType>,
    pub elements: Vec<Element>,
    pub attributes: Vec<Attribute>,

    element_refs: HashMap<String, usize>,
    attr_refs: HashMap<String, usize>,
    type_refs: HashMap<String, TypeSlot>,
}

/// Position of a named type in the owning vector. Simple and complex types
/// share one symbol space, as they do in XSD.
#[derive(Copy, Clone, Debug)]
enum TypeSlot {
    Complex(usize),
    Simple(usize),
}

/// A borrowed view of either type variant; the walker's exhaustive branch
/// point.
#[derive(Copy, Clone, Debug)]
pub enum TypeDef<'a> {
    Complex(&'a ComplexType),
    Simple(&'a SimpleType),
}

impl Schema {
    pub(super) fn map_from_xml(schema: Node, name: &str) -> Result<Self, XsdError> {
        if schema.tag_name().name() != "schema" {
            return Err(XsdError::NotASchema(schema.tag_name().name().to_owned()));
        }

        let mut complex_types = Vec::new();
        let mut simple_types = Vec::new();
        let mut elements = Vec::new();
        let mut attributes = Vec::new();

        for child in schema.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "complexType" => complex_types.push(ComplexType::map_from_xml(child)?),
                "simpleType" => simple_types.push(SimpleType::map_from_xml(child)?),
                "element" => elements.push(Element::map_from_xml(child)?),
                "attribute" => attributes.push(Attribute::map_from_xml(child)),
                "annotation" => {}
                // No cross-document assembly, no groups, no identity
                // constraints. Anything else is rejected, not skipped.
                tag => {
                    return Err(XsdError::UnsupportedConstruct {
                        construct: tag.to_owned(),
                        context: "schema".to_owned(),
                    })
                }
            }
        }

        Ok(Self::new(
            name.to_owned(),
            complex_types,
            simple_types,
            elements,
            attributes,
        ))
    }

    /// Builds the resolved schema from its declaration lists. The name
    /// indices are populated here, exactly once; anonymous declarations are
    /// never resolvable by reference and are skipped.
    fn new(
        name: String,
        complex_types: Vec<ComplexType>,
        simple_types: Vec<SimpleType>,
        elements: Vec<Element>,
        attributes: Vec<Attribute>,
    ) -> Self {
        let mut element_refs = HashMap::new();
        for (i, element) in elements.iter().enumerate() {
            if let Some(name) = &element.name {
                element_refs.insert(name.clone(), i);
            }
        }

        let mut attr_refs = HashMap::new();
        for (i, attribute) in attributes.iter().enumerate() {
            if let Some(name) = &attribute.name {
                attr_refs.insert(name.clone(), i);
            }
        }

        let mut type_refs = HashMap::new();
        for (i, complex_type) in complex_types.iter().enumerate() {
            if let Some(name) = &complex_type.name {
                type_refs.insert(name.clone(), TypeSlot::Complex(i));
            }
        }
        for (i, simple_type) in simple_types.iter().enumerate() {
            if let Some(name) = &simple_type.name {
                type_refs.insert(name.clone(), TypeSlot::Simple(i));
            }
        }

        debug!(
            schema = %name,
            types = type_refs.len(),
            elements = element_refs.len(),
            attributes = attr_refs.len(),
            "built reference indices"
        );

        Self {
            name,
            complex_types,
            simple_types,
            elements,
            attributes,
            element_refs,
            attr_refs,
            type_refs,
        }
    }

    /// Resolves an element's `ref` to the referenced top-level declaration;
    /// an element without `ref` is its own definition.
    pub fn deref_element<'a>(&'a self, element: &'a Element) -> Result<&'a Element, XsdError> {
        match &element.ref_ {
            None => Ok(element),
            Some(name) => self
                .element_refs
                .get(name)
                .map(|&i| &self.elements[i])
                .ok_or_else(|| XsdError::UnresolvedReference {
                    kind: RefKind::Element,
                    name: name.clone(),
                }),
        }
    }

    /// Resolves an attribute's `ref`, same contract as [`Self::deref_element`].
    pub fn deref_attribute<'a>(
        &'a self,
        attribute: &'a Attribute,
    ) -> Result<&'a Attribute, XsdError> {
        match &attribute.ref_ {
            None => Ok(attribute),
            Some(name) => self
                .attr_refs
                .get(name)
                .map(|&i| &self.attributes[i])
                .ok_or_else(|| XsdError::UnresolvedReference {
                    kind: RefKind::Attribute,
                    name: name.clone(),
                }),
        }
    }

    /// Looks up a declared (non-builtin) type by name.
    pub fn lookup_type(&self, name: &str) -> Option<TypeDef<'_>> {
        self.type_refs.get(name).map(|slot| match *slot {
            TypeSlot::Complex(i) => TypeDef::Complex(&self.complex_types[i]),
            TypeSlot::Simple(i) => TypeDef::Simple(&self.simple_types[i]),
        })
    }

    /// Resolves a `ref` on either type variant; a type without `ref` is its
    /// own definition.
    pub fn deref_type<'a>(&'a self, type_def: TypeDef<'a>) -> Result<TypeDef<'a>, XsdError> {
        let ref_ = match type_def {
            TypeDef::Complex(complex_type) => &complex_type.ref_,
            TypeDef::Simple(simple_type) => &simple_type.ref_,
        };
        match ref_ {
            None => Ok(type_def),
            Some(name) => {
                self.lookup_type(name)
                    .ok_or_else(|| XsdError::UnresolvedReference {
                        kind: RefKind::Type,
                        name: name.clone(),
                    })
            }
        }
    }

    /// Resolves a simple type to its primitive kind.
    ///
    /// The type's own name is checked against the built-in table first;
    /// otherwise the restriction base chain is walked until it grounds out at
    /// a built-in primitive. A dangling base is an unresolved reference and a
    /// revisited name is a cycle; both are fatal here rather than deferred.
    pub fn simple_kind(&self, simple_type: &SimpleType) -> Result<SimpleKind, XsdError> {
        let mut seen = Vec::new();
        self.simple_kind_inner(simple_type, &mut seen)
    }

    fn simple_kind_inner(
        &self,
        simple_type: &SimpleType,
        seen: &mut Vec<String>,
    ) -> Result<SimpleKind, XsdError> {
        if let Some(name) = &simple_type.name {
            if let Some(kind) = builtins::builtin_kind(name) {
                return Ok(kind);
            }
            if seen.iter().any(|visited| visited == name) {
                return Err(XsdError::CyclicRestriction(name.clone()));
            }
            seen.push(name.clone());
        }

        let base = simple_type
            .restriction
            .as_ref()
            .and_then(|restriction| restriction.base.as_ref())
            .ok_or_else(|| {
                XsdError::UngroundedSimpleType(
                    simple_type
                        .name
                        .clone()
                        .unwrap_or_else(|| "<anonymous>".to_owned()),
                )
            })?;

        if let Some(kind) = builtins::builtin_kind(base) {
            return Ok(kind);
        }
        match self.lookup_type(base) {
            Some(TypeDef::Simple(next)) => self.simple_kind_inner(next, seen),
            Some(TypeDef::Complex(_)) => Err(XsdError::UnsupportedConstruct {
                construct: "restriction of a complex type".to_owned(),
                context: base.clone(),
            }),
            None => Err(XsdError::UnresolvedReference {
                kind: RefKind::Type,
                name: base.clone(),
            }),
        }
    }
}
