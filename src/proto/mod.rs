pub mod emit;
pub mod naming;

use std::collections::HashSet;

use tracing::debug;

use crate::xsd::error::RefKind;
use crate::xsd::{builtins, Attribute, ComplexType, Element, Schema, SimpleKind, TypeDef, XsdError};

/// A protobuf message descriptor, prior to text rendering. Imports are kept
/// distinct and in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    pub imports: Vec<String>,
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub label: Label,
}

/// What a field holds: a primitive scalar or a reference to another message
/// by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(SimpleKind),
    Message(String),
}

/// proto2 field label. Occurrence bounds are parsed but not consumed, so
/// every generated field is currently `Optional`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Label {
    Optional,
    Required,
    Repeated,
}

impl Message {
    fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    fn add_import(&mut self, name: &str) {
        if !self.imports.iter().any(|import| import == name) {
            self.imports.push(name.to_owned());
        }
    }
}

/// The type-mapping walker. Discovers every complex type reachable from the
/// top-level declarations and turns each into one [`Message`].
///
/// `seen` memoizes discovery by name and is written *before* recursing into a
/// type's children, which is what terminates self-referential schemas: a type
/// that (indirectly) contains a field of its own type hits the memo instead
/// of re-entering.
#[derive(Debug)]
pub struct ProtoBuilder<'s> {
    schema: &'s Schema,
    seen: HashSet<String>,
    messages: Vec<Message>,
}

impl<'s> ProtoBuilder<'s> {
    /// Walks the schema: all top-level complex types first, then all
    /// top-level elements, depth-first within each. Message order is
    /// completion order, so a nested type precedes its first container.
    pub fn from_schema(schema: &'s Schema) -> Result<Self, XsdError> {
        let mut builder = Self {
            schema,
            seen: HashSet::new(),
            messages: Vec::new(),
        };
        for complex_type in &schema.complex_types {
            builder.load_complex_type(complex_type, None)?;
        }
        for element in &schema.elements {
            builder.load_element(element)?;
        }
        Ok(builder)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Records one complex type as a message. Anonymous types are skipped
    /// unless the enclosing element supplies a `fallback_name`.
    fn load_complex_type(
        &mut self,
        complex_type: &ComplexType,
        fallback_name: Option<&str>,
    ) -> Result<(), XsdError> {
        let Some(name) = complex_type.name.as_deref().or(fallback_name) else {
            // Top-level anonymous types are unreachable by reference.
            return Ok(());
        };
        if !self.seen.insert(name.to_owned()) {
            return Ok(());
        }
        debug!(name, "discovered message type");

        let mut message = Message {
            name: name.to_owned(),
            imports: Vec::new(),
            fields: Vec::new(),
        };

        for attribute in &complex_type.attributes {
            let attribute = self.schema.deref_attribute(attribute)?;
            let field_name = attribute.name.clone().ok_or(XsdError::UnnamedAttribute)?;
            let kind = self.attribute_kind(attribute)?;
            message.add_field(Field {
                name: field_name,
                kind: FieldKind::Scalar(kind),
                label: Label::Optional,
            });
        }

        if let Some(sequence) = &complex_type.sequence {
            for element in &sequence.elements {
                let field = self.load_element(element)?;
                if let FieldKind::Message(type_name) = &field.kind {
                    let type_name = type_name.clone();
                    message.add_import(&type_name);
                }
                message.add_field(field);
            }
        } else if complex_type
            .choice
            .as_ref()
            .is_some_and(|choice| !choice.elements.is_empty())
        {
            // Choice content never produces fields; refuse it rather than
            // emit an empty message.
            return Err(XsdError::UnsupportedConstruct {
                construct: "choice".to_owned(),
                context: format!("complex type {name:?}"),
            });
        }

        self.messages.push(message);
        Ok(())
    }

    /// Maps one element to a field, discovering any complex type it drags in.
    fn load_element(&mut self, element: &Element) -> Result<Field, XsdError> {
        let schema = self.schema;
        let element = schema.deref_element(element)?;
        let name = element.name.clone().ok_or(XsdError::UnnamedElement)?;

        // An explicit type attribute wins: a declared type by name, or
        // failing that a built-in primitive.
        if let Some(type_name) = &element.type_ {
            return match schema.lookup_type(type_name) {
                Some(type_def) => self.type_def_field(schema.deref_type(type_def)?, name),
                None => match builtins::builtin_kind(type_name) {
                    Some(kind) => Ok(Field {
                        name,
                        kind: FieldKind::Scalar(kind),
                        label: Label::Optional,
                    }),
                    None => Err(XsdError::UnresolvedReference {
                        kind: RefKind::Type,
                        name: type_name.clone(),
                    }),
                },
            };
        }

        // Otherwise an inline anonymous definition; the element supplies the
        // name for an anonymous complex type.
        let child = match (
            element.complex_type.as_deref(),
            element.simple_type.as_deref(),
        ) {
            (Some(complex_type), _) => TypeDef::Complex(complex_type),
            (None, Some(simple_type)) => TypeDef::Simple(simple_type),
            (None, None) => return Err(XsdError::IncompleteElement(name)),
        };
        self.type_def_field(schema.deref_type(child)?, name)
    }

    fn type_def_field(&mut self, type_def: TypeDef<'_>, name: String) -> Result<Field, XsdError> {
        match type_def {
            TypeDef::Complex(complex_type) => {
                self.load_complex_type(complex_type, Some(&name))?;
                let message_name = complex_type.name.clone().unwrap_or_else(|| name.clone());
                Ok(Field {
                    name,
                    kind: FieldKind::Message(message_name),
                    label: Label::Optional,
                })
            }
            TypeDef::Simple(simple_type) => Ok(Field {
                name,
                kind: FieldKind::Scalar(self.schema.simple_kind(simple_type)?),
                label: Label::Optional,
            }),
        }
    }

    /// Attribute kinds: untyped attributes default to string, typed ones map
    /// through the built-in table or a declared simple type.
    fn attribute_kind(&self, attribute: &Attribute) -> Result<SimpleKind, XsdError> {
        let Some(type_name) = &attribute.type_ else {
            return Ok(SimpleKind::String);
        };
        if let Some(kind) = builtins::builtin_kind(type_name) {
            return Ok(kind);
        }
        match self.schema.lookup_type(type_name) {
            Some(TypeDef::Simple(simple_type)) => self.schema.simple_kind(simple_type),
            Some(TypeDef::Complex(_)) => Err(XsdError::UnsupportedConstruct {
                construct: "complex-typed attribute".to_owned(),
                context: type_name.clone(),
            }),
            None => Err(XsdError::UnresolvedReference {
                kind: RefKind::Type,
                name: type_name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(body: &str) -> Result<Vec<Message>, XsdError> {
        let text = format!(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">{body}</xs:schema>"#
        );
        let schema = crate::xsd::read_schema(&text, "Test", false)?;
        Ok(ProtoBuilder::from_schema(&schema)?.into_messages())
    }

    #[test]
    fn sequence_fields_keep_declaration_order() {
        let messages = build(
            r#"<xs:complexType name="Book">
                 <xs:sequence>
                   <xs:element name="title" type="xs:string"/>
                   <xs:element name="pageCount" type="xs:int"/>
                 </xs:sequence>
               </xs:complexType>"#,
        )
        .unwrap();
        assert_eq!(messages.len(), 1);
        let book = &messages[0];
        assert_eq!(book.name, "Book");
        assert_eq!(
            book.fields,
            vec![
                Field {
                    name: "title".to_owned(),
                    kind: FieldKind::Scalar(SimpleKind::String),
                    label: Label::Optional,
                },
                Field {
                    name: "pageCount".to_owned(),
                    kind: FieldKind::Scalar(SimpleKind::Int),
                    label: Label::Optional,
                },
            ]
        );
    }

    #[test]
    fn repeated_references_are_memoized_into_one_message() {
        let messages = build(
            r#"<xs:complexType name="Book">
                 <xs:sequence><xs:element name="title" type="xs:string"/></xs:sequence>
               </xs:complexType>
               <xs:complexType name="Shelf">
                 <xs:sequence><xs:element name="book" type="Book"/></xs:sequence>
               </xs:complexType>
               <xs:complexType name="Cart">
                 <xs:sequence><xs:element name="book" type="Book"/></xs:sequence>
               </xs:complexType>"#,
        )
        .unwrap();
        let names: Vec<_> = messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Book", "Shelf", "Cart"]);
        for referencing in &messages[1..] {
            assert_eq!(referencing.imports, vec!["Book".to_owned()]);
            assert_eq!(
                referencing.fields[0].kind,
                FieldKind::Message("Book".to_owned())
            );
        }
    }

    #[test]
    fn self_referential_type_terminates_with_self_import() {
        let messages = build(
            r#"<xs:complexType name="TreeNode">
                 <xs:sequence>
                   <xs:element name="value" type="xs:string"/>
                   <xs:element name="child" type="TreeNode"/>
                 </xs:sequence>
               </xs:complexType>"#,
        )
        .unwrap();
        assert_eq!(messages.len(), 1);
        let node = &messages[0];
        assert_eq!(node.imports, vec!["TreeNode".to_owned()]);
        assert_eq!(
            node.fields[1].kind,
            FieldKind::Message("TreeNode".to_owned())
        );
    }

    #[test]
    fn nested_type_is_emitted_before_its_container() {
        let messages = build(
            r#"<xs:complexType name="Book">
                 <xs:sequence><xs:element name="title" type="xs:string"/></xs:sequence>
               </xs:complexType>
               <xs:element name="Library">
                 <xs:complexType>
                   <xs:sequence><xs:element name="book" type="Book"/></xs:sequence>
                 </xs:complexType>
               </xs:element>"#,
        )
        .unwrap();
        let names: Vec<_> = messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Book", "Library"]);
        assert_eq!(messages[1].imports, vec!["Book".to_owned()]);
    }

    #[test]
    fn duplicate_imports_are_collapsed() {
        let messages = build(
            r#"<xs:complexType name="Book">
                 <xs:sequence><xs:element name="title" type="xs:string"/></xs:sequence>
               </xs:complexType>
               <xs:complexType name="Pair">
                 <xs:sequence>
                   <xs:element name="first" type="Book"/>
                   <xs:element name="second" type="Book"/>
                 </xs:sequence>
               </xs:complexType>"#,
        )
        .unwrap();
        assert_eq!(messages[1].imports, vec!["Book".to_owned()]);
        assert_eq!(messages[1].fields.len(), 2);
    }

    #[test]
    fn attributes_become_leading_scalar_fields() {
        let messages = build(
            r#"<xs:complexType name="Book">
                 <xs:sequence><xs:element name="title" type="xs:string"/></xs:sequence>
                 <xs:attribute name="id" type="xs:int"/>
                 <xs:attribute name="edition"/>
               </xs:complexType>"#,
        )
        .unwrap();
        let book = &messages[0];
        assert_eq!(book.fields[0].kind, FieldKind::Scalar(SimpleKind::Int));
        // Untyped attributes default to string.
        assert_eq!(book.fields[1].kind, FieldKind::Scalar(SimpleKind::String));
        assert_eq!(book.fields[2].name, "title");
    }

    #[test]
    fn declared_simple_type_resolves_through_restriction() {
        let messages = build(
            r#"<xs:simpleType name="Isbn">
                 <xs:restriction base="xs:string"/>
               </xs:simpleType>
               <xs:complexType name="Book">
                 <xs:sequence><xs:element name="isbn" type="Isbn"/></xs:sequence>
               </xs:complexType>"#,
        )
        .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].fields[0].kind,
            FieldKind::Scalar(SimpleKind::String)
        );
    }

    #[test]
    fn unknown_element_type_is_an_unresolved_reference() {
        let err = build(
            r#"<xs:complexType name="Book">
                 <xs:sequence><xs:element name="author" type="Author"/></xs:sequence>
               </xs:complexType>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            XsdError::UnresolvedReference {
                kind: RefKind::Type,
                ..
            }
        ));
    }

    #[test]
    fn element_without_type_or_inline_definition_is_fatal() {
        let err = build(
            r#"<xs:complexType name="Book">
                 <xs:sequence><xs:element name="mystery"/></xs:sequence>
               </xs:complexType>"#,
        )
        .unwrap_err();
        assert!(matches!(err, XsdError::IncompleteElement(name) if name == "mystery"));
    }

    #[test]
    fn choice_only_content_is_rejected() {
        let err = build(
            r#"<xs:complexType name="Either">
                 <xs:choice>
                   <xs:element name="left" type="xs:string"/>
                   <xs:element name="right" type="xs:int"/>
                 </xs:choice>
               </xs:complexType>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            XsdError::UnsupportedConstruct { construct, .. } if construct == "choice"
        ));
    }

    #[test]
    fn top_level_anonymous_complex_type_is_skipped() {
        let messages = build(
            r#"<xs:complexType>
                 <xs:sequence><xs:element name="x" type="xs:string"/></xs:sequence>
               </xs:complexType>"#,
        )
        .unwrap();
        assert!(messages.is_empty());
    }
}
