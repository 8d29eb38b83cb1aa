use roxmltree::Node;

use super::element::MaxOccurs;
use super::{Attribute, Element, XsdError};

/// A structured type: an optional content model (`sequence` or `choice`) plus
/// attribute declarations. Anonymous when nested inside an element, in which
/// case the element supplies the name.
#[derive(Clone, Debug)]
pub struct ComplexType {
    pub name: Option<String>,
    pub ref_: Option<String>,
    pub sequence: Option<Sequence>,
    pub choice: Option<Choice>,
    pub attributes: Vec<Attribute>,
}

/// Ordered child elements.
#[derive(Clone, Debug)]
pub struct Sequence {
    pub elements: Vec<Element>,
}

/// Alternative child elements. Modeled so the walker can reject choice-only
/// content explicitly instead of emitting an empty message.
#[derive(Clone, Debug)]
pub struct Choice {
    pub elements: Vec<Element>,
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
}

impl ComplexType {
    pub(super) fn map_from_xml(complex_type: Node) -> Result<Self, XsdError> {
        assert_eq!(complex_type.tag_name().name(), "complexType");

        let name = complex_type.attribute("name").map(str::to_owned);
        let context = || {
            format!(
                "complex type {:?}",
                name.as_deref().unwrap_or("<anonymous>")
            )
        };

        // Complex-type inheritance, model groups and wildcards are out of
        // scope; encountering them is a hard failure.
        for child in complex_type.children().filter(Node::is_element) {
            if let tag @ ("complexContent" | "simpleContent" | "all" | "group" | "attributeGroup"
            | "any" | "anyAttribute") = child.tag_name().name()
            {
                return Err(XsdError::UnsupportedConstruct {
                    construct: tag.to_owned(),
                    context: context(),
                });
            }
        }

        let sequence = complex_type
            .children()
            .find(|c| c.tag_name().name() == "sequence")
            .map(|sequence| Sequence::map_from_xml(sequence, &context()))
            .transpose()?;

        let choice = complex_type
            .children()
            .find(|c| c.tag_name().name() == "choice")
            .map(Choice::map_from_xml)
            .transpose()?;

        let attributes = complex_type
            .children()
            .filter(|c| c.tag_name().name() == "attribute")
            .map(Attribute::map_from_xml)
            .collect();

        Ok(Self {
            name,
            ref_: complex_type.attribute("ref").map(str::to_owned),
            sequence,
            choice,
            attributes,
        })
    }
}

impl Sequence {
    fn map_from_xml(sequence: Node, context: &str) -> Result<Self, XsdError> {
        assert_eq!(sequence.tag_name().name(), "sequence");

        let mut elements = Vec::new();
        for child in sequence.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "element" => elements.push(Element::map_from_xml(child)?),
                "annotation" => {}
                tag => {
                    return Err(XsdError::UnsupportedConstruct {
                        construct: tag.to_owned(),
                        context: context.to_owned(),
                    })
                }
            }
        }
        Ok(Self { elements })
    }
}

impl Choice {
    fn map_from_xml(choice: Node) -> Result<Self, XsdError> {
        assert_eq!(choice.tag_name().name(), "choice");

        let min_occurs = choice
            .attribute("minOccurs")
            .map(|v| {
                v.parse()
                    .map_err(|_| XsdError::InvalidOccurs(v.to_owned()))
            })
            .transpose()?
            .unwrap_or(1);
        let max_occurs = choice
            .attribute("maxOccurs")
            .map(|v| {
                if v == "unbounded" {
                    Ok(MaxOccurs::Unbounded)
                } else {
                    v.parse()
                        .map(MaxOccurs::Count)
                        .map_err(|_| XsdError::InvalidOccurs(v.to_owned()))
                }
            })
            .transpose()?
            .unwrap_or(MaxOccurs::Count(1));

        let elements = choice
            .children()
            .filter(|c| c.tag_name().name() == "element")
            .map(Element::map_from_xml)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            elements,
            min_occurs,
            max_occurs,
        })
    }
}
