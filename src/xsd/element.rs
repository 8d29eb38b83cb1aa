use roxmltree::Node;

use super::{ComplexType, SimpleType, XsdError};

/// A named slot in a content model. Exactly one of `ref_`, `type_` or an
/// inline type child is expected; an element carrying none of them is
/// structurally incomplete and rejected during field mapping.
#[derive(Clone, Debug)]
pub struct Element {
    pub name: Option<String>,
    pub type_: Option<String>,
    pub ref_: Option<String>,
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
    pub complex_type: Option<Box<ComplexType>>,
    pub simple_type: Option<Box<SimpleType>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaxOccurs {
    Count(u64),
    Unbounded,
}

impl Element {
    pub(super) fn map_from_xml(element: Node) -> Result<Self, XsdError> {
        assert_eq!(element.tag_name().name(), "element");

        // minOccurs/maxOccurs default to 1 when absent. The bounds are kept in
        // the model but do not currently influence field emission.
        let min_occurs = element
            .attribute("minOccurs")
            .map(parse_occurs)
            .transpose()?
            .unwrap_or(1);
        let max_occurs = element
            .attribute("maxOccurs")
            .map(|max_occurs| {
                if max_occurs == "unbounded" {
                    Ok(MaxOccurs::Unbounded)
                } else {
                    parse_occurs(max_occurs).map(MaxOccurs::Count)
                }
            })
            .transpose()?
            .unwrap_or(MaxOccurs::Count(1));

        for child in element.children().filter(Node::is_element) {
            if let tag @ ("key" | "keyref" | "unique" | "alternative") = child.tag_name().name() {
                return Err(XsdError::UnsupportedConstruct {
                    construct: tag.to_owned(),
                    context: format!(
                        "element {:?}",
                        element.attribute("name").unwrap_or("<anonymous>")
                    ),
                });
            }
        }

        let complex_type = element
            .children()
            .find(|c| c.tag_name().name() == "complexType")
            .map(ComplexType::map_from_xml)
            .transpose()?
            .map(Box::new);
        let simple_type = element
            .children()
            .find(|c| c.tag_name().name() == "simpleType")
            .map(SimpleType::map_from_xml)
            .transpose()?
            .map(Box::new);

        Ok(Self {
            name: element.attribute("name").map(str::to_owned),
            type_: element.attribute("type").map(str::to_owned),
            ref_: element.attribute("ref").map(str::to_owned),
            min_occurs,
            max_occurs,
            complex_type,
            simple_type,
        })
    }
}

fn parse_occurs(value: &str) -> Result<u64, XsdError> {
    value
        .parse()
        .map_err(|_| XsdError::InvalidOccurs(value.to_owned()))
}
