use roxmltree::Node;

use super::XsdError;

/// A scalar type: either a built-in primitive by name or a restriction of
/// another simple type. Resolving its primitive kind may walk a chain of
/// restriction bases; that walk lives on [`Schema`](super::Schema) because it
/// needs the type index.
#[derive(Clone, Debug)]
pub struct SimpleType {
    pub name: Option<String>,
    pub ref_: Option<String>,
    pub restriction: Option<Restriction>,
}

#[derive(Clone, Debug)]
pub struct Restriction {
    pub base: Option<String>,
}

impl SimpleType {
    pub(super) fn map_from_xml(simple_type: Node) -> Result<Self, XsdError> {
        assert_eq!(simple_type.tag_name().name(), "simpleType");

        let name = simple_type.attribute("name").map(str::to_owned);

        // Unions and lists are out of scope.
        for child in simple_type.children().filter(Node::is_element) {
            if let tag @ ("union" | "list") = child.tag_name().name() {
                return Err(XsdError::UnsupportedConstruct {
                    construct: tag.to_owned(),
                    context: format!(
                        "simple type {:?}",
                        name.as_deref().unwrap_or("<anonymous>")
                    ),
                });
            }
        }

        let restriction = simple_type
            .children()
            .find(|c| c.tag_name().name() == "restriction")
            .map(|restriction| Restriction {
                base: restriction.attribute("base").map(str::to_owned),
            });

        Ok(Self {
            name,
            ref_: simple_type.attribute("ref").map(str::to_owned),
            restriction,
        })
    }
}
