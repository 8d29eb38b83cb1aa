use roxmltree::Node;

/// A named scalar slot on a complex type: either a reference to a top-level
/// attribute declaration or a direct `type` usage. Untyped attributes default
/// to the string kind during field mapping.
#[derive(Clone, Debug)]
pub struct Attribute {
    pub name: Option<String>,
    pub ref_: Option<String>,
    pub type_: Option<String>,
}

impl Attribute {
    pub(super) fn map_from_xml(attribute: Node) -> Self {
        assert_eq!(attribute.tag_name().name(), "attribute");

        Self {
            name: attribute.attribute("name").map(str::to_owned),
            ref_: attribute.attribute("ref").map(str::to_owned),
            type_: attribute.attribute("type").map(str::to_owned),
        }
    }
}
