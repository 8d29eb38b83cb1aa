pub mod attribute;
pub mod builtins;
pub mod complex_type;
pub mod element;
pub mod error;
pub mod schema;
pub mod simple_type;

pub use attribute::Attribute;
pub use builtins::SimpleKind;
pub use complex_type::{Choice, ComplexType, Sequence};
pub use element::{Element, MaxOccurs};
pub use error::{RefKind, XsdError};
pub use schema::{Schema, TypeDef};
pub use simple_type::{Restriction, SimpleType};

/// Reads an XSD document into a fully resolved [`Schema`].
///
/// `name` is the logical schema name supplied by the caller; it is not derived
/// from the document and becomes the protobuf package name on emission. The
/// name indices are built before this returns, so every `deref_*` call on the
/// result operates on a complete symbol table.
pub fn read_schema(text: &str, name: &str, allow_dtd: bool) -> Result<Schema, XsdError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(text, options)?;
    Schema::map_from_xml(document.root_element(), name)
}
