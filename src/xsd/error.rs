use std::fmt;

use thiserror::Error;

/// Which name index a failed lookup went through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefKind {
    Element,
    Attribute,
    Type,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Element => "element",
            Self::Attribute => "attribute",
            Self::Type => "type",
        })
    }
}

/// Errors raised while reading or resolving a schema. All of them are fatal;
/// the conversion never produces partial output.
#[derive(Debug, Error)]
pub enum XsdError {
    #[error("malformed schema document: {0}")]
    Malformed(#[from] roxmltree::Error),

    #[error("document root is <{0}>, expected <schema>")]
    NotASchema(String),

    #[error("unsupported construct <{construct}> in {context}")]
    UnsupportedConstruct { construct: String, context: String },

    #[error("unresolved {kind} reference {name:?}")]
    UnresolvedReference { kind: RefKind, name: String },

    #[error("cyclic restriction chain through simple type {0:?}")]
    CyclicRestriction(String),

    #[error("simple type {0:?} neither names a built-in primitive nor restricts a base type")]
    UngroundedSimpleType(String),

    #[error("element {0:?} has neither a type reference nor an inline type definition")]
    IncompleteElement(String),

    #[error("invalid occurrence bound {0:?}")]
    InvalidOccurs(String),

    #[error("element is missing a name")]
    UnnamedElement,

    #[error("attribute is missing a name")]
    UnnamedAttribute,
}
