//! Translates an XML Schema Definition (XSD) document into Protocol Buffer
//! message definitions, one `.proto` file per discovered message type.
//!
//! The pipeline is single-pass and synchronous: [`xsd::read_schema`] maps the
//! XML into a resolved [`xsd::Schema`], [`proto::ProtoBuilder`] walks the
//! schema graph into message descriptors, and [`proto::emit::write_protos`]
//! renders them to disk. Any malformed input, unresolved reference or
//! unsupported XSD construct aborts the whole run; there is no partial output.

pub mod proto;
pub mod xsd;

pub use proto::{emit, Field, FieldKind, Label, Message, ProtoBuilder};
pub use xsd::{read_schema, Schema, SimpleKind, XsdError};
