use std::collections::HashMap;

use lazy_static::lazy_static;

/// The closed set of primitive scalar kinds a schema can ground out at.
///
/// `Invalid` is a sentinel for names the converter cannot map; it never
/// carries a protobuf scalar and must not reach emission.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    Invalid,
    String,
    Boolean,
    Float,
    Double,
    Decimal,
    Duration,
    DateTime,
    Time,
    Date,
    GYearMonth,
    GYear,
    GMonthDay,
    GDay,
    GMonth,
    HexBinary,
    Base64Binary,
    AnyUri,
    QName,
    NormalizedString,
    Token,
    Integer,
    Int,
    Short,
    Byte,
    UInteger,
    UInt,
    UShort,
    UByte,
}

lazy_static! {
    /// Built-in XSD primitive names, as they appear in `type`/`base`
    /// attributes. Names only useful for modelling XSD itself are folded into
    /// the string kind.
    static ref BUILTIN_KINDS: HashMap<&'static str, SimpleKind> = {
        use SimpleKind::*;
        HashMap::from([
            ("xs:string", String),
            ("xs:boolean", Boolean),
            ("xs:float", Float),
            ("xs:double", Double),
            ("xs:decimal", Decimal),
            ("xs:duration", Duration),
            ("xs:dateTime", DateTime),
            ("xs:time", Time),
            ("xs:date", Date),
            ("xs:gYearMonth", GYearMonth),
            ("xs:gYear", GYear),
            ("xs:gMonthDay", GMonthDay),
            ("xs:gDay", GDay),
            ("xs:gMonth", GMonth),
            ("xs:hexBinary", HexBinary),
            ("xs:base64Binary", Base64Binary),
            ("xs:anyURI", AnyUri),
            ("xs:QName", QName),
            ("xs:normalizedString", NormalizedString),
            ("xs:token", Token),
            ("xs:language", String),
            ("xs:NMTOKEN", String),
            ("xs:NCName", String),
            ("xs:ID", String),
            ("xs:IDREF", String),
            ("xs:IDREFS", String),
            ("xs:ENTITY", String),
            ("xs:ENTITIES", String),
            ("xs:integer", Integer),
            ("xs:nonPositiveInteger", Integer),
            ("xs:negativeInteger", Integer),
            ("xs:long", Integer),
            ("xs:int", Int),
            ("xs:short", Short),
            ("xs:byte", Byte),
            ("xs:nonNegativeInteger", UInteger),
            ("xs:positiveInteger", UInteger),
            ("xs:unsignedLong", UInteger),
            ("xs:unsignedInt", UInt),
            ("xs:unsignedShort", UShort),
            ("xs:unsignedByte", UByte),
        ])
    };
}

/// Looks up a built-in XSD primitive name, e.g. `xs:string`.
pub fn builtin_kind(name: &str) -> Option<SimpleKind> {
    BUILTIN_KINDS.get(name).copied()
}

impl SimpleKind {
    /// The protobuf scalar keyword for this kind.
    ///
    /// Panics on kinds with no scalar mapping (the `Invalid` sentinel and the
    /// temporal/binary kinds); callers must never hand those to the emitter.
    pub fn proto_scalar(self) -> &'static str {
        use SimpleKind::*;
        match self {
            String | AnyUri | QName | NormalizedString | Token => "string",
            Boolean => "bool",
            Float => "float",
            Double => "double",
            Decimal => "fixed64",
            Integer | Int => "int64",
            Short | Byte => "int32",
            UInteger | UInt => "uint64",
            UShort | UByte => "uint32",
            Invalid | Duration | DateTime | Time | Date | GYearMonth | GYear | GMonthDay
            | GDay | GMonth | HexBinary | Base64Binary => {
                panic!("no protobuf scalar mapping for {self:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_names_resolve() {
        assert_eq!(builtin_kind("xs:string"), Some(SimpleKind::String));
        assert_eq!(builtin_kind("xs:boolean"), Some(SimpleKind::Boolean));
        assert_eq!(builtin_kind("xs:unsignedShort"), Some(SimpleKind::UShort));
        assert_eq!(builtin_kind("xs:ID"), Some(SimpleKind::String));
    }

    #[test]
    fn declared_names_are_not_builtins() {
        assert_eq!(builtin_kind("Book"), None);
        assert_eq!(builtin_kind("string"), None);
    }

    #[test]
    fn scalar_mapping_is_fixed() {
        assert_eq!(SimpleKind::String.proto_scalar(), "string");
        assert_eq!(SimpleKind::Boolean.proto_scalar(), "bool");
        assert_eq!(SimpleKind::Decimal.proto_scalar(), "fixed64");
        assert_eq!(SimpleKind::Integer.proto_scalar(), "int64");
        assert_eq!(SimpleKind::Byte.proto_scalar(), "int32");
        assert_eq!(SimpleKind::UInteger.proto_scalar(), "uint64");
        assert_eq!(SimpleKind::UByte.proto_scalar(), "uint32");
    }

    #[test]
    #[should_panic(expected = "no protobuf scalar mapping")]
    fn invalid_kind_has_no_scalar() {
        SimpleKind::Invalid.proto_scalar();
    }
}
