use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::{naming, Field, FieldKind, Label, Message};
use crate::xsd::Schema;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to create output directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path:?}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Renders and writes one `.proto` file per message into `dir`. The directory
/// is created if absent; a pre-existing directory is not an error.
pub fn write_protos(dir: &Path, schema: &Schema, messages: &[Message]) -> Result<(), EmitError> {
    std::fs::create_dir_all(dir).map_err(|source| EmitError::CreateDir {
        path: dir.to_owned(),
        source,
    })?;

    for message in messages {
        let path = dir.join(file_name(message));
        debug!(path = %path.display(), "writing proto file");
        std::fs::write(&path, render_message(message, &schema.name)).map_err(|source| {
            EmitError::WriteFile {
                path: path.clone(),
                source,
            }
        })?;
    }
    Ok(())
}

pub fn file_name(message: &Message) -> String {
    format!("{}.proto", message.name)
}

/// Renders a message to `.proto` text: syntax header, package clause, one
/// import per distinct dependency, then the message block. Field numbers are
/// positional, dense, 1-based; they are recomputed on every emission and not
/// stable across schema edits.
pub fn render_message(message: &Message, package: &str) -> String {
    let mut out = String::new();
    out.push_str("syntax = \"proto2\";\n");
    let _ = writeln!(out, "package {package};");
    out.push('\n');

    for import in &message.imports {
        let _ = writeln!(out, "import \"{import}.proto\";");
    }
    if !message.imports.is_empty() {
        out.push('\n');
    }

    let _ = writeln!(out, "message {} {{", message.name);
    for (index, field) in message.fields.iter().enumerate() {
        out.push_str(&render_field(field, index as u32 + 1));
    }
    out.push_str("}\n");
    out
}

fn render_field(field: &Field, number: u32) -> String {
    let label = match field.label {
        Label::Optional => "optional",
        Label::Required => "required",
        Label::Repeated => "repeated",
    };
    let type_name: &str = match &field.kind {
        FieldKind::Scalar(kind) => kind.proto_scalar(),
        FieldKind::Message(name) => name,
    };
    format!(
        "    {label} {type_name} {} = {number};\n",
        naming::lower_snake_case(&field.name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xsd::SimpleKind;
    use pretty_assertions::assert_eq;

    fn scalar_field(name: &str, kind: SimpleKind) -> Field {
        Field {
            name: name.to_owned(),
            kind: FieldKind::Scalar(kind),
            label: Label::Optional,
        }
    }

    #[test]
    fn renders_message_without_imports() {
        let message = Message {
            name: "Book".to_owned(),
            imports: vec![],
            fields: vec![
                scalar_field("title", SimpleKind::String),
                scalar_field("pageCount", SimpleKind::Int),
            ],
        };
        assert_eq!(
            render_message(&message, "LibraryBooks"),
            "syntax = \"proto2\";\n\
             package LibraryBooks;\n\
             \n\
             message Book {\n\
             \x20   optional string title = 1;\n\
             \x20   optional int64 page_count = 2;\n\
             }\n"
        );
    }

    #[test]
    fn renders_imports_before_message_block() {
        let message = Message {
            name: "Library".to_owned(),
            imports: vec!["Book".to_owned()],
            fields: vec![Field {
                name: "book".to_owned(),
                kind: FieldKind::Message("Book".to_owned()),
                label: Label::Optional,
            }],
        };
        assert_eq!(
            render_message(&message, "LibraryBooks"),
            "syntax = \"proto2\";\n\
             package LibraryBooks;\n\
             \n\
             import \"Book.proto\";\n\
             \n\
             message Library {\n\
             \x20   optional Book book = 1;\n\
             }\n"
        );
    }

    #[test]
    fn field_numbers_are_dense_and_one_based() {
        let message = Message {
            name: "Numbers".to_owned(),
            imports: vec![],
            fields: (0..5)
                .map(|i| scalar_field(&format!("f{i}"), SimpleKind::String))
                .collect(),
        };
        let text = render_message(&message, "p");
        for (i, line) in text.lines().filter(|l| l.contains("optional")).enumerate() {
            assert!(line.ends_with(&format!("= {};", i + 1)), "line: {line}");
        }
    }

    #[test]
    fn empty_message_renders_empty_block() {
        let message = Message {
            name: "Empty".to_owned(),
            imports: vec![],
            fields: vec![],
        };
        assert_eq!(
            render_message(&message, "p"),
            "syntax = \"proto2\";\npackage p;\n\nmessage Empty {\n}\n"
        );
    }

    #[test]
    fn file_name_appends_proto_suffix() {
        let message = Message {
            name: "Book".to_owned(),
            imports: vec![],
            fields: vec![],
        };
        assert_eq!(file_name(&message), "Book.proto");
    }
}
