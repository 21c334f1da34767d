//! Descriptor set data model (Buf/protoc descriptor sets → typed structs).
//!
//! This crate is intentionally **descriptor-driven**:
//!
//! - The schema compiler (`buf build --as-file-descriptor-set`, or `protoc`
//!   plus a JSON renderer) produces a `google.protobuf.FileDescriptorSet`
//!   rendered as JSON.
//! - We parse that JSON into plain structs and hand them to `gdbuf-resolve`.
//!
//! Why JSON?
//!
//! The binary `FileDescriptorSet` format is easy to decode, but decoding it
//! in Rust drags in a full protobuf runtime for what is, here, a read-only
//! input format. Buf's JSON output renders every field we need — including
//! nested types, oneof declarations, the `mapEntry`/`proto3Optional` flags
//! and source-code-info comments — with stable camelCase keys, so a small
//! serde model covers the whole contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Raw protobuf options, kept as an ordered JSON map.
///
/// Option *names* matter to the binding model (enum option strings, the
/// `mapEntry` marker); option values are passed through untyped.
pub type OptionsMap = BTreeMap<String, Value>;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to parse descriptor set JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read descriptor set from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// A full `google.protobuf.FileDescriptorSet`, JSON-rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDescriptorSet {
    #[serde(default)]
    pub file: Vec<FileDescriptorProto>,
}

impl FileDescriptorSet {
    /// Parse a descriptor set from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a descriptor set JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, DescriptorError> {
        let text = std::fs::read_to_string(path).map_err(|source| DescriptorError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// One input schema file: a package plus its message/enum trees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptorProto {
    pub name: Option<String>,
    pub package: Option<String>,
    #[serde(default)]
    pub message_type: Vec<DescriptorProto>,
    #[serde(default)]
    pub enum_type: Vec<EnumDescriptorProto>,
    #[serde(default)]
    pub source_code_info: Option<SourceCodeInfo>,
    pub syntax: Option<String>,
}

impl FileDescriptorProto {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }

    pub fn package(&self) -> &str {
        self.package.as_deref().unwrap_or_default()
    }
}

/// A message declaration, possibly nested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorProto {
    pub name: Option<String>,
    #[serde(default)]
    pub field: Vec<FieldDescriptorProto>,
    #[serde(default)]
    pub nested_type: Vec<DescriptorProto>,
    #[serde(default)]
    pub enum_type: Vec<EnumDescriptorProto>,
    #[serde(default)]
    pub oneof_decl: Vec<OneofDescriptorProto>,
    #[serde(default)]
    pub options: Option<OptionsMap>,
}

impl DescriptorProto {
    /// True for the synthetic two-field (key, value) messages the compiler
    /// generates for `map<K, V>` fields. These are never standalone types.
    pub fn is_map_entry(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|opts| opts.get("mapEntry"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Look up a field by its wire tag number.
    pub fn field_by_number(&self, number: i32) -> Option<&FieldDescriptorProto> {
        self.field.iter().find(|f| f.number == Some(number))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneofDescriptorProto {
    pub name: Option<String>,
}

/// The declared kind of a field, as rendered by Buf's JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "TYPE_DOUBLE")]
    Double,
    #[serde(rename = "TYPE_FLOAT")]
    Float,
    #[serde(rename = "TYPE_INT64")]
    Int64,
    #[serde(rename = "TYPE_UINT64")]
    Uint64,
    #[serde(rename = "TYPE_INT32")]
    Int32,
    #[serde(rename = "TYPE_FIXED64")]
    Fixed64,
    #[serde(rename = "TYPE_FIXED32")]
    Fixed32,
    #[serde(rename = "TYPE_BOOL")]
    Bool,
    #[serde(rename = "TYPE_STRING")]
    String,
    #[serde(rename = "TYPE_GROUP")]
    Group,
    #[serde(rename = "TYPE_MESSAGE")]
    Message,
    #[serde(rename = "TYPE_BYTES")]
    Bytes,
    #[serde(rename = "TYPE_UINT32")]
    Uint32,
    #[serde(rename = "TYPE_ENUM")]
    Enum,
    #[serde(rename = "TYPE_SFIXED32")]
    Sfixed32,
    #[serde(rename = "TYPE_SFIXED64")]
    Sfixed64,
    #[serde(rename = "TYPE_SINT32")]
    Sint32,
    #[serde(rename = "TYPE_SINT64")]
    Sint64,
}

impl FieldKind {
    /// The descriptor's own name for this kind, for error messages.
    pub const fn proto_name(self) -> &'static str {
        match self {
            Self::Double => "TYPE_DOUBLE",
            Self::Float => "TYPE_FLOAT",
            Self::Int64 => "TYPE_INT64",
            Self::Uint64 => "TYPE_UINT64",
            Self::Int32 => "TYPE_INT32",
            Self::Fixed64 => "TYPE_FIXED64",
            Self::Fixed32 => "TYPE_FIXED32",
            Self::Bool => "TYPE_BOOL",
            Self::String => "TYPE_STRING",
            Self::Group => "TYPE_GROUP",
            Self::Message => "TYPE_MESSAGE",
            Self::Bytes => "TYPE_BYTES",
            Self::Uint32 => "TYPE_UINT32",
            Self::Enum => "TYPE_ENUM",
            Self::Sfixed32 => "TYPE_SFIXED32",
            Self::Sfixed64 => "TYPE_SFIXED64",
            Self::Sint32 => "TYPE_SINT32",
            Self::Sint64 => "TYPE_SINT64",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldLabel {
    #[serde(rename = "LABEL_OPTIONAL")]
    Optional,
    #[serde(rename = "LABEL_REQUIRED")]
    Required,
    #[serde(rename = "LABEL_REPEATED")]
    Repeated,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptorProto {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub label: Option<FieldLabel>,
    #[serde(rename = "type")]
    pub kind: Option<FieldKind>,
    pub type_name: Option<String>,
    pub json_name: Option<String>,
    /// Index into the enclosing message's `oneof_decl` list.
    pub oneof_index: Option<i32>,
    /// Marks the synthetic single-member oneof the compiler generates for
    /// `optional` fields in proto3. Such fields are not real oneof members.
    #[serde(default)]
    pub proto3_optional: Option<bool>,
    #[serde(default)]
    pub options: Option<OptionsMap>,
}

impl FieldDescriptorProto {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// The referenced type's fully-qualified name without the leading dot
    /// (`.p.Foo` → `p.Foo`). Empty for scalar fields.
    pub fn type_fqn(&self) -> &str {
        self.type_name
            .as_deref()
            .unwrap_or_default()
            .trim_start_matches('.')
    }

    pub fn is_repeated(&self) -> bool {
        self.label == Some(FieldLabel::Repeated)
    }

    pub fn is_synthetic_optional(&self) -> bool {
        self.proto3_optional.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDescriptorProto {
    pub name: Option<String>,
    #[serde(default)]
    pub value: Vec<EnumValueDescriptorProto>,
    #[serde(default)]
    pub options: Option<OptionsMap>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDescriptorProto {
    pub name: Option<String>,
    pub number: Option<i32>,
    #[serde(default)]
    pub options: Option<OptionsMap>,
}

/// Source comments, keyed by the descriptor's structural path scheme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeInfo {
    #[serde(default)]
    pub location: Vec<Location>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub path: Vec<i32>,
    #[serde(default)]
    pub span: Vec<i32>,
    pub leading_comments: Option<String>,
    pub trailing_comments: Option<String>,
    #[serde(default)]
    pub leading_detached_comments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_descriptor_set() {
        let set = FileDescriptorSet::from_json(
            r#"{
              "file": [
                {
                  "name": "demo.proto",
                  "package": "demo",
                  "messageType": [
                    {
                      "name": "Ping",
                      "field": [
                        {"name": "seq", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_INT32"}
                      ]
                    }
                  ]
                }
              ]
            }"#,
        )
        .unwrap();

        assert_eq!(set.file.len(), 1);
        let file = &set.file[0];
        assert_eq!(file.name(), "demo.proto");
        assert_eq!(file.package(), "demo");
        let field = &file.message_type[0].field[0];
        assert_eq!(field.kind, Some(FieldKind::Int32));
        assert_eq!(field.label, Some(FieldLabel::Optional));
        assert!(!field.is_repeated());
    }

    #[test]
    fn map_entry_marker_and_field_lookup() {
        let entry: DescriptorProto = serde_json::from_str(
            r#"{
              "name": "ScoresEntry",
              "field": [
                {"name": "key", "number": 1, "type": "TYPE_STRING"},
                {"name": "value", "number": 2, "type": "TYPE_INT32"}
              ],
              "options": {"mapEntry": true}
            }"#,
        )
        .unwrap();

        assert!(entry.is_map_entry());
        assert_eq!(entry.field_by_number(1).unwrap().name(), "key");
        assert_eq!(entry.field_by_number(2).unwrap().name(), "value");
        assert!(entry.field_by_number(3).is_none());
    }

    #[test]
    fn synthetic_optional_flag_round_trips() {
        let field: FieldDescriptorProto = serde_json::from_str(
            r#"{"name": "note", "number": 3, "type": "TYPE_STRING",
                "oneofIndex": 0, "proto3Optional": true}"#,
        )
        .unwrap();
        assert!(field.is_synthetic_optional());
        assert_eq!(field.oneof_index, Some(0));
    }

    #[test]
    fn type_fqn_strips_leading_dot() {
        let field: FieldDescriptorProto = serde_json::from_str(
            r#"{"name": "f", "number": 1, "type": "TYPE_MESSAGE", "typeName": ".p.Outer.Inner"}"#,
        )
        .unwrap();
        assert_eq!(field.type_fqn(), "p.Outer.Inner");
    }
}
