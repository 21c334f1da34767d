//! Fully-resolved binding model handed to the template emitter.
//!
//! Everything here is constructed during one resolution pass and immutable
//! afterwards; there are no lazy or deferred lookups left in the model.

use serde::{Deserialize, Serialize};

/// The whole resolved descriptor set, in input declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingModel {
    pub files: Vec<FileModel>,
}

/// One resolved schema file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileModel {
    /// Original path of the proto file in the ingested module.
    pub proto_path: String,
    pub package: String,
    pub messages: Vec<MessageModel>,
    pub enums: Vec<EnumModel>,
    /// Proto paths of other files this file needs full definitions from.
    /// Deduplicated, in first-reference order.
    pub dependencies: Vec<String>,
    /// Deduplicated forward declarations satisfying cross-file references
    /// in the generated header without pulling in full definitions.
    pub forward_decls: Vec<ForwardDecl>,
}

/// A (namespace, class) pair for a generated forward declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardDecl {
    pub namespace: String,
    pub class_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageModel {
    /// Fully-qualified proto name (package + nesting chain + local name).
    pub fqn: String,
    /// Flattened, collision-free identifier used for the generated class
    /// (`p.Outer.Inner` → `OuterInner`).
    pub message_name: String,
    pub description: String,
    pub fields: Vec<FieldModel>,
    pub oneofs: Vec<OneofModel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumModel {
    pub fqn: String,
    pub enum_name: String,
    /// Names of the options set on the enum descriptor.
    pub options: Vec<String>,
}

/// A named oneof grouping. Synthetic single-member groupings generated for
/// proto3 `optional` fields never appear here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneofModel {
    pub oneof_name: String,
    /// Member fields in declaration order.
    pub fields: Vec<FieldModel>,
}

/// One resolved message field.
///
/// Exactly one classification holds: plain (none of the flags), custom
/// object, enum, repeated or map. `is_repeated` and `is_map` are mutually
/// exclusive and both override the element type's custom classification —
/// containers are bound generically (`godot::Array` / `godot::Dictionary`),
/// with the element's resolution preserved in the `inner_*` fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldModel {
    pub field_name: String,
    /// Declared numeric tag, kept for wire-compatible regeneration.
    pub number: i32,
    /// The declared type reference as written in the descriptor
    /// (`.p.Foo` for messages/enums, empty for scalars).
    pub proto_type_name: String,
    pub godot_type: String,
    /// Godot-facing class/doc name for the resolved type.
    pub godot_class: String,
    /// Element type before any container generalization.
    pub inner_godot_type: String,
    pub inner_is_custom: bool,
    pub is_custom: bool,
    pub is_enum: bool,
    pub is_repeated: bool,
    pub is_map: bool,
    /// Map key binding; set only when `is_map`.
    pub key_godot_type: Option<String>,
    /// Map value binding; set only when `is_map`.
    pub value_godot_type: Option<String>,
    pub value_is_custom: bool,
    pub value_is_enum: bool,
    pub description: String,
}
