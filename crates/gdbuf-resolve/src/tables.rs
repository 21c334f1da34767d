//! Static type tables: proto scalar kinds and well-known types → Godot.
//!
//! Both tables are total over their closed input sets and carry no state;
//! lookups are pure functions.

use gdbuf_descriptor::FieldKind;

/// Godot namespace used for well-known types that fall back to custom
/// handling (unknown members of `google.protobuf`).
pub const WELL_KNOWN_CPP_NAMESPACE: &str = "google::protobuf";

/// The protobuf package holding the well-known types.
pub const WELL_KNOWN_PACKAGE: &str = "google.protobuf";

/// A scalar kind's Godot binding: the C++ type used in generated code and
/// the Godot-facing class name used in documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveBinding {
    pub godot_type: &'static str,
    pub class_name: &'static str,
}

/// Look up the Godot binding for a scalar field kind.
///
/// `None` for message/enum references (resolved elsewhere) and for `group`,
/// which has no supported binding.
pub const fn primitive_binding(kind: FieldKind) -> Option<PrimitiveBinding> {
    let binding = match kind {
        FieldKind::String => PrimitiveBinding {
            godot_type: "godot::String",
            class_name: "String",
        },
        FieldKind::Bool => PrimitiveBinding {
            godot_type: "bool",
            class_name: "bool",
        },
        FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Fixed32 | FieldKind::Sfixed32 => {
            PrimitiveBinding {
                godot_type: "int32_t",
                class_name: "int",
            }
        }
        FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Fixed64 | FieldKind::Sfixed64 => {
            PrimitiveBinding {
                godot_type: "int64_t",
                class_name: "int",
            }
        }
        FieldKind::Uint32 => PrimitiveBinding {
            godot_type: "uint32_t",
            class_name: "int",
        },
        FieldKind::Uint64 => PrimitiveBinding {
            godot_type: "uint64_t",
            class_name: "int",
        },
        FieldKind::Float => PrimitiveBinding {
            godot_type: "float",
            class_name: "float",
        },
        FieldKind::Double => PrimitiveBinding {
            godot_type: "double",
            class_name: "float",
        },
        FieldKind::Bytes => PrimitiveBinding {
            godot_type: "godot::PackedByteArray",
            class_name: "PackedByteArray",
        },
        FieldKind::Group | FieldKind::Message | FieldKind::Enum => return None,
    };
    Some(binding)
}

/// A well-known type's Godot binding, plus the canonical explanatory note
/// appended to field documentation where the representation is lossy
/// (Timestamp, Duration, Struct).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownBinding {
    pub godot_type: &'static str,
    pub class_name: &'static str,
    pub field_note: Option<&'static str>,
}

/// Look up the Godot binding for a `google.protobuf` type by its short name
/// (`Timestamp`, not `.google.protobuf.Timestamp`).
///
/// `None` means the name is not in the closed table; callers treat such
/// types as ordinary custom types scoped to [`WELL_KNOWN_CPP_NAMESPACE`]
/// so future well-known additions degrade gracefully.
pub fn well_known_binding(short_name: &str) -> Option<WellKnownBinding> {
    let binding = match short_name {
        "Timestamp" => WellKnownBinding {
            godot_type: "int64_t",
            class_name: "int",
            field_note: Some(
                "Note: This field is a Google Protobuf Timestamp. In Godot, it is \
                 represented as an int64 (Unix timestamp in milliseconds).",
            ),
        },
        "Duration" => WellKnownBinding {
            godot_type: "double",
            class_name: "float",
            field_note: Some(
                "Note: This field is a Google Protobuf Duration. In Godot, it is \
                 represented as a double (seconds).",
            ),
        },
        "Struct" => WellKnownBinding {
            godot_type: "godot::Dictionary",
            class_name: "Dictionary",
            field_note: Some(
                "Note: This field is a Google Protobuf Struct. In Godot, it is \
                 represented as a Dictionary.",
            ),
        },
        "Any" => WellKnownBinding {
            godot_type: "godot::Dictionary",
            class_name: "Dictionary",
            field_note: None,
        },
        "ListValue" => WellKnownBinding {
            godot_type: "godot::Array",
            class_name: "Array",
            field_note: None,
        },
        "Value" | "Empty" => WellKnownBinding {
            godot_type: "godot::Variant",
            class_name: "Variant",
            field_note: None,
        },
        "StringValue" => WellKnownBinding {
            godot_type: "godot::String",
            class_name: "String",
            field_note: None,
        },
        "Int32Value" => WellKnownBinding {
            godot_type: "int32_t",
            class_name: "int",
            field_note: None,
        },
        "BoolValue" => WellKnownBinding {
            godot_type: "bool",
            class_name: "bool",
            field_note: None,
        },
        "FieldMask" => WellKnownBinding {
            godot_type: "godot::PackedStringArray",
            class_name: "PackedStringArray",
            field_note: None,
        },
        _ => return None,
    };
    Some(binding)
}
