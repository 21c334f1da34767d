//! Type resolver: one field's declared type → its Godot binding.
//!
//! Pure with respect to shared state: every call reads the immutable
//! [`SymbolTable`] and returns a tagged [`ResolvedType`]; classification is
//! carried by the variant, never by boolean flag combinations.

use crate::error::ResolveError;
use crate::symbols::{file_stem, SymbolTable};
use crate::tables::{primitive_binding, well_known_binding, WELL_KNOWN_CPP_NAMESPACE};
use gdbuf_descriptor::{FieldDescriptorProto, FieldKind};

/// Where a custom type's full definition lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOrigin {
    /// The `google.protobuf` namespace; always available, never a
    /// dependency edge.
    WellKnown,
    /// Declared by this input file.
    File(String),
}

/// A field type fully resolved against the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// Scalar kinds and well-known types with a direct Godot equivalent.
    Primitive {
        godot_type: &'static str,
        class_name: &'static str,
    },
    /// A message reference bound to a generated (or builtin-namespace)
    /// object class.
    Custom {
        godot_type: String,
        class_name: String,
        origin: TypeOrigin,
    },
    /// Enum references are always bound as plain integers to sidestep
    /// GDExtension binding friction with C++ enums.
    Enum { godot_type: &'static str },
    /// A keyed collection, reclassified from a synthetic map-entry message.
    Map {
        key: Box<ResolvedType>,
        value: Box<ResolvedType>,
    },
}

impl ResolvedType {
    /// The Godot type bound for this resolution (containers are generic).
    pub fn godot_type(&self) -> &str {
        match self {
            Self::Primitive { godot_type, .. } => godot_type,
            Self::Custom { godot_type, .. } => godot_type,
            Self::Enum { godot_type } => godot_type,
            Self::Map { .. } => "godot::Dictionary",
        }
    }

    /// The Godot-facing class/doc name for this resolution.
    pub fn class_name(&self) -> &str {
        match self {
            Self::Primitive { class_name, .. } => class_name,
            Self::Custom { class_name, .. } => class_name,
            Self::Enum { .. } => "int",
            Self::Map { .. } => "Dictionary",
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum { .. })
    }
}

/// Resolve one field's declared type against the symbol table.
///
/// `current_file` decides whether custom references use the bare flattened
/// identifier (same file) or the file-qualified `gdbuf::<stem>::<Ident>`
/// form (cross-file), keeping generated names collision-free in the shared
/// output namespace.
pub fn resolve_field_type(
    field: &FieldDescriptorProto,
    current_file: &str,
    symbols: &SymbolTable,
) -> Result<ResolvedType, ResolveError> {
    let Some(kind) = field.kind else {
        return Err(ResolveError::UnsupportedPrimitive {
            kind: "unspecified".to_string(),
        });
    };

    match kind {
        FieldKind::Message => resolve_message_reference(field, current_file, symbols),
        FieldKind::Enum => {
            let fqn = field.type_fqn();
            if symbols.enum_origin(fqn).is_none() {
                return Err(ResolveError::UnresolvedReference {
                    type_name: fqn.to_string(),
                });
            }
            Ok(ResolvedType::Enum {
                godot_type: "int32_t",
            })
        }
        _ => {
            let binding =
                primitive_binding(kind).ok_or_else(|| ResolveError::UnsupportedPrimitive {
                    kind: kind.proto_name().to_string(),
                })?;
            Ok(ResolvedType::Primitive {
                godot_type: binding.godot_type,
                class_name: binding.class_name,
            })
        }
    }
}

fn resolve_message_reference(
    field: &FieldDescriptorProto,
    current_file: &str,
    symbols: &SymbolTable,
) -> Result<ResolvedType, ResolveError> {
    let fqn = field.type_fqn();

    // Well-known types short-circuit the cross-file search. Names missing
    // from the closed table still resolve, as custom types scoped to the
    // builtin namespace, so future well-known additions degrade gracefully.
    if let Some(short_name) = fqn.strip_prefix("google.protobuf.") {
        return Ok(match well_known_binding(short_name) {
            Some(wkt) => ResolvedType::Primitive {
                godot_type: wkt.godot_type,
                class_name: wkt.class_name,
            },
            None => ResolvedType::Custom {
                godot_type: format!("{WELL_KNOWN_CPP_NAMESPACE}::{short_name}"),
                class_name: short_name.to_string(),
                origin: TypeOrigin::WellKnown,
            },
        });
    }

    // Synthetic map entries reclassify the field as a map; the entry is not
    // a normal message reference at all.
    if let Some(raw) = symbols.raw_message(fqn) {
        if raw.is_map_entry() {
            let key_field =
                raw.field_by_number(1)
                    .ok_or_else(|| ResolveError::MalformedMapEntry {
                        type_name: fqn.to_string(),
                    })?;
            let value_field =
                raw.field_by_number(2)
                    .ok_or_else(|| ResolveError::MalformedMapEntry {
                        type_name: fqn.to_string(),
                    })?;
            let key = resolve_field_type(key_field, current_file, symbols)?;
            let value = resolve_field_type(value_field, current_file, symbols)?;
            return Ok(ResolvedType::Map {
                key: Box::new(key),
                value: Box::new(value),
            });
        }
    }

    let origin = symbols
        .message_origin(fqn)
        .ok_or_else(|| ResolveError::UnresolvedReference {
            type_name: fqn.to_string(),
        })?
        .to_string();
    let ident = symbols
        .ident(fqn)
        .ok_or_else(|| ResolveError::UnresolvedReference {
            type_name: fqn.to_string(),
        })?
        .to_string();

    let godot_type = if origin == current_file {
        ident.clone()
    } else {
        format!("gdbuf::{}::{}", file_stem(&origin), ident)
    };

    Ok(ResolvedType::Custom {
        godot_type,
        class_name: ident,
        origin: TypeOrigin::File(origin),
    })
}
