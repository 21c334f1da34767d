//! Resolution errors.
//!
//! Every variant is fatal to the run: the input descriptor set is static,
//! so retrying cannot change the outcome, and no error is ever downgraded
//! to a placeholder type in the output model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// A message or enum reference that no input file declares. Indicates an
    /// incomplete or inconsistent descriptor set (e.g. built with imports
    /// excluded).
    #[error("unresolved type reference: no input file declares `{type_name}`")]
    UnresolvedReference { type_name: String },

    /// A scalar field kind with no Godot primitive mapping.
    #[error("unknown or unsupported proto type: {kind}")]
    UnsupportedPrimitive { kind: String },

    /// A field referencing a oneof index outside the declared range.
    #[error(
        "field `{field}` in `{message}` references oneof index {index}, \
         but only {count} oneofs are declared"
    )]
    MalformedOneofIndex {
        message: String,
        field: String,
        index: i32,
        count: usize,
    },

    /// A map-entry message missing its key (tag 1) or value (tag 2) field.
    #[error("map entry `{type_name}` is missing its key/value fields")]
    MalformedMapEntry { type_name: String },
}
