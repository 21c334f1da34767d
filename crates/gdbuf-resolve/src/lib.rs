//! gdbuf resolution engine (descriptor set → Godot binding model).
//!
//! Given a fully decoded `FileDescriptorSet`, this crate produces a
//! fully-resolved model describing how every message, field, enum and oneof
//! maps onto Godot GDExtension binding types, including cross-file type
//! references, per-file dependency edges and forward declarations. The
//! result is the input to the (external) template emitter.
//!
//! The pipeline is a strict two-phase batch transformation:
//!
//! 1. [`symbols::SymbolTable::build`] walks the whole input set once and
//!    snapshots every declared name (messages, enums, nested types) into an
//!    immutable lookup table.
//! 2. [`resolve_descriptor_set`] walks each file's message tree, resolving
//!    every field against that table and folding cross-file references into
//!    the per-file dependency / forward-declaration sets.
//!
//! Resolution is fail-fast: an unresolved reference, unsupported scalar or
//! malformed oneof index aborts the run with no partial output.

pub mod error;
pub mod extract;
pub mod model;
pub mod resolver;
pub mod symbols;
pub mod tables;

pub use error::ResolveError;
pub use extract::resolve_descriptor_set;
pub use model::BindingModel;
