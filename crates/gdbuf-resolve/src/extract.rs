//! Message/field extractor and dependency/forward-declaration collector.
//!
//! Walks each file's message tree depth-first (nested types following
//! their parent), resolves every field through [`resolver`], assembles
//! oneof groupings, reclassifies map-entry references, attaches source
//! comments looked up by structural path, and folds cross-file custom
//! references into per-file dependency and forward-declaration sets.
//!
//! Extraction is fail-fast: the first resolver error aborts the whole run
//! with no partial output.
//!
//! [`resolver`]: crate::resolver

use crate::error::ResolveError;
use crate::model::{
    BindingModel, EnumModel, FieldModel, FileModel, ForwardDecl, MessageModel, OneofModel,
};
use crate::resolver::{resolve_field_type, ResolvedType, TypeOrigin};
use crate::symbols::{flatten_ident, qualify, SymbolTable};
use crate::tables::well_known_binding;
use gdbuf_descriptor::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet, SourceCodeInfo,
};
use std::collections::BTreeMap;

// Structural path tags from the descriptor's own address scheme
// (field numbers of FileDescriptorProto / DescriptorProto).
const FILE_MESSAGE_TAG: i32 = 4;
const MESSAGE_FIELD_TAG: i32 = 2;
const MESSAGE_NESTED_TYPE_TAG: i32 = 3;

/// Resolve a whole descriptor set into the binding model.
///
/// Builds the symbol table over the complete input first, then extracts
/// each file in declaration order. Any resolution failure aborts the run.
pub fn resolve_descriptor_set(set: &FileDescriptorSet) -> Result<BindingModel, ResolveError> {
    let symbols = SymbolTable::build(set);
    let mut model = BindingModel::default();
    for file in &set.file {
        model.files.push(extract_file(file, &symbols)?);
    }
    Ok(model)
}

/// Resolve one file against an already-built symbol table.
pub fn extract_file(
    file: &FileDescriptorProto,
    symbols: &SymbolTable,
) -> Result<FileModel, ResolveError> {
    let file_name = file.name();
    let package = file.package();
    let comments = CommentIndex::build(file.source_code_info.as_ref());

    let mut refs = FileRefs::default();
    let mut messages = Vec::new();
    let mut enums = Vec::new();

    for e in &file.enum_type {
        if let Some(model) = extract_enum(package, &[], e) {
            enums.push(model);
        }
    }

    for (msg_idx, msg) in file.message_type.iter().enumerate() {
        extract_message(
            msg,
            package,
            &[],
            &[FILE_MESSAGE_TAG, msg_idx as i32],
            file_name,
            symbols,
            &comments,
            &mut refs,
            &mut messages,
            &mut enums,
        )?;
    }

    Ok(FileModel {
        proto_path: file_name.to_string(),
        package: package.to_string(),
        messages,
        enums,
        dependencies: refs.dependencies,
        forward_decls: refs.forward_decls,
    })
}

#[allow(clippy::too_many_arguments)]
fn extract_message(
    msg: &DescriptorProto,
    package: &str,
    prefix: &[String],
    path: &[i32],
    file_name: &str,
    symbols: &SymbolTable,
    comments: &CommentIndex,
    refs: &mut FileRefs,
    messages: &mut Vec<MessageModel>,
    enums: &mut Vec<EnumModel>,
) -> Result<(), ResolveError> {
    let Some(name) = msg.name.as_deref() else {
        return Ok(());
    };
    // Synthetic map entries are never emitted as standalone types.
    if msg.is_map_entry() {
        return Ok(());
    }

    let mut chain = prefix.to_vec();
    chain.push(name.to_string());
    let fqn = qualify(package, &chain);
    let message_name = symbols
        .ident(&fqn)
        .map(str::to_string)
        .unwrap_or_else(|| flatten_ident(package, &fqn));

    let mut fields = Vec::with_capacity(msg.field.len());
    for (field_idx, f) in msg.field.iter().enumerate() {
        let field_path = [path, &[MESSAGE_FIELD_TAG, field_idx as i32]].concat();
        fields.push(extract_field(
            f,
            &fqn,
            &field_path,
            file_name,
            msg.oneof_decl.len(),
            symbols,
            comments,
            refs,
        )?);
    }

    // Declared oneof groupings, in declaration order. Synthetic
    // explicit-optionality markers never join a group (recognized by the
    // proto3_optional flag, not by naming), so a grouping left with no
    // real members is dropped entirely.
    let mut oneofs = Vec::new();
    for (oneof_idx, decl) in msg.oneof_decl.iter().enumerate() {
        let Some(oneof_name) = decl.name.clone() else {
            continue;
        };
        let members: Vec<FieldModel> = msg
            .field
            .iter()
            .zip(&fields)
            .filter(|(f, _)| {
                f.oneof_index == Some(oneof_idx as i32) && !f.is_synthetic_optional()
            })
            .map(|(_, model)| model.clone())
            .collect();
        if !members.is_empty() {
            oneofs.push(OneofModel {
                oneof_name,
                fields: members,
            });
        }
    }

    messages.push(MessageModel {
        fqn,
        message_name,
        description: comments.get(path).to_string(),
        fields,
        oneofs,
    });

    for e in &msg.enum_type {
        if let Some(model) = extract_enum(package, &chain, e) {
            enums.push(model);
        }
    }

    for (nested_idx, nested) in msg.nested_type.iter().enumerate() {
        let nested_path = [path, &[MESSAGE_NESTED_TYPE_TAG, nested_idx as i32]].concat();
        extract_message(
            nested,
            package,
            &chain,
            &nested_path,
            file_name,
            symbols,
            comments,
            refs,
            messages,
            enums,
        )?;
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn extract_field(
    f: &FieldDescriptorProto,
    message_fqn: &str,
    field_path: &[i32],
    file_name: &str,
    oneof_count: usize,
    symbols: &SymbolTable,
    comments: &CommentIndex,
    refs: &mut FileRefs,
) -> Result<FieldModel, ResolveError> {
    if let Some(index) = f.oneof_index {
        if index < 0 || index as usize >= oneof_count {
            return Err(ResolveError::MalformedOneofIndex {
                message: message_fqn.to_string(),
                field: f.name().to_string(),
                index,
                count: oneof_count,
            });
        }
    }

    let resolved = resolve_field_type(f, file_name, symbols)?;
    refs.record(&resolved, file_name);

    let mut description = comments.get(field_path).to_string();
    if let Some(short_name) = f.type_fqn().strip_prefix("google.protobuf.") {
        if let Some(note) = well_known_binding(short_name).and_then(|wkt| wkt.field_note) {
            // Cumulative with any author comment found above.
            if !description.is_empty() {
                description.push('\n');
            }
            description.push_str(note);
        }
    }

    let mut field = FieldModel {
        field_name: f.name().to_string(),
        number: f.number.unwrap_or_default(),
        proto_type_name: f.type_name.clone().unwrap_or_default(),
        godot_type: resolved.godot_type().to_string(),
        godot_class: resolved.class_name().to_string(),
        inner_godot_type: resolved.godot_type().to_string(),
        inner_is_custom: resolved.is_custom(),
        is_custom: resolved.is_custom(),
        is_enum: resolved.is_enum(),
        description,
        ..Default::default()
    };

    match &resolved {
        ResolvedType::Map { key, value } => {
            // Map entries are repeated on the wire, but a mapped field is
            // a Dictionary, never also an Array of entries.
            field.is_map = true;
            field.key_godot_type = Some(key.godot_type().to_string());
            field.value_godot_type = Some(value.godot_type().to_string());
            field.value_is_custom = value.is_custom();
            field.value_is_enum = value.is_enum();
        }
        _ if f.is_repeated() => {
            field.is_repeated = true;
            field.godot_type = "godot::Array".to_string();
            field.godot_class = "Array".to_string();
            field.is_custom = false;
        }
        _ => {}
    }

    Ok(field)
}

fn extract_enum(
    package: &str,
    prefix: &[String],
    e: &EnumDescriptorProto,
) -> Option<EnumModel> {
    let name = e.name.as_deref()?;
    let mut chain = prefix.to_vec();
    chain.push(name.to_string());
    Some(EnumModel {
        fqn: qualify(package, &chain),
        enum_name: name.to_string(),
        options: e
            .options
            .iter()
            .flat_map(|opts| opts.keys().cloned())
            .collect(),
    })
}

/// Source comments for one file, keyed by structural path. Leading
/// comments win over trailing ones, matching the schema compiler's own
/// association rules.
struct CommentIndex(BTreeMap<Vec<i32>, String>);

impl CommentIndex {
    fn build(info: Option<&SourceCodeInfo>) -> Self {
        let mut index = BTreeMap::new();
        if let Some(info) = info {
            for loc in &info.location {
                let leading = loc.leading_comments.as_deref().unwrap_or("").trim();
                let text = if leading.is_empty() {
                    loc.trailing_comments.as_deref().unwrap_or("").trim()
                } else {
                    leading
                };
                if !text.is_empty() {
                    index.insert(loc.path.clone(), text.to_string());
                }
            }
        }
        Self(index)
    }

    fn get(&self, path: &[i32]) -> &str {
        self.0.get(path).map(String::as_str).unwrap_or_default()
    }
}

/// Per-file dependency and forward-declaration accumulator. Inserting an
/// already-present entry is a no-op.
#[derive(Debug, Default)]
struct FileRefs {
    dependencies: Vec<String>,
    forward_decls: Vec<ForwardDecl>,
}

impl FileRefs {
    /// Record the cross-file requirements of one resolution. Same-file and
    /// well-known references need nothing; map values are recursed into
    /// (map keys are always scalar or string, never custom).
    fn record(&mut self, resolved: &ResolvedType, current_file: &str) {
        match resolved {
            ResolvedType::Custom {
                godot_type,
                origin: TypeOrigin::File(origin),
                ..
            } if origin != current_file => {
                if !self.dependencies.iter().any(|d| d == origin) {
                    self.dependencies.push(origin.clone());
                }
                if let Some((namespace, class_name)) = godot_type.rsplit_once("::") {
                    let decl = ForwardDecl {
                        namespace: namespace.to_string(),
                        class_name: class_name.to_string(),
                    };
                    if !self.forward_decls.contains(&decl) {
                        self.forward_decls.push(decl);
                    }
                }
            }
            ResolvedType::Map { value, .. } => self.record(value, current_file),
            _ => {}
        }
    }
}
