//! Symbol table builder: one pass over the whole input set.
//!
//! Produces three read-only lookup tables before any type resolution
//! begins: per-file declared fully-qualified names, FQN → flattened target
//! identifier, and FQN → raw message descriptor (for map-entry detection).
//! The result is a single immutable value passed by reference into every
//! resolver call, so repeated or concurrent resolution runs never share
//! mutable state.
//!
//! Building never fails: an empty input simply yields empty tables.

use convert_case::{Case, Casing};
use gdbuf_descriptor::{DescriptorProto, FileDescriptorSet};
use std::collections::BTreeMap;

/// Fully-qualified names declared by one file, messages and enums apart
/// (message references and enum references resolve against different
/// namespaces).
#[derive(Debug, Clone, Default)]
pub struct DeclaredNames {
    pub messages: Vec<String>,
    pub enums: Vec<String>,
}

/// Immutable whole-set symbol snapshot.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    files: BTreeMap<String, DeclaredNames>,
    idents: BTreeMap<String, String>,
    raw_messages: BTreeMap<String, DescriptorProto>,
}

impl SymbolTable {
    /// Walk every file's nested message/enum tree depth-first and snapshot
    /// all declared names.
    pub fn build(set: &FileDescriptorSet) -> Self {
        let mut table = Self::default();

        for file in &set.file {
            let file_name = file.name().to_string();
            let package = file.package();
            let declared = table.files.entry(file_name.clone()).or_default();

            let mut prefix: Vec<&str> = Vec::new();
            for msg in &file.message_type {
                index_message(
                    package,
                    msg,
                    &mut prefix,
                    declared,
                    &mut table.idents,
                    &mut table.raw_messages,
                );
            }
            for e in &file.enum_type {
                if let Some(name) = &e.name {
                    let fqn = qualify(package, &[name]);
                    table.idents.insert(fqn.clone(), flatten_ident(package, &fqn));
                    declared.enums.push(fqn);
                }
            }
        }

        table
    }

    /// The file declaring `fqn` as a message, if any.
    pub fn message_origin(&self, fqn: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(_, declared)| declared.messages.iter().any(|m| m == fqn))
            .map(|(file, _)| file.as_str())
    }

    /// The file declaring `fqn` as an enum, if any.
    pub fn enum_origin(&self, fqn: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(_, declared)| declared.enums.iter().any(|e| e == fqn))
            .map(|(file, _)| file.as_str())
    }

    /// Flattened target identifier for a declared FQN.
    pub fn ident(&self, fqn: &str) -> Option<&str> {
        self.idents.get(fqn).map(String::as_str)
    }

    /// Raw message descriptor for a declared FQN (map-entry detection).
    pub fn raw_message(&self, fqn: &str) -> Option<&DescriptorProto> {
        self.raw_messages.get(fqn)
    }

    /// Names declared by one file.
    pub fn declared(&self, file: &str) -> Option<&DeclaredNames> {
        self.files.get(file)
    }
}

fn index_message<'a>(
    package: &str,
    msg: &'a DescriptorProto,
    prefix: &mut Vec<&'a str>,
    declared: &mut DeclaredNames,
    idents: &mut BTreeMap<String, String>,
    raw_messages: &mut BTreeMap<String, DescriptorProto>,
) {
    let Some(name) = msg.name.as_deref() else {
        return;
    };
    prefix.push(name);

    let mut parts = prefix.clone();
    let fqn = qualify(package, &parts);
    idents.insert(fqn.clone(), flatten_ident(package, &fqn));
    raw_messages.insert(fqn.clone(), msg.clone());
    declared.messages.push(fqn);

    for e in &msg.enum_type {
        if let Some(enum_name) = e.name.as_deref() {
            parts.push(enum_name);
            let enum_fqn = qualify(package, &parts);
            idents.insert(enum_fqn.clone(), flatten_ident(package, &enum_fqn));
            declared.enums.push(enum_fqn);
            parts.pop();
        }
    }

    for nested in &msg.nested_type {
        index_message(package, nested, prefix, declared, idents, raw_messages);
    }

    prefix.pop();
}

/// Join a package and a nesting path with the qualifying separator.
pub fn qualify<S: AsRef<str>>(package: &str, parts: &[S]) -> String {
    let name = parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".");
    if package.is_empty() {
        name
    } else {
        format!("{package}.{name}")
    }
}

/// Derive the flattened, target-language-safe identifier for an FQN: strip
/// the package prefix, join the remaining nesting path with `_`, then
/// Pascal-case the whole (`p.Outer.Inner.sub_msg` → `OuterInnerSubMsg`).
///
/// Deriving from the full nesting chain keeps identifiers unique within a
/// file's generated namespace even when local names collide.
pub fn flatten_ident(package: &str, fqn: &str) -> String {
    let local = if package.is_empty() {
        fqn
    } else {
        fqn.strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(fqn)
    };
    local.replace('.', "_").to_case(Case::Pascal)
}

/// The file's base name without directories or the `.proto` suffix, used
/// to namespace cross-file type references.
pub fn file_stem(proto_path: &str) -> &str {
    let base = proto_path.rsplit('/').next().unwrap_or(proto_path);
    base.strip_suffix(".proto").unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdbuf_descriptor::FileDescriptorSet;

    fn demo_set() -> FileDescriptorSet {
        serde_json::from_str(
            r#"{
              "file": [
                {
                  "name": "proto/game.proto",
                  "package": "game.v1",
                  "messageType": [
                    {
                      "name": "Player",
                      "nestedType": [
                        {
                          "name": "Inventory",
                          "nestedType": [{"name": "SlotsEntry", "options": {"mapEntry": true}}]
                        }
                      ],
                      "enumType": [{"name": "Rank"}]
                    }
                  ],
                  "enumType": [{"name": "Mode"}]
                }
              ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn nested_types_get_fully_qualified_names() {
        let table = SymbolTable::build(&demo_set());
        let declared = table.declared("proto/game.proto").unwrap();
        assert_eq!(
            declared.messages,
            vec![
                "game.v1.Player",
                "game.v1.Player.Inventory",
                "game.v1.Player.Inventory.SlotsEntry",
            ]
        );
        assert_eq!(declared.enums, vec!["game.v1.Player.Rank", "game.v1.Mode"]);
    }

    #[test]
    fn flattened_idents_strip_package_and_join_nesting() {
        let table = SymbolTable::build(&demo_set());
        assert_eq!(table.ident("game.v1.Player"), Some("Player"));
        assert_eq!(
            table.ident("game.v1.Player.Inventory"),
            Some("PlayerInventory")
        );
        assert_eq!(table.ident("game.v1.Player.Rank"), Some("PlayerRank"));
    }

    #[test]
    fn raw_descriptor_lookup_detects_map_entries() {
        let table = SymbolTable::build(&demo_set());
        assert!(table
            .raw_message("game.v1.Player.Inventory.SlotsEntry")
            .unwrap()
            .is_map_entry());
        assert!(!table.raw_message("game.v1.Player").unwrap().is_map_entry());
        assert!(table.raw_message("game.v1.Mode").is_none());
    }

    #[test]
    fn origins_point_at_the_declaring_file() {
        let table = SymbolTable::build(&demo_set());
        assert_eq!(
            table.message_origin("game.v1.Player.Inventory"),
            Some("proto/game.proto")
        );
        assert_eq!(table.enum_origin("game.v1.Mode"), Some("proto/game.proto"));
        assert_eq!(table.message_origin("game.v1.Missing"), None);
        assert_eq!(table.enum_origin("game.v1.Player"), None);
    }

    #[test]
    fn flatten_ident_handles_underscored_locals() {
        assert_eq!(flatten_ident("p", "p.sub_msg"), "SubMsg");
        assert_eq!(flatten_ident("", "Outer.inner_type"), "OuterInnerType");
        assert_eq!(flatten_ident("a.b.c", "a.b.c.Deep.Deeper"), "DeepDeeper");
    }

    #[test]
    fn file_stem_drops_directories_and_suffix() {
        assert_eq!(file_stem("proto/game.proto"), "game");
        assert_eq!(file_stem("common.proto"), "common");
        assert_eq!(file_stem("weird"), "weird");
    }

    #[test]
    fn empty_input_yields_empty_tables() {
        let table = SymbolTable::build(&FileDescriptorSet::default());
        assert!(table.declared("anything.proto").is_none());
        assert!(table.ident("x").is_none());
    }
}
