use gdbuf_descriptor::{FieldDescriptorProto, FieldKind, FileDescriptorSet};
use gdbuf_resolve::resolver::resolve_field_type;
use gdbuf_resolve::symbols::{flatten_ident, SymbolTable};
use proptest::prelude::*;

fn package_segment() -> impl Strategy<Value = String> {
    // Lowercase dotted-package segments, like real proto packages.
    proptest::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap()
}

fn type_segment() -> impl Strategy<Value = String> {
    // Message-like local names, possibly snake_cased.
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,10}").unwrap()
}

fn scalar_kind() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::Double),
        Just(FieldKind::Float),
        Just(FieldKind::Int64),
        Just(FieldKind::Uint64),
        Just(FieldKind::Int32),
        Just(FieldKind::Fixed64),
        Just(FieldKind::Fixed32),
        Just(FieldKind::Bool),
        Just(FieldKind::String),
        Just(FieldKind::Bytes),
        Just(FieldKind::Uint32),
        Just(FieldKind::Sfixed32),
        Just(FieldKind::Sfixed64),
        Just(FieldKind::Sint32),
        Just(FieldKind::Sint64),
    ]
}

proptest! {
    /// Scalar resolution is a pure total function: it never fails and
    /// always returns the same binding for the same kind, independent of
    /// the file or symbol table contents.
    #[test]
    fn scalar_resolution_is_pure_and_total(kind in scalar_kind(), file in type_segment()) {
        let empty = SymbolTable::build(&FileDescriptorSet::default());
        let field = FieldDescriptorProto {
            name: Some("f".to_string()),
            number: Some(1),
            kind: Some(kind),
            ..Default::default()
        };

        let first = resolve_field_type(&field, &file, &empty).unwrap();
        let second = resolve_field_type(&field, "another.proto", &empty).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.godot_type().is_empty());
    }

    /// Flattened identifiers are deterministic, C++-safe (alphanumeric
    /// only, no qualifying separators) and never empty for non-empty
    /// local names.
    #[test]
    fn flattened_idents_are_valid_identifiers(
        package in proptest::collection::vec(package_segment(), 0..3),
        chain in proptest::collection::vec(type_segment(), 1..4),
    ) {
        let package = package.join(".");
        let fqn = if package.is_empty() {
            chain.join(".")
        } else {
            format!("{package}.{}", chain.join("."))
        };

        let ident = flatten_ident(&package, &fqn);
        prop_assert_eq!(&ident, &flatten_ident(&package, &fqn));
        prop_assert!(!ident.is_empty());
        prop_assert!(ident.chars().all(|c| c.is_ascii_alphanumeric()));
        prop_assert!(!ident.starts_with(|c: char| c.is_ascii_digit()));
    }
}
