//! Fixed member tables for the builtin types. Built once per registry.

use crate::types::{TypeDescriptor, TypeKind};

use super::{MethodSignature, ParameterSignature, TypeDefinition};

fn int() -> TypeDescriptor {
    TypeDescriptor::new(TypeKind::Int)
}

fn string() -> TypeDescriptor {
    TypeDescriptor::new(TypeKind::String)
}

fn boolean() -> TypeDescriptor {
    TypeDescriptor::new(TypeKind::Bool)
}

fn unit() -> TypeDescriptor {
    TypeDescriptor::unit()
}

/// A generic placeholder such as `T`; resolved by substitution at lookup
/// time.
fn generic(name: &str) -> TypeDescriptor {
    TypeDescriptor::custom(name)
}

fn list_of(element: TypeDescriptor) -> TypeDescriptor {
    TypeDescriptor::with_generics(TypeKind::List, vec![element])
}

fn method(
    name: &str,
    parameters: &[(&str, TypeDescriptor)],
    return_type: TypeDescriptor,
    doc: &str,
) -> MethodSignature {
    MethodSignature {
        name: name.to_string(),
        parameters: parameters
            .iter()
            .map(|(parameter, ty)| ParameterSignature {
                name: parameter.to_string(),
                ty: ty.clone(),
            })
            .collect(),
        return_type,
        doc: doc.to_string(),
    }
}

fn definition(
    kind: TypeKind,
    name: &str,
    generic_parameters: &[&str],
    methods: Vec<MethodSignature>,
) -> TypeDefinition {
    TypeDefinition {
        kind,
        name: name.to_string(),
        generic_parameters: generic_parameters
            .iter()
            .map(|parameter| parameter.to_string())
            .collect(),
        methods,
        fields: Vec::new(),
    }
}

pub(super) fn builtin_definitions() -> Vec<TypeDefinition> {
    vec![
        definition(
            TypeKind::Int,
            "Int",
            &[],
            vec![method(
                "toString",
                &[],
                string(),
                "Renders the number as a string.",
            )],
        ),
        definition(
            TypeKind::String,
            "String",
            &[],
            vec![
                method("length", &[], int(), "Number of characters."),
                method(
                    "substring",
                    &[("start", int()), ("end", int())],
                    string(),
                    "Slice between two character offsets.",
                ),
                method("toUpperCase", &[], string(), "Uppercased copy."),
                method("toLowerCase", &[], string(), "Lowercased copy."),
                method(
                    "contains",
                    &[("other", string())],
                    boolean(),
                    "Whether `other` occurs in the string.",
                ),
                method(
                    "startsWith",
                    &[("prefix", string())],
                    boolean(),
                    "Whether the string begins with `prefix`.",
                ),
                method(
                    "endsWith",
                    &[("suffix", string())],
                    boolean(),
                    "Whether the string ends with `suffix`.",
                ),
                method(
                    "indexOf",
                    &[("part", string())],
                    int(),
                    "Offset of the first occurrence, or -1.",
                ),
                method(
                    "split",
                    &[("separator", string())],
                    list_of(string()),
                    "Pieces between occurrences of the separator.",
                ),
                method("trim", &[], string(), "Copy without surrounding whitespace."),
            ],
        ),
        definition(
            TypeKind::Bool,
            "Bool",
            &[],
            vec![method(
                "toString",
                &[],
                string(),
                "Renders the value as `true` or `false`.",
            )],
        ),
        definition(
            TypeKind::List,
            "List",
            &["T"],
            vec![
                method(
                    "add",
                    &[("element", generic("T"))],
                    unit(),
                    "Appends an element.",
                ),
                method(
                    "get",
                    &[("index", int())],
                    generic("T"),
                    "Element at an index.",
                ),
                method(
                    "set",
                    &[("index", int()), ("element", generic("T"))],
                    unit(),
                    "Replaces the element at an index.",
                ),
                method(
                    "remove",
                    &[("index", int())],
                    generic("T"),
                    "Removes and returns the element at an index.",
                ),
                method("size", &[], int(), "Number of elements."),
                method(
                    "contains",
                    &[("element", generic("T"))],
                    boolean(),
                    "Whether the element is present.",
                ),
                method(
                    "indexOf",
                    &[("element", generic("T"))],
                    int(),
                    "Index of the first occurrence, or -1.",
                ),
                method("clear", &[], unit(), "Removes every element."),
                method("first", &[], generic("T"), "First element."),
                method("last", &[], generic("T"), "Last element."),
            ],
        ),
        definition(
            TypeKind::MutableMap,
            "MutableMap",
            &["K", "V"],
            vec![
                method(
                    "put",
                    &[("key", generic("K")), ("value", generic("V"))],
                    unit(),
                    "Inserts or replaces an entry.",
                ),
                method(
                    "get",
                    &[("key", generic("K"))],
                    generic("V"),
                    "Value stored under a key.",
                ),
                method(
                    "remove",
                    &[("key", generic("K"))],
                    generic("V"),
                    "Removes and returns the value under a key.",
                ),
                method(
                    "containsKey",
                    &[("key", generic("K"))],
                    boolean(),
                    "Whether a key is present.",
                ),
                method(
                    "containsValue",
                    &[("value", generic("V"))],
                    boolean(),
                    "Whether a value is present.",
                ),
                method("keys", &[], list_of(generic("K")), "Every key, as a list."),
                method(
                    "values",
                    &[],
                    list_of(generic("V")),
                    "Every value, as a list.",
                ),
                method("size", &[], int(), "Number of entries."),
                method("clear", &[], unit(), "Removes every entry."),
            ],
        ),
        definition(
            TypeKind::MutableSet,
            "MutableSet",
            &["T"],
            vec![
                method(
                    "add",
                    &[("element", generic("T"))],
                    boolean(),
                    "Inserts an element; false if it was already present.",
                ),
                method(
                    "remove",
                    &[("element", generic("T"))],
                    boolean(),
                    "Removes an element; false if it was absent.",
                ),
                method(
                    "contains",
                    &[("element", generic("T"))],
                    boolean(),
                    "Whether the element is present.",
                ),
                method("size", &[], int(), "Number of elements."),
                method("clear", &[], unit(), "Removes every element."),
            ],
        ),
    ]
}
