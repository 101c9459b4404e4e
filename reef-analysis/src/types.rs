use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    Int,
    String,
    Bool,
    List,
    MutableMap,
    MutableSet,
    Function,
    Custom,
    Unknown,
    Unit,
}

impl TypeKind {
    fn describe(self) -> &'static str {
        match self {
            TypeKind::Int => "Int",
            TypeKind::String => "String",
            TypeKind::Bool => "Bool",
            TypeKind::List => "List",
            TypeKind::MutableMap => "MutableMap",
            TypeKind::MutableSet => "MutableSet",
            TypeKind::Function => "Function",
            TypeKind::Custom => "Custom",
            TypeKind::Unknown => "Unknown",
            TypeKind::Unit => "Unit",
        }
    }

    /// Number of generic slots a builtin collection carries by registry
    /// convention. Zero for everything else.
    pub fn generic_arity(self) -> usize {
        match self {
            TypeKind::List | TypeKind::MutableSet => 1,
            TypeKind::MutableMap => 2,
            _ => 0,
        }
    }
}

/// An inferred or annotated type: a kind tag, ordered generic arguments,
/// and a display name for `Custom` types (which also covers generic
/// placeholders such as `T` until substitution resolves them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    pub generics: Vec<TypeDescriptor>,
    pub name: Option<String>,
    /// True when the type came from an explicit annotation rather than
    /// inference.
    pub annotated: bool,
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            generics: Vec::new(),
            name: None,
            annotated: false,
        }
    }

    pub fn unknown() -> Self {
        Self::new(TypeKind::Unknown)
    }

    pub fn unit() -> Self {
        Self::new(TypeKind::Unit)
    }

    pub fn custom<S: Into<String>>(name: S) -> Self {
        Self {
            kind: TypeKind::Custom,
            generics: Vec::new(),
            name: Some(name.into()),
            annotated: false,
        }
    }

    pub fn with_generics(kind: TypeKind, generics: Vec<TypeDescriptor>) -> Self {
        Self {
            kind,
            generics,
            name: None,
            annotated: false,
        }
    }

    pub fn annotated(mut self) -> Self {
        self.annotated = true;
        self
    }

    pub fn display_name(&self) -> String {
        match self.kind {
            TypeKind::Custom => self
                .name
                .clone()
                .unwrap_or_else(|| TypeKind::Custom.describe().to_string()),
            kind => kind.describe().to_string(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&type_to_string(self))
    }
}

/// Renders a descriptor as `Base<G1,G2,...>`, or a bare name when it has
/// no generic arguments.
pub fn type_to_string(descriptor: &TypeDescriptor) -> String {
    let base = descriptor.display_name();
    if descriptor.generics.is_empty() {
        return base;
    }
    let arguments = descriptor
        .generics
        .iter()
        .map(type_to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{base}<{arguments}>")
}

/// True when the descriptor is `Unknown` or has `Unknown` anywhere inside
/// its generic arguments.
pub fn contains_unknown(descriptor: &TypeDescriptor) -> bool {
    descriptor.kind == TypeKind::Unknown || descriptor.generics.iter().any(contains_unknown)
}

/// Left-biased widening merge of two observations of one binding.
///
/// `Unknown` always yields to the other side. Matching kinds merge their
/// generic slots pairwise. On an irreconcilable mismatch the left side
/// (the previously recorded type) wins; this is deliberately not a
/// unifier, and the order dependence is part of the contract.
pub fn merge_types(a: &TypeDescriptor, b: &TypeDescriptor) -> TypeDescriptor {
    if a.kind == TypeKind::Unknown {
        return b.clone();
    }
    if b.kind == TypeKind::Unknown {
        return a.clone();
    }
    if a.kind != b.kind {
        return a.clone();
    }
    if a.kind == TypeKind::Custom && a.name != b.name {
        return a.clone();
    }

    let slots = a.generics.len().max(b.generics.len());
    let mut generics = Vec::with_capacity(slots);
    for index in 0..slots {
        let merged = match (a.generics.get(index), b.generics.get(index)) {
            (Some(left), Some(right)) => merge_types(left, right),
            (Some(left), None) => left.clone(),
            (None, Some(right)) => right.clone(),
            (None, None) => unreachable!(),
        };
        generics.push(merged);
    }

    TypeDescriptor {
        kind: a.kind,
        generics,
        name: a.name.clone().or_else(|| b.name.clone()),
        annotated: a.annotated,
    }
}

fn kind_for_name(name: &str) -> Option<TypeKind> {
    match name {
        "Int" => Some(TypeKind::Int),
        "String" => Some(TypeKind::String),
        "Bool" => Some(TypeKind::Bool),
        "List" => Some(TypeKind::List),
        "MutableMap" => Some(TypeKind::MutableMap),
        "MutableSet" => Some(TypeKind::MutableSet),
        "Function" => Some(TypeKind::Function),
        _ => None,
    }
}

/// Parses a type-annotation string such as `MutableMap<String, List<Int>>`.
///
/// Generic arguments are split on top-level commas only; nesting across
/// `()`, `[]`, `{}` and `<>` is respected. Names outside the builtin set
/// become `Custom` with the name preserved, which covers both user types
/// and generic placeholders resolved later by substitution.
pub fn parse_type_string(source: &str) -> TypeDescriptor {
    let source = source.trim();
    if source.is_empty() {
        return TypeDescriptor::unknown();
    }

    let (base, argument_source) = match source.find('<') {
        Some(open) if source.ends_with('>') => {
            (source[..open].trim(), Some(&source[open + 1..source.len() - 1]))
        }
        _ => (source, None),
    };

    let generics = argument_source
        .map(|arguments| {
            split_top_level(arguments, ',')
                .into_iter()
                .filter(|argument| !argument.trim().is_empty())
                .map(parse_type_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    match kind_for_name(base) {
        Some(kind) => TypeDescriptor {
            kind,
            generics,
            name: None,
            annotated: false,
        },
        None => TypeDescriptor {
            kind: TypeKind::Custom,
            generics,
            name: Some(base.to_string()),
            annotated: false,
        },
    }
}

/// Splits on `separator` at nesting depth zero, tracking `()`, `[]`, `{}`
/// and `<>` so nested generics and argument lists are never split.
pub(crate) fn split_top_level(source: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (index, ch) in source.char_indices() {
        match ch {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            _ if ch == separator && depth == 0 => {
                pieces.push(&source[start..index]);
                start = index + ch.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&source[start..]);
    pieces
}
