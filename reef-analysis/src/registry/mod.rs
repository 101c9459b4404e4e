mod builtins;

use std::collections::HashMap;

use serde::Serialize;

use crate::ast::{NodeKind, SyntaxTree};
use crate::scan::is_identifier;
use crate::signature::parse_function_signature;
use crate::types::{parse_type_string, split_top_level, TypeDescriptor, TypeKind};

#[derive(Debug, Clone, Serialize)]
pub struct ParameterSignature {
    pub name: String,
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<ParameterSignature>,
    pub return_type: TypeDescriptor,
    pub doc: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSignature {
    pub name: String,
    pub ty: TypeDescriptor,
    pub mutable: bool,
}

/// One catalogued type: a builtin with a fixed member table, or a
/// user-defined class/actor harvested from the tree.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDefinition {
    pub kind: TypeKind,
    pub name: String,
    pub generic_parameters: Vec<String>,
    pub methods: Vec<MethodSignature>,
    pub fields: Vec<FieldSignature>,
}

/// Catalog of builtin and user-defined type members.
///
/// Builtin definitions are created once per registry and never change;
/// the user-defined catalog is rebuilt on every `collect_user_types`
/// call. Member lookup on generic builtins substitutes the instance's
/// generic arguments for the declared placeholders, recursively through
/// nested generics, so `List<Int>` exposes `get(): Int`.
pub struct TypeRegistry {
    builtins: Vec<TypeDefinition>,
    user_types: HashMap<String, TypeDefinition>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            builtins: builtins::builtin_definitions(),
            user_types: HashMap::new(),
        }
    }

    /// Rebuilds the user-defined catalog from the tree's class and actor
    /// nodes. Methods come from child function nodes, fields from child
    /// variable nodes; `class` bodies are never parsed by the block
    /// parser, so classes catalog as member-less names.
    pub fn collect_user_types(&mut self, tree: &SyntaxTree, lines: &[&str]) {
        self.user_types.clear();
        for (_, node) in tree.iter() {
            if !matches!(node.kind, NodeKind::Class | NodeKind::Actor) {
                continue;
            }
            let header = lines
                .get(node.declaration_line.saturating_sub(1))
                .copied()
                .unwrap_or("");
            let mut methods = Vec::new();
            let mut fields = Vec::new();
            for &child in &node.children {
                let child_node = tree.node(child);
                let line = lines
                    .get(child_node.declaration_line.saturating_sub(1))
                    .copied()
                    .unwrap_or("");
                match child_node.kind {
                    NodeKind::Function => {
                        if let Some(signature) = parse_function_signature(line) {
                            methods.push(MethodSignature {
                                name: signature.name,
                                parameters: signature
                                    .parameters
                                    .into_iter()
                                    .map(|parameter| ParameterSignature {
                                        name: parameter.name,
                                        ty: parameter.ty,
                                    })
                                    .collect(),
                                return_type: signature
                                    .return_type
                                    .unwrap_or_else(TypeDescriptor::unit),
                                doc: String::new(),
                            });
                        }
                    }
                    NodeKind::Variable => {
                        if let Some(field) = parse_field(line.trim()) {
                            fields.push(field);
                        }
                    }
                    _ => {}
                }
            }
            self.user_types.insert(
                node.name.clone(),
                TypeDefinition {
                    kind: TypeKind::Custom,
                    name: node.name.clone(),
                    generic_parameters: parse_generic_parameters(header),
                    methods,
                    fields,
                },
            );
        }
    }

    /// Looks up a definition by name: user types shadow builtins.
    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.user_types
            .get(name)
            .or_else(|| self.builtins.iter().find(|definition| definition.name == name))
    }

    pub fn methods_for_type(&self, descriptor: &TypeDescriptor) -> Vec<MethodSignature> {
        match descriptor.kind {
            TypeKind::Custom => descriptor
                .name
                .as_deref()
                .and_then(|name| self.user_types.get(name))
                .map(|definition| definition.methods.clone())
                .unwrap_or_default(),
            kind => self
                .builtin_by_kind(kind)
                .map(|definition| {
                    if definition.generic_parameters.is_empty() {
                        return definition.methods.clone();
                    }
                    let mapping = generic_mapping(definition, descriptor);
                    definition
                        .methods
                        .iter()
                        .map(|method| substitute_method(method, &mapping))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn fields_for_type(&self, descriptor: &TypeDescriptor) -> Vec<FieldSignature> {
        match descriptor.kind {
            TypeKind::Custom => descriptor
                .name
                .as_deref()
                .and_then(|name| self.user_types.get(name))
                .map(|definition| definition.fields.clone())
                .unwrap_or_default(),
            kind => self
                .builtin_by_kind(kind)
                .map(|definition| definition.fields.clone())
                .unwrap_or_default(),
        }
    }

    fn builtin_by_kind(&self, kind: TypeKind) -> Option<&TypeDefinition> {
        self.builtins
            .iter()
            .find(|definition| definition.kind == kind)
    }
}

/// Positional mapping from declared placeholder names to the instance's
/// generic arguments; missing arguments map to `Unknown`.
fn generic_mapping(
    definition: &TypeDefinition,
    descriptor: &TypeDescriptor,
) -> HashMap<String, TypeDescriptor> {
    definition
        .generic_parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| {
            let argument = descriptor
                .generics
                .get(position)
                .cloned()
                .unwrap_or_else(TypeDescriptor::unknown);
            (parameter.clone(), argument)
        })
        .collect()
}

fn substitute_method(
    method: &MethodSignature,
    mapping: &HashMap<String, TypeDescriptor>,
) -> MethodSignature {
    MethodSignature {
        name: method.name.clone(),
        parameters: method
            .parameters
            .iter()
            .map(|parameter| ParameterSignature {
                name: parameter.name.clone(),
                ty: substitute_type(&parameter.ty, mapping),
            })
            .collect(),
        return_type: substitute_type(&method.return_type, mapping),
        doc: method.doc.clone(),
    }
}

fn substitute_type(
    ty: &TypeDescriptor,
    mapping: &HashMap<String, TypeDescriptor>,
) -> TypeDescriptor {
    if ty.kind == TypeKind::Custom {
        if let Some(name) = &ty.name {
            if let Some(replacement) = mapping.get(name) {
                return replacement.clone();
            }
        }
    }
    TypeDescriptor {
        kind: ty.kind,
        generics: ty
            .generics
            .iter()
            .map(|generic| substitute_type(generic, mapping))
            .collect(),
        name: ty.name.clone(),
        annotated: ty.annotated,
    }
}

fn parse_field(trimmed: &str) -> Option<FieldSignature> {
    let (mutable, rest) = if let Some(rest) = trimmed.strip_prefix("var ") {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix("val ") {
        (false, rest)
    } else {
        return None;
    };
    let lhs = rest.split('=').next().unwrap_or(rest);
    let (name, ty) = match lhs.split_once(':') {
        Some((name, annotation)) => (name.trim(), parse_type_string(annotation).annotated()),
        None => (lhs.trim(), TypeDescriptor::unknown()),
    };
    if !is_identifier(name) {
        return None;
    }
    Some(FieldSignature {
        name: name.to_string(),
        ty,
        mutable,
    })
}

/// Declared generic parameter names from a `class Name<T, U>` or
/// `actor Name<T, U> {` header line.
fn parse_generic_parameters(header: &str) -> Vec<String> {
    let trimmed = header.trim();
    let Some(open) = trimmed.find('<') else {
        return Vec::new();
    };
    let mut depth = 0usize;
    let mut close = None;
    for (offset, ch) in trimmed[open..].char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    close = Some(open + offset);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(close) = close else {
        return Vec::new();
    };
    split_top_level(&trimmed[open + 1..close], ',')
        .into_iter()
        .map(str::trim)
        .filter(|parameter| is_identifier(parameter))
        .map(str::to_string)
        .collect()
}
