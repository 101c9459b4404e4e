use std::collections::HashMap;

use crate::ast::{NodeKind, SyntaxTree};
use crate::scan::{is_identifier, matching_paren};
use crate::signature::parse_function_signature;
use crate::types::{
    contains_unknown, merge_types, parse_type_string, split_top_level, TypeDescriptor, TypeKind,
};

pub type TypeMap = HashMap<String, TypeDescriptor>;

/// Runs the full inference pipeline over one document snapshot and
/// returns the binding-name to type mapping.
///
/// Every call builds a fresh context, so concurrent calls over different
/// snapshots never share state. The passes are ordered: seeding from the
/// tree, declarations, collection mutations, binary operations, and the
/// (deliberately inert) reassignment scan.
pub fn infer_types(text: &str, tree: &SyntaxTree) -> TypeMap {
    let lines: Vec<&str> = text.lines().collect();
    let mut context = InferenceContext::new();
    context.seed_from_tree(tree, &lines);
    context.infer_declarations(&lines);
    context.infer_collection_mutations(&lines);
    context.infer_binary_operations(&lines);
    context.scan_reassignments(&lines);
    context.types
}

struct InferenceContext {
    types: TypeMap,
    return_types: HashMap<String, TypeDescriptor>,
}

impl InferenceContext {
    fn new() -> Self {
        Self {
            types: TypeMap::new(),
            return_types: HashMap::new(),
        }
    }

    /// Seeds every declared variable as `Unknown` (so the result covers
    /// all of them even when nothing better is learned) and collects
    /// annotated function return types. Functions without a return
    /// annotation contribute no entry and are implicitly `Unit`.
    fn seed_from_tree(&mut self, tree: &SyntaxTree, lines: &[&str]) {
        for (_, node) in tree.iter() {
            match node.kind {
                NodeKind::Variable => {
                    self.types
                        .entry(node.name.clone())
                        .or_insert_with(TypeDescriptor::unknown);
                }
                NodeKind::Function => {
                    let header = lines.get(node.declaration_line.saturating_sub(1));
                    if let Some(signature) = header.and_then(|line| parse_function_signature(line))
                    {
                        if let Some(return_type) = signature.return_type {
                            self.return_types.insert(signature.name, return_type);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Declaration pass: `var|val name[: Type] [= expr]` lines. An
    /// annotation always wins and is marked as such; otherwise the
    /// initializer is inferred. A bare declaration stays `Unknown`.
    fn infer_declarations(&mut self, lines: &[&str]) {
        for line in lines {
            let trimmed = line.trim();
            let Some(rest) = strip_declaration_keyword(trimmed) else {
                continue;
            };
            match find_assignment(rest) {
                Some(eq) => {
                    let lhs = &rest[..eq];
                    let initializer = rest[eq + 1..].trim();
                    match lhs.split_once(':') {
                        Some((name, annotation)) => {
                            let name = name.trim();
                            if is_identifier(name) {
                                self.types.insert(
                                    name.to_string(),
                                    parse_type_string(annotation).annotated(),
                                );
                            }
                        }
                        None => {
                            let name = lhs.trim();
                            if is_identifier(name) {
                                let inferred = self.infer_expression(initializer);
                                self.types.insert(name.to_string(), inferred);
                            }
                        }
                    }
                }
                None => match rest.split_once(':') {
                    Some((name, annotation)) => {
                        let name = name.trim();
                        if is_identifier(name) {
                            self.types.insert(
                                name.to_string(),
                                parse_type_string(annotation).annotated(),
                            );
                        }
                    }
                    None => {
                        let name = rest.trim();
                        if is_identifier(name) {
                            self.types
                                .entry(name.to_string())
                                .or_insert_with(TypeDescriptor::unknown);
                        }
                    }
                },
            }
        }
    }

    /// Collection pass: `object.add(x)` and `object.put(k, v)` call
    /// sites. `add` cannot disambiguate `List` from `MutableSet`, so it
    /// only refines an entry that already has one of those kinds; `put`
    /// is unambiguous and may create the `MutableMap` entry itself.
    fn infer_collection_mutations(&mut self, lines: &[&str]) {
        for line in lines {
            let Some(call) = match_method_call(line.trim()) else {
                continue;
            };
            match call.method {
                "add" if call.arguments.len() == 1 => {
                    let element = self.infer_expression(call.arguments[0]);
                    if let Some(existing) = self.types.get(call.object) {
                        if matches!(existing.kind, TypeKind::List | TypeKind::MutableSet) {
                            let updated = merge_generic_slots(existing, &[element]);
                            self.types.insert(call.object.to_string(), updated);
                        }
                    }
                }
                "put" if call.arguments.len() == 2 => {
                    let key = self.infer_expression(call.arguments[0]);
                    let value = self.infer_expression(call.arguments[1]);
                    match self.types.get(call.object) {
                        Some(existing) if existing.kind == TypeKind::MutableMap => {
                            let updated = merge_generic_slots(existing, &[key, value]);
                            self.types.insert(call.object.to_string(), updated);
                        }
                        Some(existing) if existing.kind != TypeKind::Unknown => {
                            // Known non-map receiver: the recorded type wins.
                        }
                        _ => {
                            self.types.insert(
                                call.object.to_string(),
                                TypeDescriptor::with_generics(
                                    TypeKind::MutableMap,
                                    vec![key, value],
                                ),
                            );
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Binary-operation pass: folds operand kinds left to right for
    /// initializers containing `+ - * /`. The result only lands when the
    /// current entry is absent or still has `Unknown` somewhere in it.
    fn infer_binary_operations(&mut self, lines: &[&str]) {
        for line in lines {
            let trimmed = line.trim();
            let Some(rest) = strip_declaration_keyword(trimmed) else {
                continue;
            };
            let Some(eq) = find_assignment(rest) else {
                continue;
            };
            let lhs = &rest[..eq];
            let name = match lhs.split_once(':') {
                Some((name, _)) => name.trim(),
                None => lhs.trim(),
            };
            if !is_identifier(name) {
                continue;
            }
            let (operands, operators) = tokenize_arithmetic(rest[eq + 1..].trim());
            if operators.is_empty() || operands.len() != operators.len() + 1 {
                continue;
            }

            let mut result = self.infer_expression(&operands[0]);
            for (operator, operand) in operators.iter().zip(operands.iter().skip(1)) {
                let rhs = self.infer_expression(operand);
                result = fold_operands(&result, *operator, &rhs);
                if result.kind == TypeKind::Unknown {
                    break;
                }
            }

            match self.types.get(name) {
                Some(existing) if !contains_unknown(existing) => {}
                _ => {
                    self.types.insert(name.to_string(), result);
                }
            }
        }
    }

    /// Reassignment pass: `name = expr` without a declaration keyword is
    /// recognized and deliberately changes nothing. Types are never
    /// backfilled from later writes, so a bare `var x` stays `Unknown`
    /// even after `x = 5`.
    fn scan_reassignments(&mut self, lines: &[&str]) {
        for line in lines {
            let trimmed = line.trim();
            if strip_declaration_keyword(trimmed).is_some() {
                continue;
            }
            let Some(eq) = find_assignment(trimmed) else {
                continue;
            };
            let name = trimmed[..eq].trim();
            if !is_identifier(name) {
                continue;
            }
            // Recognized, and intentionally left alone.
        }
    }

    /// Infers the type of a right-hand-side expression. The checks run in
    /// priority order; the first match wins.
    fn infer_expression(&self, expression: &str) -> TypeDescriptor {
        let expression = expression.trim();
        if is_string_literal(expression) {
            return TypeDescriptor::new(TypeKind::String);
        }
        if expression == "true" || expression == "false" {
            return TypeDescriptor::new(TypeKind::Bool);
        }
        // Decimal literals land on Int too: the type vocabulary has a
        // single numeric kind.
        if is_numeric_literal(expression) {
            return TypeDescriptor::new(TypeKind::Int);
        }
        if let Some(constructed) = match_constructor(expression) {
            return constructed;
        }
        if let Some(callee) = match_call(expression) {
            if let Some(return_type) = self.return_types.get(callee) {
                return return_type.clone();
            }
        }
        if is_identifier(expression) {
            // An unresolved identifier is assumed to be a no-argument
            // construct; Unit here means "not yet known", not "absent".
            return self
                .types
                .get(expression)
                .cloned()
                .unwrap_or_else(TypeDescriptor::unit);
        }
        TypeDescriptor::unknown()
    }
}

struct MethodCall<'a> {
    object: &'a str,
    method: &'a str,
    arguments: Vec<&'a str>,
}

fn match_method_call(trimmed: &str) -> Option<MethodCall<'_>> {
    let dot = trimmed.find('.')?;
    let object = &trimmed[..dot];
    if !is_identifier(object) {
        return None;
    }
    let rest = &trimmed[dot + 1..];
    let open = rest.find('(')?;
    let method = &rest[..open];
    if !is_identifier(method) {
        return None;
    }
    let close = matching_paren(rest, open)?;
    let arguments = split_top_level(&rest[open + 1..close], ',')
        .into_iter()
        .map(str::trim)
        .filter(|argument| !argument.is_empty())
        .collect();
    Some(MethodCall {
        object,
        method,
        arguments,
    })
}

/// Matches `Name[<Generics>].new(args)`. Builtin collection names map to
/// their kinds with missing generic slots defaulting to `Unknown`; any
/// other capitalized name is a user-type constructor.
fn match_constructor(expression: &str) -> Option<TypeDescriptor> {
    let marker = expression.find(".new(")?;
    let open = marker + ".new".len();
    let close = matching_paren(expression, open)?;
    if !expression[close + 1..].trim().is_empty() {
        return None;
    }

    let head = &expression[..marker];
    let (base, generic_source) = match head.find('<') {
        Some(angle) if head.ends_with('>') => {
            (&head[..angle], Some(&head[angle + 1..head.len() - 1]))
        }
        Some(_) => return None,
        None => (head, None),
    };
    if !is_identifier(base) {
        return None;
    }

    let mut generics: Vec<TypeDescriptor> = generic_source
        .map(|source| {
            split_top_level(source, ',')
                .into_iter()
                .filter(|argument| !argument.trim().is_empty())
                .map(parse_type_string)
                .collect()
        })
        .unwrap_or_default();

    let kind = match base {
        "List" => TypeKind::List,
        "MutableMap" => TypeKind::MutableMap,
        "MutableSet" => TypeKind::MutableSet,
        _ => {
            if base.chars().next().is_some_and(char::is_uppercase) {
                let mut descriptor = TypeDescriptor::custom(base);
                descriptor.generics = generics;
                return Some(descriptor);
            }
            return None;
        }
    };
    while generics.len() < kind.generic_arity() {
        generics.push(TypeDescriptor::unknown());
    }
    Some(TypeDescriptor::with_generics(kind, generics))
}

fn match_call(expression: &str) -> Option<&str> {
    let open = expression.find('(')?;
    let name = &expression[..open];
    if !is_identifier(name) {
        return None;
    }
    let close = matching_paren(expression, open)?;
    expression[close + 1..].trim().is_empty().then_some(name)
}

fn strip_declaration_keyword(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix("var ")
        .or_else(|| trimmed.strip_prefix("val "))
}

/// First `=` at nesting depth zero, outside string literals, that is not
/// part of `==`, `<=`, `>=`, or `!=`.
fn find_assignment(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut in_string = false;
    let mut depth = 0usize;
    for (index, ch) in text.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            _ if in_string => {}
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => {
                if bytes.get(index + 1) == Some(&b'=') {
                    continue;
                }
                if index > 0 && matches!(bytes[index - 1], b'=' | b'<' | b'>' | b'!') {
                    continue;
                }
                return Some(index);
            }
            _ => {}
        }
    }
    None
}

fn is_string_literal(expression: &str) -> bool {
    expression.len() >= 2
        && expression.starts_with('"')
        && expression.ends_with('"')
        && !expression[1..expression.len() - 1].contains('"')
}

fn is_numeric_literal(expression: &str) -> bool {
    let digits = expression
        .strip_prefix('-')
        .or_else(|| expression.strip_prefix('+'))
        .unwrap_or(expression);
    !digits.is_empty()
        && digits.chars().any(|ch| ch.is_ascii_digit())
        && digits.chars().filter(|ch| *ch == '.').count() <= 1
        && digits.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

/// Merges newly observed generic slot types into an existing collection
/// entry, padding the slot list to the collection's arity first.
fn merge_generic_slots(existing: &TypeDescriptor, observed: &[TypeDescriptor]) -> TypeDescriptor {
    let mut updated = existing.clone();
    let arity = existing.kind.generic_arity().max(observed.len());
    while updated.generics.len() < arity {
        updated.generics.push(TypeDescriptor::unknown());
    }
    for (slot, ty) in observed.iter().enumerate() {
        updated.generics[slot] = merge_types(&updated.generics[slot], ty);
    }
    updated
}

/// Kind-only folding: Int with Int stays Int for all four operators,
/// String concatenation needs `+`, and every other pairing is Unknown.
fn fold_operands(left: &TypeDescriptor, operator: char, right: &TypeDescriptor) -> TypeDescriptor {
    match (left.kind, right.kind) {
        (TypeKind::Int, TypeKind::Int) => TypeDescriptor::new(TypeKind::Int),
        (TypeKind::String, TypeKind::String) if operator == '+' => {
            TypeDescriptor::new(TypeKind::String)
        }
        _ => TypeDescriptor::unknown(),
    }
}

/// Splits an initializer into operand and operator tokens at the top
/// level, outside string literals. A `+` or `-` in operand position is a
/// unary sign and stays attached to the operand that follows it.
fn tokenize_arithmetic(expression: &str) -> (Vec<String>, Vec<char>) {
    let mut operands = Vec::new();
    let mut operators = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut depth = 0usize;
    let mut expect_operand = true;

    for ch in expression.chars() {
        if ch == '"' {
            in_string = !in_string;
            current.push(ch);
            expect_operand = false;
            continue;
        }
        if in_string {
            current.push(ch);
            continue;
        }
        match ch {
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            '+' | '-' | '*' | '/' if depth == 0 => {
                if expect_operand && matches!(ch, '+' | '-') && current.trim().is_empty() {
                    current.push(ch);
                    expect_operand = false;
                } else if current.trim().is_empty() {
                    // Stray operator; the operand/operator counts will no
                    // longer line up and the caller skips the line.
                    operators.push(ch);
                } else {
                    operands.push(current.trim().to_string());
                    current.clear();
                    operators.push(ch);
                    expect_operand = true;
                }
            }
            _ => {
                current.push(ch);
                if !ch.is_whitespace() {
                    expect_operand = false;
                }
            }
        }
    }
    let last = current.trim();
    if !last.is_empty() {
        operands.push(last.to_string());
    }
    (operands, operators)
}
