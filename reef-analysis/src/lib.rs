//! Analysis engine for reef source text: a heuristic line-pattern parser
//! that builds a structural tree, a lexical scope resolver, flow-
//! insensitive type inference with left-biased widening, and a member
//! registry with generic substitution.
//!
//! The engine is deliberately approximate. It never fails on malformed
//! input; unrecognized constructs are skipped and unresolvable types are
//! reported in-band as `Unknown`.

mod analysis;
mod ast;
mod diagnostics;
mod inference;
mod parser;
mod registry;
mod scan;
mod scope;
mod signature;
mod types;

pub use crate::analysis::{Analysis, Analyzer};
pub use crate::ast::{LineSpan, Node, NodeId, NodeKind, SymbolCategory, SymbolInfo, SyntaxTree};
pub use crate::diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use crate::inference::{infer_types, TypeMap};
pub use crate::parser::{parse, ParseOutput, Parser};
pub use crate::registry::{
    FieldSignature, MethodSignature, ParameterSignature, TypeDefinition, TypeRegistry,
};
pub use crate::scope::{find_definition, symbols_at_line};
pub use crate::signature::{parse_function_signature, ParsedParameter, ParsedSignature};
pub use crate::types::{
    contains_unknown, merge_types, parse_type_string, type_to_string, TypeDescriptor, TypeKind,
};
