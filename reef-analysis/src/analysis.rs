use crate::ast::SyntaxTree;
use crate::diagnostics::Diagnostics;
use crate::inference::{infer_types, TypeMap};
use crate::parser::Parser;
use crate::registry::TypeRegistry;

/// The result of analyzing one document snapshot.
pub struct Analysis {
    pub tree: SyntaxTree,
    pub types: TypeMap,
    pub diagnostics: Diagnostics,
}

/// Front door for the engine: parses, infers, and re-harvests the
/// user-type catalog in one call.
///
/// The registry's builtin definitions are built once per analyzer; the
/// user-defined catalog is rebuilt from every analyzed snapshot. Each
/// `analyze` call is otherwise self-contained, so an analyzer per logical
/// consumer is all the synchronization concurrent callers need.
pub struct Analyzer {
    registry: TypeRegistry,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
        }
    }

    pub fn analyze(&mut self, text: &str) -> Analysis {
        let output = Parser::new(text).run();
        let types = infer_types(text, &output.tree);
        let lines: Vec<&str> = text.lines().collect();
        self.registry.collect_user_types(&output.tree, &lines);
        Analysis {
            tree: output.tree,
            types,
            diagnostics: output.diagnostics,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}
