use crate::ast::{NodeId, NodeKind, SymbolCategory, SymbolInfo, SyntaxTree};

/// Collects the symbols visible at a 1-based line, in tree traversal
/// order.
///
/// Variables are visible from their declaration line onward. Functions
/// are hoisted: visible anywhere in their enclosing scope, including
/// before their declaration. Classes and actors are visible
/// unconditionally.
pub fn symbols_at_line(tree: &SyntaxTree, line: usize) -> Vec<SymbolInfo> {
    let mut symbols = Vec::new();
    collect_visible(tree, tree.root(), line, &mut symbols);
    symbols
}

fn collect_visible(tree: &SyntaxTree, id: NodeId, line: usize, symbols: &mut Vec<SymbolInfo>) {
    for &child in &tree.node(id).children {
        let node = tree.node(child);
        let category = match node.kind {
            NodeKind::Variable => {
                if node.declaration_line <= line {
                    Some(SymbolCategory::Variable)
                } else {
                    None
                }
            }
            NodeKind::Function => Some(SymbolCategory::Function),
            NodeKind::Class | NodeKind::Actor => Some(SymbolCategory::Type),
            NodeKind::Program | NodeKind::Block => None,
        };
        if let Some(category) = category {
            symbols.push(SymbolInfo {
                name: node.name.clone(),
                category,
                declaration_line: node.declaration_line,
                node: child,
            });
        }
        if node.span.contains(line) {
            collect_visible(tree, child, line, symbols);
        }
    }
}

/// Depth-first preorder search for the first node named `name`.
///
/// Duplicate names resolve to traversal order, not lexical nearness; the
/// result for shadowed names is deliberately ambiguous.
pub fn find_definition(tree: &SyntaxTree, name: &str) -> Option<NodeId> {
    find_in_subtree(tree, tree.root(), name)
}

fn find_in_subtree(tree: &SyntaxTree, id: NodeId, name: &str) -> Option<NodeId> {
    for &child in &tree.node(id).children {
        let node = tree.node(child);
        if node.name == name {
            return Some(child);
        }
        if let Some(found) = find_in_subtree(tree, child, name) {
            return Some(found);
        }
    }
    None
}
