use crate::ast::{LineSpan, NodeId, NodeKind, SyntaxTree};
use crate::diagnostics::Diagnostics;
use crate::scan::{contains_word, leading_identifier};
use crate::signature::parse_function_signature;

const BLOCK_KEYWORDS: &[&str] = &["while", "if", "else", "for"];

pub struct ParseOutput {
    pub tree: SyntaxTree,
    pub diagnostics: Diagnostics,
}

/// Builds the structural tree for a document, discarding diagnostics.
pub fn parse(text: &str) -> SyntaxTree {
    Parser::new(text).run().tree
}

/// Line-oriented structural parser.
///
/// This is a heuristic scanner, not a grammar: lines are classified by
/// keyword patterns and block extents are found by brace counting. A
/// keyword inside a string literal therefore still opens a block, and an
/// unterminated block extends to the end of the document. Both are
/// documented contracts of the engine, not defects.
pub struct Parser<'a> {
    lines: Vec<&'a str>,
    diagnostics: Diagnostics,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn run(mut self) -> ParseOutput {
        let last_line = self.lines.len().max(1);
        let mut tree = SyntaxTree::new(LineSpan::new(1, last_line));
        self.parse_top_level(&mut tree);
        ParseOutput {
            tree,
            diagnostics: self.diagnostics,
        }
    }

    /// Top level only recognizes `class Name` (a leaf; the body is never
    /// parsed) and `actor Name { ... }` (recursed into).
    fn parse_top_level(&mut self, tree: &mut SyntaxTree) {
        let root = tree.root();
        let mut index = 0;
        while index < self.lines.len() {
            let trimmed = self.lines[index].trim();
            if let Some(name) = match_header(trimmed, "class ") {
                tree.push_node(
                    root,
                    NodeKind::Class,
                    name.to_string(),
                    index + 1,
                    LineSpan::single_line(index + 1),
                );
                index += 1;
            } else if let Some(name) = match_header(trimmed, "actor ") {
                let name = name.to_string();
                let end = self.block_end(index);
                let actor = tree.push_node(
                    root,
                    NodeKind::Actor,
                    name,
                    index + 1,
                    LineSpan::new(index + 1, end + 1),
                );
                self.parse_block(tree, actor, index + 1, end);
                index = end + 1;
            } else {
                index += 1;
            }
        }
    }

    /// Inside a block: function definitions and control-flow keywords open
    /// nested blocks, `var`/`val` lines become variable leafs, everything
    /// else is skipped.
    fn parse_block(
        &mut self,
        tree: &mut SyntaxTree,
        parent: NodeId,
        start_index: usize,
        end_index: usize,
    ) {
        let mut index = start_index;
        while index <= end_index && index < self.lines.len() {
            let trimmed = self.lines[index].trim();
            if let Some(signature) = parse_function_signature(trimmed) {
                let end = self.block_end(index).min(end_index);
                let function = tree.push_node(
                    parent,
                    NodeKind::Function,
                    signature.name,
                    index + 1,
                    LineSpan::new(index + 1, end + 1),
                );
                self.parse_block(tree, function, index + 1, end);
                index = end + 1;
            } else if let Some(name) = match_declaration(trimmed) {
                tree.push_node(
                    parent,
                    NodeKind::Variable,
                    name.to_string(),
                    index + 1,
                    LineSpan::single_line(index + 1),
                );
                index += 1;
            } else if let Some(keyword) = block_keyword(trimmed) {
                let end = self.block_end(index).min(end_index);
                let block = tree.push_node(
                    parent,
                    NodeKind::Block,
                    keyword.to_string(),
                    index + 1,
                    LineSpan::new(index + 1, end + 1),
                );
                self.parse_block(tree, block, index + 1, end);
                index = end + 1;
            } else {
                index += 1;
            }
        }
    }

    /// Scans forward from `start`, counting braces from the first `{`
    /// onward, and returns the 0-based index of the line on which the
    /// count returns to zero. An unterminated block recovers to the last
    /// line of the document.
    fn block_end(&mut self, start: usize) -> usize {
        let mut depth = 0usize;
        let mut opened = false;
        for index in start..self.lines.len() {
            for ch in self.lines[index].chars() {
                match ch {
                    '{' => {
                        depth += 1;
                        opened = true;
                    }
                    '}' if opened => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return index;
                        }
                    }
                    _ => {}
                }
            }
        }
        self.diagnostics.push_warning(
            format!(
                "block starting at line {} has no closing brace; extending to end of document",
                start + 1
            ),
            Some(start + 1),
        );
        self.lines.len().saturating_sub(1)
    }
}

fn match_header<'a>(trimmed: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = trimmed.strip_prefix(prefix)?;
    let name = leading_identifier(rest.trim_start());
    (!name.is_empty()).then_some(name)
}

fn match_declaration(trimmed: &str) -> Option<&str> {
    let rest = trimmed
        .strip_prefix("var ")
        .or_else(|| trimmed.strip_prefix("val "))?;
    let name = leading_identifier(rest.trim_start());
    (!name.is_empty()).then_some(name)
}

fn block_keyword(trimmed: &str) -> Option<&'static str> {
    BLOCK_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| contains_word(trimmed, keyword))
}
