use serde::Serialize;

/// Inclusive 1-based line range covered by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single_line(line: usize) -> Self {
        Self::new(line, line)
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    pub fn contains_span(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Program,
    Class,
    Actor,
    Function,
    Block,
    Variable,
}

impl NodeKind {
    pub fn describe(self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::Class => "class",
            NodeKind::Actor => "actor",
            NodeKind::Function => "function",
            NodeKind::Block => "block",
            NodeKind::Variable => "variable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub u32);

/// A node in the structural tree. Ownership flows parent to children
/// through the arena; `parent` is a traversal aid only.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub name: String,
    pub declaration_line: usize,
    pub span: LineSpan,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// Arena-backed structural tree. The root is always a `Program` node
/// spanning the whole document.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn new(document_span: LineSpan) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Program,
                name: String::new(),
                declaration_line: document_span.start,
                span: document_span,
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn push_node(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: String,
        declaration_line: usize,
        span: LineSpan,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            name,
            declaration_line,
            span,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolCategory {
    Variable,
    Function,
    Type,
}

impl SymbolCategory {
    pub fn describe(self) -> &'static str {
        match self {
            SymbolCategory::Variable => "variable",
            SymbolCategory::Function => "function",
            SymbolCategory::Type => "type",
        }
    }
}

/// One visible symbol, as returned by the scope resolver.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolInfo {
    pub name: String,
    pub category: SymbolCategory,
    pub declaration_line: usize,
    pub node: NodeId,
}
