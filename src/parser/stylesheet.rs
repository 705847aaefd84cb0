//! Stylesheet document model
//!
//! A stylesheet is parsed with tree-sitter and lowered into an arena of rule
//! nodes. The arena only keeps what the sanitizer needs: rules with their
//! selectors, and the at-rules that contain them. Every node remembers its
//! byte span in the original text, so serialization is a matter of copying
//! the source while cutting out the spans of detached nodes. Rules that were
//! never touched come back byte-for-byte.

use crate::error::{Result, SanitizerError};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tree_sitter::{Node as SyntaxNode, Parser};

/// At-rule kinds that can contain nested rules
const CONTAINER_AT_RULES: &[&str] = &[
    "media_statement",
    "supports_statement",
    "scope_statement",
    "at_rule",
];

/// Handle to a node inside a [`Stylesheet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    /// A style rule: a selector list and a declaration block
    Rule { selectors: Vec<String> },
    /// A grouping at-rule such as `@media`
    AtRule { name: String },
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    /// Span of the node itself
    span: Range<usize>,
    /// Start of the whitespace run that precedes the node
    before: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Bytes removed from the output, set once the node is detached
    cut: Option<Range<usize>>,
}

/// A parsed stylesheet that supports structural rule removal
#[derive(Debug, Clone)]
pub struct Stylesheet {
    path: PathBuf,
    source: String,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Stylesheet {
    /// Read and parse a stylesheet from disk
    pub fn read(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| SanitizerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, source)
    }

    /// Parse stylesheet text. `path` is only used for diagnostics and as the
    /// owner recorded on candidates.
    pub fn parse(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let source = source.into();

        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_css::LANGUAGE.into())?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| SanitizerError::StylesheetParse {
                path: path.clone(),
                reason: "parser produced no syntax tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            if let Some(node) = first_structural_error(root, &source) {
                let pos = node.start_position();
                let reason = format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1);
                return Err(SanitizerError::StylesheetParse { path, reason });
            }
        }

        let mut sheet = Self {
            path,
            source,
            nodes: Vec::new(),
            roots: Vec::new(),
        };
        sheet.lower(root, None);
        Ok(sheet)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The text the document was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Collect arena nodes from the syntax tree
    fn lower(&mut self, syntax: SyntaxNode<'_>, parent: Option<NodeId>) {
        let mut cursor = syntax.walk();
        for child in syntax.named_children(&mut cursor) {
            let kind = child.kind();
            if kind == "rule_set" {
                let selectors = self.selector_list(child);
                let id = self.push(NodeKind::Rule { selectors }, child, parent);
                self.lower(child, Some(id));
            } else if CONTAINER_AT_RULES.contains(&kind) {
                let name = child
                    .child(0)
                    .map(|keyword| self.text(keyword).to_string())
                    .unwrap_or_default();
                let id = self.push(NodeKind::AtRule { name }, child, parent);
                self.lower(child, Some(id));
            } else if kind != "selectors" && kind != "comment" {
                self.lower(child, parent);
            }
        }
    }

    fn push(&mut self, kind: NodeKind, syntax: SyntaxNode<'_>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let span = syntax.start_byte()..syntax.end_byte();
        let before = leading_whitespace_start(self.source.as_bytes(), span.start);

        self.nodes.push(Node {
            kind,
            span,
            before,
            parent,
            children: Vec::new(),
            cut: None,
        });

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn selector_list(&self, rule: SyntaxNode<'_>) -> Vec<String> {
        let mut cursor = rule.walk();
        let Some(selectors) = rule
            .named_children(&mut cursor)
            .find(|child| child.kind() == "selectors")
        else {
            return Vec::new();
        };

        let mut cursor = selectors.walk();
        selectors
            .named_children(&mut cursor)
            .filter(|selector| selector.kind() != "comment")
            .map(|selector| self.text(selector).trim().to_string())
            .filter(|selector| !selector.is_empty())
            .collect()
    }

    fn text(&self, syntax: SyntaxNode<'_>) -> &str {
        &self.source[syntax.start_byte()..syntax.end_byte()]
    }

    /// Every live rule in document order, nested rules included
    pub fn rules(&self) -> Vec<NodeId> {
        let mut rules = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if matches!(node.kind, NodeKind::Rule { .. }) {
                rules.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }

        rules
    }

    /// Selectors of a rule; empty for at-rules
    pub fn selectors(&self, id: NodeId) -> &[String] {
        match &self.nodes[id.0].kind {
            NodeKind::Rule { selectors } => selectors,
            NodeKind::AtRule { .. } => &[],
        }
    }

    pub fn is_detached(&self, id: NodeId) -> bool {
        self.nodes[id.0].cut.is_some()
    }

    /// Serialized text of a single node, without its leading whitespace
    pub fn rule_text(&self, id: NodeId) -> String {
        self.render(self.nodes[id.0].span.clone())
    }

    /// Detach a node from its parent. Returns `false` if it was already
    /// detached.
    ///
    /// The node goes together with the whitespace in front of it. The first
    /// top-level node is the exception: its leading whitespace stays and
    /// the whitespace after it goes instead, so the next node moves up to
    /// the top of the file.
    pub fn detach(&mut self, id: NodeId) -> bool {
        if self.is_detached(id) {
            return false;
        }

        let node = &self.nodes[id.0];
        let first_top_level = node.parent.is_none()
            && self.roots.first() == Some(&id)
            && self.roots.len() > 1;
        let cut = if first_top_level {
            node.span.start..trailing_whitespace_end(self.source.as_bytes(), node.span.end)
        } else {
            node.before..node.span.end
        };
        self.nodes[id.0].cut = Some(cut);

        let siblings = match self.nodes[id.0].parent {
            Some(parent) => &mut self.nodes[parent.0].children,
            None => &mut self.roots,
        };
        siblings.retain(|sibling| *sibling != id);
        true
    }

    /// Serialize the whole document
    pub fn to_source(&self) -> String {
        self.render(0..self.source.len())
    }

    /// Copy `range` of the source, skipping every detached node inside it
    fn render(&self, range: Range<usize>) -> String {
        let mut cuts: Vec<Range<usize>> = self
            .nodes
            .iter()
            .filter_map(|node| node.cut.clone())
            .filter(|cut| cut.start >= range.start && cut.end <= range.end)
            .collect();
        cuts.sort_by_key(|cut| cut.start);

        let mut out = String::with_capacity(range.len());
        let mut cursor = range.start;
        for cut in cuts {
            // Cuts of nodes nested in an already removed ancestor are covered
            if cut.start < cursor {
                cursor = cursor.max(cut.end);
                continue;
            }
            out.push_str(&self.source[cursor..cut.start]);
            cursor = cut.end;
        }
        out.push_str(&self.source[cursor..range.end]);
        out
    }
}

/// Walk back from `start` over ASCII whitespace
fn leading_whitespace_start(source: &[u8], start: usize) -> usize {
    let mut before = start;
    while before > 0 && source[before - 1].is_ascii_whitespace() {
        before -= 1;
    }
    before
}

/// Walk forward from `end` over ASCII whitespace
fn trailing_whitespace_end(source: &[u8], end: usize) -> usize {
    let mut after = end;
    while after < source.len() && source[after].is_ascii_whitespace() {
        after += 1;
    }
    after
}

/// First syntax error that breaks the rule structure.
///
/// The grammar lags behind some valid CSS (range media queries, legacy
/// `progid:` filters). Errors confined to a declaration block or to an
/// at-rule prelude leave selectors and rule boundaries intact and are
/// tolerated. An error inside a selector list, at the top level, or one
/// that swallows a brace is not.
fn first_structural_error<'t>(node: SyntaxNode<'t>, source: &str) -> Option<SyntaxNode<'t>> {
    if node.is_error() || node.is_missing() {
        return (!is_tolerable_error(node, source)).then_some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(|child| first_structural_error(child, source))
}

fn is_tolerable_error(node: SyntaxNode<'_>, source: &str) -> bool {
    let breaks_boundary = if node.is_missing() {
        matches!(node.kind(), "{" | "}")
    } else {
        source[node.start_byte()..node.end_byte()].contains(|c| c == '{' || c == '}')
    };
    if breaks_boundary {
        return false;
    }

    let mut ancestor = node.parent();
    while let Some(current) = ancestor {
        match current.kind() {
            "declaration" | "block" | "keyframe_block_list" => return true,
            "selectors" | "rule_set" | "stylesheet" => return false,
            kind if is_at_rule(kind) => return in_prelude(node, current),
            _ => {}
        }
        ancestor = current.parent();
    }
    false
}

fn is_at_rule(kind: &str) -> bool {
    CONTAINER_AT_RULES.contains(&kind) || kind.ends_with("_statement")
}

/// Whether `node` ends before the body of `at_rule`
fn in_prelude(node: SyntaxNode<'_>, at_rule: SyntaxNode<'_>) -> bool {
    let mut cursor = at_rule.walk();
    let body = at_rule
        .children(&mut cursor)
        .find(|child| matches!(child.kind(), "block" | "keyframe_block_list"));
    match body {
        Some(body) => node.end_byte() <= body.start_byte(),
        None => true,
    }
}
