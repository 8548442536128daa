//! Filepath: src/infra/utils.rs
//! Tree-sitter node helpers shared by the Go parser and the
//! formatter. Associated fns only, to keep call sites short.

use tree_sitter::{Node, Point};

/// Common Tree-sitter node helpers
pub struct TsNodeUtils;

impl TsNodeUtils
{
    /// Node text, or "" when the node does not cover valid UTF-8
    pub fn text<'a>(
        node: Node,
        bytes: &'a [u8],
    ) -> &'a str
    {
        node.utf8_text(bytes)
            .unwrap_or("")
    }

    /// Extract text of a child field if present
    pub fn field_text<'a>(
        node: Node,
        field: &str,
        bytes: &'a [u8],
    ) -> Option<&'a str>
    {
        // Locate the child by field name
        let child = node.child_by_field_name(field)?;

        // Convert to utf8 text
        child
            .utf8_text(bytes)
            .ok()
    }

    /// Text of every child bound to a repeated field (`a, b int` names)
    pub fn field_texts(
        node: Node,
        field: &str,
        bytes: &[u8],
    ) -> Vec<String>
    {
        let mut cursor = node.walk();

        node.children_by_field_name(field, &mut cursor)
            .map(|c| Self::text(c, bytes).to_string())
            .collect()
    }

    /// Whether an anonymous token of `kind` is a direct child, e.g. the
    /// `(` of a grouped declaration
    pub fn has_token(
        node: Node,
        kind: &str,
    ) -> bool
    {
        let mut cursor = node.walk();

        node.children(&mut cursor)
            .any(|c| !c.is_named() && c.kind() == kind)
    }

    /// Convert node positions to 1-based line numbers
    pub fn line_range_1based(node: Node) -> (usize, usize)
    {
        // Fetch start and end Points
        let s: Point = node.start_position();
        let e: Point = node.end_position();

        // Convert to 1-based rows
        (s.row + 1, e.row + 1)
    }

    /// Depth-first search for the first ERROR or MISSING node
    pub fn first_error(node: Node) -> Option<Node>
    {
        if !node.has_error()
        {
            return None;
        }

        if node.is_error() || node.is_missing()
        {
            return Some(node);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor)
        {
            if let Some(found) = Self::first_error(child)
            {
                return Some(found);
            }
        }

        // Error is recorded on this node but not on any child
        Some(node)
    }
}
