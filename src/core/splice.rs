//! Line-level splicing of rendered declarations into formatted source.
//!
//! Comments in Go are tied to declarations by adjacency, not by tree
//! edges, so grafting a node into a tree and re-printing it moves comments
//! around. Instead the rendered declaration is spliced in as text at a
//! comment-aware anchor and the result is parsed again by the caller.

use std::ops::RangeInclusive;

use crate::core::anchor::Anchor;

/// Insert `rendered` plus one blank separator line before the anchor
/// line. An anchor past the end appends. All other lines are unchanged.
pub fn insert_at(formatted: &str, rendered: &str, anchor: Anchor) -> String {
    let block = format!("{rendered}\n");
    let mut lines: Vec<&str> = formatted.split('\n').collect();

    insert_block(&mut lines, &block, anchor);
    lines.join("\n")
}

/// Remove the 1-based inclusive line range `remove`, then insert
/// `rendered` at `anchor` as `insert_at` does. The anchor is interpreted
/// against the text after removal.
pub fn replace_lines(
    formatted: &str,
    remove: RangeInclusive<usize>,
    rendered: &str,
    anchor: Anchor,
) -> String {
    let block = format!("{rendered}\n");
    let mut lines: Vec<&str> = formatted.split('\n').collect();

    let first = (*remove.start()).max(1) - 1;
    let end = (*remove.end()).min(lines.len());
    if first < end {
        lines.drain(first..end);
    }

    insert_block(&mut lines, &block, anchor);
    lines.join("\n")
}

fn insert_block<'a>(lines: &mut Vec<&'a str>, block: &'a str, anchor: Anchor) {
    let index = anchor.line().saturating_sub(1);

    if index > lines.len() {
        lines.push(block);
    } else {
        lines.insert(index, block);
    }
}
