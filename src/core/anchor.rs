//! Insertion-point lookup for contract declarations.

use crate::core::document::{DeclKind, Document};
use crate::error::{GenError, Result};

/// 1-based line before which a declaration is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Anchor(usize);

impl Anchor
{
    pub fn new(line: usize) -> Self
    {
        Self(line)
    }

    pub fn line(self) -> usize
    {
        self.0
    }
}

/// Anchor above the declaration `name`: its first doc-comment line if it
/// has a doc block, else its own first line. Only types and interfaces
/// can serve as a reference.
pub fn locate(
    document: &Document,
    name: &str,
) -> Result<Anchor>
{
    match document.lookup(name)
    {
        Some(decl) if matches!(decl.kind, DeclKind::Type | DeclKind::Contract(_)) =>
        {
            Ok(Anchor::new(decl.first_line()))
        }
        _ => Err(GenError::ReferenceNotFound { name: name.to_string() }),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::parsers::GoParser;

    const SRC: &str = "package main

// example is documented.
//
// Twice.
type example struct{}

type bare int

// orphan comment

type afterGap int

func run() {}

var value = 1
";

    fn doc() -> Document
    {
        GoParser::new()
            .unwrap()
            .parse(SRC)
            .unwrap()
    }

    #[test]
    fn anchors_at_first_doc_line()
    {
        assert_eq!(locate(&doc(), "example").unwrap(), Anchor::new(3));
    }

    #[test]
    fn anchors_at_declaration_without_doc()
    {
        assert_eq!(locate(&doc(), "bare").unwrap().line(), 8);
        // A comment separated by a blank line is not documentation
        assert_eq!(locate(&doc(), "afterGap").unwrap().line(), 12);
    }

    #[test]
    fn non_type_references_are_rejected()
    {
        for name in ["run", "value", "missing"]
        {
            assert!(matches!(
                locate(&doc(), name),
                Err(GenError::ReferenceNotFound { .. })
            ));
        }
    }
}
