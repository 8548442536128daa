//! Error taxonomy for interface generation.
//!
//! Every variant is terminal for a run: nothing is written once one of
//! these surfaces. `Syntax` covers the input file; `Revalidation` covers
//! text we produced ourselves and therefore always indicates a bug.

use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};

pub type Result<T, E = GenError> = std::result::Result<T, E>;

/// A parse failure located in the offending source text.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("syntax error at {line}:{column}: {message}")]
#[diagnostic(code(ifacegen::syntax))]
pub struct SyntaxError
{
    /// 1-based line of the first error node
    pub line: usize,
    /// 1-based column of the first error node
    pub column: usize,
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,
}

impl SyntaxError
{
    /// Build an error pointing at `byte` inside `src`.
    pub fn at(
        src: &str,
        byte: usize,
        len: usize,
        (line, column): (usize, usize),
        message: impl Into<String>,
    ) -> Self
    {
        let start = byte.min(src.len());
        let len = len
            .max(1)
            .min(src.len() - start);

        Self {
            line,
            column,
            message: message.into(),
            src: src.to_string(),
            span: (start, len).into(),
        }
    }
}

#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum GenError
{
    #[error("cannot read {}", .path.display())]
    #[diagnostic(code(ifacegen::io))]
    FileUnreadable
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(SyntaxError),

    #[error("desired interface name {name:?} is already in use by a non-interface type")]
    #[diagnostic(
        code(ifacegen::name_collision),
        help("pick another interface name or rename the existing type")
    )]
    NameCollision
    {
        name: String
    },

    #[error("requested interface {name:?} is declared, but not as a type")]
    #[diagnostic(code(ifacegen::malformed_contract))]
    MalformedExistingContract
    {
        name: String
    },

    #[error("no type or interface named {name:?} in file")]
    #[diagnostic(code(ifacegen::reference_not_found))]
    ReferenceNotFound
    {
        name: String
    },

    #[error("interface {name:?} is not a standalone top-level declaration")]
    #[diagnostic(
        code(ifacegen::not_top_level),
        help("move the interface out of its `type ( ... )` group and run again")
    )]
    DeclarationNotTopLevel
    {
        name: String
    },

    #[error("generated source failed to re-parse; this is a bug in ifacegen")]
    #[diagnostic(code(ifacegen::revalidation))]
    Revalidation(#[source] SyntaxError),

    #[error("tree-sitter rejected the Go grammar: {0}")]
    #[diagnostic(code(ifacegen::grammar))]
    Grammar(String),

    #[error("cannot write {}", .path.display())]
    #[diagnostic(code(ifacegen::io))]
    WriteFailed
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError
{
    /// Reclassify a syntax error raised on our own output.
    pub fn into_revalidation(self) -> Self
    {
        match self
        {
            GenError::Syntax(e) => GenError::Revalidation(e),
            other => other,
        }
    }
}

impl From<SyntaxError> for GenError
{
    fn from(e: SyntaxError) -> Self
    {
        GenError::Syntax(e)
    }
}
