//! Parsed view of one Go source file.
//!
//! A `Document` owns the text it was parsed from and the top-level
//! declarations found in it. It is never patched after a text splice;
//! callers re-parse instead, which also rebuilds the name index.

use std::collections::HashMap;

use crate::core::contract::{ContractSpec, Field};
use crate::error::{GenError, Result};

/// 1-based location of a declaration in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span
{
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
}

/// Comment lines ending directly above a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock
{
    pub first_line: usize,
    pub last_line: usize,
    pub text: String,
}

/// Receiver binding of a method, e.g. `(e *example)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver
{
    /// Binding name, absent for `func (example) M()`
    pub binding: Option<String>,

    /// Base type identifier; `None` for shapes we do not match (generics)
    pub type_name: Option<String>,

    /// Whether the receiver is `*T`
    pub pointer: bool,
}

/// Function or method signature as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl
{
    /// Receiver list; `None` for plain functions
    pub receivers: Option<Vec<Receiver>>,
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

/// A method bound to a single receiver, as handed out by extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method
{
    pub name: String,
    pub receiver: Receiver,
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

/// Closed set of top-level declaration kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind
{
    /// Any type spec that is not an interface
    Type,

    /// An interface type spec with its parsed body
    Contract(ContractSpec),

    /// A function or method
    Function(FunctionDecl),

    /// A `var` or `const` name
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration
{
    pub name: String,
    pub kind: DeclKind,
    pub doc: Option<DocBlock>,
    pub span: Span,

    /// Shares a parenthesized `type ( ... )` / `var ( ... )` group with
    /// other specs
    pub grouped: bool,
}

impl Declaration
{
    /// First line of the declaration's text, doc comments included.
    pub fn first_line(&self) -> usize
    {
        self.doc
            .as_ref()
            .map_or(self.span.start_line, |d| d.first_line)
    }

    /// Whether this declaration takes part in package-scope name lookup.
    /// Methods live in their receiver's method set, not the package scope.
    fn is_scoped(&self) -> bool
    {
        match &self.kind
        {
            DeclKind::Function(f) => f
                .receivers
                .is_none(),
            DeclKind::Type | DeclKind::Contract(_) | DeclKind::Value => true,
        }
    }
}

/// Name → declaration position for package-scope names.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex
{
    by_name: HashMap<String, usize>,
}

impl DeclarationIndex
{
    /// Index `decls`; on duplicate names the first declaration wins.
    pub fn build(decls: &[Declaration]) -> Self
    {
        let mut by_name = HashMap::with_capacity(decls.len());

        for (i, decl) in decls
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_scoped())
        {
            by_name
                .entry(
                    decl.name
                        .clone(),
                )
                .or_insert(i);
        }

        Self { by_name }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<usize>
    {
        self.by_name
            .get(name)
            .copied()
    }
}

#[derive(Debug, Clone)]
pub struct Document
{
    text: String,
    decls: Vec<Declaration>,
    index: DeclarationIndex,
}

impl Document
{
    pub fn new(
        text: String,
        decls: Vec<Declaration>,
    ) -> Self
    {
        let index = DeclarationIndex::build(&decls);
        Self { text, decls, index }
    }

    /// The text this document was parsed from.
    pub fn text(&self) -> &str
    {
        &self.text
    }

    pub fn declarations(&self) -> &[Declaration]
    {
        &self.decls
    }

    /// Resolve a package-scope name.
    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<&Declaration>
    {
        self.index
            .get(name)
            .and_then(|i| {
                self.decls
                    .get(i)
            })
    }

    /// Remove the standalone interface declaration `name` from the
    /// declaration list. The text is left untouched.
    pub fn excise(
        &mut self,
        name: &str,
    ) -> Result<Declaration>
    {
        let pos = self
            .decls
            .iter()
            .position(|d| d.name == name && matches!(d.kind, DeclKind::Contract(_)) && !d.grouped)
            .ok_or_else(|| GenError::DeclarationNotTopLevel { name: name.to_string() })?;

        let removed = self
            .decls
            .remove(pos);
        self.index = DeclarationIndex::build(&self.decls);

        Ok(removed)
    }

    /// Source text of `decl` from its first doc line through its last line.
    pub fn declaration_text(
        &self,
        decl: &Declaration,
    ) -> String
    {
        self.text
            .split('\n')
            .skip(decl.first_line() - 1)
            .take(decl.span.end_line + 1 - decl.first_line())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
