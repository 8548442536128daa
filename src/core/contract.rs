//! Structural contract model and its gofmt-style rendering.
//!
//! A `ContractSpec` is what lives between the braces of a Go
//! `interface { ... }`: embedded elements, method signatures keyed by
//! name in insertion order, and comments that belong to neither.

use std::fmt::Write as _;

use indexmap::IndexMap;
use itertools::Itertools;

/// One parameter or result group: `a, b int`, `...string`, or just `error`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field
{
    /// Declared names; empty for unnamed entries
    pub names: Vec<String>,

    /// Type text as written, `...` prefix included for variadics
    pub ty: String,
}

impl Field
{
    pub fn unnamed(ty: impl Into<String>) -> Self
    {
        Self { names: Vec::new(), ty: ty.into() }
    }

    pub fn named(
        names: &[&str],
        ty: impl Into<String>,
    ) -> Self
    {
        Self {
            names: names
                .iter()
                .map(|n| n.to_string())
                .collect(),
            ty: ty.into(),
        }
    }

    fn render(&self) -> String
    {
        if self
            .names
            .is_empty()
        {
            self.ty
                .clone()
        }
        else
        {
            format!("{} {}", self.names.join(", "), self.ty)
        }
    }
}

/// Parameter and result shape of a method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature
{
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

impl Signature
{
    /// Render `(params) results` the way gofmt prints a method element.
    pub fn render(&self) -> String
    {
        let mut out = format!(
            "({})",
            self.params
                .iter()
                .map(Field::render)
                .join(", ")
        );

        match self
            .results
            .as_slice()
        {
            [] =>
            {}
            // A lone unnamed result needs no parens
            [only] if only.names.is_empty() =>
            {
                out.push(' ');
                out.push_str(&only.ty);
            }
            many =>
            {
                let _ = write!(out, " ({})", many.iter().map(Field::render).join(", "));
            }
        }

        out
    }
}

/// A method entry of a contract together with the comments attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContractMethod
{
    pub signature: Signature,

    /// Comment lines directly above the method, verbatim
    pub comments: Vec<String>,

    /// Comment on the same line after the method
    pub trailing: Option<String>,
}

impl ContractMethod
{
    pub fn new(signature: Signature) -> Self
    {
        Self { signature, ..Self::default() }
    }
}

/// The body of a Go interface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContractSpec
{
    /// Type parameter list including brackets, e.g. `[T any]`
    pub type_params: Option<String>,

    /// Declared as `type I = interface { ... }`
    pub alias: bool,

    /// Embedded interfaces and type-set terms, verbatim
    pub embeds: Vec<String>,

    methods: IndexMap<String, ContractMethod>,

    /// Comments after the last element
    pub dangling: Vec<String>,
}

impl ContractSpec
{
    /// Add a method unless the name is taken. Returns whether it was added.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        method: ContractMethod,
    ) -> bool
    {
        match self
            .methods
            .entry(name.into())
        {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) =>
            {
                slot.insert(method);
                true
            }
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&ContractMethod>
    {
        self.methods
            .get(name)
    }

    pub fn get_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut ContractMethod>
    {
        self.methods
            .get_mut(name)
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool
    {
        self.methods
            .contains_key(name)
    }

    /// Method names in contract order.
    pub fn names(&self) -> impl Iterator<Item = &str>
    {
        self.methods
            .keys()
            .map(String::as_str)
    }

    pub fn methods(&self) -> impl Iterator<Item = (&str, &ContractMethod)>
    {
        self.methods
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize
    {
        self.methods
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.methods
            .is_empty()
    }

    /// Render a complete `type <name> interface { ... }` declaration,
    /// tab-indented, without a trailing newline.
    pub fn render(
        &self,
        name: &str,
    ) -> String
    {
        let mut out = format!(
            "type {name}{}{}interface {{\n",
            self.type_params
                .as_deref()
                .unwrap_or(""),
            if self.alias { " = " } else { " " }
        );

        for embed in &self.embeds
        {
            push_indented(&mut out, embed);
        }

        for (method_name, method) in &self.methods
        {
            for comment in &method.comments
            {
                push_indented(&mut out, comment);
            }

            let mut line = format!("{method_name}{}", method.signature.render());
            if let Some(trailing) = &method.trailing
            {
                line.push(' ');
                line.push_str(trailing);
            }
            push_indented(&mut out, &line);
        }

        for comment in &self.dangling
        {
            push_indented(&mut out, comment);
        }

        out.push('}');
        out
    }
}

/// Append `text` as one line prefixed by a single tab.
fn push_indented(
    out: &mut String,
    text: &str,
)
{
    out.push('\t');
    out.push_str(text);
    out.push('\n');
}
