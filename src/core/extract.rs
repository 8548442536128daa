//! Method extraction: the method set bound to a named type.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::document::{DeclKind, Document, Method};

/// Which receiver forms count as belonging to the target type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverMatch
{
    /// `T` and `*T`
    Any,

    /// `T` only
    #[default]
    Value,
}

/// Knobs for method extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions
{
    pub receivers: ReceiverMatch,

    /// Keep methods whose names start with a lower-case letter
    pub include_unexported: bool,
}

impl Default for ExtractOptions
{
    fn default() -> Self
    {
        Self { receivers: ReceiverMatch::Value, include_unexported: true }
    }
}

/// Every method in `document` whose single receiver names `type_name`
/// exactly, in document order. Receiver lists of any other size are
/// skipped, as are receiver shapes without a plain identifier.
pub fn gather_type_methods(
    document: &Document,
    type_name: &str,
    opts: &ExtractOptions,
) -> Vec<Method>
{
    let mut out = Vec::new();

    for decl in document.declarations()
    {
        // Plain functions and non-function declarations carry no receiver
        let DeclKind::Function(func) = &decl.kind
        else
        {
            continue;
        };
        let Some(receivers) = &func.receivers
        else
        {
            continue;
        };

        let [receiver] = receivers.as_slice()
        else
        {
            trace!(method = %decl.name, count = receivers.len(), "skipping malformed receiver list");
            continue;
        };

        if receiver
            .type_name
            .as_deref()
            != Some(type_name)
        {
            continue;
        }

        if receiver.pointer && opts.receivers == ReceiverMatch::Value
        {
            continue;
        }

        if !opts.include_unexported && !is_exported(&decl.name)
        {
            continue;
        }

        out.push(Method {
            name: decl
                .name
                .clone(),
            receiver: receiver.clone(),
            params: func
                .params
                .clone(),
            results: func
                .results
                .clone(),
        });
    }

    out
}

fn is_exported(name: &str) -> bool
{
    name.chars()
        .next()
        .is_some_and(char::is_uppercase)
}
