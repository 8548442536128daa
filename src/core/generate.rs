//! Interface generation workflow.
//!
//! Parsed → MethodsGathered → ExistingFound | ExistingAbsent → Spliced →
//! Reparsed → Rendered. Every step works on a fresh `Document`; the only
//! tree edit is removing an existing interface, everything else is a text
//! splice followed by a full re-parse.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use owo_colors::OwoColorize;
use tracing::{debug, info, instrument};

use crate::cli::Cli;
use crate::core::anchor::{self, Anchor};
use crate::core::contract::ContractSpec;
use crate::core::document::{DeclKind, Document};
use crate::core::extract::{ExtractOptions, gather_type_methods};
use crate::core::format::canonicalize;
use crate::core::merge::merge;
use crate::core::splice;
use crate::core::synth::synthesize;
use crate::error::{GenError, Result};
use crate::infra::config::load_config;
use crate::infra::io::{read_source, write_atomic};
use crate::parsers::GoParser;

/// What to generate.
#[derive(Debug, Clone)]
pub struct GenerateRequest
{
    /// Concrete type whose methods form the interface
    pub type_name: String,

    /// Interface to create or update
    pub contract_name: String,

    pub options: ExtractOptions,
}

/// Result of one run over a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated
{
    /// Canonical input the run started from
    pub original: String,

    /// Full updated document
    pub document: String,

    /// The interface declaration alone, doc comment included
    pub contract: String,
}

/// The existing declaration bound to the requested interface name.
enum Existing
{
    Found(ContractSpec),
    Absent,
}

fn existing_contract(
    document: &Document,
    name: &str,
) -> Result<Existing>
{
    match document
        .lookup(name)
        .map(|d| &d.kind)
    {
        None => Ok(Existing::Absent),
        Some(DeclKind::Contract(spec)) => Ok(Existing::Found(spec.clone())),
        Some(DeclKind::Type) => Err(GenError::NameCollision { name: name.to_string() }),
        Some(DeclKind::Function(_) | DeclKind::Value) =>
        {
            Err(GenError::MalformedExistingContract { name: name.to_string() })
        }
    }
}

/// Run the whole workflow over `source`. Pure: no I/O.
#[instrument(skip(parser, source), fields(ty = %req.type_name, iface = %req.contract_name))]
pub fn generate(
    parser: &GoParser,
    source: &str,
    req: &GenerateRequest,
) -> Result<Generated>
{
    // Parsed
    let formatted = canonicalize(parser, source)?;
    let mut document = parser.parse(&formatted)?;

    match document
        .lookup(&req.type_name)
        .map(|d| &d.kind)
    {
        Some(DeclKind::Type | DeclKind::Contract(_)) =>
        {}
        _ => return Err(GenError::ReferenceNotFound { name: req.type_name.clone() }),
    }

    // MethodsGathered
    let methods = gather_type_methods(&document, &req.type_name, &req.options);
    let candidate = synthesize(&methods);
    debug!(methods = candidate.len(), "synthesized candidate contract");

    // Spliced
    let spliced = match existing_contract(&document, &req.contract_name)?
    {
        Existing::Found(left) =>
        {
            let merged = merge(&left, candidate);

            // Anchor from the original declaration, before it goes away
            let at: Anchor = anchor::locate(&document, &req.contract_name)?;
            let old = document.excise(&req.contract_name)?;
            debug!(
                anchor = at.line(),
                first = old.first_line(),
                last = old.span.end_line,
                "updating existing interface in place"
            );

            let mut rendered = String::new();
            if let Some(doc) = &old.doc
            {
                rendered.push_str(&doc.text);
                rendered.push('\n');
            }
            rendered.push_str(&merged.render(&req.contract_name));

            splice::replace_lines(
                document.text(),
                old.first_line()..=old.span.end_line,
                &rendered,
                at,
            )
        }
        Existing::Absent =>
        {
            let at = anchor::locate(&document, &req.type_name)?;
            debug!(anchor = at.line(), "inserting new interface");

            splice::insert_at(document.text(), &candidate.render(&req.contract_name), at)
        }
    };

    // Reparsed: anything failing from here on is our fault, not the input's
    let text = canonicalize(parser, &spliced).map_err(GenError::into_revalidation)?;
    let reparsed = parser
        .parse(&text)
        .map_err(GenError::into_revalidation)?;

    // Rendered
    let decl = reparsed
        .lookup(&req.contract_name)
        .filter(|d| matches!(d.kind, DeclKind::Contract(_)))
        .ok_or_else(|| GenError::ReferenceNotFound { name: req.contract_name.clone() })?;
    let contract = reparsed.declaration_text(decl);

    info!(lines = text.lines().count(), "generated interface");

    Ok(Generated { original: formatted, document: text, contract })
}

/// CLI entry point: read, generate, then print or write back.
pub fn run(
    cli: &Cli,
    out: &mut dyn Write,
) -> AnyResult<()>
{
    let (Some(type_name), Some(contract_name), Some(file)) =
        (&cli.type_name, &cli.interface_name, &cli.file)
    else
    {
        anyhow::bail!("TYPE, INTERFACE and FILE are required");
    };

    let config = load_config(
        cli.config
            .as_deref(),
    )?;
    let req = GenerateRequest {
        type_name: type_name.clone(),
        contract_name: contract_name.clone(),
        options: config.extract_options(cli.receivers),
    };

    let source = read_source(file)?;
    let parser = GoParser::new()?;
    let generated = generate(&parser, &source, &req)?;

    // -i wins over everything else
    if cli.print_interface
    {
        writeln!(out, "{}", generated.contract).context("Failed to write output")?;
        return Ok(());
    }

    if cli.diff
    {
        write!(out, "{}", unified_diff(&generated, &file.display().to_string()))
            .context("Failed to write diff")?;
    }

    if cli.write
    {
        write_atomic(file, generated.document.as_bytes())?;

        if !cli.quiet
        {
            let mark = if cli.no_color { "✓".to_string() } else { "✓".green().to_string() };
            eprintln!("{mark} updated {}", file.display());
        }
        return Ok(());
    }

    if !cli.diff
    {
        write!(out, "{}", generated.document).context("Failed to write output")?;
    }

    Ok(())
}

/// Unified diff between the canonical input and the generated document.
pub fn unified_diff(
    generated: &Generated,
    name: &str,
) -> String
{
    similar::TextDiff::from_lines(&generated.original, &generated.document)
        .unified_diff()
        .context_radius(3)
        .header(&format!("{name}.orig"), name)
        .to_string()
}
