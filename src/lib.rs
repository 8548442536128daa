//! **ifacegen** - Generate or update a Go interface from a concrete type's method set
//!
//! Parses a Go file with tree-sitter, synthesizes an interface from the
//! methods bound to a type, and splices it into the source without
//! disturbing any other line.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Error taxonomy with miette diagnostics
pub mod error;

/// Core pipeline - parse, gather, synthesize, merge, splice, revalidate
pub mod core {
    /// Interface model and its canonical rendering
    pub mod contract;
    pub use contract::{ContractMethod, ContractSpec, Field, Signature};

    /// Parsed view of a source file: declarations, doc blocks, index
    pub mod document;
    pub use document::{DeclKind, Declaration, Document};

    /// Method gathering by receiver type
    pub mod extract;
    pub use extract::{ExtractOptions, ReceiverMatch, gather_type_methods};

    /// Method set to interface synthesis
    pub mod synth;
    pub use synth::synthesize;

    /// Right-biased interface union
    pub mod merge;
    pub use merge::merge;

    /// Comment-aware insertion points
    pub mod anchor;
    pub use anchor::{Anchor, locate};

    /// Line-level text splicing
    pub mod splice;

    /// Canonical formatting (gofmt stand-in)
    pub mod format;
    pub use format::canonicalize;

    /// End-to-end workflow and CLI runner
    pub mod generate;
    pub use generate::{GenerateRequest, Generated, generate, run as generate_run};
}

/// Language processing - Go parsing with tree-sitter
pub mod parsers {
    /// Go declaration collector and syntax validation
    pub mod go_parser;
    pub use go_parser::GoParser;
}

/// Infrastructure - Configuration, I/O, and utilities
pub mod infra {
    /// Configuration management with TOML and environment layering
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Source reading and atomic write-back
    pub mod io;
    pub use io::{read_source, write_atomic};

    /// Tree-sitter node helpers
    pub(crate) mod utils;
}

pub use cli::Cli;
pub use core::{GenerateRequest, Generated, generate};
pub use error::{GenError, Result};
pub use parsers::GoParser;
