use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::core::extract::ReceiverMatch;

#[derive(Debug, Parser)]
#[command(name = "ifacegen")]
#[command(
    about = "Generate or update a Go interface from the method set of a concrete type"
)]
#[command(version, long_about = None)]
pub struct Cli {
    /// Concrete type whose methods form the interface
    #[arg(value_name = "TYPE", required_unless_present_any = ["completions", "init_config"])]
    pub type_name: Option<String>,

    /// Interface to create, or to update when it already exists
    #[arg(value_name = "INTERFACE", required_unless_present_any = ["completions", "init_config"])]
    pub interface_name: Option<String>,

    /// Go source file holding both declarations
    #[arg(value_name = "FILE", required_unless_present_any = ["completions", "init_config"])]
    pub file: Option<PathBuf>,

    /// Print only the generated interface declaration
    #[arg(short = 'i', long = "interface-only")]
    pub print_interface: bool,

    /// Write the result back to FILE instead of stdout
    #[arg(short, long)]
    pub write: bool,

    /// Print a unified diff against the formatted input
    #[arg(short, long)]
    pub diff: bool,

    /// Receiver forms that bind a method to TYPE (overrides config)
    #[arg(long, value_enum)]
    pub receivers: Option<ReceiverMatch>,

    /// Explicit config file (default: ifacegen.toml in the working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the confirmation printed after --write
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print a completion script for SHELL and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,

    /// Write a default ifacegen.toml into the working directory and exit
    #[arg(long, conflicts_with_all = ["type_name", "interface_name", "file", "completions"])]
    pub init_config: bool,

    /// Overwrite an existing config file (with --init-config)
    #[arg(
        long,
        requires = "init_config",
        conflicts_with_all = ["type_name", "interface_name", "file"]
    )]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
