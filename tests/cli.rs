use clap::Parser;
use ifacegen::cli::{Cli, Shell};
use ifacegen::core::ReceiverMatch;

#[test]
fn positionals_and_flags() {
    // Given
    let argv = ["ifacegen", "-i", "-w", "-vv", "--receivers", "value", "T", "I", "a.go"];

    // When
    let cli = Cli::parse_from(argv);

    // Then
    assert_eq!(cli.type_name.as_deref(), Some("T"));
    assert_eq!(cli.interface_name.as_deref(), Some("I"));
    assert!(cli.file.as_ref().is_some_and(|p| p.ends_with("a.go")));
    assert!(cli.print_interface && cli.write);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.receivers, Some(ReceiverMatch::Value));
}

#[test]
fn positionals_required_for_generation() {
    assert!(Cli::try_parse_from(["ifacegen", "T", "I"]).is_err());
    assert!(Cli::try_parse_from(["ifacegen"]).is_err());
}

#[test]
fn utility_flags_stand_alone() {
    let cli = Cli::try_parse_from(["ifacegen", "--completions", "fish"]).expect("completions");
    assert!(matches!(cli.completions, Some(Shell::Fish)));

    let cli = Cli::try_parse_from(["ifacegen", "--init-config", "--force"]).expect("init");
    assert!(cli.init_config && cli.force);
}

#[test]
fn force_needs_init_config() {
    assert!(Cli::try_parse_from(["ifacegen", "--force", "T", "I", "a.go"]).is_err());
    assert!(Cli::try_parse_from(["ifacegen", "--force"]).is_err());
}

#[test]
fn completions_reject_other_arguments() {
    assert!(Cli::try_parse_from(["ifacegen", "--completions", "bash", "T", "I", "a.go"]).is_err());
}
