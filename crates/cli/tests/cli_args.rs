use clap::Parser;
use declscope_cli::{Cli, Commands, SearchFlags, parser_for};
use declscope_core::locate::SearchOptions;
use declscope_core::parser::DeclarationParser;
use std::path::{Path, PathBuf};

#[test]
fn test_goto_flags() {
    let cli = Cli::try_parse_from([
        "declscope",
        "goto",
        "Ledger.java",
        "get\\w+",
        "--regex",
        "--ignore-case",
    ])
    .unwrap();

    let Commands::Goto { file, key, search } = cli.command else {
        panic!("expected goto");
    };
    assert_eq!(file, PathBuf::from("Ledger.java"));
    assert_eq!(key, "get\\w+");

    let options = search.apply(SearchOptions::default());
    assert!(options.regex);
    assert!(!options.match_case);
    assert!(!options.whole_word);
}

#[test]
fn test_flags_only_widen_configured_options() {
    let configured = SearchOptions {
        regex: true,
        match_case: false,
        whole_word: true,
    };
    assert_eq!(SearchFlags::default().apply(configured), configured);
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "declscope",
        "complete",
        "Ledger.java",
        "get",
        "--config",
        "/tmp/declscope.json",
        "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/declscope.json")));
    assert!(matches!(cli.command, Commands::Complete { ref prefix, .. } if prefix == "get"));
}

#[test]
fn test_missing_key_is_rejected() {
    assert!(Cli::try_parse_from(["declscope", "goto", "Ledger.java"]).is_err());
}

#[test]
fn test_parser_selection_by_extension() {
    let java = parser_for(Path::new("src/Ledger.java")).unwrap();
    assert_eq!(java.language(), "java");
    assert!(parser_for(Path::new("notes.txt")).is_none());
}
