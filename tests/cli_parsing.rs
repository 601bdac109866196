use std::path::PathBuf;

use beacon::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_parse_inspect() {
    let cli = Cli::try_parse_from(["beacon", "inspect", "response.json"]).unwrap();
    assert!(!cli.json);
    assert!(cli.config.is_none());

    match cli.command {
        Commands::Inspect(args) => assert_eq!(args.file, PathBuf::from("response.json")),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_inspect_stdin_with_global_json() {
    let cli = Cli::try_parse_from(["beacon", "inspect", "-", "--json"]).unwrap();
    assert!(cli.json);
    match cli.command {
        Commands::Inspect(args) => assert_eq!(args.file, PathBuf::from("-")),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_watch_overrides() {
    let cli = Cli::try_parse_from([
        "beacon",
        "--config",
        "ops/beacon.yaml",
        "watch",
        "--base-url",
        "https://platform.example.com",
        "--min-confidence",
        "0.85",
        "--no-audio",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("ops/beacon.yaml")));
    match cli.command {
        Commands::Watch(args) => {
            assert_eq!(args.base_url.as_deref(), Some("https://platform.example.com"));
            assert_eq!(args.min_confidence, Some(0.85));
            assert!(args.no_audio);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_watch_defaults() {
    let cli = Cli::try_parse_from(["beacon", "watch"]).unwrap();
    match cli.command {
        Commands::Watch(args) => {
            assert!(args.base_url.is_none());
            assert!(args.min_confidence.is_none());
            assert!(!args.no_audio);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_inspect_requires_file() {
    assert!(Cli::try_parse_from(["beacon", "inspect"]).is_err());
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["beacon", "swarm"]).is_err());
}
