use clap::Parser;
use labsmith::cli::{Args, Command};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("labsmith")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_defaults() {
    let parsed = Args::try_parse_from(make_args(&["list"])).unwrap();

    assert_eq!(parsed.root, PathBuf::from("."));
    assert!(!parsed.verbose);
    assert!(matches!(parsed.command, Command::List));
}

#[test]
fn test_global_flags_after_subcommand() {
    let parsed = Args::try_parse_from(make_args(&["history", "-v", "--root", "/srv/labs"])).unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.root, PathBuf::from("/srv/labs"));
    assert!(matches!(parsed.command, Command::History));
}

#[test]
fn test_generate_args() {
    let args = make_args(&[
        "generate",
        "postgres-lab",
        "demo",
        "--var",
        "TAG=16",
        "--var",
        "DB_PASS=x",
        "--no-input",
        "-f",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::Generate { recipe, project, vars, stdin, no_input, force } => {
            assert_eq!(recipe, "postgres-lab");
            assert_eq!(project, "demo");
            assert_eq!(vars, vec!["TAG=16", "DB_PASS=x"]);
            assert!(!stdin);
            assert!(no_input);
            assert!(force);
        }
        other => panic!("Expected Generate, got {other:?}"),
    }
}

#[test]
fn test_preview_args() {
    let parsed =
        Args::try_parse_from(make_args(&["preview", "./lab.yaml", "-p", "demo"])).unwrap();

    match parsed.command {
        Command::Preview { recipe, project, vars } => {
            assert_eq!(recipe, "./lab.yaml");
            assert_eq!(project.as_deref(), Some("demo"));
            assert!(vars.is_empty());
        }
        other => panic!("Expected Preview, got {other:?}"),
    }
}

#[test]
fn test_missing_args() {
    assert!(Args::try_parse_from(make_args(&["generate", "postgres-lab"])).is_err());
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_too_many_args() {
    assert!(Args::try_parse_from(make_args(&["validate", "a.yaml", "extra"])).is_err());
}
