#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn highlight_with_flags_in_any_order() {
    let invocation = parse_args(&["highlight", "--json", "notes.md", "--no-code"]).unwrap();
    assert_eq!(
        invocation,
        Invocation {
            command: Command::Highlight,
            options: Options {
                json: true,
                no_code: true,
                ..Options::default()
            },
            files: vec!["notes.md".to_owned()],
        }
    );
}

#[test]
fn replay_takes_many_files() {
    let invocation = parse_args(&["replay", "v1.md", "v2.md", "v3.md", "--context=2"]).unwrap();
    assert_eq!(invocation.files.len(), 3);
    assert_eq!(invocation.options.context_blocks, Some(2));
    assert_eq!(invocation.options.engine_config().context_blocks, 2);
    assert!(invocation.options.engine_config().incremental);
}

#[test]
fn full_disables_incremental_updates() {
    let invocation = parse_args(&["verify", "--full", "a.md"]).unwrap();
    assert!(!invocation.options.engine_config().incremental);
}

#[test]
fn help_and_version_ignore_files() {
    assert_eq!(parse_args(&["--help"]).unwrap().command, Command::Help);
    assert_eq!(parse_args(&["version"]).unwrap().command, Command::Version);
}

#[test]
fn errors() {
    let empty: [&str; 0] = [];
    assert_eq!(parse_args(&empty), Err(ArgsError::MissingCommand));
    assert_eq!(
        parse_args(&["render", "a.md"]),
        Err(ArgsError::UnknownCommand("render".to_owned()))
    );
    assert_eq!(
        parse_args(&["blocks", "--fast", "a.md"]),
        Err(ArgsError::UnknownOption("--fast".to_owned()))
    );
    assert_eq!(
        parse_args(&["verify", "--context=many", "a.md"]),
        Err(ArgsError::InvalidContext("many".to_owned()))
    );
    assert_eq!(
        parse_args(&["blocks", "--json", "a.md"]),
        Err(ArgsError::Inapplicable {
            option: "--json",
            command: "blocks",
        })
    );
    assert_eq!(
        parse_args(&["highlight", "a.md", "b.md"]),
        Err(ArgsError::FileCount {
            command: "highlight",
            expected: "exactly one file",
        })
    );
    assert_eq!(
        parse_args(&["replay"]),
        Err(ArgsError::FileCount {
            command: "replay",
            expected: "at least one file",
        })
    );
}
