#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::fs;

fn write_blog(dir: &std::path::Path) {
    fs::write(
        dir.join("user.yaml"),
        "entities:\n  - name: User\n    primary_key: { name: id, type: number }\n    fields:\n      - { name: posts, relation: many, target: Post }\n",
    )
    .unwrap();
    fs::write(
        dir.join("post.yaml"),
        "entities:\n  - name: Post\n    primary_key: { name: id, type: string }\n    fields:\n      - { name: author, relation: one, target: User }\n",
    )
    .unwrap();
}

#[test]
fn test_generate_command_with_flags() {
    let cli = Cli::try_parse_from([
        "entity-typegen",
        "generate",
        "--input",
        "entities",
        "--output",
        "out.ts",
        "--target",
        "yup",
        "--partial-types",
        "true",
        "--force",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate {
            input,
            output,
            target,
            partial_types,
            force,
            dry_run,
            ..
        } => {
            assert_eq!(input.to_string_lossy(), "entities");
            assert_eq!(output.unwrap().to_string_lossy(), "out.ts");
            assert_eq!(target.as_deref(), Some("yup"));
            assert_eq!(partial_types, Some(true));
            assert!(force);
            assert!(!dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_lint_command_with_flags() {
    let cli = Cli::try_parse_from([
        "entity-typegen",
        "lint",
        "--input",
        "entities",
        "--fail-on-error",
        "--errors-only",
    ])
    .unwrap();

    match cli.command {
        Commands::Lint {
            input,
            fail_on_error,
            errors_only,
            ..
        } => {
            assert_eq!(input.to_string_lossy(), "entities");
            assert!(fail_on_error);
            assert!(errors_only);
        }
        _ => panic!("Expected Lint command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["entity-typegen", "generate", "--input", "entities"],
        vec!["entity-typegen", "lint", "--input", "entities"],
        vec!["entity-typegen", "graph", "--input", "entities", "--json"],
        vec!["entity-typegen", "--verbose", "graph", "--input", "entities"],
        vec!["entity-typegen", "graph", "--input", "entities", "-v"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_partial_types_requires_bool() {
    assert!(Cli::try_parse_from([
        "entity-typegen",
        "generate",
        "--input",
        "entities",
        "--partial-types",
        "maybe",
    ])
    .is_err());
}

#[test]
fn test_generate_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    write_blog(dir.path());
    let output = dir.path().join("gen").join("entities.ts");

    let cli = Cli::try_parse_from([
        "entity-typegen",
        "generate",
        "--input",
        dir.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();
    execute(&cli.command).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("// Generated by entity-typegen."));
    assert!(text.contains("export interface PostPartial {"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_blog(dir.path());
    let output = dir.path().join("entities.ts");

    let cli = Cli::try_parse_from([
        "entity-typegen",
        "generate",
        "--input",
        dir.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--dry-run",
    ])
    .unwrap();
    execute(&cli.command).unwrap();
    assert!(!output.exists());
}

#[test]
fn test_config_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    write_blog(dir.path());
    fs::write(
        dir.path().join("entity-typegen.toml"),
        "target = \"joi\"\nnamespace = \"Models\"\n",
    )
    .unwrap();
    let output = dir.path().join("entities.ts");

    let cli = Cli::try_parse_from([
        "entity-typegen",
        "generate",
        "--input",
        dir.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();
    execute(&cli.command).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("export namespace Models {"));
    // joi defaults to key stubs everywhere
    assert!(text.contains("    author: { id: number };\n"));
}

#[test]
fn test_unknown_target_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_blog(dir.path());

    let cli = Cli::try_parse_from([
        "entity-typegen",
        "generate",
        "--input",
        dir.path().to_str().unwrap(),
        "--target",
        "ajv",
        "--dry-run",
    ])
    .unwrap();
    let err = execute(&cli.command).unwrap_err();
    assert!(err.to_string().contains("unsupported projection target 'ajv'"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_blog(dir.path());

    let cli = Cli::try_parse_from([
        "entity-typegen",
        "lint",
        "--input",
        dir.path().to_str().unwrap(),
        "--config",
        dir.path().join("nope.toml").to_str().unwrap(),
    ])
    .unwrap();
    assert!(execute(&cli.command).is_err());
}

#[test]
fn test_lint_fail_on_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.yaml"),
        "entities:\n  - name: User\n    primary_key: { name: id, type: number }\n  - name: UserPartial\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "entity-typegen",
        "lint",
        "--input",
        dir.path().to_str().unwrap(),
        "--fail-on-error",
    ])
    .unwrap();
    let err = execute(&cli.command).unwrap_err();
    assert!(err.to_string().contains("1 error(s)"));
}
