#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the entity model linter

use crate::config::ProjectionOptions;
use crate::linter::{has_errors, lint_model, LintIssue, LintSeverity};
use crate::model::{Entity, EntityModel, FieldSpec};

fn lint(entities: Vec<Entity>) -> Vec<LintIssue> {
    lint_with(entities, &ProjectionOptions::default())
}

fn lint_with(entities: Vec<Entity>, options: &ProjectionOptions) -> Vec<LintIssue> {
    let model = EntityModel::from_entities(entities).expect("collect model");
    lint_model(&model, options)
}

fn of_kind<'a>(issues: &'a [LintIssue], kind: &str) -> Vec<&'a LintIssue> {
    issues.iter().filter(|i| i.kind == kind).collect()
}

#[test]
fn test_clean_model_has_no_issues() {
    let issues = lint(vec![
        Entity::new("User").with_primary_key("id", "number"),
        Entity::new("Post")
            .with_primary_key("id", "string")
            .field(FieldSpec::to_one("author", "User")),
    ]);
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn test_lint_unresolved_relation_target() {
    let issues = lint(vec![Entity::new("Post")
        .with_primary_key("id", "string")
        .field(FieldSpec::to_one("blob", "Attachment").declared("Buffer"))]);

    let unresolved = of_kind(&issues, "unresolved_relation_target");
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].severity, LintSeverity::Warning);
    assert_eq!(unresolved[0].location, "field:Post.blob");
    assert!(unresolved[0].message.contains("'Buffer'"));
    assert!(!has_errors(&issues));
}

#[test]
fn test_lint_target_without_primary_key() {
    let issues = lint(vec![
        Entity::new("Tag"),
        Entity::new("Post")
            .with_primary_key("id", "string")
            .field(FieldSpec::to_many("tags", "Tag")),
    ]);

    let keyless = of_kind(&issues, "target_without_primary_key");
    assert_eq!(keyless.len(), 1);
    assert_eq!(keyless[0].severity, LintSeverity::Warning);

    let missing = of_kind(&issues, "missing_primary_key");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].location, "entity:Tag");
    assert_eq!(missing[0].severity, LintSeverity::Info);
}

#[test]
fn test_lint_entity_name_casing() {
    let issues = lint(vec![Entity::new("blog_post").with_primary_key("id", "number")]);

    let casing = of_kind(&issues, "entity_name_casing");
    assert_eq!(casing.len(), 1);
    assert_eq!(casing[0].severity, LintSeverity::Info);
    assert_eq!(casing[0].suggestion.as_deref(), Some("Rename to 'BlogPost'"));
}

#[test]
fn test_lint_invalid_entity_identifier() {
    let issues = lint(vec![Entity::new("Blog Post").with_primary_key("id", "number")]);

    let invalid = of_kind(&issues, "invalid_identifier");
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].severity, LintSeverity::Error);
    assert!(of_kind(&issues, "entity_name_casing").is_empty());
    assert!(has_errors(&issues));
}

#[test]
fn test_lint_invalid_namespace() {
    let options = ProjectionOptions {
        namespace: "my-models".to_string(),
        ..ProjectionOptions::default()
    };
    let issues = lint_with(vec![Entity::new("User")], &options);

    let invalid = of_kind(&issues, "invalid_identifier");
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].location, "config:namespace");
    assert_eq!(invalid[0].suggestion.as_deref(), Some("Use 'MyModels'"));
}

#[test]
fn test_lint_declaration_collision() {
    let issues = lint(vec![
        Entity::new("User").with_primary_key("id", "number"),
        Entity::new("UserPartial"),
    ]);

    let collisions = of_kind(&issues, "declaration_collision");
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].location, "declaration:UserPartial");
    assert_eq!(collisions[0].severity, LintSeverity::Error);
}

#[test]
fn test_lint_entity_named_like_collection() {
    let issues = lint(vec![Entity::new("Collection")]);
    assert_eq!(of_kind(&issues, "declaration_collision").len(), 1);
}

#[test]
fn test_empty_partial_suffix_collides() {
    let options = ProjectionOptions {
        partial_suffix: String::new(),
        ..ProjectionOptions::default()
    };
    let issues = lint_with(
        vec![Entity::new("User").with_primary_key("id", "number")],
        &options,
    );
    assert_eq!(of_kind(&issues, "declaration_collision").len(), 1);
    assert!(of_kind(&issues, "invalid_identifier").is_empty());
}
