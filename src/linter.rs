//! # Entity Model Linter
//!
//! Checks an entity model for conditions that degrade or block generation.
//!
//! ## Checks Performed
//!
//! 1. **Unresolved relation targets** - the field falls back to its declared type
//! 2. **Targets without a primary key** - the relation projects to `{}`
//! 3. **Missing primary key** - no partial declaration is emitted
//! 4. **Entity name casing** - entity names should be PascalCase
//! 5. **Invalid identifiers** - entity and container names must be bare identifiers
//! 6. **Declaration collisions** - two declarations would share a name
//!
//! ## Usage
//!
//! ```rust,ignore
//! use entity_typegen::linter::{lint_model, print_lint_issues};
//!
//! let issues = lint_model(&model, &options);
//! print_lint_issues(&issues);
//! ```

use std::collections::HashMap;

use crate::config::ProjectionOptions;
use crate::ident::{is_identifier, is_pascal_case, to_pascal_case};
use crate::model::EntityModel;

#[cfg(test)]
mod tests;

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Error - Will cause generation to fail or produce invalid output
    Error,
    /// Warning - Output is produced with reduced fidelity
    Warning,
    /// Info - Best practice suggestion
    Info,
}

/// A lint issue found in an entity model
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "entity:User", "field:Post.author")
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "unresolved_relation_target")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint a collected entity model against the options it will be generated with.
pub fn lint_model(model: &EntityModel, options: &ProjectionOptions) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    lint_options(&mut issues, options);
    for name in model.names() {
        lint_entity(&mut issues, model, name);
    }
    lint_declaration_names(&mut issues, model, options);

    issues
}

fn lint_options(issues: &mut Vec<LintIssue>, options: &ProjectionOptions) {
    for (key, value) in [
        ("namespace", options.namespace.as_str()),
        ("collection_type", options.collection_type.as_str()),
    ] {
        if !is_identifier(value) {
            issues.push(
                LintIssue::new(
                    format!("config:{key}"),
                    LintSeverity::Error,
                    "invalid_identifier",
                    format!("{key} '{value}' is not a valid identifier"),
                )
                .with_suggestion(format!("Use '{}'", to_pascal_case(value))),
            );
        }
    }

    // An empty suffix makes every partial collide with its entity; that is
    // reported as a collision instead.
    if !options.partial_suffix.is_empty()
        && !options
            .partial_suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        issues.push(LintIssue::new(
            "config:partial_suffix",
            LintSeverity::Error,
            "invalid_identifier",
            format!(
                "partial_suffix '{}' would produce invalid declaration names",
                options.partial_suffix
            ),
        ));
    }
}

fn lint_entity(issues: &mut Vec<LintIssue>, model: &EntityModel, name: &str) {
    let Some(entity) = model.get(name) else {
        return;
    };
    let location = format!("entity:{name}");

    if !is_identifier(name) {
        issues.push(
            LintIssue::new(
                location.clone(),
                LintSeverity::Error,
                "invalid_identifier",
                format!("Entity name '{name}' is not a valid declaration name"),
            )
            .with_suggestion(format!("Rename to '{}'", to_pascal_case(name))),
        );
    } else if !is_pascal_case(name) {
        issues.push(
            LintIssue::new(
                location.clone(),
                LintSeverity::Info,
                "entity_name_casing",
                format!("Entity name '{name}' should be PascalCase"),
            )
            .with_suggestion(format!("Rename to '{}'", to_pascal_case(name))),
        );
    }

    if entity.primary_key.is_none() {
        issues.push(
            LintIssue::new(
                location,
                LintSeverity::Info,
                "missing_primary_key",
                format!(
                    "Entity '{name}' has no primary key; no partial declaration is emitted and relations to it become '{{}}'"
                ),
            )
            .with_suggestion("Declare a primary_key for the entity"),
        );
    }

    let keys = model.keys();
    for (field, target, multiplicity) in entity.relations() {
        let location = format!("field:{name}.{}", field.name);
        if !keys.is_known(target) {
            let fallback = field.declared_type.as_deref().unwrap_or("unknown");
            issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Warning,
                    "unresolved_relation_target",
                    format!(
                        "Relation ({multiplicity}) targets unknown entity '{target}'; emitted as '{fallback}'"
                    ),
                )
                .with_suggestion(format!("Define entity '{target}' or fix the target name")),
            );
        } else if keys.primary_key(target).is_none() {
            issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Warning,
                    "target_without_primary_key",
                    format!(
                        "Relation targets '{target}', which has no primary key; emitted as an empty object"
                    ),
                )
                .with_suggestion(format!("Declare a primary_key on '{target}'")),
            );
        }
    }
}

fn lint_declaration_names(
    issues: &mut Vec<LintIssue>,
    model: &EntityModel,
    options: &ProjectionOptions,
) {
    // Declaration name -> what produced it, first one wins.
    let mut declared: HashMap<String, String> = HashMap::new();
    declared.insert(
        options.collection_type.clone(),
        "the collection container".to_string(),
    );

    let mut check = |issues: &mut Vec<LintIssue>, decl: String, origin: String| {
        if let Some(first) = declared.get(&decl).cloned() {
            issues.push(
                LintIssue::new(
                    format!("declaration:{decl}"),
                    LintSeverity::Error,
                    "declaration_collision",
                    format!("'{decl}' is declared by both {first} and {origin}"),
                )
                .with_suggestion("Rename the entity or change partial_suffix / collection_type"),
            );
        } else {
            declared.insert(decl, origin);
        }
    };

    for name in model.names() {
        check(issues, name.to_string(), format!("entity '{name}'"));
    }
    for name in model.names() {
        if model.keys().primary_key(name).is_some() {
            check(
                issues,
                options.partial_name(name),
                format!("the partial of '{name}'"),
            );
        }
    }
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Print lint issues in a formatted way
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let groups = [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info (best practices):"),
    ];
    let count = |severity: LintSeverity| issues.iter().filter(|i| i.severity == severity).count();

    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );

    for (severity, heading) in groups {
        if count(severity) == 0 {
            continue;
        }
        println!("{heading}");
        for issue in issues.iter().filter(|i| i.severity == severity) {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {suggestion}");
            }
        }
        println!();
    }
}
