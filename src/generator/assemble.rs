use askama::Template;
use std::collections::HashSet;

use super::projector::TypeDecl;
use super::render::{render_collection_declaration, render_declaration};
use crate::config::ProjectionOptions;
use crate::error::{GenerateError, Result};
use crate::ident::is_identifier;

/// Template data for the namespace container
#[derive(Template)]
#[template(path = "namespace.ts.txt", escape = "none")]
pub struct NamespaceTemplate {
    /// Container name
    pub namespace: String,
    /// Rendered lazy collection declaration
    pub collection: String,
    /// Rendered declarations, in emission order
    pub blocks: Vec<String>,
}

/// Wrap `declarations` in the namespace container.
///
/// Declarations are emitted exactly in the given order, after the shared
/// collection declaration.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidDeclarationName`] if the namespace, the
/// collection container or a declaration is not named by a bare identifier,
/// and [`GenerateError::DeclarationCollision`] if two declarations, or a
/// declaration and the collection container, share a name.
pub fn assemble(declarations: &[TypeDecl], options: &ProjectionOptions) -> Result<String> {
    let invalid = [options.namespace.as_str(), options.collection_type.as_str()]
        .into_iter()
        .chain(declarations.iter().map(|decl| decl.name.as_str()))
        .find(|name| !is_identifier(name));
    if let Some(name) = invalid {
        return Err(GenerateError::InvalidDeclarationName {
            name: name.to_string(),
        });
    }

    let mut names = HashSet::new();
    names.insert(options.collection_type.as_str());
    for decl in declarations {
        if !names.insert(decl.name.as_str()) {
            return Err(GenerateError::DeclarationCollision {
                name: decl.name.clone(),
            });
        }
    }

    let rendered = NamespaceTemplate {
        namespace: options.namespace.clone(),
        collection: render_collection_declaration(&options.collection_type, 1)
            .trim_end()
            .to_string(),
        blocks: declarations
            .iter()
            .map(|decl| render_declaration(decl, 1).trim_end().to_string())
            .collect(),
    }
    .render()?;

    Ok(format!("{}\n", rendered.trim_end()))
}
