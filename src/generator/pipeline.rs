use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, info_span};

use super::assemble::assemble;
use super::projector::{Projector, TypeDecl};
use crate::config::ProjectionOptions;
use crate::error::Result;
use crate::graph::{analyze, GraphAnalysis};
use crate::model::EntityModel;
use crate::source::{EntityExtractor, SourceUnits};

/// Result of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub analysis: GraphAnalysis,
    /// Declarations in emission order
    pub declarations: Vec<TypeDecl>,
    /// The assembled namespace container
    pub output: String,
}

/// Run the whole pipeline over raw source units.
///
/// The entity model is built from every unit before any graph work starts.
///
/// # Errors
///
/// Any [`crate::error::GenerateError`]; no partial output is produced.
pub fn generate(
    units: &SourceUnits,
    extractor: &dyn EntityExtractor,
    options: &ProjectionOptions,
) -> Result<Generation> {
    let model = {
        let _span = info_span!("collect", units = units.len()).entered();
        EntityModel::collect(units, extractor)?
    };
    generate_from_model(&model, options)
}

/// Run graph analysis, projection and assembly over an existing model.
///
/// # Errors
///
/// Returns [`crate::error::GenerateError::DeclarationCollision`] or
/// [`crate::error::GenerateError::Render`].
pub fn generate_from_model(model: &EntityModel, options: &ProjectionOptions) -> Result<Generation> {
    let analysis = {
        let _span = info_span!("analyze", entities = model.len()).entered();
        analyze(model)
    };
    info!(
        entities = analysis.graph.names().len(),
        edges = analysis.graph.edges().len(),
        cycles = analysis.cycles.len(),
        broken = analysis.broken.len(),
        "relation graph analysed"
    );

    let declarations = {
        let _span = info_span!("project", family = %options.target).entered();
        let projector = Projector::new(model.keys(), &analysis.broken, options);
        analysis
            .order
            .iter()
            .filter_map(|name| model.get(name))
            .flat_map(|entity| projector.project_entity(entity))
            .collect::<Vec<_>>()
    };
    debug!(count = declarations.len(), "declarations projected");

    let output = {
        let _span = info_span!("assemble", namespace = %options.namespace).entered();
        assemble(&declarations, options)?
    };

    Ok(Generation {
        analysis,
        declarations,
        output,
    })
}

/// Outcome of [`write_output`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Skipped,
}

/// Write generated text to `path`, keeping an existing file unless `force`.
pub fn write_output(path: &Path, text: &str, force: bool) -> anyhow::Result<WriteOutcome> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing output file: {path:?}");
        return Ok(WriteOutcome::Skipped);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory for {}", path.display()))?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write generated types: {}", path.display()))?;
    println!("✅ Generated declarations → {path:?}");
    Ok(WriteOutcome::Written)
}
