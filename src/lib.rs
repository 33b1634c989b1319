//! # entity-typegen
//!
//! **entity-typegen** projects a set of entity definitions (records with
//! scalar fields and one/many relations to other entities) into a flat,
//! deterministic block of type declarations that validator code generators
//! can consume.
//!
//! Relations may be cyclic. The generator detects every cycle, breaks one
//! relation on each, and emits declarations in dependency order inside one
//! namespace container, so nothing needs forward-declaration support.
//!
//! ## Architecture
//!
//! - **[`source`]** - raw entity units and the extractor seam
//! - **[`model`]** - the entity model built once from all units
//! - **[`graph`]** - relation graph, cycle detection and breaking, ordering
//! - **[`generator`]** - type projection, rendering and assembly
//! - **[`config`]** - `entity-typegen.toml` and projection options
//! - **[`linter`]** - diagnostics for degraded or invalid output
//! - **[`cli`]** - the `entity-typegen` binary
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(entity-typegen)
//!     participant Source as source::read_source_dir
//!     participant Model as model::EntityModel
//!     participant Graph as graph::analyze
//!     participant Proj as generator::Projector
//!     participant Asm as generator::assemble
//!
//!     CLI->>Source: read_source_dir("entities")
//!     Source-->>CLI: SourceUnits
//!     CLI->>Model: collect(&units, &DeclarativeExtractor)
//!     Model-->>CLI: EntityModel + KeyIndex
//!     CLI->>Graph: analyze(&model)
//!     Graph->>Graph: build_graph, dependency_order,<br/>find_cycles, break_cycles
//!     Graph-->>CLI: GraphAnalysis
//!     CLI->>Proj: project_entity(entity) in order
//!     Proj-->>CLI: Vec<TypeDecl>
//!     CLI->>Asm: assemble(&declarations)
//!     Asm-->>CLI: namespace text
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use entity_typegen::{generate, DeclarativeExtractor, ProjectionOptions};
//! use entity_typegen::source::read_source_dir;
//!
//! let units = read_source_dir(Path::new("entities"))?;
//! let generation = generate(&units, &DeclarativeExtractor, &ProjectionOptions::default())?;
//! std::fs::write("src/entities.ts", generation.output)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
mod ident;
pub mod linter;
pub mod logging;
pub mod model;
pub mod source;

pub use config::{GeneratorConfig, ProjectionOptions, TargetFamily};
pub use error::{GenerateError, Result};
pub use generator::{generate, generate_from_model, Generation};
pub use model::{Entity, EntityModel, FieldKind, FieldSpec, Multiplicity};
pub use source::{DeclarativeExtractor, EntityExtractor, SourceUnit, SourceUnits};
