//! # Generator Module
//!
//! Projection of an analysed entity model into the namespaced block of type
//! declarations.
//!
//! ## Architecture
//!
//! ```text
//! SourceUnits → EntityModel → RelationGraph → cycles / order → Projector → Assembler → text
//! ```
//!
//! 1. **Projector** - one main declaration per entity, plus a partial
//!    companion for entities with a primary key. Each relation field becomes a
//!    partial reference or a primary-key stub depending on the broken edge set
//!    and `use_partial_types`.
//! 2. **Renderer** - turns declarations into interface text.
//! 3. **Assembler** - renders the Askama namespace template, collection
//!    container first, declarations in dependency order.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use entity_typegen::config::ProjectionOptions;
//! use entity_typegen::generator::generate;
//! use entity_typegen::source::{read_source_dir, DeclarativeExtractor};
//!
//! let units = read_source_dir(Path::new("entities"))?;
//! let generation = generate(&units, &DeclarativeExtractor, &ProjectionOptions::default())?;
//! print!("{}", generation.output);
//! ```
//!
//! ## Output
//!
//! For `User { id: number, posts: many Post }` and
//! `Post { id: string, author: User }` in partial mode:
//!
//! ```text
//! export namespace Entities {
//!   export interface Collection<T> {
//!     items: T[];
//!   }
//!
//!   export interface Post {
//!     id: string;
//!     author: UserPartial;
//!   }
//!   ...
//!   export interface User {
//!     id: number;
//!     posts: Collection<{ id: string }> | { id: string }[];
//!   }
//!   ...
//! }
//! ```

mod assemble;
mod pipeline;
mod projector;
mod render;

pub use assemble::{assemble, NamespaceTemplate};
pub use pipeline::{generate, generate_from_model, write_output, Generation, WriteOutcome};
pub use projector::{DeclKind, FieldDecl, Projector, TypeDecl, TypeExpr};
pub use render::{render_collection_declaration, render_declaration, render_type, INDENT};
