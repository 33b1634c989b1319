//! # Model Module
//!
//! The entity model every other stage consumes: [`Entity`] records with
//! ordered [`FieldSpec`] sequences, and the [`EntityModel`] arena that holds
//! all entities of one run, keyed by name.
//!
//! The model is built once from *all* input units before any graph work
//! starts, and is immutable afterwards. The [`KeyIndex`] it exposes is the
//! name → primary-key lookup threaded through graph building and projection.

mod collect;
mod types;

pub use collect::EntityModel;
pub use types::*;
