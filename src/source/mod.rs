//! # Source Module
//!
//! Reading raw entity-definition units and reducing them to entities.
//!
//! The generation core only sees [`SourceUnits`], an ordered mapping of
//! opaque identifiers to raw units, and an [`EntityExtractor`] that turns each
//! unit into [`crate::model::Entity`] records. How many units there are and in
//! which order they arrive does not affect the output.
//!
//! ```rust,ignore
//! use entity_typegen::source::{read_source_dir, DeclarativeExtractor};
//!
//! let units = read_source_dir(Path::new("entities"))?;
//! let model = EntityModel::collect(&units, &DeclarativeExtractor)?;
//! ```

mod extract;
mod load;

pub use extract::*;
pub use load::*;
