//! Reduction of raw source units to [`Entity`] records.
//!
//! Scanning annotated source syntax is left to implementors of
//! [`EntityExtractor`]. [`DeclarativeExtractor`] reads the declarative
//! YAML/JSON unit format below, which is what the CLI consumes:
//!
//! ```yaml
//! entities:
//!   - name: Post
//!     primary_key: { name: id, type: string }
//!     fields:
//!       - { name: id, type: string }
//!       - { name: title, type: string, optional: true }
//!       - { name: author, relation: one, target: User }
//!       - { name: comments, relation: many, target: Comment, type: "Comment[]" }
//! ```
//!
//! A field with a `relation` needs a `target`; its `type`, if any, is kept as
//! the declared type used when the target turns out to be unknown. A field
//! without a `relation` is a scalar and needs a `type`.

use serde::Deserialize;

use super::load::{SourceUnit, UnitFormat};
use crate::error::{GenerateError, Result};
use crate::model::{Entity, FieldKind, FieldSpec, PrimaryKey};

/// Turns one raw unit into zero or more entities.
pub trait EntityExtractor {
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidUnit`] when the unit cannot be decoded.
    fn extract(&self, source_id: &str, unit: &SourceUnit) -> Result<Vec<Entity>>;
}

/// Extractor for the declarative YAML/JSON unit format.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarativeExtractor;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUnit {
    #[serde(default)]
    entities: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntity {
    name: String,
    #[serde(default)]
    primary_key: Option<RawPrimaryKey>,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPrimaryKey {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawRelation {
    One,
    Many,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    name: String,
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    relation: Option<RawRelation>,
    #[serde(default)]
    target: Option<String>,
}

impl EntityExtractor for DeclarativeExtractor {
    fn extract(&self, source_id: &str, unit: &SourceUnit) -> Result<Vec<Entity>> {
        let invalid = |message: String| GenerateError::InvalidUnit {
            source_id: source_id.to_string(),
            message,
        };

        // An empty document is a unit without entities.
        if unit.content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let raw: RawUnit = match unit.format {
            UnitFormat::Yaml => {
                serde_yaml::from_str(&unit.content).map_err(|e| invalid(e.to_string()))?
            }
            UnitFormat::Json => {
                serde_json::from_str(&unit.content).map_err(|e| invalid(e.to_string()))?
            }
        };

        raw.entities
            .into_iter()
            .map(|e| convert_entity(e).map_err(&invalid))
            .collect()
    }
}

fn convert_entity(raw: RawEntity) -> std::result::Result<Entity, String> {
    let fields = raw
        .fields
        .into_iter()
        .map(|f| convert_field(&raw.name, f))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Entity {
        name: raw.name,
        primary_key: raw.primary_key.map(|pk| PrimaryKey::new(pk.name, pk.ty)),
        fields,
    })
}

fn convert_field(entity: &str, raw: RawField) -> std::result::Result<FieldSpec, String> {
    let (kind, declared_type) = match (raw.relation, raw.target) {
        (Some(relation), Some(target)) => {
            let kind = match relation {
                RawRelation::One => FieldKind::RelationToOne(target),
                RawRelation::Many => FieldKind::RelationToMany(target),
            };
            (kind, raw.ty)
        }
        (Some(_), None) => {
            return Err(format!(
                "relation field '{entity}.{}' is missing a target",
                raw.name
            ))
        }
        (None, Some(_)) => {
            return Err(format!(
                "field '{entity}.{}' has a target but no relation multiplicity",
                raw.name
            ))
        }
        (None, None) => match raw.ty {
            Some(ty) => (FieldKind::Scalar(ty), None),
            None => {
                return Err(format!(
                    "scalar field '{entity}.{}' is missing a type",
                    raw.name
                ))
            }
        },
    };
    Ok(FieldSpec {
        name: raw.name,
        optional: raw.optional,
        kind,
        declared_type,
    })
}
