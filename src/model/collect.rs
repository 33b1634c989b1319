use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

use super::types::{Entity, FieldKind, FieldSpec, KeyIndex};
use crate::error::{GenerateError, Result};
use crate::source::{EntityExtractor, SourceUnits};

/// All entities of one generation run, assembled from every input unit.
///
/// Entities are kept in arrival order for display; everything that affects
/// output goes through [`EntityModel::names`], which is sorted.
#[derive(Debug, Clone, Default)]
pub struct EntityModel {
    entities: IndexMap<String, Entity>,
    origins: IndexMap<String, String>,
    keys: KeyIndex,
}

impl EntityModel {
    /// Build the model from every unit in `units`.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::UnresolvedEntitySource`] if there are no units or
    ///   the units contain no entities
    /// - [`GenerateError::InvalidUnit`] if a unit cannot be decoded
    /// - [`GenerateError::DuplicateEntity`] / [`GenerateError::DuplicateField`]
    pub fn collect(units: &SourceUnits, extractor: &dyn EntityExtractor) -> Result<Self> {
        if units.is_empty() {
            return Err(GenerateError::UnresolvedEntitySource {
                location: "<input>".to_string(),
                reason: "no entity-definition units supplied".to_string(),
            });
        }

        let mut model = EntityModel::default();
        for (source_id, unit) in units {
            let entities = extractor.extract(source_id, unit)?;
            debug!(source = %source_id, count = entities.len(), "extracted entities");
            for entity in entities {
                model.insert(source_id, entity)?;
            }
        }

        if model.is_empty() {
            return Err(GenerateError::UnresolvedEntitySource {
                location: units.keys().cloned().collect::<Vec<_>>().join(", "),
                reason: "units contain no entities".to_string(),
            });
        }
        Ok(model)
    }

    /// Build the model from already-extracted entities.
    ///
    /// # Errors
    ///
    /// Same as [`EntityModel::collect`], minus decoding failures.
    pub fn from_entities<I>(entities: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entity>,
    {
        let mut model = EntityModel::default();
        for (i, entity) in entities.into_iter().enumerate() {
            model.insert(&format!("inline#{i}"), entity)?;
        }
        if model.is_empty() {
            return Err(GenerateError::UnresolvedEntitySource {
                location: "<inline>".to_string(),
                reason: "no entities supplied".to_string(),
            });
        }
        Ok(model)
    }

    fn insert(&mut self, source_id: &str, entity: Entity) -> Result<()> {
        if let Some(first) = self.origins.get(&entity.name) {
            return Err(GenerateError::DuplicateEntity {
                name: entity.name.clone(),
                first: first.clone(),
                second: source_id.to_string(),
            });
        }
        let entity = normalize(entity)?;
        self.keys.insert(&entity.name, entity.primary_key.clone());
        self.origins
            .insert(entity.name.clone(), source_id.to_string());
        self.entities.insert(entity.name.clone(), entity);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Entities in arrival order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entity names in lexical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn keys(&self) -> &KeyIndex {
        &self.keys
    }

    /// Identifier of the unit that defined `name`.
    pub fn source_of(&self, name: &str) -> Option<&str> {
        self.origins.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Reject repeated field names and make sure the primary-key field exists,
/// is required and has the primary-key type.
fn normalize(mut entity: Entity) -> Result<Entity> {
    let mut seen = HashSet::new();
    for field in &entity.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(GenerateError::DuplicateField {
                entity: entity.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    if let Some(pk) = entity.primary_key.clone() {
        match entity.fields.iter_mut().find(|f| f.name == pk.name) {
            Some(field) => {
                if field.kind != FieldKind::Scalar(pk.ty.clone()) {
                    return Err(GenerateError::PrimaryKeyMismatch {
                        entity: entity.name.clone(),
                        field: pk.name,
                        key_type: pk.ty,
                        field_type: match &field.kind {
                            FieldKind::Scalar(ty) => ty.clone(),
                            FieldKind::RelationToOne(target) => format!("relation to {target}"),
                            FieldKind::RelationToMany(target) => {
                                format!("relation to many {target}")
                            }
                        },
                    });
                }
                field.optional = false;
            }
            None => entity.fields.insert(
                0,
                FieldSpec {
                    name: pk.name,
                    optional: false,
                    kind: FieldKind::Scalar(pk.ty),
                    declared_type: None,
                },
            ),
        }
    }
    Ok(entity)
}
