use serde::Serialize;

use crate::config::ProjectionOptions;
use crate::graph::BrokenEdgeSet;
use crate::model::{Entity, FieldKind, FieldSpec, KeyIndex, OPAQUE_TYPE};

/// Type expression of a projected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeExpr {
    /// Source type emitted verbatim (scalars, declared types, `unknown`).
    Verbatim(String),
    /// Another declaration inside the namespace.
    Reference(String),
    /// Inline object type; `{}` when empty.
    Object(Vec<FieldDecl>),
    /// Generic instantiation, e.g. the lazy collection container.
    Generic { name: String, args: Vec<TypeExpr> },
    Array(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    pub name: String,
    pub optional: bool,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Main,
    Partial,
}

/// One emitted declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    /// Entity the declaration was projected from
    pub entity: String,
    pub kind: DeclKind,
    pub fields: Vec<FieldDecl>,
}

/// Projects entities into declarations.
///
/// For each relation field the projector decides between a reference to the
/// target's partial declaration and an inline primary-key stub:
///
/// | relation            | broken | `use_partial_types` | element type           |
/// |---------------------|--------|---------------------|------------------------|
/// | known target, key   | yes    | any                 | `{ <pk>: <type> }`     |
/// | known target, key   | no     | true                | `<Target><suffix>`     |
/// | known target, key   | no     | false               | `{ <pk>: <type> }`     |
/// | known target, no key| any    | any                 | `{}`                   |
/// | unknown target      | -      | -                   | declared type          |
///
/// To-many relations wrap the element as `Collection<E> | E[]`.
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    keys: &'a KeyIndex,
    broken: &'a BrokenEdgeSet,
    options: &'a ProjectionOptions,
}

impl<'a> Projector<'a> {
    pub fn new(keys: &'a KeyIndex, broken: &'a BrokenEdgeSet, options: &'a ProjectionOptions) -> Self {
        Projector {
            keys,
            broken,
            options,
        }
    }

    /// Main declaration of `entity`, followed by its partial declaration when
    /// it has a primary key.
    pub fn project_entity(&self, entity: &Entity) -> Vec<TypeDecl> {
        let main = TypeDecl {
            name: entity.name.clone(),
            entity: entity.name.clone(),
            kind: DeclKind::Main,
            fields: entity
                .fields
                .iter()
                .map(|field| FieldDecl {
                    name: field.name.clone(),
                    optional: field.optional,
                    ty: self.project_field(&entity.name, field),
                })
                .collect(),
        };

        let Some(pk) = &entity.primary_key else {
            return vec![main];
        };

        let partial = TypeDecl {
            name: self.options.partial_name(&entity.name),
            entity: entity.name.clone(),
            kind: DeclKind::Partial,
            fields: entity
                .fields
                .iter()
                .map(|field| FieldDecl {
                    name: field.name.clone(),
                    optional: field.name != pk.name,
                    ty: self.project_field(&entity.name, field),
                })
                .collect(),
        };
        vec![main, partial]
    }

    /// Type of `field` as declared on entity `from`.
    pub fn project_field(&self, from: &str, field: &FieldSpec) -> TypeExpr {
        match &field.kind {
            FieldKind::Scalar(ty) => TypeExpr::Verbatim(ty.clone()),
            FieldKind::RelationToOne(target) if self.keys.is_known(target) => {
                self.element(from, target)
            }
            FieldKind::RelationToMany(target) if self.keys.is_known(target) => {
                let element = self.element(from, target);
                TypeExpr::Union(vec![
                    TypeExpr::Generic {
                        name: self.options.collection_type.clone(),
                        args: vec![element.clone()],
                    },
                    TypeExpr::Array(Box::new(element)),
                ])
            }
            FieldKind::RelationToOne(_) | FieldKind::RelationToMany(_) => TypeExpr::Verbatim(
                field
                    .declared_type
                    .clone()
                    .unwrap_or_else(|| OPAQUE_TYPE.to_string()),
            ),
        }
    }

    fn element(&self, from: &str, target: &str) -> TypeExpr {
        let Some(pk) = self.keys.primary_key(target) else {
            return TypeExpr::Object(Vec::new());
        };
        if self.options.use_partial_types && !self.broken.is_broken(from, target) {
            return TypeExpr::Reference(self.options.partial_name(target));
        }
        TypeExpr::Object(vec![FieldDecl {
            name: pk.name.clone(),
            optional: false,
            ty: TypeExpr::Verbatim(pk.ty.clone()),
        }])
    }
}
