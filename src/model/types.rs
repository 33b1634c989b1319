use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Opaque type used for relation fields whose target does not resolve and
/// which carry no declared type of their own.
pub const OPAQUE_TYPE: &str = "unknown";

/// Multiplicity of a relation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Multiplicity {
    One,
    Many,
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::One => write!(f, "one"),
            Multiplicity::Many => write!(f, "many"),
        }
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Passthrough type, opaque to the projector.
    Scalar(String),
    /// Single reference to the named entity.
    RelationToOne(String),
    /// Multi-valued reference to the named entity.
    RelationToMany(String),
}

impl FieldKind {
    /// Target entity name and multiplicity, `None` for scalars.
    pub fn relation(&self) -> Option<(&str, Multiplicity)> {
        match self {
            FieldKind::Scalar(_) => None,
            FieldKind::RelationToOne(target) => Some((target, Multiplicity::One)),
            FieldKind::RelationToMany(target) => Some((target, Multiplicity::Many)),
        }
    }
}

/// A single field of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub optional: bool,
    pub kind: FieldKind,
    /// Source-level type annotation of a relation field, emitted verbatim
    /// when the relation target is not a known entity.
    pub declared_type: Option<String>,
}

impl FieldSpec {
    pub fn scalar(name: impl Into<String>, ty: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            optional: false,
            kind: FieldKind::Scalar(ty.into()),
            declared_type: None,
        }
    }

    pub fn to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            optional: false,
            kind: FieldKind::RelationToOne(target.into()),
            declared_type: None,
        }
    }

    pub fn to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            optional: false,
            kind: FieldKind::RelationToMany(target.into()),
            declared_type: None,
        }
    }

    /// Mark the field optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attach the source-level annotation used for unresolved relations.
    pub fn declared(mut self, ty: impl Into<String>) -> Self {
        self.declared_type = Some(ty.into());
        self
    }
}

/// Primary-key field of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKey {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl PrimaryKey {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        PrimaryKey {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A named record type with an optional primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub primary_key: Option<PrimaryKey>,
    /// Fields in source order.
    pub fields: Vec<FieldSpec>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Entity {
            name: name.into(),
            primary_key: None,
            fields: Vec::new(),
        }
    }

    /// Declare the primary key. The field itself is added by [`Entity::field`]
    /// or inserted during collection.
    pub fn with_primary_key(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.primary_key = Some(PrimaryKey::new(name, ty));
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Iterate relation fields as `(field, target, multiplicity)`.
    pub fn relations(&self) -> impl Iterator<Item = (&FieldSpec, &str, Multiplicity)> {
        self.fields
            .iter()
            .filter_map(|f| f.kind.relation().map(|(target, m)| (f, target, m)))
    }

    pub fn is_primary_key(&self, field: &str) -> bool {
        self.primary_key.as_ref().is_some_and(|pk| pk.name == field)
    }
}

/// Name → primary-key lookup shared by the graph builder and the projector.
///
/// A name present in the index is a known entity; the value is `None` when
/// that entity has no primary key.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    keys: HashMap<String, Option<PrimaryKey>>,
}

impl KeyIndex {
    pub fn insert(&mut self, entity: &str, key: Option<PrimaryKey>) {
        self.keys.insert(entity.to_string(), key);
    }

    /// Whether `name` refers to a known entity.
    pub fn is_known(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }

    /// Primary key of a known entity. `None` for unknown entities and for
    /// entities without one.
    pub fn primary_key(&self, name: &str) -> Option<&PrimaryKey> {
        self.keys.get(name).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
