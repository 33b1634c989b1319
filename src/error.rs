//! Error types for a generation run.
//!
//! Every variant aborts the whole run. Conditions that only reduce output
//! fidelity (unresolved relation targets, targets without a primary key) are
//! not errors and never reach this type.

use std::fmt;

/// Errors that abort a generation run before any output is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The input collection is empty, yielded no entities, or a named
    /// source location does not exist.
    UnresolvedEntitySource {
        /// Source location or description of the missing input
        location: String,
        /// What was wrong with it
        reason: String,
    },
    /// The configuration selects a downstream validator family that is not
    /// recognised.
    UnsupportedProjectionTarget {
        /// The rejected target name
        target: String,
        /// Names of the families that are accepted
        supported: Vec<String>,
    },
    /// A raw source unit could not be decoded into entity records.
    InvalidUnit {
        /// Opaque identifier of the unit
        source_id: String,
        /// Decoder message
        message: String,
    },
    /// The same entity name is defined by more than one unit.
    DuplicateEntity {
        /// Entity name
        name: String,
        /// Unit that defined it first
        first: String,
        /// Unit that defined it again
        second: String,
    },
    /// A field name appears twice within one entity.
    DuplicateField {
        /// Owning entity
        entity: String,
        /// Repeated field name
        field: String,
    },
    /// Two emitted declarations would share the same name.
    DeclarationCollision {
        /// The colliding declaration name
        name: String,
    },
    /// A declaration, the namespace or the collection container would be
    /// emitted under a name that is not a bare identifier.
    InvalidDeclarationName {
        /// The rejected name
        name: String,
    },
    /// An entity's primary-key field is declared with a type other than the
    /// primary-key type.
    PrimaryKeyMismatch {
        /// Owning entity
        entity: String,
        /// Primary-key field name
        field: String,
        /// Type given by the primary key
        key_type: String,
        /// Type the field itself declares
        field_type: String,
    },
    /// The namespace container template failed to render.
    Render(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::UnresolvedEntitySource { location, reason } => {
                write!(f, "unresolved entity source '{location}': {reason}")
            }
            GenerateError::UnsupportedProjectionTarget { target, supported } => {
                write!(
                    f,
                    "unsupported projection target '{target}' (supported: {})",
                    supported.join(", ")
                )
            }
            GenerateError::InvalidUnit { source_id, message } => {
                write!(f, "invalid entity unit '{source_id}': {message}")
            }
            GenerateError::DuplicateEntity {
                name,
                first,
                second,
            } => write!(
                f,
                "entity '{name}' is defined in both '{first}' and '{second}'"
            ),
            GenerateError::DuplicateField { entity, field } => {
                write!(f, "entity '{entity}' declares field '{field}' more than once")
            }
            GenerateError::DeclarationCollision { name } => {
                write!(f, "declaration name '{name}' would be emitted twice")
            }
            GenerateError::InvalidDeclarationName { name } => {
                write!(f, "'{name}' is not a valid declaration name")
            }
            GenerateError::PrimaryKeyMismatch {
                entity,
                field,
                key_type,
                field_type,
            } => write!(
                f,
                "entity '{entity}' declares primary key '{field}' as '{key_type}' but the field as '{field_type}'"
            ),
            GenerateError::Render(message) => write!(f, "failed to render output: {message}"),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<askama::Error> for GenerateError {
    fn from(err: askama::Error) -> Self {
        GenerateError::Render(err.to_string())
    }
}

/// Result alias used across the generation pipeline.
pub type Result<T> = std::result::Result<T, GenerateError>;
