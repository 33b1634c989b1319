use anyhow::Context;
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::GenerateError;

/// Encoding of a raw entity-definition unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFormat {
    Yaml,
    Json,
}

impl UnitFormat {
    /// Format for a file extension, `None` for files that are not units.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(UnitFormat::Yaml),
            "json" => Some(UnitFormat::Json),
            _ => None,
        }
    }
}

/// One raw entity-definition unit as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub format: UnitFormat,
    pub content: String,
}

impl SourceUnit {
    pub fn yaml(content: impl Into<String>) -> Self {
        SourceUnit {
            format: UnitFormat::Yaml,
            content: content.into(),
        }
    }

    pub fn json(content: impl Into<String>) -> Self {
        SourceUnit {
            format: UnitFormat::Json,
            content: content.into(),
        }
    }
}

/// Ordered mapping of opaque source identifiers to raw units.
pub type SourceUnits = IndexMap<String, SourceUnit>;

/// Read every `.yaml`, `.yml` and `.json` file below `dir` as a source unit.
///
/// Identifiers are paths relative to `dir` with `/` separators, visited in
/// sorted order.
///
/// # Errors
///
/// Returns [`GenerateError::UnresolvedEntitySource`] if `dir` does not exist
/// or contains no unit files, and an I/O error if a unit cannot be read.
pub fn read_source_dir(dir: &Path) -> anyhow::Result<SourceUnits> {
    if !dir.is_dir() {
        return Err(GenerateError::UnresolvedEntitySource {
            location: dir.display().to_string(),
            reason: "directory does not exist".to_string(),
        }
        .into());
    }

    let mut units = SourceUnits::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(format) = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(UnitFormat::from_extension)
        else {
            continue;
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read entity unit: {}", path.display()))?;
        let id = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        debug!(source = %id, "loaded entity unit");
        units.insert(id, SourceUnit { format, content });
    }

    if units.is_empty() {
        return Err(GenerateError::UnresolvedEntitySource {
            location: dir.display().to_string(),
            reason: "no .yaml, .yml or .json entity units found".to_string(),
        }
        .into());
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_format_from_extension() {
        assert_eq!(UnitFormat::from_extension("yml"), Some(UnitFormat::Yaml));
        assert_eq!(UnitFormat::from_extension("YAML"), Some(UnitFormat::Yaml));
        assert_eq!(UnitFormat::from_extension("json"), Some(UnitFormat::Json));
        assert_eq!(UnitFormat::from_extension("ts"), None);
    }

    #[test]
    fn test_missing_directory_is_unresolved_source() {
        let err = read_source_dir(Path::new("/definitely/not/here")).unwrap_err();
        let err = err.downcast::<GenerateError>().unwrap();
        assert!(matches!(err, GenerateError::UnresolvedEntitySource { .. }));
    }
}
