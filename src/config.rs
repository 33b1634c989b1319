//! Generator configuration
//!
//! Projection settings can live in an `entity-typegen.toml` file next to the
//! entity units:
//!
//! ```toml
//! target = "yup"
//! use_partial_types = true
//! namespace = "Models"
//! partial_suffix = "Ref"
//! collection_type = "Collection"
//! ```
//!
//! Every key is optional. Command-line flags override file values, and the
//! result is resolved once into an immutable [`ProjectionOptions`].

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::GenerateError;

/// File name looked up in the input directory.
pub const CONFIG_FILE_NAME: &str = "entity-typegen.toml";

/// Downstream validator family the declarations are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFamily {
    #[default]
    Zod,
    Valibot,
    Yup,
    Joi,
}

impl TargetFamily {
    pub const ALL: [TargetFamily; 4] = [
        TargetFamily::Zod,
        TargetFamily::Valibot,
        TargetFamily::Yup,
        TargetFamily::Joi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetFamily::Zod => "zod",
            TargetFamily::Valibot => "valibot",
            TargetFamily::Yup => "yup",
            TargetFamily::Joi => "joi",
        }
    }

    /// Families with lazy schema references handle partial companion types;
    /// the others get primary-key stubs for every relation.
    pub fn default_use_partial_types(self) -> bool {
        matches!(self, TargetFamily::Zod | TargetFamily::Valibot)
    }
}

impl fmt::Display for TargetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetFamily {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TargetFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == wanted)
            .ok_or_else(|| GenerateError::UnsupportedProjectionTarget {
                target: s.to_string(),
                supported: TargetFamily::ALL
                    .iter()
                    .map(|f| f.as_str().to_string())
                    .collect(),
            })
    }
}

/// Resolved, immutable settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionOptions {
    pub target: TargetFamily,
    /// Reference a target's partial declaration for non-broken relations
    /// instead of inlining a primary-key stub.
    pub use_partial_types: bool,
    /// Name of the container all declarations are emitted into.
    pub namespace: String,
    /// Appended to an entity name to name its partial declaration.
    pub partial_suffix: String,
    /// Name of the shared lazy collection declaration.
    pub collection_type: String,
}

impl ProjectionOptions {
    /// Defaults for `target`.
    pub fn for_target(target: TargetFamily) -> Self {
        ProjectionOptions {
            target,
            use_partial_types: target.default_use_partial_types(),
            namespace: "Entities".to_string(),
            partial_suffix: "Partial".to_string(),
            collection_type: "Collection".to_string(),
        }
    }

    pub fn with_partial_types(mut self, enabled: bool) -> Self {
        self.use_partial_types = enabled;
        self
    }

    /// Name of the partial declaration for `entity`.
    pub fn partial_name(&self, entity: &str) -> String {
        format!("{entity}{}", self.partial_suffix)
    }
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        ProjectionOptions::for_target(TargetFamily::default())
    }
}

/// Contents of an `entity-typegen.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Validator family name, checked during [`GeneratorConfig::resolve`]
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub use_partial_types: Option<bool>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub partial_suffix: Option<String>,
    #[serde(default)]
    pub collection_type: Option<String>,
}

/// Values given on the command line, applied over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub target: Option<String>,
    pub use_partial_types: Option<bool>,
    pub namespace: Option<String>,
}

impl GeneratorConfig {
    /// Merge `overrides` over the file values and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedProjectionTarget`] if the selected
    /// target is not a known validator family.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> crate::error::Result<ProjectionOptions> {
        let target = match overrides.target.as_deref().or(self.target.as_deref()) {
            Some(name) => name.parse::<TargetFamily>()?,
            None => TargetFamily::default(),
        };

        let mut options = ProjectionOptions::for_target(target);
        if let Some(enabled) = overrides.use_partial_types.or(self.use_partial_types) {
            options.use_partial_types = enabled;
        }
        if let Some(namespace) = overrides.namespace.as_ref().or(self.namespace.as_ref()) {
            options.namespace = namespace.clone();
        }
        if let Some(suffix) = &self.partial_suffix {
            options.partial_suffix = suffix.clone();
        }
        if let Some(collection) = &self.collection_type {
            options.collection_type = collection.clone();
        }
        Ok(options)
    }
}

/// Load a generator config file.
///
/// Returns `Ok(None)` if the file does not exist and an error if it exists but
/// cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read generator config: {}", config_path.display()))?;
    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", config_path.display()))?;
    Ok(Some(config))
}

/// Resolve the config file to use.
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. `entity-typegen.toml` inside the input directory
/// 3. None (defaults only)
pub fn resolve_config_path(explicit_path: Option<&Path>, input_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let detected = input_dir.join(CONFIG_FILE_NAME);
    detected.exists().then_some(detected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_family_defaults() {
        assert!(TargetFamily::Zod.default_use_partial_types());
        assert!(TargetFamily::Valibot.default_use_partial_types());
        assert!(!TargetFamily::Yup.default_use_partial_types());
        assert!(!TargetFamily::Joi.default_use_partial_types());
    }

    #[test]
    fn test_target_family_parse() {
        assert_eq!("Yup".parse::<TargetFamily>().unwrap(), TargetFamily::Yup);
        let err = "ajv".parse::<TargetFamily>().unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnsupportedProjectionTarget {
                target: "ajv".to_string(),
                supported: vec![
                    "zod".to_string(),
                    "valibot".to_string(),
                    "yup".to_string(),
                    "joi".to_string()
                ],
            }
        );
    }

    #[test]
    fn test_resolve_defaults() {
        let options = GeneratorConfig::default()
            .resolve(&ConfigOverrides::default())
            .unwrap();
        assert_eq!(options, ProjectionOptions::default());
        assert_eq!(options.partial_name("User"), "UserPartial");
    }

    #[test]
    fn test_target_decides_partial_default() {
        let config: GeneratorConfig = toml::from_str("target = \"joi\"").unwrap();
        let options = config.resolve(&ConfigOverrides::default()).unwrap();
        assert_eq!(options.target, TargetFamily::Joi);
        assert!(!options.use_partial_types);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config: GeneratorConfig = toml::from_str(
            "target = \"yup\"\nuse_partial_types = false\nnamespace = \"Models\"\npartial_suffix = \"Ref\"\n",
        )
        .unwrap();
        let overrides = ConfigOverrides {
            target: Some("zod".to_string()),
            use_partial_types: Some(true),
            namespace: None,
        };
        let options = config.resolve(&overrides).unwrap();
        assert_eq!(options.target, TargetFamily::Zod);
        assert!(options.use_partial_types);
        assert_eq!(options.namespace, "Models");
        assert_eq!(options.partial_name("User"), "UserRef");
    }

    #[test]
    fn test_unknown_target_rejected_on_resolve() {
        let config = GeneratorConfig {
            target: Some("io-ts".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.resolve(&ConfigOverrides::default()),
            Err(GenerateError::UnsupportedProjectionTarget { .. })
        ));
    }

    #[test]
    fn test_load_and_detect_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_config_path(None, dir.path()).is_none());
        assert!(load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap().is_none());

        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "namespace = \"Api\"\n").unwrap();
        assert_eq!(resolve_config_path(None, dir.path()), Some(path.clone()));

        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.namespace.as_deref(), Some("Api"));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "colour = \"blue\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
