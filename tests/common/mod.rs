#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod fixtures {
    use entity_typegen::model::{Entity, FieldSpec};
    use std::path::PathBuf;

    /// Path of a directory or file under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    /// The three-entity blog model with a User / Post / Comment cycle.
    pub fn blog_entities() -> Vec<Entity> {
        vec![
            Entity::new("User")
                .with_primary_key("id", "number")
                .field(FieldSpec::to_many("posts", "Post")),
            Entity::new("Post")
                .with_primary_key("id", "string")
                .field(FieldSpec::to_one("author", "User"))
                .field(FieldSpec::to_many("comments", "Comment")),
            Entity::new("Comment")
                .with_primary_key("id", "number")
                .field(FieldSpec::to_one("post", "Post"))
                .field(FieldSpec::to_one("author", "User")),
        ]
    }
}

pub mod units {
    use entity_typegen::source::{SourceUnit, SourceUnits};
    use std::path::Path;

    /// Build an in-memory unit set from `(id, yaml)` pairs.
    pub fn yaml_units(units: &[(&str, &str)]) -> SourceUnits {
        units
            .iter()
            .map(|(id, content)| (id.to_string(), SourceUnit::yaml(*content)))
            .collect()
    }

    /// Write `(relative path, content)` pairs below `dir`.
    pub fn write_files(dir: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&path, content).unwrap();
        }
    }
}
