//! Test fixtures for common test scenarios.
//!
//! [`PackageFixture`] writes a manifest plus its source files to disk so
//! tests can exercise real ingestion.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::core::manifest::ManifestFormat;

/// Fixture for a complete package on disk.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    /// Package name (also the directory name).
    pub name: String,
    /// Manifest format to write.
    pub format: ManifestFormat,
    /// Declared `sources` entries, in order.
    pub sources: Vec<Value>,
    /// Files to write (path relative to the package root -> content).
    pub files: Vec<(PathBuf, String)>,
    /// Extra top-level manifest fields.
    pub fields: Map<String, Value>,
}

impl PackageFixture {
    /// Create an empty package fixture with a YAML manifest.
    pub fn new(name: impl Into<String>) -> Self {
        PackageFixture {
            name: name.into(),
            format: ManifestFormat::Yaml,
            sources: Vec::new(),
            files: Vec::new(),
            fields: Map::new(),
        }
    }

    /// Write the manifest as `package.json` instead of `package.yml`.
    pub fn json(mut self) -> Self {
        self.format = ManifestFormat::Json;
        self
    }

    /// Add a source file and declare it, optionally with an inline JSON descriptor.
    pub fn file(mut self, path: &str, contents: &str, inline: Option<&str>) -> Self {
        self.files.push((PathBuf::from(path), contents.to_string()));
        let entry = match inline {
            Some(descriptor) => {
                let descriptor: Value =
                    serde_json::from_str(descriptor).expect("inline descriptor must be JSON");
                json!([path, descriptor])
            }
            None => json!(path),
        };
        self.sources.push(entry);
        self
    }

    /// Add a JavaScript-style source whose front matter provides and requires components.
    pub fn component(self, name: &str, provides: &[&str], requires: &[&str]) -> Self {
        let contents = format!(
            "/*\n---\nprovides: [{}]\nrequires: [{}]\n...\n*/\n{}();",
            provides.join(", "),
            requires.join(", "),
            name
        );
        self.file(&format!("Source/{name}.js"), &contents, None)
    }

    /// Declare a source without writing it.
    pub fn declare(mut self, path: &str) -> Self {
        self.sources.push(json!(path));
        self
    }

    /// Write an additional file without declaring it as a source.
    pub fn extra_file(mut self, path: &str, contents: &str) -> Self {
        self.files.push((PathBuf::from(path), contents.to_string()));
        self
    }

    /// Set the `overall` template path.
    pub fn overall(self, path: &str) -> Self {
        self.field("overall", json!(path))
    }

    /// Set an arbitrary top-level manifest field.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Render the manifest document.
    pub fn manifest(&self) -> String {
        let mut document = Map::new();
        document.insert("name".to_string(), json!(self.name));
        document.insert("sources".to_string(), Value::Array(self.sources.clone()));
        for (key, value) in &self.fields {
            document.insert(key.clone(), value.clone());
        }
        let document = Value::Object(document);

        match self.format {
            ManifestFormat::Yaml => serde_yaml::to_string(&document).expect("yaml serialization"),
            ManifestFormat::Json => {
                serde_json::to_string_pretty(&document).expect("json serialization")
            }
        }
    }

    /// Write the package under `dir/<name>` and return its root.
    pub fn write(&self, dir: &Path) -> PathBuf {
        let root = dir.join(&self.name);
        std::fs::create_dir_all(&root).unwrap();

        let manifest_name = match self.format {
            ManifestFormat::Yaml => "package.yml",
            ManifestFormat::Json => "package.json",
        };
        std::fs::write(root.join(manifest_name), self.manifest()).unwrap();

        for (path, contents) in &self.files {
            let full = root.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(full, contents).unwrap();
        }

        root
    }
}
