//! SourceFile - one ingested source unit.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::core::descriptor::Descriptor;
use crate::core::QualifiedName;

/// A source file ingested from a package.
///
/// Requirements are qualified against the owning package at ingestion time
/// and never re-resolved afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Qualified `package/name`
    id: QualifiedName,

    /// Required components, fully qualified
    requires: Vec<QualifiedName>,

    /// Provided component names (package-implicit)
    provides: Vec<String>,

    /// File contents
    source: String,

    /// Where the contents were read from
    path: PathBuf,

    /// Resolved license (file-level, else package-level)
    license: Option<String>,

    /// File-level authors; empty means "inherit"
    authors: Vec<String>,

    /// Remaining descriptor fields
    extra: Map<String, Value>,
}

impl SourceFile {
    /// Create a source file in `package` from its descriptor.
    ///
    /// The name defaults to the file stem of `path`; the license defaults
    /// to `package_license`.
    pub fn new(
        package: &str,
        path: PathBuf,
        source: String,
        descriptor: Descriptor,
        package_license: Option<&str>,
    ) -> Self {
        let name = descriptor.name.unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let requires = descriptor
            .requires
            .iter()
            .map(|raw| QualifiedName::parse(package, raw))
            .collect();

        let license = descriptor
            .license
            .or_else(|| package_license.map(String::from));

        SourceFile {
            id: QualifiedName::new(package, name),
            requires,
            provides: descriptor.provides,
            source,
            path,
            license,
            authors: descriptor.authors,
            extra: descriptor.extra,
        }
    }

    /// The qualified `package/name` of this file.
    pub fn id(&self) -> &QualifiedName {
        &self.id
    }

    /// The owning package name.
    pub fn package(&self) -> &str {
        self.id.package()
    }

    /// The file name within its package.
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Required components.
    pub fn requires(&self) -> &[QualifiedName] {
        &self.requires
    }

    /// Provided components.
    pub fn provides(&self) -> &[String] {
        &self.provides
    }

    /// Whether this file provides `component`.
    pub fn provides_component(&self, component: &str) -> bool {
        self.provides.iter().any(|c| c == component)
    }

    /// The file contents.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The path the contents were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The resolved license.
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    /// File-level authors, without package fallback.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Look up a descriptor field by key.
    ///
    /// Typed fields are exposed under their descriptor keys (`name`,
    /// `package`, `requires`, `provides`, `license`, `source`, `path`,
    /// `package/name`); everything else comes from the raw descriptor.
    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::from(self.name())),
            "package" => Some(Value::from(self.package())),
            "package/name" => Some(Value::from(self.id.to_string())),
            "requires" => Some(Value::from(
                self.requires
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
            )),
            "provides" => Some(Value::from(self.provides.clone())),
            "license" => self.license.as_deref().map(Value::from),
            "source" => Some(Value::from(self.source.as_str())),
            "path" => Some(Value::from(self.path.to_string_lossy().into_owned())),
            _ => self.extra.get(key).cloned(),
        }
    }
}
