//! Path source - ingest a package from the local filesystem.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::descriptor::{Descriptor, DescriptorOrigin};
use crate::core::manifest::{ManifestError, Sources};
use crate::core::{Manifest, Package, SourceFile};
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs::{bounded_glob, read_to_string, DEFAULT_SCAN_DEPTH};
use serde_json::Value;

/// A package located by a directory or manifest path.
#[derive(Debug, Clone)]
pub struct PathSource {
    /// Package directory or manifest file
    path: PathBuf,

    /// Initial depth budget for pattern sources
    scan_depth: i32,
}

/// A fully ingested package, ready to be committed to a registry.
#[derive(Debug)]
pub struct Ingested {
    /// The package and its files
    pub package: Package,

    /// Soft problems found while ingesting
    pub warnings: Vec<Diagnostic>,
}

impl PathSource {
    /// Create a new path source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PathSource {
            path: path.into(),
            scan_depth: DEFAULT_SCAN_DEPTH,
        }
    }

    /// Set the depth budget used when `sources` is a pattern.
    pub fn with_scan_depth(mut self, depth: i32) -> Self {
        self.scan_depth = depth;
        self
    }

    /// The package path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The depth budget for pattern sources.
    pub fn scan_depth(&self) -> i32 {
        self.scan_depth
    }

    /// Locate and parse the manifest.
    pub fn load_manifest(&self) -> Result<Manifest> {
        Manifest::load(&self.path)
    }

    /// Load the manifest and ingest every declared source.
    pub fn load(&self) -> Result<Ingested> {
        ingest(self.load_manifest()?, self.scan_depth)
    }
}

/// Expand a manifest's `sources` into absolute paths paired with inline descriptors.
fn source_entries(manifest: &Manifest, scan_depth: i32) -> Result<Vec<(PathBuf, Option<Value>)>> {
    match manifest.sources() {
        Some(Sources::List(entries)) => Ok(entries
            .iter()
            .map(|entry| {
                (
                    manifest.root().join(entry.path()),
                    entry.descriptor().cloned(),
                )
            })
            .collect()),
        Some(Sources::Pattern(pattern)) => {
            let paths = bounded_glob(manifest.root(), pattern, scan_depth)?;
            tracing::debug!(
                "pattern `{}` matched {} files in {}",
                pattern,
                paths.len(),
                manifest.root().display()
            );
            Ok(paths.into_iter().map(|path| (path, None)).collect())
        }
        None => Err(ManifestError::MissingSources {
            package: manifest.name().to_string(),
        }
        .into()),
    }
}

/// Read every source declared by `manifest` into a new [`Package`].
///
/// Any missing source aborts the whole package; nothing is returned for
/// partial ingestion. The `overall` template is never ingested as a source.
pub fn ingest(manifest: Manifest, scan_depth: i32) -> Result<Ingested> {
    let entries = source_entries(&manifest, scan_depth)?;
    let overall = manifest.overall_path();
    let package_name = manifest.name().to_string();
    let package_license = manifest.license().map(String::from);

    let mut package = Package::new(manifest);
    let mut warnings = Vec::new();

    for (path, inline) in entries {
        if overall.as_deref() == Some(path.as_path()) {
            tracing::debug!("skipping overall template {}", path.display());
            continue;
        }

        if !path.is_file() {
            return Err(ManifestError::SourceNotFound {
                package: package_name,
                path,
            }
            .into());
        }

        let source = read_to_string(&path)?;
        let (descriptor, origin) = Descriptor::extract(&source, inline.as_ref(), &path);
        if origin == DescriptorOrigin::None {
            tracing::debug!("no descriptor for {}", path.display());
        }

        let file = SourceFile::new(
            &package_name,
            path,
            source,
            descriptor,
            package_license.as_deref(),
        );
        tracing::debug!(
            "ingested {} (requires: {}, provides: {})",
            file.id(),
            file.requires().len(),
            file.provides().len()
        );

        let id = file.id().clone();
        let new_path = file.path().to_path_buf();
        if let Some(replaced) = package.insert_file(file) {
            tracing::warn!(
                "file `{}` from {} replaces the one from {}",
                id,
                new_path.display(),
                replaced.path().display()
            );
            warnings.push(
                Diagnostic::warning(format!("file `{}` was defined twice", id))
                    .with_location(new_path)
                    .with_context(format!(
                        "it replaces the source read from {}",
                        replaced.path().display()
                    ))
                    .with_suggestion(suggestions::DUPLICATE_FILE),
            );
        }
    }

    Ok(Ingested { package, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::PackageFixture;
    use tempfile::TempDir;

    #[test]
    fn test_ingest_literal_sources() {
        let tmp = TempDir::new().unwrap();
        let root = PackageFixture::new("core")
            .file("a.js", "/*\n---\nprovides: [A]\n...\n*/\na();", None)
            .file("b.js", "/*\n---\nprovides: [B]\nrequires: [A]\n...\n*/\nb();", None)
            .write(tmp.path());

        let ingested = PathSource::new(&root).load().unwrap();
        let pkg = ingested.package;

        assert_eq!(pkg.name(), "core");
        let names: Vec<_> = pkg.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(pkg.file("b").unwrap().requires()[0].to_string(), "core/A");
        assert!(ingested.warnings.is_empty());
    }

    #[test]
    fn test_ingest_json_manifest() {
        let tmp = TempDir::new().unwrap();
        let root = PackageFixture::new("core")
            .json()
            .file("a.js", "/*\n---\nprovides: [A]\n...\n*/\na();", None)
            .write(tmp.path());

        assert!(root.join("package.json").is_file());
        let pkg = PathSource::new(&root).load().unwrap().package;
        assert!(pkg.file("a").unwrap().provides_component("A"));
    }

    #[test]
    fn test_inline_descriptor_used_without_front_matter() {
        let tmp = TempDir::new().unwrap();
        let root = PackageFixture::new("core")
            .file("plain.js", "plain();", Some(r#"{"provides": ["Plain"], "name": "P"}"#))
            .write(tmp.path());

        let pkg = PathSource::new(&root).load().unwrap().package;
        let file = pkg.file("P").unwrap();
        assert!(file.provides_component("Plain"));
    }

    #[test]
    fn test_missing_source_aborts() {
        let tmp = TempDir::new().unwrap();
        let root = PackageFixture::new("core")
            .file("a.js", "a();", None)
            .declare("missing.js")
            .write(tmp.path());

        let err = PathSource::new(&root).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_sources_field_aborts() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.yml"), "name: bare\n").unwrap();

        let err = PathSource::new(tmp.path()).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::MissingSources { .. })
        ));
    }

    #[test]
    fn test_overall_template_is_not_a_source() {
        let tmp = TempDir::new().unwrap();
        let root = PackageFixture::new("core")
            .file("a.js", "a();", None)
            .file("wrapper.js", "(function(){ /*** [Code] ***/ })();", None)
            .overall("wrapper.js")
            .write(tmp.path());

        let pkg = PathSource::new(&root).load().unwrap().package;
        assert!(pkg.file("a").is_some());
        assert!(pkg.file("wrapper").is_none());
    }

    #[test]
    fn test_pattern_sources() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("pkg");
        std::fs::create_dir_all(root.join("Source/Fx")).unwrap();
        std::fs::write(root.join("package.yml"), "name: more\nsources: '*.js'\n").unwrap();
        std::fs::write(root.join("Source/Drag.js"), "drag();").unwrap();
        std::fs::write(root.join("Source/Fx/Fx.Scroll.js"), "scroll();").unwrap();
        std::fs::write(root.join("Source/notes.txt"), "ignored").unwrap();

        let pkg = PathSource::new(&root).load().unwrap().package;
        let names: Vec<_> = pkg.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Drag", "Fx.Scroll"]);
    }

    #[test]
    fn test_pattern_sources_respect_depth() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("pkg");
        std::fs::create_dir_all(root.join("Source")).unwrap();
        std::fs::write(root.join("package.yml"), "name: more\nsources: '*.js'\n").unwrap();
        std::fs::write(root.join("top.js"), "top();").unwrap();
        std::fs::write(root.join("Source/Drag.js"), "drag();").unwrap();

        let pkg = PathSource::new(&root).with_scan_depth(0).load().unwrap().package;
        let names: Vec<_> = pkg.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["top"]);
    }

    #[test]
    fn test_duplicate_names_warn_and_overwrite() {
        let tmp = TempDir::new().unwrap();
        let root = PackageFixture::new("core")
            .file("one/a.js", "first();", None)
            .file("two/a.js", "second();", None)
            .write(tmp.path());

        let ingested = PathSource::new(&root).load().unwrap();
        assert_eq!(ingested.package.len(), 1);
        assert_eq!(ingested.package.file("a").unwrap().source(), "second();");
        assert_eq!(ingested.warnings.len(), 1);
        assert!(ingested.warnings[0].message.contains("core/a"));
    }
}
