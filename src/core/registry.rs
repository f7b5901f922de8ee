//! Registry - every known package and its files.
//!
//! Packages keep the order they were added in, and files keep ingestion
//! order within a package. Lookups by qualified name resolve an omitted
//! package against the root package, which is the first package ever added.

use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use crate::core::{Package, QualifiedName, SourceFile};
use crate::sources::PathSource;
use crate::util::Diagnostic;

/// In-memory store of packages and their source files.
#[derive(Debug, Default)]
pub struct Registry {
    /// Packages in insertion order
    packages: Vec<Package>,

    /// Name of the first package ever added
    root: Option<String>,

    /// Soft problems collected during ingestion
    warnings: Vec<Diagnostic>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and ingest the package at `source`.
    ///
    /// Returns the new package, or `Ok(None)` without reading any sources
    /// when a package with the same name is already registered. Ingestion
    /// is all-or-nothing: on error the registry is left untouched.
    pub fn add_package(&mut self, source: &PathSource) -> Result<Option<&Package>> {
        let manifest = source.load_manifest()?;

        if self.package_exists(manifest.name()) {
            tracing::debug!(
                "package `{}` already registered, ignoring {}",
                manifest.name(),
                manifest.manifest_path().display()
            );
            return Ok(None);
        }

        let ingested = crate::sources::ingest(manifest, source.scan_depth())?;
        self.warnings.extend(ingested.warnings);
        if self.insert(ingested.package) {
            Ok(self.packages.last())
        } else {
            Ok(None)
        }
    }

    /// Register an already-ingested package. No-op if the name is taken.
    pub fn insert(&mut self, package: Package) -> bool {
        if self.package_exists(package.name()) {
            return false;
        }

        if self.root.is_none() {
            self.root = Some(package.name().to_string());
        }

        tracing::debug!("registered package `{}` ({} files)", package.name(), package.len());
        self.packages.push(package);
        true
    }

    /// Remove a package and all of its files.
    ///
    /// Files elsewhere that required its components are left dangling, and
    /// warnings collected while ingesting it stay in [`Registry::warnings`].
    pub fn remove_package(&mut self, name: &str) -> bool {
        let before = self.packages.len();
        self.packages.retain(|p| p.name() != name);
        let removed = self.packages.len() != before;
        if removed {
            tracing::debug!("removed package `{}`", name);
        }
        removed
    }

    /// The root package name.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    fn default_package(&self) -> &str {
        self.root.as_deref().unwrap_or_default()
    }

    /// Parse a possibly unqualified name against the root package.
    pub fn qualify(&self, raw: &str) -> QualifiedName {
        QualifiedName::parse(self.default_package(), raw)
    }

    /// Package names in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(Package::name)
    }

    /// Look up a package by name.
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name() == name)
    }

    /// Soft problems collected while ingesting packages.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Look up a file by qualified name.
    pub fn file_by_id(&self, id: &QualifiedName) -> Option<&SourceFile> {
        self.package(id.package())?.file(id.name())
    }

    /// Look up the first provider of a qualified component.
    pub fn provider_of(&self, component: &QualifiedName) -> Option<&SourceFile> {
        self.package(component.package())?.provider(component.name())
    }

    /// Look up a file by (possibly unqualified) name.
    pub fn lookup_file(&self, file: &str) -> Option<&SourceFile> {
        self.file_by_id(&self.qualify(file))
    }

    /// Look up the first file providing a (possibly unqualified) component.
    pub fn lookup_component(&self, component: &str) -> Option<&SourceFile> {
        self.provider_of(&self.qualify(component))
    }

    /// Map a file name to its qualified name, if the file exists.
    pub fn file_to_file(&self, file: &str) -> Option<QualifiedName> {
        self.lookup_file(file).map(|f| f.id().clone())
    }

    /// Map a component to the qualified name of its first provider.
    pub fn component_to_file(&self, component: &str) -> Option<QualifiedName> {
        self.lookup_component(component).map(|f| f.id().clone())
    }

    /// Map components to their providers, deduplicated, in request order.
    pub fn components_to_files<S: AsRef<str>>(&self, components: &[S]) -> Vec<QualifiedName> {
        let mut files = Vec::new();
        for component in components {
            if let Some(file) = self.component_to_file(component.as_ref()) {
                include(&mut files, file);
            }
        }
        files
    }

    /// Providers of already-qualified components, deduplicated, in order.
    pub fn providers_of(&self, components: &[QualifiedName]) -> Vec<QualifiedName> {
        let mut files = Vec::new();
        for component in components {
            if let Some(file) = self.provider_of(component) {
                include(&mut files, file.id().clone());
            }
        }
        files
    }

    /// Qualified names of every file, optionally restricted to one package.
    pub fn all_files(&self, package: Option<&str>) -> Vec<QualifiedName> {
        self.packages
            .iter()
            .filter(|p| package.map_or(true, |name| p.name() == name))
            .flat_map(|p| p.files().iter().map(|f| f.id().clone()))
            .collect()
    }

    /// Check whether a file exists.
    pub fn file_exists(&self, file: &str) -> bool {
        self.lookup_file(file).is_some()
    }

    /// Check whether any file provides a component.
    pub fn component_exists(&self, component: &str) -> bool {
        self.lookup_component(component).is_some()
    }

    /// Check whether a package is registered.
    pub fn package_exists(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p.name() == name)
    }

    fn package_or_root(&self, package: Option<&str>) -> Option<&Package> {
        self.package(package.unwrap_or(self.default_package()))
    }

    /// Look up a raw manifest field of a package (root when `None`).
    pub fn package_field(&self, package: Option<&str>, key: &str) -> Option<&Value> {
        self.package_or_root(package)?.manifest().field(key)
    }

    /// The license of a package (root when `None`).
    pub fn package_license(&self, package: Option<&str>) -> Option<&str> {
        self.package_or_root(package)?.manifest().license()
    }

    /// The normalized authors of a package (root when `None`).
    pub fn package_authors(&self, package: Option<&str>) -> Vec<String> {
        self.package_or_root(package)
            .map(|p| p.manifest().authors().to_vec())
            .unwrap_or_default()
    }

    /// Look up a descriptor field of a file.
    pub fn file_field(&self, file: &str, key: &str) -> Option<Value> {
        self.lookup_file(file)?.field(key)
    }

    /// The license of a file, inherited from its package when undeclared.
    pub fn file_license(&self, file: &str) -> Option<&str> {
        self.lookup_file(file)?.license()
    }

    /// The authors of a file, falling back to its owning package's authors.
    pub fn file_authors(&self, file: &str) -> Vec<String> {
        match self.lookup_file(file) {
            Some(f) if !f.authors().is_empty() => f.authors().to_vec(),
            Some(f) => self.package_authors(Some(f.package())),
            None => Vec::new(),
        }
    }

    /// The source text of a file.
    pub fn file_source(&self, file: &str) -> Option<&str> {
        self.lookup_file(file).map(SourceFile::source)
    }

    /// The path a file was read from.
    pub fn file_path(&self, file: &str) -> Option<&Path> {
        self.lookup_file(file).map(SourceFile::path)
    }

    /// The qualified requirements of a file.
    pub fn file_requires(&self, file: &str) -> &[QualifiedName] {
        self.lookup_file(file)
            .map(SourceFile::requires)
            .unwrap_or_default()
    }

    /// The components a file provides.
    pub fn file_provides(&self, file: &str) -> &[String] {
        self.lookup_file(file)
            .map(SourceFile::provides)
            .unwrap_or_default()
    }
}

/// Append `item` unless it is already present.
pub(crate) fn include<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}
