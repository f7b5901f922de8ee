//! Packager - the entry point embedders work with.
//!
//! Owns the registry, the overall template and the postprocessing hooks,
//! and exposes resolution, validation and builds over them.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::{Builder, FilePostprocessor, Postprocessor, Postprocessors};
use crate::core::{QualifiedName, Registry};
use crate::resolver::{self, Exclusions, Request, Resolver};
use crate::sources::PathSource;
use crate::util::fs::DEFAULT_SCAN_DEPTH;

/// A registry of packages plus everything needed to build from it.
#[derive(Debug)]
pub struct Packager {
    registry: Registry,
    hooks: Postprocessors,

    /// Template of the most recently added package that declares one
    overall: Option<PathBuf>,

    /// Depth budget for pattern sources
    scan_depth: i32,
}

impl Default for Packager {
    fn default() -> Self {
        Packager {
            registry: Registry::new(),
            hooks: Postprocessors::new(),
            overall: None,
            scan_depth: DEFAULT_SCAN_DEPTH,
        }
    }
}

impl Packager {
    /// Create an empty packager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a packager and add every path in order.
    ///
    /// The first path becomes the root package.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut packager = Packager::new();
        for path in paths {
            packager.add_package(path)?;
        }
        Ok(packager)
    }

    /// Set the depth budget for packages added from now on.
    pub fn with_scan_depth(mut self, depth: i32) -> Self {
        self.scan_depth = depth;
        self
    }

    /// The depth budget for pattern sources.
    pub fn scan_depth(&self) -> i32 {
        self.scan_depth
    }

    /// Add the package at `path` (a directory or a manifest file).
    ///
    /// Returns `false` when a package with the same name already exists.
    pub fn add_package(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let source = PathSource::new(path.as_ref()).with_scan_depth(self.scan_depth);
        let Some(package) = self.registry.add_package(&source)? else {
            return Ok(false);
        };

        if let Some(overall) = package.manifest().overall_path() {
            tracing::debug!("using overall template {}", overall.display());
            self.overall = Some(overall);
        }
        Ok(true)
    }

    /// Remove a package by name.
    ///
    /// The overall template stays set even when the removed package declared it.
    pub fn remove_package(&mut self, name: &str) -> bool {
        self.registry.remove_package(name)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The overall template path, if any package declared one.
    pub fn overall(&self) -> Option<&Path> {
        self.overall.as_deref()
    }

    /// Install the global postprocessor.
    pub fn set_postprocessor(&mut self, hook: impl Postprocessor + 'static) {
        self.hooks.set_global(hook);
    }

    /// Install the per-file postprocessor.
    pub fn set_file_postprocessor(&mut self, hook: impl FilePostprocessor + 'static) {
        self.hooks.set_file(hook);
    }

    /// Install a per-file postprocessor for the files of one package.
    pub fn set_package_postprocessor(
        &mut self,
        package: impl Into<String>,
        hook: impl FilePostprocessor + 'static,
    ) {
        self.hooks.set_package(package, hook);
    }

    pub fn file_exists(&self, file: &str) -> bool {
        self.registry.file_exists(file)
    }

    pub fn component_exists(&self, component: &str) -> bool {
        self.registry.component_exists(component)
    }

    pub fn package_exists(&self, package: &str) -> bool {
        self.registry.package_exists(package)
    }

    /// Report unprovided requirements and missing extra names.
    pub fn validate(&self, extra: &Request) -> Option<Vec<String>> {
        resolver::validate(&self.registry, extra)
    }

    /// Resolve a request into an ordered file list.
    pub fn resolve_files(&self, request: &Request, excluded: &Exclusions) -> Vec<QualifiedName> {
        Resolver::new(&self.registry).resolve_files(request, excluded)
    }

    /// The closure of one file, dependencies first.
    pub fn file_dependencies(&self, file: &str) -> Vec<QualifiedName> {
        Resolver::new(&self.registry).file_dependencies(file)
    }

    /// Build the output for a request.
    pub fn build<S: AsRef<str>>(
        &self,
        request: &Request,
        blocks: &[S],
        excluded: &Exclusions,
    ) -> Result<String> {
        Builder::new(&self.registry, &self.hooks)
            .with_overall(self.overall())
            .build(request, blocks, excluded)
    }
}
