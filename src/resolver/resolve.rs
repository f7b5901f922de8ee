//! Resolver - transitive completion of file requests.

use std::collections::HashSet;

use crate::core::registry::include;
use crate::core::{QualifiedName, Registry};
use crate::resolver::{Exclusions, Request};

/// Files already expanded during one top-level resolution.
type Visited = HashSet<QualifiedName>;

/// Resolves requests against a registry.
///
/// Every public entry point allocates its own visited set, so results never
/// depend on earlier calls.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a Registry,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `registry`.
    pub fn new(registry: &'a Registry) -> Self {
        Resolver { registry }
    }

    /// Resolve a request into an ordered, deduplicated file list.
    ///
    /// 1. Seed from files, then component providers, then package files.
    /// 2. Drop the closure of excluded components from the seed.
    /// 3. Complete the seed, dependencies first.
    /// 4. Drop excluded files, then the closure of `files_and_deps`.
    pub fn resolve_files(&self, request: &Request, excluded: &Exclusions) -> Vec<QualifiedName> {
        let mut seed = Vec::new();
        for file in &request.files {
            include(&mut seed, self.registry.qualify(file));
        }
        for file in self.registry.components_to_files(&request.components) {
            include(&mut seed, file);
        }
        for package in &request.packages {
            for file in self.registry.all_files(Some(package)) {
                include(&mut seed, file);
            }
        }
        tracing::debug!("resolving {} requested files", seed.len());

        if !excluded.components.is_empty() {
            let roots = self.registry.components_to_files(&excluded.components);
            let closure = self.complete_files(&roots);
            tracing::debug!(
                "excluding {} files reachable from {:?}",
                closure.len(),
                excluded.components
            );
            seed.retain(|file| !closure.contains(file));
        }

        let mut completed = self.complete_files(&seed);

        if !excluded.files.is_empty() {
            let files = self.qualify_all(&excluded.files);
            completed.retain(|file| !files.contains(file));
        }

        if !excluded.files_and_deps.is_empty() {
            let closure = self.complete_files(&self.qualify_all(&excluded.files_and_deps));
            completed.retain(|file| !closure.contains(file));
        }

        tracing::debug!("resolved {} files", completed.len());
        completed
    }

    /// Complete a set of files: each file's requirement closure, then the
    /// file itself, merged in first-discovery order.
    ///
    /// Names that match no registered file are dropped.
    pub fn complete_files(&self, files: &[QualifiedName]) -> Vec<QualifiedName> {
        let mut visited = Visited::new();
        let mut ordered = Vec::new();
        for file in files {
            self.complete_file(file, &mut visited, &mut ordered);
        }
        ordered
    }

    /// The closure of one file, dependencies first and the file last.
    pub fn file_dependencies(&self, file: &str) -> Vec<QualifiedName> {
        self.complete_files(&[self.registry.qualify(file)])
    }

    fn complete_file(&self, id: &QualifiedName, visited: &mut Visited, ordered: &mut Vec<QualifiedName>) {
        let Some(file) = self.registry.file_by_id(id) else {
            tracing::trace!("skipping unknown file {}", id);
            return;
        };

        if visited.insert(id.clone()) {
            for dependency in self.registry.providers_of(file.requires()) {
                if !visited.contains(&dependency) {
                    tracing::trace!("{} requires {}", id, dependency);
                    self.complete_file(&dependency, visited, ordered);
                }
            }
        }

        include(ordered, id.clone());
    }

    fn qualify_all(&self, names: &[String]) -> Vec<QualifiedName> {
        names.iter().map(|name| self.registry.qualify(name)).collect()
    }
}
