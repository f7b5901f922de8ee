//! Package - a manifest together with its ingested source files.

use std::collections::HashMap;

use crate::core::{Manifest, SourceFile};

/// A named collection of source files plus manifest metadata.
///
/// Files keep ingestion order. Inserting a file whose name already exists
/// replaces the earlier one in place, so its position is unchanged.
#[derive(Debug, Clone)]
pub struct Package {
    /// The parsed manifest
    manifest: Manifest,

    /// Files in ingestion order
    files: Vec<SourceFile>,

    /// File name -> position in `files`
    index: HashMap<String, usize>,
}

impl Package {
    /// Create an empty package for a manifest.
    pub fn new(manifest: Manifest) -> Self {
        Package {
            manifest,
            files: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        self.manifest.name()
    }

    /// Get the manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Insert a file, returning the file it replaced, if any.
    pub fn insert_file(&mut self, file: SourceFile) -> Option<SourceFile> {
        match self.index.get(file.name()) {
            Some(&position) => Some(std::mem::replace(&mut self.files[position], file)),
            None => {
                self.index.insert(file.name().to_string(), self.files.len());
                self.files.push(file);
                None
            }
        }
    }

    /// Look up a file by its name within this package.
    pub fn file(&self, name: &str) -> Option<&SourceFile> {
        self.index.get(name).map(|&position| &self.files[position])
    }

    /// All files in ingestion order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// The first file, in ingestion order, that provides `component`.
    pub fn provider(&self, component: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.provides_component(component))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the package has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
