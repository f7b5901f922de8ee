//! jspack - a source-package dependency resolver and build pipeline
//!
//! Packages are directories with a manifest listing source files. Each file
//! declares the components it provides and requires in a front-matter
//! block; jspack resolves requests for files, components or packages into a
//! dependency-ordered file list and concatenates them into one output.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities for jspack unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides fixtures that write packages to disk.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Manifest, Packager, QualifiedName, Registry, SourceFile};
pub use resolver::{Exclusions, Request};
pub use util::context::GlobalContext;
