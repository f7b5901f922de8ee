//! Core data structures for jspack.
//!
//! This module contains the foundational types used throughout jspack:
//! - Manifests and per-file descriptors
//! - Qualified `package/name` addressing
//! - Source files and packages
//! - The registry and the packager that owns it

pub mod descriptor;
pub mod manifest;
pub mod package;
pub mod packager;
pub mod qualified;
pub mod registry;
pub mod source_file;

pub use descriptor::Descriptor;
pub use manifest::{find_manifest, Manifest, ManifestError, MANIFEST_NAMES};
pub use package::Package;
pub use packager::Packager;
pub use qualified::QualifiedName;
pub use registry::Registry;
pub use source_file::SourceFile;
