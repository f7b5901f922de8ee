//! High-level operations.
//!
//! This module contains the implementation of jspack commands.

pub mod jspack_build;
pub mod load;

pub use jspack_build::{
    build, build_from_components, build_from_files, write, write_from_components,
    write_from_files, BuildOptions,
};
pub use load::load_packager;
