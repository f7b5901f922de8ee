//! Test utilities for jspack unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use jspack::test_support::PackageFixture;
//!
//! let root = PackageFixture::new("core")
//!     .component("a", &["A"], &[])
//!     .component("b", &["B"], &["A"])
//!     .write(tmp.path());
//! ```

pub mod fixtures;

pub use fixtures::*;

use std::path::Path;

use crate::core::Packager;

/// Build a packager from fixtures written under `dir`, in order.
pub fn packager_with(dir: &Path, fixtures: &[PackageFixture]) -> Packager {
    let mut packager = Packager::new();
    for fixture in fixtures {
        let root = fixture.write(dir);
        packager.add_package(&root).unwrap();
    }
    packager
}
