//! Dependency resolution.
//!
//! Turns a request for files, components and packages into an ordered,
//! deduplicated list of files where every dependency precedes its
//! dependents. Resolution is pure: it only reads the in-memory registry.

pub mod resolve;
pub mod validate;

pub use resolve::Resolver;
pub use validate::validate;

/// What to build: literal files, component providers and whole packages.
///
/// Names may be qualified (`package/name`) or bare, in which case they
/// resolve against the root package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Files to include by name
    pub files: Vec<String>,

    /// Components whose providers should be included
    pub components: Vec<String>,

    /// Packages whose files should all be included
    pub packages: Vec<String>,
}

impl Request {
    /// Request a list of files.
    pub fn files<S: Into<String>>(files: impl IntoIterator<Item = S>) -> Self {
        Request {
            files: files.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Request the providers of a list of components.
    pub fn components<S: Into<String>>(components: impl IntoIterator<Item = S>) -> Self {
        Request {
            components: components.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Request every file of a list of packages.
    pub fn packages<S: Into<String>>(packages: impl IntoIterator<Item = S>) -> Self {
        Request {
            packages: packages.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Check if nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.components.is_empty() && self.packages.is_empty()
    }
}

/// Files to leave out of a resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    /// Components whose whole dependency subtree is dropped from the request
    /// before completion
    pub components: Vec<String>,

    /// Files removed from the completed list, dependencies untouched
    pub files: Vec<String>,

    /// Files removed from the completed list together with their closure
    pub files_and_deps: Vec<String>,
}

impl Exclusions {
    /// Check if nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.files.is_empty() && self.files_and_deps.is_empty()
    }
}
