//! Qualified `package/name` addressing for files and components.

use std::fmt;

/// Separator between the package and the name in a qualified name.
pub const SEPARATOR: char = '/';

/// A `package/name` pair identifying a file or a component.
///
/// Names are parsed against a default package: `name` and `/name` both
/// resolve to the default, `pkg/name` is explicit. Only the first
/// separator splits, so `pkg/dir/name` has the name `dir/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    package: String,
    name: String,
}

impl QualifiedName {
    /// Create a qualified name from its parts.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        QualifiedName {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Parse `raw`, filling in `default_package` when the package is omitted.
    pub fn parse(default_package: &str, raw: &str) -> Self {
        match raw.split_once(SEPARATOR) {
            None => QualifiedName::new(default_package, raw),
            Some(("", name)) => QualifiedName::new(default_package, name),
            Some((package, name)) => QualifiedName::new(package, name),
        }
    }

    /// The package segment.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The file or component segment.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.package, SEPARATOR, self.name)
    }
}

impl PartialEq<str> for QualifiedName {
    fn eq(&self, other: &str) -> bool {
        other
            .split_once(SEPARATOR)
            .is_some_and(|(package, name)| package == self.package && name == self.name)
    }
}

impl PartialEq<&str> for QualifiedName {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
