//! Consistency checks over a registry.

use crate::core::Registry;
use crate::resolver::Request;

/// Check every requirement of every file, plus the extra names in `extra`.
///
/// Returns `None` when nothing is wrong, otherwise the warnings in the
/// order they were found. Never fails: these are soft problems that a
/// build silently tolerates.
pub fn validate(registry: &Registry, extra: &Request) -> Option<Vec<String>> {
    let mut warnings = Vec::new();

    for id in registry.all_files(None) {
        let Some(file) = registry.file_by_id(&id) else {
            continue;
        };
        for component in file.requires() {
            if registry.provider_of(component).is_none() {
                warnings.push(format!(
                    "WARNING: The component {}, required in the file {}, has not been provided.",
                    component, id
                ));
            }
        }
    }

    for file in &extra.files {
        if !registry.file_exists(file) {
            warnings.push(format!("WARNING: The required file {} could not be found.", file));
        }
    }

    for component in &extra.components {
        if !registry.component_exists(component) {
            warnings.push(format!(
                "WARNING: The required component {} could not be found.",
                component
            ));
        }
    }

    for package in &extra.packages {
        if !registry.package_exists(package) {
            warnings.push(format!(
                "WARNING: The required package {} could not be found.",
                package
            ));
        }
    }

    if warnings.is_empty() {
        None
    } else {
        tracing::debug!("validation found {} problems", warnings.len());
        Some(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::PathSource;
    use crate::test_support::PackageFixture;
    use tempfile::TempDir;

    fn registry(tmp: &TempDir, fixtures: &[PackageFixture]) -> Registry {
        let mut registry = Registry::new();
        for fixture in fixtures {
            registry
                .add_package(&PathSource::new(fixture.write(tmp.path())))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_clean_registry() {
        let tmp = TempDir::new().unwrap();
        let registry = registry(
            &tmp,
            &[PackageFixture::new("core")
                .component("a", &["A"], &[])
                .component("b", &["B"], &["A"])],
        );

        let extra = Request {
            files: vec!["a".into()],
            components: vec!["core/B".into()],
            packages: vec!["core".into()],
        };
        assert_eq!(validate(&registry, &extra), None);
    }

    #[test]
    fn test_missing_provider() {
        let tmp = TempDir::new().unwrap();
        let registry = registry(
            &tmp,
            &[PackageFixture::new("core").component("b", &["B"], &["A", "more/X"])],
        );

        let warnings = validate(&registry, &Request::default()).unwrap();
        assert_eq!(
            warnings,
            vec![
                "WARNING: The component core/A, required in the file core/b, has not been provided.",
                "WARNING: The component more/X, required in the file core/b, has not been provided.",
            ]
        );
    }

    #[test]
    fn test_missing_extra_names() {
        let tmp = TempDir::new().unwrap();
        let registry = registry(&tmp, &[PackageFixture::new("core").component("a", &["A"], &[])]);

        let extra = Request {
            files: vec!["core/z".into()],
            components: vec!["Z".into()],
            packages: vec!["ghost".into()],
        };
        let warnings = validate(&registry, &extra).unwrap();
        assert_eq!(
            warnings,
            vec![
                "WARNING: The required file core/z could not be found.",
                "WARNING: The required component Z could not be found.",
                "WARNING: The required package ghost could not be found.",
            ]
        );
    }

    #[test]
    fn test_removed_package_leaves_dangling_requirements() {
        let tmp = TempDir::new().unwrap();
        let mut registry = registry(
            &tmp,
            &[
                PackageFixture::new("core").component("a", &["A"], &[]),
                PackageFixture::new("more").component("m", &["M"], &["core/A"]),
            ],
        );
        assert_eq!(validate(&registry, &Request::default()), None);

        registry.remove_package("core");
        let warnings = validate(&registry, &Request::default()).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("core/A"));
    }
}
