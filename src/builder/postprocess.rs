//! Postprocessing hooks.
//!
//! Two extension points surround the build: a per-file transform applied to
//! each source before merging, and a global transform applied to the final
//! wrapped text. Both are supplied by the embedding application.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::QualifiedName;

/// Transforms the source of one file before it is merged.
pub trait FilePostprocessor {
    /// Return the text to merge for `file`.
    fn process(&self, file: &QualifiedName, source: &str) -> String;
}

impl<F> FilePostprocessor for F
where
    F: Fn(&QualifiedName, &str) -> String,
{
    fn process(&self, file: &QualifiedName, source: &str) -> String {
        self(file, source)
    }
}

/// Transforms the final build output.
///
/// Returning `None` keeps the text unchanged.
pub trait Postprocessor {
    /// Return the replacement text, if any.
    fn process(&self, output: &str) -> Option<String>;
}

impl<F> Postprocessor for F
where
    F: Fn(&str) -> Option<String>,
{
    fn process(&self, output: &str) -> Option<String> {
        self(output)
    }
}

/// The default per-file hook: returns the source as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl FilePostprocessor for PassThrough {
    fn process(&self, _file: &QualifiedName, source: &str) -> String {
        source.to_string()
    }
}

/// The set of hooks a build runs.
#[derive(Clone, Default)]
pub struct Postprocessors {
    /// Per-file hook for packages without an override
    file: Option<Arc<dyn FilePostprocessor>>,

    /// Per-file hooks keyed by package name
    packages: HashMap<String, Arc<dyn FilePostprocessor>>,

    /// Hook applied to the wrapped output
    global: Option<Arc<dyn Postprocessor>>,
}

impl Postprocessors {
    /// Create an empty hook set (pass-through everywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the default per-file hook.
    pub fn set_file(&mut self, hook: impl FilePostprocessor + 'static) {
        self.file = Some(Arc::new(hook));
    }

    /// Install a per-file hook for the files of one package.
    pub fn set_package(&mut self, package: impl Into<String>, hook: impl FilePostprocessor + 'static) {
        self.packages.insert(package.into(), Arc::new(hook));
    }

    /// Install the global hook.
    pub fn set_global(&mut self, hook: impl Postprocessor + 'static) {
        self.global = Some(Arc::new(hook));
    }

    /// Run the per-file hook that applies to `file`.
    pub fn process_file(&self, file: &QualifiedName, source: &str) -> String {
        match self.packages.get(file.package()).or(self.file.as_ref()) {
            Some(hook) => hook.process(file, source),
            None => PassThrough.process(file, source),
        }
    }

    /// Run the global hook. `None` and empty replacements keep `output`.
    pub fn finish(&self, output: String) -> String {
        let Some(hook) = &self.global else {
            return output;
        };
        match hook.process(&output) {
            Some(replaced) if !replaced.is_empty() => replaced,
            _ => {
                tracing::debug!("global postprocessor kept the output unchanged");
                output
            }
        }
    }
}

impl fmt::Debug for Postprocessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Postprocessors")
            .field("file", &self.file.is_some())
            .field("packages", &self.packages.keys().collect::<Vec<_>>())
            .field("global", &self.global.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(package: &str, name: &str) -> QualifiedName {
        QualifiedName::new(package, name)
    }

    #[test]
    fn test_defaults_pass_through() {
        let hooks = Postprocessors::new();
        assert_eq!(hooks.process_file(&id("core", "a"), "a();"), "a();");
        assert_eq!(hooks.finish("out".into()), "out");
    }

    #[test]
    fn test_package_hook_overrides_file_hook() {
        let mut hooks = Postprocessors::new();
        hooks.set_file(|file: &QualifiedName, source: &str| format!("// {}\n{}", file, source));
        hooks.set_package("vendor", |_: &QualifiedName, source: &str| source.to_uppercase());

        assert_eq!(hooks.process_file(&id("core", "a"), "a();"), "// core/a\na();");
        assert_eq!(hooks.process_file(&id("vendor", "v"), "v();"), "V();");
    }

    #[test]
    fn test_global_hook_falsy_keeps_output() {
        let mut hooks = Postprocessors::new();
        hooks.set_global(|_: &str| -> Option<String> { None });
        assert_eq!(hooks.finish("kept".into()), "kept");

        hooks.set_global(|_: &str| Some(String::new()));
        assert_eq!(hooks.finish("kept".into()), "kept");

        hooks.set_global(|text: &str| Some(format!("/* banner */\n{}", text)));
        assert_eq!(hooks.finish("code".into()), "/* banner */\ncode");
    }
}
