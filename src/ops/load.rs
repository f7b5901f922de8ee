//! Packager loading for commands.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::Packager;
use crate::util::{Config, GlobalContext};

/// Load a packager from explicit package paths plus configured ones.
///
/// Explicit paths come first, so the first of them becomes the root package.
/// With neither explicit nor configured paths the working directory is used.
/// Relative paths resolve against the working directory.
pub fn load_packager(ctx: &GlobalContext, config: &Config, paths: &[PathBuf]) -> Result<Packager> {
    let mut all: Vec<PathBuf> = paths
        .iter()
        .chain(config.build.packages.iter())
        .map(|path| ctx.resolve_path(path))
        .collect();
    if all.is_empty() {
        all.push(ctx.cwd().to_path_buf());
    }

    let mut packager = Packager::new().with_scan_depth(config.scan_depth());
    for path in &all {
        let added = packager
            .add_package(path)
            .with_context(|| format!("failed to load package at {}", path.display()))?;
        if !added {
            tracing::debug!("skipped {}: package already loaded", path.display());
        }
    }

    tracing::info!(
        "loaded {} packages ({} files)",
        packager.registry().packages().count(),
        packager.registry().all_files(None).len()
    );
    Ok(packager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::PackageFixture;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_to_working_directory() {
        let tmp = TempDir::new().unwrap();
        let root = PackageFixture::new("core")
            .file("a.js", "a();", None)
            .write(tmp.path());

        let ctx = GlobalContext::with_cwd(root).unwrap();
        let packager = load_packager(&ctx, &Config::default(), &[]).unwrap();
        assert!(packager.file_exists("core/a"));
    }

    #[test]
    fn test_explicit_paths_precede_configured_ones() {
        let tmp = TempDir::new().unwrap();
        PackageFixture::new("core").file("a.js", "a();", None).write(tmp.path());
        PackageFixture::new("more").file("m.js", "m();", None).write(tmp.path());

        let mut config = Config::default();
        config.build.packages = vec![PathBuf::from("core")];
        config.scan.depth = Some(0);

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        let packager = load_packager(&ctx, &config, &[PathBuf::from("more")]).unwrap();

        assert_eq!(packager.registry().root(), Some("more"));
        assert!(packager.package_exists("core"));
        assert_eq!(packager.scan_depth(), 0);
    }

    #[test]
    fn test_missing_package_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();

        let err = load_packager(&ctx, &Config::default(), &[PathBuf::from("nowhere")]).unwrap_err();
        assert!(err.to_string().contains("failed to load package"));
    }
}
