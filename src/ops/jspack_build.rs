//! Implementation of `jspack build`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::Packager;
use crate::resolver::{Exclusions, Request};
use crate::util::fs::write_string;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Files, components and packages to build
    pub request: Request,

    /// Tagged blocks to strip
    pub blocks: Vec<String>,

    /// Files and components to leave out
    pub excluded: Exclusions,

    /// Destination file (stdout when unset)
    pub output: Option<PathBuf>,
}

/// Build the output described by `opts`.
pub fn build(packager: &Packager, opts: &BuildOptions) -> Result<String> {
    packager.build(&opts.request, &opts.blocks, &opts.excluded)
}

/// Build from a list of files, stripping `blocks`.
pub fn build_from_files<S: AsRef<str>, B: AsRef<str>>(
    packager: &Packager,
    files: &[S],
    blocks: &[B],
) -> Result<String> {
    let request = Request::files(files.iter().map(|file| file.as_ref()));
    packager.build(&request, blocks, &Exclusions::default())
}

/// Build from a list of components, leaving out `excluded`.
pub fn build_from_components<S: AsRef<str>>(
    packager: &Packager,
    components: &[S],
    excluded: &Exclusions,
) -> Result<String> {
    let request = Request::components(components.iter().map(|component| component.as_ref()));
    packager.build::<&str>(&request, &[], excluded)
}

/// Build and write the result to `dest`, creating parent directories.
pub fn write(packager: &Packager, opts: &BuildOptions, dest: &Path) -> Result<()> {
    let output = build(packager, opts)?;
    write_output(dest, &output)
}

/// Build from a list of files and write the result to `dest`.
pub fn write_from_files<S: AsRef<str>>(packager: &Packager, files: &[S], dest: &Path) -> Result<()> {
    let output = build_from_files::<S, &str>(packager, files, &[])?;
    write_output(dest, &output)
}

/// Build from a list of components, leaving out `excluded`, and write the
/// result to `dest`.
pub fn write_from_components<S: AsRef<str>>(
    packager: &Packager,
    components: &[S],
    excluded: &Exclusions,
    dest: &Path,
) -> Result<()> {
    let output = build_from_components(packager, components, excluded)?;
    write_output(dest, &output)
}

fn write_output(dest: &Path, output: &str) -> Result<()> {
    write_string(dest, output)?;
    tracing::info!("wrote {} bytes to {}", output.len(), dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{packager_with, PackageFixture};
    use tempfile::TempDir;

    fn packager(tmp: &TempDir) -> Packager {
        packager_with(
            tmp.path(),
            &[PackageFixture::new("core")
                .file("a.js", "/*\n---\nprovides: [A]\n...\n*/\na();", None)
                .file(
                    "b.js",
                    "/*\n---\nprovides: [B]\nrequires: [A]\n...\n*/\nb(); // <debug>trace()</debug>",
                    None,
                )],
        )
    }

    #[test]
    fn test_build_from_files_and_components_agree() {
        let tmp = TempDir::new().unwrap();
        let packager = packager(&tmp);

        let from_files = build_from_files::<_, &str>(&packager, &["b"], &[]).unwrap();
        let from_components =
            build_from_components(&packager, &["B"], &Exclusions::default()).unwrap();
        assert_eq!(from_files, from_components);
        assert!(from_files.starts_with("/*\n---\nprovides: [A]"));
    }

    #[test]
    fn test_build_from_files_strips_blocks() {
        let tmp = TempDir::new().unwrap();
        let packager = packager(&tmp);

        let output = build_from_files(&packager, &["b"], &["debug"]).unwrap();
        assert!(output.contains("b(); \n"));
        assert!(!output.contains("trace()"));
    }

    #[test]
    fn test_build_from_components_with_exclusions() {
        let tmp = TempDir::new().unwrap();
        let packager = packager(&tmp);

        let excluded = Exclusions {
            components: vec!["B".into()],
            ..Default::default()
        };
        let output = build_from_components(&packager, &["A", "B"], &excluded).unwrap();
        assert_eq!(output, "");

        let excluded = Exclusions {
            files: vec!["a".into()],
            ..Default::default()
        };
        let output = build_from_components(&packager, &["B"], &excluded).unwrap();
        assert!(output.starts_with("/*\n---\nprovides: [B]"));
        assert!(!output.contains("a();"));

        let dest = tmp.path().join("out.js");
        write_from_components(&packager, &["B"], &excluded, &dest).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), output);
    }

    #[test]
    fn test_build_with_options() {
        let tmp = TempDir::new().unwrap();
        let packager = packager(&tmp);

        let opts = BuildOptions {
            request: Request::files(["b"]),
            blocks: vec!["debug".into()],
            excluded: Exclusions {
                files: vec!["a".into()],
                ..Default::default()
            },
            output: None,
        };
        let output = build(&packager, &opts).unwrap();
        assert_eq!(output, "/*\n---\nprovides: [B]\nrequires: [A]\n...\n*/\nb(); \n");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let packager = packager(&tmp);
        let dest = tmp.path().join("dist/js/core.js");

        write_from_components(&packager, &["A"], &Exclusions::default(), &dest).unwrap();
        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "/*\n---\nprovides: [A]\n...\n*/\na();\n"
        );

        write_from_files(&packager, &["missing"], &dest).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "");
    }
}
