//! Package manifest discovery and parsing.
//!
//! A manifest is a YAML or JSON document describing one package: its
//! `name`, its `sources`, an optional `overall` wrapping template and
//! free-form metadata such as `license` and `authors`. A directory is probed
//! for `package.yml`, `package.yaml` and `package.json`, in that order.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::descriptor::{normalize_authors, non_empty_str};
use crate::util::fs::read_to_string;

/// Manifest file names probed in a package directory, in priority order.
pub const MANIFEST_NAMES: [&str; 3] = ["package.yml", "package.yaml", "package.json"];

/// Fatal manifest and ingestion errors.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ManifestError {
    #[error("no manifest found in `{}`", dir.display())]
    #[diagnostic(
        code(jspack::manifest::not_found),
        help("add a package.yml, package.yaml or package.json")
    )]
    NotFound { dir: PathBuf },

    #[error("neither directory nor file `{}` exists", path.display())]
    #[diagnostic(code(jspack::manifest::path_not_found))]
    PathNotFound { path: PathBuf },

    #[error("unsupported manifest format for `{}`", path.display())]
    #[diagnostic(
        code(jspack::manifest::format),
        help("manifest files must end in .json, .yml or .yaml")
    )]
    UnsupportedFormat { path: PathBuf },

    #[error("unable to parse manifest `{}`: {message}", path.display())]
    #[diagnostic(code(jspack::manifest::parse))]
    Parse { path: PathBuf, message: String },

    #[error("manifest `{}` is empty or not a mapping", path.display())]
    #[diagnostic(code(jspack::manifest::empty))]
    Empty { path: PathBuf },

    #[error("manifest `{}` does not declare a package name", path.display())]
    #[diagnostic(code(jspack::manifest::name))]
    MissingName { path: PathBuf },

    #[error("no usable sources defined in package `{package}`")]
    #[diagnostic(
        code(jspack::manifest::sources),
        help("`sources` must be a list of paths or a single glob pattern")
    )]
    MissingSources { package: String },

    #[error("source file `{}` for package `{package}` does not exist", path.display())]
    #[diagnostic(code(jspack::manifest::source_not_found))]
    SourceNotFound { package: String, path: PathBuf },
}

/// Structured-data format of a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(ManifestFormat::Json),
            Some("yaml") | Some("yml") => Some(ManifestFormat::Yaml),
            _ => None,
        }
    }

    /// Decode a document into a structured value.
    pub fn decode(self, contents: &str) -> std::result::Result<Value, String> {
        match self {
            ManifestFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            ManifestFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestFormat::Yaml => write!(f, "yaml"),
            ManifestFormat::Json => write!(f, "json"),
        }
    }
}

/// One entry of a literal `sources` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SourceEntry {
    /// A bare path relative to the package root.
    Path(String),
    /// A path paired with an inline descriptor used when the file has no front matter.
    Described(String, Value),
}

impl SourceEntry {
    /// The relative path of this entry.
    pub fn path(&self) -> &str {
        match self {
            SourceEntry::Path(path) | SourceEntry::Described(path, _) => path,
        }
    }

    /// The inline descriptor, if one was declared.
    pub fn descriptor(&self) -> Option<&Value> {
        match self {
            SourceEntry::Path(_) => None,
            SourceEntry::Described(_, descriptor) => Some(descriptor),
        }
    }
}

/// The `sources` declaration of a manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Sources {
    /// An explicit, ordered list of source entries.
    List(Vec<SourceEntry>),
    /// A glob pattern expanded with a bounded breadth-first scan.
    Pattern(String),
}

/// A parsed package manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Package name
    name: String,

    /// Package root directory
    root: PathBuf,

    /// Path of the manifest file itself
    manifest_path: PathBuf,

    /// Format the manifest was decoded from
    format: ManifestFormat,

    /// Source declaration (None when missing or unusable)
    sources: Option<Sources>,

    /// Wrapping template, relative to the root
    overall: Option<String>,

    /// Package-level license
    license: Option<String>,

    /// Normalized package authors
    authors: Vec<String>,

    /// Every top-level field as decoded
    fields: Map<String, Value>,
}

/// Find the manifest file inside a package directory.
pub fn find_manifest(dir: &Path) -> std::result::Result<PathBuf, ManifestError> {
    MANIFEST_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ManifestError::NotFound {
            dir: dir.to_path_buf(),
        })
}

/// The directory holding a manifest file. A bare file name lives in `.`.
fn package_root(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Manifest {
    /// Load a manifest from a package directory or a manifest file path.
    pub fn load(path: &Path) -> Result<Self> {
        let (root, manifest_path) = if path.is_dir() {
            (path.to_path_buf(), find_manifest(path)?)
        } else if path.exists() {
            (package_root(path), path.to_path_buf())
        } else {
            return Err(ManifestError::PathNotFound {
                path: path.to_path_buf(),
            }
            .into());
        };

        let format =
            ManifestFormat::from_path(&manifest_path).ok_or_else(|| ManifestError::UnsupportedFormat {
                path: manifest_path.clone(),
            })?;

        let contents = read_to_string(&manifest_path)?;
        let manifest = Self::parse(&contents, format, root, manifest_path)?;

        tracing::debug!(
            "loaded {} manifest for `{}` from {}",
            manifest.format,
            manifest.name,
            manifest.manifest_path.display()
        );

        Ok(manifest)
    }

    /// Parse manifest text that was read from `manifest_path`.
    pub fn parse(
        contents: &str,
        format: ManifestFormat,
        root: PathBuf,
        manifest_path: PathBuf,
    ) -> std::result::Result<Self, ManifestError> {
        let value = format.decode(contents).map_err(|message| ManifestError::Parse {
            path: manifest_path.clone(),
            message,
        })?;

        let fields = match value {
            Value::Object(fields) if !fields.is_empty() => fields,
            _ => {
                return Err(ManifestError::Empty {
                    path: manifest_path,
                })
            }
        };

        let name = fields
            .get("name")
            .and_then(non_empty_str)
            .ok_or_else(|| ManifestError::MissingName {
                path: manifest_path.clone(),
            })?
            .to_string();

        let sources = fields
            .get("sources")
            .and_then(|v| Sources::deserialize(v).ok());
        let overall = fields.get("overall").and_then(non_empty_str).map(String::from);
        let license = fields.get("license").and_then(non_empty_str).map(String::from);
        let authors = normalize_authors(fields.get("authors"), fields.get("author"));

        Ok(Manifest {
            name,
            root,
            manifest_path,
            format,
            sources,
            overall,
            license,
            authors,
            fields,
        })
    }

    /// The package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The package root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The manifest file path.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// The format the manifest was written in.
    pub fn format(&self) -> ManifestFormat {
        self.format
    }

    /// The declared sources, if usable.
    pub fn sources(&self) -> Option<&Sources> {
        self.sources.as_ref()
    }

    /// The overall template path, resolved against the package root.
    pub fn overall_path(&self) -> Option<PathBuf> {
        self.overall.as_ref().map(|overall| self.root.join(overall))
    }

    /// The package license.
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    /// The normalized package authors.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Look up any top-level manifest field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
