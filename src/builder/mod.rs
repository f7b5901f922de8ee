//! Build pipeline.
//!
//! Resolves a request, concatenates the sources of the resolved files,
//! strips tagged blocks, wraps the result in the overall template and
//! hands it to the global postprocessor.

pub mod blocks;
pub mod postprocess;

pub use blocks::{strip_block, strip_blocks};
pub use postprocess::{FilePostprocessor, PassThrough, Postprocessor, Postprocessors};

use std::path::Path;

use anyhow::Result;

use crate::core::{QualifiedName, Registry};
use crate::resolver::{Exclusions, Request, Resolver};
use crate::util::fs::read_to_string;

/// Token in the overall template replaced by the merged sources.
pub const CODE_PLACEHOLDER: &str = "/*** [Code] ***/";

/// Separator between the sources of consecutive files.
pub const FILE_SEPARATOR: &str = "\n\n";

/// Runs builds over a registry with a fixed set of hooks.
#[derive(Debug, Clone, Copy)]
pub struct Builder<'a> {
    registry: &'a Registry,
    hooks: &'a Postprocessors,
    overall: Option<&'a Path>,
}

impl<'a> Builder<'a> {
    /// Create a builder without an overall template.
    pub fn new(registry: &'a Registry, hooks: &'a Postprocessors) -> Self {
        Builder {
            registry,
            hooks,
            overall: None,
        }
    }

    /// Wrap output in the template at `overall`.
    pub fn with_overall(mut self, overall: Option<&'a Path>) -> Self {
        self.overall = overall;
        self
    }

    /// Resolve `request` and produce the final output.
    ///
    /// An empty resolution yields an empty string, without wrapping or
    /// postprocessing.
    pub fn build<S: AsRef<str>>(
        &self,
        request: &Request,
        blocks: &[S],
        excluded: &Exclusions,
    ) -> Result<String> {
        let files = Resolver::new(self.registry).resolve_files(request, excluded);
        if files.is_empty() {
            tracing::debug!("nothing to build");
            return Ok(String::new());
        }

        let merged = self.merge(&files);
        let stripped = strip_blocks(&merged, blocks)?;
        let wrapped = self.wrap(&stripped)?;
        tracing::debug!("built {} files ({} bytes)", files.len(), wrapped.len());
        Ok(self.hooks.finish(wrapped))
    }

    /// Concatenate the postprocessed sources of `files`.
    pub fn merge(&self, files: &[QualifiedName]) -> String {
        files
            .iter()
            .filter_map(|id| {
                let file = self.registry.file_by_id(id)?;
                Some(self.hooks.process_file(id, file.source()))
            })
            .collect::<Vec<_>>()
            .join(FILE_SEPARATOR)
    }

    /// Substitute `code` into the overall template, or terminate it with a
    /// newline when there is no template.
    pub fn wrap(&self, code: &str) -> Result<String> {
        match self.overall {
            Some(template) => Ok(read_to_string(template)?.replace(CODE_PLACEHOLDER, code)),
            None => Ok(format!("{}\n", code)),
        }
    }
}
