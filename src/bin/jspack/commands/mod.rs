//! Command implementations

pub mod build;
pub mod list;
pub mod resolve;
pub mod validate;

use anyhow::Result;

use crate::cli::GlobalArgs;
use jspack::core::ManifestError;
use jspack::ops::load_packager;
use jspack::util::diagnostic::{emit, suggestions};
use jspack::util::{Config, GlobalContext};
use jspack::Packager;

/// Load the context, the layered config and the packages named on the command line.
pub fn load(global: &GlobalArgs) -> Result<(GlobalContext, Config, Packager)> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_color(global.color);

    let config = ctx.config();
    let packager = load_packager(&ctx, &config, &global.paths).map_err(|e| {
        let no_manifest = e
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<ManifestError>(), Some(ManifestError::NotFound { .. })));
        if no_manifest {
            anyhow::anyhow!("{:#}\n{}", e, suggestions::NO_MANIFEST)
        } else {
            e
        }
    })?;

    for warning in packager.registry().warnings() {
        emit(warning, ctx.color());
    }

    Ok((ctx, config, packager))
}

/// Every loaded package, used when a command is given nothing to select.
pub fn all_packages(packager: &Packager) -> Vec<String> {
    packager.registry().packages().map(String::from).collect()
}
