//! `jspack list` command

use anyhow::{bail, Result};

use crate::cli::{GlobalArgs, ListArgs};

pub fn execute(args: ListArgs, global: &GlobalArgs) -> Result<i32> {
    let (_ctx, _config, packager) = super::load(global)?;
    let registry = packager.registry();

    if let Some(package) = &args.package {
        if !registry.package_exists(package) {
            bail!(
                "package `{}` is not loaded\n\
                 available packages: {}",
                package,
                super::all_packages(&packager).join(", ")
            );
        }
    }

    for file in registry.all_files(args.package.as_deref()) {
        println!("{}", file);
    }

    Ok(0)
}
