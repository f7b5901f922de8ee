//! `jspack resolve` command

use anyhow::Result;

use crate::cli::{GlobalArgs, ResolveArgs};

pub fn execute(args: ResolveArgs, global: &GlobalArgs) -> Result<i32> {
    let (_ctx, _config, packager) = super::load(global)?;

    let mut request = args.selection.request();
    if request.is_empty() {
        request.packages = super::all_packages(&packager);
    }

    for file in packager.resolve_files(&request, &args.exclusion.exclusions()) {
        println!("{}", file);
    }

    Ok(0)
}
