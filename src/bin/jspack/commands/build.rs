//! `jspack build` command

use anyhow::Result;

use crate::cli::{BuildArgs, GlobalArgs};
use jspack::ops::jspack_build::{build, write, BuildOptions};

pub fn execute(args: BuildArgs, global: &GlobalArgs) -> Result<i32> {
    let (ctx, config, packager) = super::load(global)?;

    let mut request = args.selection.request();
    if request.is_empty() {
        request.packages = super::all_packages(&packager);
    }

    // Configured blocks first, then the ones given on the command line
    let mut blocks = config.build.blocks.clone();
    for block in args.blocks {
        if !blocks.contains(&block) {
            blocks.push(block);
        }
    }

    // Output: CLI > config > stdout
    let output = args
        .output
        .or(config.build.output)
        .map(|path| ctx.resolve_path(&path));

    let opts = BuildOptions {
        request,
        blocks,
        excluded: args.exclusion.exclusions(),
        output,
    };

    match &opts.output {
        Some(dest) => write(&packager, &opts, dest)?,
        None => print!("{}", build(&packager, &opts)?),
    }

    Ok(0)
}
