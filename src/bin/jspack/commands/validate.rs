//! `jspack validate` command

use anyhow::Result;

use crate::cli::{GlobalArgs, ValidateArgs};
use jspack::util::diagnostic::{emit, suggestions, Diagnostic};

pub fn execute(args: ValidateArgs, global: &GlobalArgs) -> Result<i32> {
    let (ctx, _config, packager) = super::load(global)?;

    let Some(warnings) = packager.validate(&args.selection.request()) else {
        tracing::info!("no problems found");
        return Ok(0);
    };

    for warning in &warnings {
        println!("{}", warning);
    }

    emit(
        &Diagnostic::warning(format!("validation found {} problems", warnings.len()))
            .with_suggestion(suggestions::MISSING_PROVIDER),
        ctx.color(),
    );

    Ok(1)
}
