//! Home summary: record counts per collection.

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::Context;

pub fn handle(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = ctx.session.summary();
    let out = output::render_single(
        &global.output,
        &summary,
        |s| {
            output::detail_block(
                &[
                    ("Products", s.products.to_string()),
                    ("Categories", s.categories.to_string()),
                ],
                ctx.color,
            )
        },
        |s| format!("{}\n{}", s.products, s.categories),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
