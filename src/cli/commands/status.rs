use super::super::{Ctx, print_json, render};
use crate::Result;
use crate::query;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    let manifest = ctx.store.get();
    let summary = query::status_summary(&manifest);
    if ctx.json {
        return print_json(&summary);
    }
    println!("{}", render::render_status(&summary));
    Ok(())
}
