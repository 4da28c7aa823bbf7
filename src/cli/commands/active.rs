use super::super::{Ctx, print_json, render};
use crate::Result;
use crate::query;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    let manifest = ctx.store.get();
    let specs = query::active_specs(&manifest);
    if ctx.json {
        let value: Vec<_> = specs
            .iter()
            .map(|(id, spec)| {
                serde_json::json!({
                    "id": id,
                    "path": spec.path,
                    "relatedTasks": spec.related_tasks,
                })
            })
            .collect();
        return print_json(&value);
    }
    println!("{}", render::render_active(&specs));
    Ok(())
}
