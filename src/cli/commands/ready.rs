use super::super::{Ctx, print_json, render};
use crate::Result;
use crate::query;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    let manifest = ctx.store.get();
    let ready = query::ready_tasks(&manifest);
    if ctx.json {
        let value: Vec<_> = ready
            .iter()
            .map(|(id, task)| {
                serde_json::json!({
                    "id": id,
                    "title": task.title,
                })
            })
            .collect();
        return print_json(&value);
    }
    println!("{}", render::render_ready(&ready));
    Ok(())
}
