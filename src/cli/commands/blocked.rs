use super::super::{Ctx, print_json, render};
use crate::Result;
use crate::query;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    let manifest = ctx.store.get();
    let blocked = query::blocked_tasks(&manifest);
    if ctx.json {
        let value: Vec<_> = blocked
            .iter()
            .map(|b| {
                serde_json::json!({
                    "id": b.id,
                    "title": b.task.title,
                    "blockedOn": b.blocked_on,
                })
            })
            .collect();
        return print_json(&value);
    }
    println!("{}", render::render_blocked(&blocked));
    Ok(())
}
