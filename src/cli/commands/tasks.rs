use super::super::{Ctx, TasksArgs, print_json, render};
use crate::Result;
use crate::query;

pub(crate) fn handle(ctx: &Ctx, args: TasksArgs) -> Result<()> {
    let manifest = ctx.store.get();
    let tasks = query::tasks_for_spec(&manifest, &args.spec);
    if ctx.json {
        let value: Vec<_> = tasks
            .iter()
            .map(|(id, task)| {
                serde_json::json!({
                    "id": id,
                    "title": task.title,
                    "status": task.status,
                })
            })
            .collect();
        return print_json(&value);
    }
    println!("{}", render::render_tasks(&args.spec, &tasks));
    Ok(())
}
