use super::super::{Ctx, FileArgs, print_json, render};
use crate::Result;
use crate::query;

pub(crate) fn handle(ctx: &Ctx, args: FileArgs) -> Result<()> {
    let manifest = ctx.store.get();
    let specs = query::specs_for_file(&manifest, &args.path);
    let tasks = query::tasks_for_file(&manifest, &args.path);
    let rules = query::rules_for_file(&manifest, &args.path);
    let provenance = query::file_provenance(&manifest, &args.path);

    if ctx.json {
        return print_json(&serde_json::json!({
            "path": args.path,
            "specs": specs,
            "tasks": tasks,
            "rules": rules,
            "creator": provenance.as_ref().and_then(|p| p.creator),
            "modifiers": provenance.as_ref().map(|p| p.modifiers.clone()).unwrap_or_default(),
        }));
    }
    println!(
        "{}",
        render::render_file(&args.path, &specs, &tasks, &rules, provenance.as_ref())
    );
    Ok(())
}
