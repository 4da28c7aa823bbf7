use super::super::{Ctx, RulesArgs, print_json, render};
use crate::Result;
use crate::query;

pub(crate) fn handle(ctx: &Ctx, args: RulesArgs) -> Result<()> {
    let manifest = ctx.store.get();
    let rules = query::rules_for_task(&manifest, &args.task);
    if ctx.json {
        let value: Vec<_> = rules
            .iter()
            .map(|(id, rule)| {
                serde_json::json!({
                    "id": id,
                    "path": rule.path,
                    "priority": rule.priority,
                })
            })
            .collect();
        return print_json(&value);
    }
    println!("{}", render::render_rules(&args.task, &rules));
    Ok(())
}
