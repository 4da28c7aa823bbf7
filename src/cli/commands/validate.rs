use super::super::{Ctx, print_json};
use crate::Result;
use crate::validate::validate;

pub(crate) fn handle(ctx: &Ctx) -> Result<()> {
    // Opening the store already validated the document; re-run against the
    // snapshot so this command stays meaningful if open-time validation is
    // ever relaxed.
    let manifest = ctx.store.get();
    validate(&manifest)?;
    if ctx.json {
        return print_json(&serde_json::json!({ "ok": true }));
    }
    println!("✓ manifest is valid");
    Ok(())
}
