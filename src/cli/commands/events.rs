//! Sync-event commands: each one forwards a tracker/spec-tool event through
//! the sync adapter, which turns it into exactly one mutation.

use super::super::{
    Ctx, FileRemovedArgs, FileWrittenArgs, SpecActivatedArgs, TaskStatusArgs, print_json,
};
use crate::Result;
use crate::sync::SyncAdapter;

pub(crate) fn task_status(ctx: &Ctx, args: TaskStatusArgs) -> Result<()> {
    SyncAdapter::new(&ctx.store).on_task_status_changed(args.id.clone(), args.status)?;
    done(ctx, format!("task {} is now {}", args.id, args.status.as_str()))
}

pub(crate) fn spec_activated(ctx: &Ctx, args: SpecActivatedArgs) -> Result<()> {
    SyncAdapter::new(&ctx.store).on_spec_activated(args.id.clone())?;
    done(ctx, format!("spec {} is now active", args.id))
}

pub(crate) fn file_written(ctx: &Ctx, args: FileWrittenArgs) -> Result<()> {
    SyncAdapter::new(&ctx.store).on_file_written(args.path.clone(), args.by.clone())?;
    done(ctx, format!("recorded write of {} by {}", args.path, args.by))
}

pub(crate) fn file_removed(ctx: &Ctx, args: FileRemovedArgs) -> Result<()> {
    SyncAdapter::new(&ctx.store).on_file_removed(args.path.clone())?;
    done(ctx, format!("removed file entry {}", args.path))
}

fn done(ctx: &Ctx, message: String) -> Result<()> {
    if ctx.json {
        return print_json(&serde_json::json!({ "ok": true }));
    }
    println!("✓ {message}");
    Ok(())
}
