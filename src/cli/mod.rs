//! CLI surface for coordmap.
//!
//! Goal:
//! - Thin handlers: resolve the manifest, call the store/query layer, render
//! - `--json` for scripting, human output otherwise
//! - LLM-robust parsing (inferred subcommands, boolish flags)

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, builder::BoolishValueParser};

use crate::config::Config;
use crate::core::{SpecId, TaskId, TaskStatus};
use crate::store::{ManifestStore, StoreError};
use crate::{Result, config, paths};

mod commands;
mod render;

// =============================================================================
// Entry + global options
// =============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "cm",
    version,
    about = "Coordination manifest: linked specs, tasks, rules, and files",
    infer_subcommands = true,
    infer_long_args = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Machine-readable JSON output (default: false; use `--json` for scripting).
    #[arg(
        long,
        global = true,
        default_value_t = false,
        num_args = 0..=1,
        value_parser = BoolishValueParser::new()
    )]
    pub json: bool,

    /// Manifest path (default: discover `.coordmap/manifest.json` from cwd).
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty manifest under `.coordmap/` in this directory.
    Init,

    /// List active specs.
    Active,

    /// List the tasks implementing a spec.
    Tasks(TasksArgs),

    /// List the rules governing a task.
    Rules(RulesArgs),

    /// Show specs, tasks, and rules for a file path.
    File(FileArgs),

    /// List tasks that are ready to work on.
    Ready,

    /// Show blocked tasks and what blocks them.
    Blocked,

    /// Manifest overview counts.
    Status,

    /// Check the manifest against every invariant.
    Validate,

    /// Record a task status change from the tracker.
    TaskStatus(TaskStatusArgs),

    /// Record that a spec was activated.
    SpecActivated(SpecActivatedArgs),

    /// Record that a task wrote a file.
    FileWritten(FileWrittenArgs),

    /// Acknowledge that a file no longer exists.
    FileRemoved(FileRemovedArgs),
}

#[derive(Args, Debug)]
pub struct TasksArgs {
    /// Spec id.
    pub spec: SpecId,
}

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Task id.
    pub task: TaskId,
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Project-relative file path.
    pub path: String,
}

#[derive(Args, Debug)]
pub struct TaskStatusArgs {
    /// Task id.
    pub id: TaskId,
    /// New status: open, in_progress, closed.
    pub status: TaskStatus,
}

#[derive(Args, Debug)]
pub struct SpecActivatedArgs {
    /// Spec id.
    pub id: SpecId,
}

#[derive(Args, Debug)]
pub struct FileWrittenArgs {
    /// Project-relative file path.
    pub path: String,
    /// Task that performed the write.
    #[arg(long, value_name = "TASK")]
    pub by: TaskId,
}

#[derive(Args, Debug)]
pub struct FileRemovedArgs {
    /// Project-relative file path.
    pub path: String,
}

// =============================================================================
// Dispatch
// =============================================================================

pub(crate) struct Ctx {
    pub store: ManifestStore,
    pub json: bool,
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

/// Load the project config for this invocation (defaults when no manifest
/// has been discovered yet).
pub fn load_config(cli: &Cli) -> Config {
    match paths::resolve_manifest(cli.manifest.as_deref()) {
        Some(manifest) => config::load_or_default(&paths::config_path_for(&manifest)),
        None => Config::default(),
    }
}

pub fn run(cli: Cli, config: Config) -> Result<()> {
    if matches!(cli.command, Commands::Init) {
        return commands::init::handle(cli.manifest, cli.json);
    }

    let Some(manifest_path) = paths::resolve_manifest(cli.manifest.as_deref()) else {
        return Err(no_manifest_error());
    };
    let store =
        ManifestStore::open(manifest_path)?.with_validate_on_mutate(config.validate_on_mutate);
    let ctx = Ctx {
        store,
        json: cli.json,
    };

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Active => commands::active::handle(&ctx),
        Commands::Tasks(args) => commands::tasks::handle(&ctx, args),
        Commands::Rules(args) => commands::rules::handle(&ctx, args),
        Commands::File(args) => commands::file::handle(&ctx, args),
        Commands::Ready => commands::ready::handle(&ctx),
        Commands::Blocked => commands::blocked::handle(&ctx),
        Commands::Status => commands::status::handle(&ctx),
        Commands::Validate => commands::validate::handle(&ctx),
        Commands::TaskStatus(args) => commands::events::task_status(&ctx, args),
        Commands::SpecActivated(args) => commands::events::spec_activated(&ctx, args),
        Commands::FileWritten(args) => commands::events::file_written(&ctx, args),
        Commands::FileRemoved(args) => commands::events::file_removed(&ctx, args),
    }
}

fn no_manifest_error() -> crate::Error {
    StoreError::Io {
        path: PathBuf::from(paths::COORD_DIR).join(paths::MANIFEST_FILE),
        source: io::Error::new(
            io::ErrorKind::NotFound,
            "no manifest found; run `cm init` or pass --manifest",
        ),
    }
    .into()
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(e) => Err(StoreError::Write {
            path: PathBuf::from("<stdout>"),
            reason: e.to_string(),
        }
        .into()),
    }
}
