// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod input;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{Overrides, Settings, resolve_settings};
use crate::engine::{Coordinator, Runtime, RuntimeEvent};
use crate::exec::{CommandTemplate, ProcessRunner};
use crate::fs::RealFileSystem;
use crate::watch::WatchTarget;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (config file + CLI overrides)
/// - watch target and command template
/// - coordinator and process runner
/// - file watcher
/// - keyboard controls and Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    let cwd = std::env::current_dir()?;

    let overrides = Overrides {
        settle_delay_ms: args.settle_ms,
        placeholder: args.placeholder.clone(),
    };
    let settings = resolve_settings(&fs, args.config.as_deref().map(Path::new), &cwd, &overrides)?;
    let target = WatchTarget::resolve(&args.path, &cwd, &fs)?;
    let template = CommandTemplate::parse(&args.command, settings.placeholder())?;

    if args.dry_run {
        print_dry_run(&target, &template, &settings);
        return Ok(());
    }

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let runner = Arc::new(ProcessRunner::new(template, cwd));
    let coordinator = Coordinator::new(runner, settings.settle_delay(), Handle::current());

    let _watcher = crate::watch::spawn_watcher(target.clone(), rt_tx.clone())?;

    // Ctrl-C -> shutdown. No drain of an in-flight run.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let keys = settings.keys();
    if crate::input::spawn_key_reader(keys, rt_tx.clone())?.is_some() {
        debug!(force = %keys.force, quit = %keys.quit, "keyboard reader started");
    }

    println!("when_changed now watching: {target}");
    println!(
        "Press '{}' to force a run, '{}' or Ctrl-C to quit.",
        keys.force, keys.quit
    );
    info!(settle_ms = settings.settle_delay().as_millis() as u64, "ready");

    Runtime::new(coordinator, rt_rx).run().await?;
    Ok(())
}

/// Simple dry-run output: print what would be watched and run.
fn print_dry_run(target: &WatchTarget, template: &CommandTemplate, settings: &Settings) {
    print!("{}", dry_run_report(target, template, settings));
    debug!("dry-run complete (no watching)");
}

fn dry_run_report(target: &WatchTarget, template: &CommandTemplate, settings: &Settings) -> String {
    let keys = settings.keys();
    format!(
        "when_changed dry-run\n  \
         watch root = {}\n  \
         filter = {}\n  \
         recursive = {}\n  \
         command = {template}\n  \
         placeholder = {}\n  \
         settle_delay_ms = {}\n  \
         keys = force '{}', quit '{}'\n",
        target.root().display(),
        target.filter().unwrap_or("(all entries)"),
        target.is_recursive(),
        template.placeholder(),
        settings.settle_delay().as_millis(),
        keys.force,
        keys.quit,
    )
}
