//! Watch mode: rebuild the site whenever a Markdown source changes.
//!
//! ```text
//! notify thread ──events──► mpsc channel ──► main thread
//!                                             │
//!                                   RebuildQueue (single flight)
//!                                             │
//!                                     Site::build_once
//! ```
//!
//! Rebuilds run on the main thread, so two never overlap. Changes that land
//! while a rebuild is running collapse into exactly one follow-up rebuild.

use crate::build::Site;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::Receiver;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),
}

// =============================================================================
// Rebuild scheduling
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum QueueState {
    #[default]
    Idle,
    Running,
    /// Running, with at least one request since it started.
    Pending,
}

/// Single-flight rebuild scheduler with coalescing.
///
/// ```
/// # use blogsmith::watch::RebuildQueue;
/// let mut queue = RebuildQueue::default();
/// assert!(queue.request());   // idle: start now
/// assert!(!queue.request());  // running: remembered
/// assert!(!queue.request());  // ...and merged with the previous one
/// assert!(queue.finish());    // one follow-up
/// assert!(!queue.finish());   // then idle
/// ```
#[derive(Debug, Default)]
pub struct RebuildQueue {
    state: QueueState,
}

impl RebuildQueue {
    /// Ask for a rebuild. Returns `true` when the caller should start one now.
    pub fn request(&mut self) -> bool {
        match self.state {
            QueueState::Idle => {
                self.state = QueueState::Running;
                true
            }
            QueueState::Running | QueueState::Pending => {
                self.state = QueueState::Pending;
                false
            }
        }
    }

    /// Mark the running rebuild done. Returns `true` when a follow-up rebuild
    /// should start immediately.
    pub fn finish(&mut self) -> bool {
        match self.state {
            QueueState::Pending => {
                self.state = QueueState::Running;
                true
            }
            QueueState::Running | QueueState::Idle => {
                self.state = QueueState::Idle;
                false
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == QueueState::Idle
    }
}

// =============================================================================
// Event filtering
// =============================================================================

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Whether `event` should trigger a rebuild.
///
/// Reads are ignored: the build itself opens every source file.
pub fn is_markdown_event(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| is_markdown(p))
}

// =============================================================================
// Event loop
// =============================================================================

fn rebuild(site: &mut Site) {
    match site.build_once() {
        Ok(report) => info!(
            articles = report.article_count(),
            "rebuilt in {:.2}s",
            report.elapsed.as_secs_f64()
        ),
        Err(e) => error!("build failed: {e}"),
    }
}

/// Rebuild with templates reread from disk.
fn fresh_rebuild(site: &mut Site) {
    site.clear_templates();
    rebuild(site);
}

/// Queue every relevant event already waiting in `rx`, without blocking.
///
/// Returns how many were queued.
fn collect_pending(queue: &mut RebuildQueue, rx: &Receiver<notify::Result<Event>>) -> usize {
    let mut queued = 0;
    for res in rx.try_iter() {
        if res.is_ok_and(|event| is_markdown_event(&event)) {
            queue.request();
            queued += 1;
        }
    }
    queued
}

/// Run `step` until no request arrived while the last run was in progress.
///
/// The queue must already be running (its `request` returned `true`).
fn drain(
    queue: &mut RebuildQueue,
    rx: &Receiver<notify::Result<Event>>,
    mut step: impl FnMut(),
) {
    loop {
        step();
        collect_pending(queue, rx);
        if !queue.finish() {
            break;
        }
    }
}

/// Build once, then rebuild on every Markdown change until the process is
/// terminated.
///
/// Build failures are logged; the watcher keeps running.
pub fn watch(site: &mut Site) -> Result<(), WatchError> {
    rebuild(site);

    let dir = site.articles_dir();
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(&dir, RecursiveMode::Recursive)?;
    info!(dir = %dir.display(), "watching for changes (Ctrl+C to stop)");

    let mut queue = RebuildQueue::default();
    for res in &rx {
        match res {
            Ok(event) if is_markdown_event(&event) => {
                if let Some(path) = event.paths.first() {
                    info!(path = %path.display(), "change detected");
                }
                if queue.request() {
                    drain(&mut queue, &rx, || fresh_rebuild(site));
                }
            }
            Ok(_) => {}
            Err(e) => warn!("watch error: {e}"),
        }
    }
    Ok(())
}
