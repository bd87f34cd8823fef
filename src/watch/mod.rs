// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Interpreting the user's watch path as a directory plus glob filter.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Turning raw notify events into [`ChangeNotification`]s.
//!
//! It knows nothing about execution state; coalescing happens in the engine.
//!
//! [`ChangeNotification`]: crate::engine::ChangeNotification

pub mod event_handler;
pub mod path_utils;
pub mod target;
pub mod watcher;

pub use event_handler::{change_kind, notifications_for};
pub use target::WatchTarget;
pub use watcher::{spawn_watcher, WatcherHandle};
