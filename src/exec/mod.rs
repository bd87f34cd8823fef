// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`template`] turns the user's command line into a [`CommandTemplate`]
//!   and renders it for a changed path.
//! - [`runner`] provides the `CommandRunner` trait and the process-backed
//!   [`ProcessRunner`] the coordinator uses in production, and which tests
//!   replace with a fake implementation.

pub mod runner;
pub mod template;

pub use runner::{CommandRunner, ProcessRunner};
pub use template::{CommandTemplate, Invocation, DEFAULT_PLACEHOLDER};
