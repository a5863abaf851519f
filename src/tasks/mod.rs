//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep for the in-process job cache. Redis expires its own keys,
//!   so the sweep only runs with the in-process backend.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
