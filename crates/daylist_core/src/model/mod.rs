//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task shapes used by core business logic.
//! - Keep validation rules next to the data they guard.
//!
//! # Invariants
//! - Every stored task is identified by a store-assigned `TaskId`.
//! - Removal is permanent; there are no tombstones to resurrect.

pub mod task;
