//! Domain model for classes, tasks and the signed-in user.
//!
//! # Responsibility
//! - Define the records persisted in local storage and their JSON shape.
//! - Define drafts (create input) and patches (partial update input).
//!
//! # Invariants
//! - `id` and `created_at` are assigned by stores and never carried by patches.
//! - Deletion is a hard delete; there are no tombstones.

pub mod class;
pub mod task;
pub mod user;
pub mod validation;
