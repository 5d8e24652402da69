//! Read-side task queries computed on demand.
//!
//! # Responsibility
//! - Free-text search and combined filters over a task slice.
//! - Due-date derived views (overdue, due soon, ordering).
//!
//! # Invariants
//! - Queries never mutate or persist; they borrow from the caller's slice.
//! - Result order follows input order unless a function says it sorts.

pub mod filter;
