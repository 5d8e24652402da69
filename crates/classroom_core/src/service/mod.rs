//! Use-case services composed over the record stores.
//!
//! # Responsibility
//! - Validate form input before it reaches a store.
//! - Provide sign-in state, dashboard numbers and display helpers.
//!
//! # Invariants
//! - Services never bypass store persistence.
//! - Stores stay unaware of authentication.

pub mod auth_service;
pub mod classroom;
pub mod dashboard;
