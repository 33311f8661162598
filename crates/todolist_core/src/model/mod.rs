//! Domain model for to-do records.
//!
//! # Responsibility
//! - Define the persisted record shape and its stable identifier.
//! - Own input normalization rules shared by every caller.
//!
//! # Invariants
//! - Every record is keyed by a stable `TodoId` that is never reused.
//! - `timestamp` is fixed at creation and only used as a sort key.

pub mod todo;
