//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the four user actions plus reload.
//! - Keep presentation layers decoupled from file format details.

pub mod todo_service;
