//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory roster and route every mutation through the model's
//!   validated setters and the injected store.
//! - Keep front ends decoupled from storage details.

pub mod roster_service;
