//! Validated personnel record model.
//!
//! # Responsibility
//! - Define the employee/manager record kinds and their field rules.
//! - Define the flat row shape used by persistence.
//!
//! # Invariants
//! - Every record observable outside this module satisfies all field rules.
//! - Employee IDs never change after construction.

pub mod field;
pub mod record;
pub mod row;
pub mod validate;
