//! Access Control Module
//!
//! Ownership and pause gate shared by the Dpass asset controllers.
//!
//! # Features
//!
//! - Single owner authority with ownership transfer
//! - Two-state pause gate with strict transitions
//! - Named errors matching the identifiers external consumers expect

pub mod error;
pub mod ownable;
pub mod pausable;

pub use error::*;
pub use ownable::*;
pub use pausable::*;
