//! Core types for ScaleBound.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod status;

pub use email::{Email, EmailError};
pub use status::EntryStatus;
