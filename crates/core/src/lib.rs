//! ScaleBound Core - Shared types library.
//!
//! This crate provides the domain types used by the ScaleBound site:
//! - [`types`] - Newtype wrappers for emails and entry statuses
//! - [`waitlist`] - The validated waitlist signup pipeline
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients. All persistence is owned by the remote data gateway and lives
//! in the site crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod waitlist;

pub use types::*;
pub use waitlist::{ValidationError, WaitlistDraft, WaitlistEntry};
