//! Tienda Core - Shared types library.
//!
//! This crate provides the common types used across the Tienda demo
//! storefront:
//! - `storefront` - The storefront application layer (stores, flows, views)
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access, no view bindings. Everything here is pure and deterministic,
//! which keeps the validators trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, money, product IDs, and the
//!   national-ID check-letter validator

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
