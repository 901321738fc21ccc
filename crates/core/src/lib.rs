//! Zaziza Core - Shared types library.
//!
//! This crate provides the types shared by every Zaziza component:
//! - `storefront` - Cart, wishlist, and checkout state machine
//! - `cli` - Terminal front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no timers.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, and the
//!   immutable [`Product`] record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
