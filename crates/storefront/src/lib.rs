//! Zaziza storefront library.
//!
//! Cart, wishlist, and checkout state for the Zaziza demo shop, with
//! rendering left to a [`presenter::Presenter`] implementation. The
//! [`Storefront`] type ties the pieces together and is what front ends
//! construct.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod persistence;
pub mod presenter;
pub mod state;
pub mod wishlist;

pub use error::{Result, StorefrontError};
pub use state::{CheckoutOutcome, Storefront};
