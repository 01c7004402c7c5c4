//! Go Marketplace Core - Shared cart types.
//!
//! This crate provides the types shared by the cart store and its consumers:
//! - `cart` - The persisted cart state container
//! - `cli` - Command-line driver for a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used by any UI layer.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
