//! Core types and trait definitions for Stockroom.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! defines the item and history models, the [`store::ItemStore`] abstraction,
//! and the [`service::ItemService`] that drives item mutations together with
//! their audit trail.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod audit;
pub mod error;
pub mod history;
pub mod item;
pub mod service;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
