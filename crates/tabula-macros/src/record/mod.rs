//! Implementation of the `#[derive(Recordable)]` macro.

mod attrs;
mod derive;

pub use derive::recordable_derive_impl;
