#![forbid(unsafe_code)]

//! Browser runner for the storefront page.
//!
//! [`RunnerCore`] owns a [`storefront_page::Page`] and turns view calls into
//! serializable [`Patch`] operations the host applies to the DOM. The host
//! pushes JSON events, advances the clock, and performs the review request
//! itself. On `wasm32` the runner is exported to JavaScript as
//! `StorefrontRunner`.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::StorefrontRunner;

pub mod patch;
pub mod runner_core;

pub use patch::{Patch, PatchView};
pub use runner_core::RunnerCore;
