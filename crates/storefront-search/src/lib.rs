//! storefront-search
//!
//! Live product filtering. `matcher` computes the next view state as a pure
//! function of the catalog and query; `panel` owns the debounce and highlight
//! timers and pushes state into a [`storefront_core::traits::CatalogView`].
pub mod matcher;
pub mod navigator;
pub mod panel;
pub mod summary;

pub use matcher::{evaluate, normalize_query, ViewState};
pub use panel::SearchPanel;
