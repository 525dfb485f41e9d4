//! storefront-page
//!
//! Wires the search panel, review form and navigation chrome into one page.
//! [`Page::init`] replaces the page-load event: it takes the element handles
//! that exist, installs only the matching components, and hands back a
//! [`Disposer`] per component.
pub mod chrome;
pub mod memory;
pub mod page;

pub use memory::{MemoryPage, ScrollTarget};
pub use page::{Component, Disposer, EventEffect, Page, PageEvent, PageHandles, PageView};
