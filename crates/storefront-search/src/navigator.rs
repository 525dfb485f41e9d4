use storefront_core::types::{Catalog, ProductId};

/// Every product whose displayed name equals `name` exactly, in document order.
///
/// Names are not unique, so more than one card can be returned. An empty
/// result means the match list was stale; callers treat it as a no-op.
pub fn targets(catalog: &Catalog, name: &str) -> Vec<ProductId> {
    catalog.products().iter().filter(|p| p.name == name).map(|p| p.id).collect()
}
