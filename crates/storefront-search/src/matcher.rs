use serde::Serialize;
use std::collections::BTreeSet;

use storefront_core::types::{Catalog, CategoryId, MatchEntry, MatchSummary, Product, ProductId};

/// Everything the listing shows for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    /// The query as typed, trimmed.
    pub query: String,
    pub visible: BTreeSet<ProductId>,
    pub shown_categories: BTreeSet<CategoryId>,
    pub summary: MatchSummary,
}

impl ViewState {
    /// Every product visible and the summary cleared.
    pub fn reset(catalog: &Catalog) -> Self {
        Self {
            query: String::new(),
            visible: catalog.products().iter().map(|p| p.id).collect(),
            shown_categories: catalog.categories().iter().map(|c| c.id).collect(),
            summary: MatchSummary::Cleared,
        }
    }

    pub fn is_visible(&self, id: ProductId) -> bool {
        self.visible.contains(&id)
    }

    pub fn is_shown(&self, id: CategoryId) -> bool {
        self.shown_categories.contains(&id)
    }
}

/// Trim and lower-case; the form both sides are compared in.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Substring containment in the lower-cased name or description.
/// `needle` must already be normalized.
pub fn product_matches(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle)
        || product.description_text().to_lowercase().contains(needle)
}

/// Compute the listing for `raw_query` without touching any view.
pub fn evaluate(catalog: &Catalog, raw_query: &str) -> ViewState {
    let needle = normalize_query(raw_query);
    if needle.is_empty() {
        return ViewState::reset(catalog);
    }

    let mut visible = BTreeSet::new();
    let mut entries = Vec::new();
    for product in catalog.products() {
        if product_matches(product, &needle) {
            visible.insert(product.id);
            entries.push(MatchEntry { product: product.id, name: product.name.clone() });
        }
    }

    // second pass over the flags just computed
    let shown_categories = catalog
        .categories()
        .iter()
        .filter(|c| c.products.iter().any(|p| visible.contains(p)))
        .map(|c| c.id)
        .collect();

    let query = raw_query.trim().to_string();
    let summary = if entries.is_empty() {
        MatchSummary::NoResults { query: raw_query.to_string() }
    } else {
        MatchSummary::Found { entries }
    };

    ViewState { query, visible, shown_categories, summary }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        let mugs = catalog.push_category("Mugs");
        let paper = catalog.push_category("Paper");
        catalog.push_product(mugs, "Red Mug", Some("Glazed ceramic".into())).unwrap();
        catalog.push_product(mugs, "Blue Mug", None).unwrap();
        catalog.push_product(paper, "Notebook", Some("Lined, fits a mug pocket".into())).unwrap();
        catalog
    }

    #[test]
    fn description_text_is_searched() {
        let state = evaluate(&sample(), "CERAMIC");
        assert_eq!(state.visible.into_iter().collect::<Vec<_>>(), vec![ProductId(0)]);
    }

    #[test]
    fn empty_needle_matches_everything() {
        let catalog = sample();
        assert!(catalog.products().iter().all(|p| product_matches(p, "")));
    }

    #[test]
    fn no_results_message_echoes_raw_input() {
        let state = evaluate(&sample(), "  Zebra ");
        assert_eq!(state.query, "Zebra");
        assert_eq!(state.summary, MatchSummary::NoResults { query: "  Zebra ".into() });
        assert!(state.shown_categories.is_empty());
    }
}
