//! A page held in memory. Records what a browser would show so tests and the
//! CLI can drive a [`crate::Page`] without a DOM.
use std::collections::{BTreeMap, BTreeSet};

use storefront_core::traits::{CatalogView, ChromeView, ReviewView};
use storefront_core::types::{CategoryId, MatchSummary, ProductId, ReviewCard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Product(ProductId),
    Anchor(String),
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    pub hidden_products: BTreeSet<ProductId>,
    pub hidden_categories: BTreeSet<CategoryId>,
    pub summary: MatchSummary,
    pub highlighted: BTreeSet<ProductId>,
    /// Every scroll in the order it happened; the last one is the viewport.
    pub scrolls: Vec<ScrollTarget>,
    pub stars_lit: u8,
    pub stars_selected: u8,
    /// Reviews list, first child first.
    pub reviews: Vec<ReviewCard>,
    pub visible_reviews: BTreeSet<u64>,
    pub display_name: String,
    pub review_text: String,
    pub alerts: Vec<String>,
    pub menu_open: bool,
    pub open_faq: BTreeSet<usize>,
    pub revealed: BTreeMap<String, bool>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_product_visible(&self, id: ProductId) -> bool {
        !self.hidden_products.contains(&id)
    }

    pub fn is_category_shown(&self, id: CategoryId) -> bool {
        !self.hidden_categories.contains(&id)
    }

    pub fn viewport(&self) -> Option<&ScrollTarget> {
        self.scrolls.last()
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl CatalogView for MemoryPage {
    fn set_product_visible(&mut self, id: ProductId, visible: bool) {
        if visible {
            self.hidden_products.remove(&id);
        } else {
            self.hidden_products.insert(id);
        }
    }

    fn set_category_shown(&mut self, id: CategoryId, shown: bool) {
        if shown {
            self.hidden_categories.remove(&id);
        } else {
            self.hidden_categories.insert(id);
        }
    }

    fn render_summary(&mut self, summary: &MatchSummary) {
        self.summary = summary.clone();
    }

    fn scroll_into_view(&mut self, id: ProductId) {
        self.scrolls.push(ScrollTarget::Product(id));
    }

    fn set_highlight(&mut self, id: ProductId, on: bool) {
        if on {
            self.highlighted.insert(id);
        } else {
            self.highlighted.remove(&id);
        }
    }
}

impl ReviewView for MemoryPage {
    fn render_stars(&mut self, lit: u8, selected: u8) {
        self.stars_lit = lit;
        self.stars_selected = selected;
    }

    fn prepend_review(&mut self, card: &ReviewCard) {
        self.reviews.insert(0, card.clone());
    }

    fn reveal_review(&mut self, card_id: u64) {
        self.visible_reviews.insert(card_id);
    }

    fn reset_form(&mut self) {
        self.display_name.clear();
        self.review_text.clear();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

impl ChromeView for MemoryPage {
    fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    fn scroll_to_anchor(&mut self, target: &str) {
        self.scrolls.push(ScrollTarget::Anchor(target.to_string()));
    }

    fn set_faq_open(&mut self, index: usize, open: bool) {
        if open {
            self.open_faq.insert(index);
        } else {
            self.open_faq.remove(&index);
        }
    }

    fn set_revealed(&mut self, element: &str, revealed: bool) {
        self.revealed.insert(element.to_string(), revealed);
    }
}
