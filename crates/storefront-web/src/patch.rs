//! DOM operations emitted for the host to apply, in call order.
use serde::{Deserialize, Serialize};

use storefront_core::traits::{CatalogView, ChromeView, ReviewView};
use storefront_core::types::{CategoryId, MatchSummary, ProductId, ReviewCard};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    ProductVisible { product: ProductId, visible: bool },
    CategoryShown { category: CategoryId, shown: bool },
    /// Replace the contents of the results container.
    Summary { html: String },
    ScrollIntoView { product: ProductId },
    Highlight { product: ProductId, on: bool },
    Stars { lit: u8, selected: u8 },
    /// Insert as the first child of the reviews list, starting transparent.
    PrependReview { card: u64, html: String },
    RevealReview { card: u64 },
    ResetForm,
    Alert { message: String },
    MenuOpen { open: bool },
    ScrollToAnchor { target: String },
    FaqOpen { index: usize, open: bool },
    Revealed { element: String, revealed: bool },
}

/// A view that records every call as a [`Patch`].
#[derive(Debug, Default)]
pub struct PatchView {
    patches: Vec<Patch>,
}

impl PatchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Patch] {
        &self.patches
    }

    pub fn take(&mut self) -> Vec<Patch> {
        std::mem::take(&mut self.patches)
    }
}

impl CatalogView for PatchView {
    fn set_product_visible(&mut self, id: ProductId, visible: bool) {
        self.patches.push(Patch::ProductVisible { product: id, visible });
    }

    fn set_category_shown(&mut self, id: CategoryId, shown: bool) {
        self.patches.push(Patch::CategoryShown { category: id, shown });
    }

    fn render_summary(&mut self, summary: &MatchSummary) {
        let html = storefront_search::summary::render_html(summary);
        self.patches.push(Patch::Summary { html });
    }

    fn scroll_into_view(&mut self, id: ProductId) {
        self.patches.push(Patch::ScrollIntoView { product: id });
    }

    fn set_highlight(&mut self, id: ProductId, on: bool) {
        self.patches.push(Patch::Highlight { product: id, on });
    }
}

impl ReviewView for PatchView {
    fn render_stars(&mut self, lit: u8, selected: u8) {
        self.patches.push(Patch::Stars { lit, selected });
    }

    fn prepend_review(&mut self, card: &ReviewCard) {
        let html = storefront_reviews::card::render_html(card);
        self.patches.push(Patch::PrependReview { card: card.id, html });
    }

    fn reveal_review(&mut self, card_id: u64) {
        self.patches.push(Patch::RevealReview { card: card_id });
    }

    fn reset_form(&mut self) {
        self.patches.push(Patch::ResetForm);
    }

    fn alert(&mut self, message: &str) {
        self.patches.push(Patch::Alert { message: message.to_string() });
    }
}

impl ChromeView for PatchView {
    fn set_menu_open(&mut self, open: bool) {
        self.patches.push(Patch::MenuOpen { open });
    }

    fn scroll_to_anchor(&mut self, target: &str) {
        self.patches.push(Patch::ScrollToAnchor { target: target.to_string() });
    }

    fn set_faq_open(&mut self, index: usize, open: bool) {
        self.patches.push(Patch::FaqOpen { index, open });
    }

    fn set_revealed(&mut self, element: &str, revealed: bool) {
        self.patches.push(Patch::Revealed { element: element.to_string(), revealed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patches_serialize_with_op_tag() {
        let json = serde_json::to_string(&Patch::Highlight { product: ProductId(3), on: true }).unwrap();
        assert_eq!(json, r#"{"op":"highlight","product":3,"on":true}"#);
        assert_eq!(serde_json::to_string(&Patch::ResetForm).unwrap(), r#"{"op":"reset_form"}"#);
    }

    #[test]
    fn take_empties_the_queue() {
        let mut view = PatchView::new();
        view.set_menu_open(true);
        view.alert("hi");
        assert_eq!(view.pending().len(), 2);
        assert_eq!(view.take().len(), 2);
        assert!(view.pending().is_empty());
    }
}
