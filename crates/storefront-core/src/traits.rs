use crate::types::{CategoryId, MatchSummary, ProductId, ReviewCard, ReviewPayload, SubmitAck};

/// The product listing part of the page.
pub trait CatalogView {
    fn set_product_visible(&mut self, id: ProductId, visible: bool);
    fn set_category_shown(&mut self, id: CategoryId, shown: bool);
    fn render_summary(&mut self, summary: &MatchSummary);
    /// Smooth-scroll the card to the vertical center of the viewport.
    fn scroll_into_view(&mut self, id: ProductId);
    fn set_highlight(&mut self, id: ProductId, on: bool);
}

/// The review form and the list of posted reviews.
pub trait ReviewView {
    /// `lit` stars drawn as hovered, `selected` stars drawn as chosen.
    fn render_stars(&mut self, lit: u8, selected: u8);
    fn prepend_review(&mut self, card: &ReviewCard);
    fn reveal_review(&mut self, card_id: u64);
    fn reset_form(&mut self);
    /// Blocking user-visible message.
    fn alert(&mut self, message: &str);
}

/// Navigation menu, anchors, FAQ, and scroll reveal.
pub trait ChromeView {
    fn set_menu_open(&mut self, open: bool);
    /// Smooth-scroll an anchor target to the top of the viewport.
    fn scroll_to_anchor(&mut self, target: &str);
    fn set_faq_open(&mut self, index: usize, open: bool);
    fn set_revealed(&mut self, element: &str, revealed: bool);
}

/// Delivers review submissions to the storage endpoint.
pub trait ReviewTransport {
    fn submit(&self, payload: &ReviewPayload) -> anyhow::Result<SubmitAck>;
}
