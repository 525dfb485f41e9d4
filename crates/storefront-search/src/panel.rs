use std::time::Duration;
use tracing::{debug, info};

use storefront_core::config::SearchSettings;
use storefront_core::timer::{earliest, Debouncer, TimerSet};
use storefront_core::traits::CatalogView;
use storefront_core::types::{Catalog, ProductId};

use crate::matcher::{evaluate, ViewState};
use crate::navigator;

/// The search box, the listing it filters, and the click-to-scroll highlights.
///
/// Input is debounced; only the last value typed before a quiet period is
/// evaluated. Each highlighted card owns its own revert timer, and activating
/// the same card again restarts it.
pub struct SearchPanel {
    catalog: Catalog,
    debounce: Debouncer<String>,
    highlights: TimerSet<ProductId, ()>,
    highlight_for: Duration,
    state: ViewState,
}

impl SearchPanel {
    pub fn new(catalog: Catalog, settings: &SearchSettings) -> Self {
        let state = ViewState::reset(&catalog);
        Self {
            catalog,
            debounce: Debouncer::new(settings.debounce()),
            highlights: TimerSet::new(),
            highlight_for: settings.highlight(),
            state,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The state last rendered.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_highlighted(&self, id: ProductId) -> bool {
        self.highlights.contains(&id)
    }

    /// A keystroke: restart the debounce with the full input value.
    pub fn input(&mut self, raw: impl Into<String>, now: Duration) {
        self.debounce.push(now, raw.into());
    }

    /// Fire whatever is due at `now`: a settled query, expired highlights.
    pub fn tick<V: CatalogView + ?Sized>(&mut self, now: Duration, view: &mut V) {
        if let Some(query) = self.debounce.poll(now) {
            self.apply_query(&query, view);
        }
        for (id, ()) in self.highlights.poll_due(now) {
            view.set_highlight(id, false);
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        earliest([self.debounce.due_at(), self.highlights.next_due()])
    }

    /// Evaluate `query` immediately and render the result.
    pub fn apply_query<V: CatalogView + ?Sized>(&mut self, query: &str, view: &mut V) {
        let next = evaluate(&self.catalog, query);
        for product in self.catalog.products() {
            view.set_product_visible(product.id, next.is_visible(product.id));
        }
        for category in self.catalog.categories() {
            view.set_category_shown(category.id, next.is_shown(category.id));
        }
        view.render_summary(&next.summary);
        info!(
            query = %next.query,
            visible = next.visible.len(),
            categories = next.shown_categories.len(),
            "search evaluated"
        );
        self.state = next;
    }

    /// A click on a result entry carrying `name`.
    ///
    /// Every card with that exact name is scrolled to and highlighted, in
    /// document order. Returns how many cards were targeted.
    pub fn activate<V: CatalogView + ?Sized>(&mut self, name: &str, now: Duration, view: &mut V) -> usize {
        let targets = navigator::targets(&self.catalog, name);
        if targets.is_empty() {
            debug!(name, "no product with this name, ignoring");
            return 0;
        }
        for &id in &targets {
            view.scroll_into_view(id);
            view.set_highlight(id, true);
            self.highlights.schedule(id, now, self.highlight_for, ());
        }
        targets.len()
    }

    /// Drop pending input and clear highlights now.
    pub fn dispose<V: CatalogView + ?Sized>(&mut self, view: &mut V) {
        self.debounce.cancel();
        for (id, ()) in self.highlights.drain() {
            view.set_highlight(id, false);
        }
    }
}
