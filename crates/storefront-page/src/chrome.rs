use std::collections::BTreeSet;
use tracing::debug;

use storefront_core::traits::ChromeView;

/// Scroll-reveal is skipped on the products page and anything under it.
pub fn reveal_allowed(path: &str, exempt: &str) -> bool {
    !(path == exempt || path.contains(exempt))
}

/// Hamburger-driven mobile menu.
#[derive(Debug, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle<V: ChromeView + ?Sized>(&mut self, view: &mut V) {
        self.open = !self.open;
        view.set_menu_open(self.open);
    }

    /// Following a link always closes the menu.
    pub fn close<V: ChromeView + ?Sized>(&mut self, view: &mut V) {
        self.open = false;
        view.set_menu_open(false);
    }
}

/// In-page `#id` links.
#[derive(Debug, Default)]
pub struct Anchors {
    targets: BTreeSet<String>,
}

impl Anchors {
    pub fn new(targets: impl IntoIterator<Item = String>) -> Self {
        Self { targets: targets.into_iter().collect() }
    }

    /// Scroll to `href` (with or without the leading `#`) if the target exists.
    pub fn follow<V: ChromeView + ?Sized>(&self, href: &str, view: &mut V) -> bool {
        let id = href.strip_prefix('#').unwrap_or(href);
        if !self.targets.contains(id) {
            debug!(href, "anchor target missing");
            return false;
        }
        view.scroll_to_anchor(id);
        true
    }
}

/// FAQ items open and close independently.
#[derive(Debug, Default)]
pub struct FaqAccordion {
    open: Vec<bool>,
}

impl FaqAccordion {
    pub fn new(items: usize) -> Self {
        Self { open: vec![false; items] }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn toggle<V: ChromeView + ?Sized>(&mut self, index: usize, view: &mut V) {
        if let Some(open) = self.open.get_mut(index) {
            *open = !*open;
            view.set_faq_open(index, *open);
        }
    }
}

/// Fades observed elements in while they intersect the viewport and out
/// again when they leave.
#[derive(Debug, Default)]
pub struct RevealAnimator {
    observed: BTreeSet<String>,
}

impl RevealAnimator {
    /// Start observing; every target begins hidden.
    pub fn install<V: ChromeView + ?Sized>(targets: impl IntoIterator<Item = String>, view: &mut V) -> Self {
        let observed: BTreeSet<String> = targets.into_iter().collect();
        for element in &observed {
            view.set_revealed(element, false);
        }
        Self { observed }
    }

    pub fn observes(&self, element: &str) -> bool {
        self.observed.contains(element)
    }

    pub fn on_intersection<V: ChromeView + ?Sized>(&self, element: &str, intersecting: bool, view: &mut V) -> bool {
        if !self.observes(element) {
            return false;
        }
        view.set_revealed(element, intersecting);
        true
    }

    /// Stop observing and leave everything visible.
    pub fn disconnect<V: ChromeView + ?Sized>(&mut self, view: &mut V) {
        for element in std::mem::take(&mut self.observed) {
            view.set_revealed(&element, true);
        }
    }
}
