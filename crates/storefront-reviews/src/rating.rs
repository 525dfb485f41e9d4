use storefront_core::types::Rating;

/// Five-star picker.
///
/// `hovered` follows the pointer and is dropped when it leaves the stars;
/// `selected` changes only on click or reset. What is drawn is the hovered
/// value while there is one, otherwise the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarRating {
    hovered: Option<Rating>,
    selected: Option<Rating>,
}

impl StarRating {
    pub fn new() -> Self {
        Self::default()
    }

    /// Star indexes are zero-based as in the page; out-of-range indexes are ignored.
    pub fn hover(&mut self, index: usize) {
        if let Some(r) = rating_for_index(index) {
            self.hovered = Some(r);
        }
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// The pointer is on the clicked star, so it is also the hovered one.
    pub fn click(&mut self, index: usize) {
        if let Some(r) = rating_for_index(index) {
            self.hovered = Some(r);
            self.selected = Some(r);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected(&self) -> Option<Rating> {
        self.selected
    }

    pub fn hovered(&self) -> Option<Rating> {
        self.hovered
    }

    /// Number of stars drawn as lit.
    pub fn lit(&self) -> u8 {
        self.hovered.or(self.selected).map_or(0, Rating::get)
    }

    pub fn selected_count(&self) -> u8 {
        self.selected.map_or(0, Rating::get)
    }
}

fn rating_for_index(index: usize) -> Option<Rating> {
    let value = u8::try_from(index).ok()?.checked_add(1)?;
    Rating::try_from(value).ok()
}
