//! Domain types shared by the search, review and page crates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// Position of a product card in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub usize);

/// Position of a category container in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub usize);

/// A rendered product card.
///
/// - `name`: heading text, also the lookup key for navigation (not unique)
/// - `description`: paragraph text; a missing paragraph matches as empty text
/// - `category`: the container the card lives in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

impl Product {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// A category container and the products it groups, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub products: Vec<ProductId>,
}

/// Every product and category on the page.
///
/// Ids are dense indexes, so `products[id.0].id == id` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category and return its id.
    pub fn push_category(&mut self, title: impl Into<String>) -> CategoryId {
        let id = CategoryId(self.categories.len());
        self.categories.push(Category { id, title: title.into(), products: Vec::new() });
        id
    }

    /// Append a product to an existing category and return its id.
    pub fn push_product(
        &mut self,
        category: CategoryId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> crate::error::Result<ProductId> {
        let id = ProductId(self.products.len());
        let slot = self
            .categories
            .get_mut(category.0)
            .ok_or_else(|| Error::NotFound(format!("category #{}", category.0)))?;
        slot.products.push(id);
        self.products.push(Product { id, category, name: name.into(), description });
        Ok(id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(id.0)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.0)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// One clickable entry in the search summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub product: ProductId,
    pub name: String,
}

/// The message shown under the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchSummary {
    /// Empty query: the results container is emptied.
    #[default]
    Cleared,
    NoResults { query: String },
    Found { entries: Vec<MatchEntry> },
}

impl MatchSummary {
    /// Headline text, or `None` when the summary is cleared.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Cleared => None,
            Self::NoResults { query } => Some(format!("No products found for \"{query}\"")),
            Self::Found { entries } => {
                let n = entries.len();
                let plural = if n == 1 { "" } else { "s" };
                Some(format!("Found {n} product{plural}:"))
            }
        }
    }

    pub fn entries(&self) -> &[MatchEntry] {
        match self {
            Self::Found { entries } => entries,
            _ => &[],
        }
    }
}

/// A star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }

    /// Filled and hollow stars, e.g. `★★★☆☆` for 3.
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let hollow = usize::from(Self::MAX - self.0);
        format!("{}{}", "★".repeat(filled), "☆".repeat(hollow))
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRating(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `POST /submit_review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub display_name: String,
    pub rating: Rating,
    pub review_text: String,
}

/// Response of the review endpoint. Extra fields are kept but not interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAck {
    pub success: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SubmitAck {
    /// Parse a response body; any shape other than `{success: bool, ..}` is an error.
    pub fn parse(body: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A review card synthesized after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCard {
    pub id: u64,
    pub display_name: String,
    pub rating: Rating,
    pub text: String,
    pub posted: String,
}
