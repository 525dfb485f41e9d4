//! HTML for the results container.
//!
//! Product names and queries are user-visible text and are always escaped.
//! Each match entry carries its name in `data-product-name`; the host reads it
//! back on click and hands it to [`crate::SearchPanel::activate`].
use std::fmt::Write as _;

use storefront_core::types::MatchSummary;
use v_htmlescape::escape;

pub const RESULT_ITEM_CLASS: &str = "search-result-item";
pub const NAME_ATTRIBUTE: &str = "data-product-name";

pub fn render_html(summary: &MatchSummary) -> String {
    let Some(message) = summary.message() else {
        return String::new();
    };
    match summary {
        MatchSummary::Found { entries } => {
            let mut links = String::new();
            for entry in entries {
                let name = escape(&entry.name);
                let _ = write!(
                    links,
                    r#"<span class="{RESULT_ITEM_CLASS}" {NAME_ATTRIBUTE}="{name}">{name}</span>"#
                );
            }
            format!(
                r#"<div class="search-summary"><div class="search-count">{}</div><div>{links}</div></div>"#,
                escape(&message)
            )
        }
        _ => format!(r#"<span class="search-empty">{}</span>"#, escape(&message)),
    }
}
