use storefront_core::types::{ReviewCard, ReviewPayload};
use v_htmlescape::escape;

pub const JUST_NOW: &str = "Just now";

pub fn from_payload(id: u64, payload: &ReviewPayload) -> ReviewCard {
    ReviewCard {
        id,
        display_name: payload.display_name.clone(),
        rating: payload.rating,
        text: payload.review_text.clone(),
        posted: JUST_NOW.to_string(),
    }
}

/// Markup for the reviews list. The card starts without `visible`; the host
/// adds it when the fade-in timer fires.
pub fn render_html(card: &ReviewCard) -> String {
    format!(
        concat!(
            r#"<div class="review-card scroll-fade-in" data-review-id="{}">"#,
            r#"<div class="review-header"><h4>{}</h4><div class="review-stars">{}</div></div>"#,
            r#"<p>{}</p><small>{}</small></div>"#
        ),
        card.id,
        escape(&card.display_name),
        card.rating.stars(),
        escape(&card.text),
        escape(&card.posted),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::types::Rating;

    #[test]
    fn card_markup_escapes_user_text() {
        let payload = ReviewPayload {
            display_name: "<Ana>".into(),
            rating: Rating::try_from(2_u8).unwrap(),
            review_text: "a & b".into(),
        };
        let html = render_html(&from_payload(9, &payload));
        assert!(html.contains("<h4>&lt;Ana&gt;</h4>"));
        assert!(html.contains("★★☆☆☆"));
        assert!(html.contains("<p>a &amp; b</p>"));
        assert!(html.contains(r#"data-review-id="9""#));
    }
}
