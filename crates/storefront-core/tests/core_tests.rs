use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use storefront_core::catalog::{load_catalog, parse_json};
use storefront_core::config::Config;
use storefront_core::error::Error;
use storefront_core::timer::{Debouncer, Deadline, TimerSet};
use storefront_core::types::{
    CategoryId, MatchEntry, MatchSummary, ProductId, Rating, ReviewPayload, SubmitAck,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn json_catalog_assigns_document_order_ids() {
    let json = r#"{"categories": [
        {"title": "Mugs", "products": [{"name": "Red Mug", "description": "Ceramic"}, {"name": "Blue Mug"}]},
        {"title": "Paper", "products": [{"name": "Notebook"}]}
    ]}"#;
    let catalog = parse_json(json).expect("parse");
    let names: Vec<_> = catalog.products().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Red Mug", "Blue Mug", "Notebook"]);
    assert_eq!(catalog.products()[2].category, CategoryId(1));
    assert_eq!(catalog.categories()[0].products, vec![ProductId(0), ProductId(1)]);
    assert_eq!(catalog.products()[1].description_text(), "");
}

#[test]
fn json_catalog_rejects_nameless_product() {
    let err = parse_json(r#"{"categories": [{"title": "X", "products": [{"name": "  "}]}]}"#)
        .expect_err("blank name");
    assert!(matches!(err, Error::Catalog(_)));
}

#[test]
fn directory_catalog_uses_folders_as_categories() {
    let tmp = TempDir::new().unwrap();
    let mugs = tmp.path().join("a-mugs");
    let paper = tmp.path().join("b-paper");
    fs::create_dir_all(&mugs).unwrap();
    fs::create_dir_all(&paper).unwrap();
    fs::write(mugs.join("1.txt"), "Red Mug\nGlazed red ceramic").unwrap();
    fs::write(mugs.join("2.txt"), "Blue Mug").unwrap();
    fs::write(mugs.join("ignored.md"), "# not a product").unwrap();
    fs::write(paper.join("1.txt"), "Notebook\nLined pages").unwrap();

    let catalog = load_catalog(tmp.path()).expect("load");
    let titles: Vec<_> = catalog.categories().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["a-mugs", "b-paper"]);
    assert_eq!(catalog.products().len(), 3);
    assert_eq!(catalog.products()[0].description.as_deref(), Some("Glazed red ceramic"));
    assert!(catalog.products()[1].description.is_none());
}

#[test]
fn summary_messages_follow_match_count() {
    assert_eq!(MatchSummary::Cleared.message(), None);
    let none = MatchSummary::NoResults { query: "xyz".into() };
    assert_eq!(none.message().as_deref(), Some("No products found for \"xyz\""));
    let one = MatchSummary::Found {
        entries: vec![MatchEntry { product: ProductId(0), name: "Red Mug".into() }],
    };
    assert_eq!(one.message().as_deref(), Some("Found 1 product:"));
    let two = MatchSummary::Found {
        entries: vec![
            MatchEntry { product: ProductId(0), name: "Red Mug".into() },
            MatchEntry { product: ProductId(1), name: "Blue Mug".into() },
        ],
    };
    assert_eq!(two.message().as_deref(), Some("Found 2 products:"));
}

#[test]
fn rating_is_bounded() {
    assert!(Rating::try_from(0_u8).is_err());
    assert!(Rating::try_from(6_u8).is_err());
    let r = Rating::try_from(3_u8).unwrap();
    assert_eq!(r.stars(), "★★★☆☆");
}

#[test]
fn payload_uses_camel_case_wire_names() {
    let payload = ReviewPayload {
        display_name: "Ana".into(),
        rating: Rating::try_from(4_u8).unwrap(),
        review_text: "Great".into(),
    };
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"displayName": "Ana", "rating": 4, "reviewText": "Great"})
    );
}

#[test]
fn ack_requires_success_field() {
    assert!(SubmitAck::parse(r#"{"success": true, "id": 7}"#).unwrap().success);
    assert!(!SubmitAck::parse(r#"{"success": false}"#).unwrap().success);
    assert!(SubmitAck::parse(r#"{"ok": true}"#).is_err());
    assert!(SubmitAck::parse("<html>").is_err());
}

#[test]
fn deadline_fires_once_and_replaces_on_reschedule() {
    let mut d = Deadline::new();
    d.schedule(ms(0), ms(100), "a");
    assert_eq!(d.schedule(ms(50), ms(100), "b"), Some("a"));
    assert_eq!(d.poll(ms(120)), None);
    assert_eq!(d.poll(ms(150)), Some("b"));
    assert_eq!(d.poll(ms(500)), None);
}

#[test]
fn scheduling_at_the_end_of_time_saturates() {
    let mut d = Deadline::new();
    d.schedule(Duration::MAX, ms(300), "late");
    assert_eq!(d.due_at(), Some(Duration::MAX));
    assert_eq!(d.poll(Duration::MAX), Some("late"));

    let mut timers = TimerSet::new();
    timers.schedule(7_u32, Duration::MAX - ms(1), ms(3000), ());
    assert_eq!(timers.next_due(), Some(Duration::MAX));
}

#[test]
fn debouncer_releases_only_latest_value() {
    let mut deb = Debouncer::new(ms(300));
    deb.push(ms(0), "m");
    deb.push(ms(100), "mu");
    deb.push(ms(200), "mug");
    assert_eq!(deb.poll(ms(350)), None);
    assert_eq!(deb.poll(ms(500)), Some("mug"));
    assert!(!deb.is_pending());
}

#[test]
fn timer_set_polls_in_deadline_order() {
    let mut timers = TimerSet::new();
    timers.schedule(2_u32, ms(0), ms(100), ());
    timers.schedule(1_u32, ms(0), ms(200), ());
    timers.schedule(3_u32, ms(0), ms(900), ());
    let due: Vec<u32> = timers.poll_due(ms(250)).into_iter().map(|(k, ())| k).collect();
    assert_eq!(due, vec![2, 1]);
    assert_eq!(timers.next_due(), Some(ms(900)));
}

#[test]
fn config_merges_file_over_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[search]\ndebounce_ms = 150\n[reviews]\nbase_url = \"http://shop.test/\"\n",
    )
    .unwrap();
    let config = Config::load_from(tmp.path(), "staging").expect("load");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.search.debounce_ms, 150);
    assert_eq!(settings.search.highlight_ms, 3000);
    assert_eq!(settings.reviews.url(), "http://shop.test/submit_review");
    let endpoint: String = config.get("reviews.endpoint").expect("endpoint");
    assert_eq!(endpoint, "/submit_review");
}

#[test]
fn config_rejects_zero_debounce() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[search]\ndebounce_ms = 0\n").unwrap();
    assert!(matches!(Config::load_from(tmp.path(), "test"), Err(Error::InvalidConfig(_))));
}
