use std::env;
use std::path::PathBuf;

use storefront_core::catalog::load_catalog;
use storefront_search::evaluate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [catalog]", args[0]);
        eprintln!("Example: {} 'mug' ./catalog.json", args[0]);
        std::process::exit(1);
    }
    let query = &args[1];
    let catalog_path = args.get(2).map_or_else(|| PathBuf::from("catalog.json"), PathBuf::from);
    println!("storefront-search-only\n======================");
    println!("Query: {query}");
    println!("Catalog: {}", catalog_path.display());

    let catalog = load_catalog(&catalog_path)?;
    let state = evaluate(&catalog, query);
    if let Some(message) = state.summary.message() {
        println!("\n{message}");
    }
    for entry in state.summary.entries() {
        let Some(product) = catalog.product(entry.product) else {
            continue;
        };
        let category = catalog.category(product.category).map_or("", |c| c.title.as_str());
        println!("  #{:<4} {:<24} [{category}]  {}", entry.product.0, product.name, product.description_text());
    }
    println!(
        "\nVisible: {} of {} products, {} of {} categories",
        state.visible.len(),
        catalog.products().len(),
        state.shown_categories.len(),
        catalog.categories().len()
    );
    Ok(())
}
