use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use storefront_core::catalog::load_catalog;
use storefront_core::config::{resolve_with_base, Config, Settings};
use storefront_core::types::{Catalog, Rating};
use storefront_page::{EventEffect, MemoryPage, Page, PageEvent, PageHandles};
use storefront_reviews::http::HttpTransport;

const USAGE: &str = "Usage: storefront <search|categories|shell|review> [args...]
  search <query> [catalog]        filter the catalog once and print what stays visible
  categories [catalog]            list categories and product counts
  shell [catalog]                 type queries interactively; /open <name>, /help, /quit
  review <name> <1-5> <text...>   post a review to the configured endpoint";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn catalog_path(settings: &Settings, arg: Option<&String>) -> anyhow::Result<PathBuf> {
    let raw = arg.cloned().unwrap_or_else(|| settings.data.catalog_path.clone());
    Ok(resolve_with_base(&env::current_dir()?, raw))
}

fn open_catalog(settings: &Settings, arg: Option<&String>) -> anyhow::Result<Catalog> {
    let path = catalog_path(settings, arg)?;
    load_catalog(&path).with_context(|| format!("loading catalog from {}", path.display()))
}

fn listing_page(settings: &Settings, catalog: Catalog, view: &mut MemoryPage) -> Page {
    let handles = PageHandles {
        search_input: Some("searchInput".into()),
        search_results: Some("searchResults".into()),
        ..PageHandles::default()
    };
    // The listing lives on the products page, so scroll reveal never installs.
    let (page, _disposers) = Page::init(&handles, settings, catalog, &settings.page.reveal_exempt_path, view);
    page
}

/// Run the page clock forward until no timer is pending.
fn settle(page: &mut Page, now: &mut Duration, view: &mut MemoryPage) {
    while let Some(at) = page.next_deadline() {
        *now = (*now).max(at);
        page.tick(*now, view);
    }
}

fn print_listing(page: &Page, view: &MemoryPage) {
    if let Some(message) = view.summary.message() {
        println!("{message}");
    }
    let Some(search) = page.search() else {
        return;
    };
    let catalog = search.catalog();
    for category in catalog.categories().iter().filter(|c| view.is_category_shown(c.id)) {
        println!("\n{}", category.title);
        for id in category.products.iter().filter(|id| view.is_product_visible(**id)) {
            if let Some(product) = catalog.product(*id) {
                let marker = if view.highlighted.contains(id) { "*" } else { "-" };
                println!("  {marker} {}  {}", product.name, product.description_text());
            }
        }
    }
}

fn run_search(settings: &Settings, args: &[String]) -> anyhow::Result<()> {
    let Some(query) = args.first() else {
        bail!("Usage: storefront search \"<query>\" [catalog]");
    };
    let mut view = MemoryPage::new();
    let mut page = listing_page(settings, open_catalog(settings, args.get(1))?, &mut view);
    let mut now = Duration::ZERO;
    page.dispatch(PageEvent::SearchInput { value: query.clone() }, now, &mut view);
    settle(&mut page, &mut now, &mut view);
    print_listing(&page, &view);
    Ok(())
}

fn run_categories(settings: &Settings, args: &[String]) -> anyhow::Result<()> {
    let catalog = open_catalog(settings, args.first())?;
    for category in catalog.categories() {
        println!("{:>4}  {}", category.products.len(), category.title);
    }
    println!("{:>4}  total", catalog.products().len());
    Ok(())
}

fn print_shell_help() {
    println!("Type to filter products. Empty input shows everything.");
    println!("  /open <name>   scroll to and highlight a product");
    println!("  /help          this message");
    println!("  /quit          leave");
}

fn run_shell(settings: &Settings, args: &[String]) -> anyhow::Result<()> {
    let mut view = MemoryPage::new();
    let mut page = listing_page(settings, open_catalog(settings, args.first())?, &mut view);
    let mut now = Duration::ZERO;
    print_shell_help();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "search> ")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim_end();
        if input == "/quit" || input == "/exit" {
            break;
        } else if input == "/help" {
            print_shell_help();
        } else if let Some(name) = input.strip_prefix("/open ") {
            let effect = page.dispatch(PageEvent::ResultClicked { name: name.trim().to_string() }, now, &mut view);
            if effect == EventEffect::Handled && !view.highlighted.is_empty() {
                print_listing(&page, &view);
            } else {
                println!("No product named \"{}\"", name.trim());
            }
            settle(&mut page, &mut now, &mut view);
        } else {
            page.dispatch(PageEvent::SearchInput { value: input.to_string() }, now, &mut view);
            settle(&mut page, &mut now, &mut view);
            print_listing(&page, &view);
        }
        write!(stdout, "\nsearch> ")?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_review(settings: &Settings, args: &[String]) -> anyhow::Result<()> {
    let [name, rating, text @ ..] = args else {
        bail!("Usage: storefront review <name> <1-5> <text...>");
    };
    let stars: u8 = rating.parse().with_context(|| format!("rating must be a number, got {rating:?}"))?;
    let rating = Rating::try_from(stars)?;

    let handles = PageHandles {
        review_form: Some("reviewForm".into()),
        reviews_list: Some("reviewsList".into()),
        ..PageHandles::default()
    };
    let mut view = MemoryPage::new();
    let (mut page, disposers) = Page::init(&handles, settings, Catalog::new(), "/reviews", &mut view);
    let transport = HttpTransport::new(&settings.reviews)?;
    info!(url = transport.url(), "posting review");

    let now = Duration::ZERO;
    page.dispatch(PageEvent::StarClicked { index: usize::from(rating.get() - 1) }, now, &mut view);
    let submit = PageEvent::FormSubmitted { display_name: name.clone(), review_text: text.join(" ") };
    page.dispatch_with(submit, now, &mut view, &transport);

    for alert in &view.alerts {
        println!("{alert}");
    }
    let posted = view.reviews.first().cloned();
    page.dispose_all(disposers, &mut view);
    match posted {
        Some(card) => {
            println!("{}  {}\n{}\n{}", card.display_name, card.rating.stars(), card.text, card.posted);
            Ok(())
        }
        None => bail!("review was not accepted"),
    }
}

fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let settings = config.settings()?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "search" => run_search(&settings, &args),
        "categories" => run_categories(&settings, &args),
        "shell" => run_shell(&settings, &args),
        "review" => run_review(&settings, &args),
        _ => {
            eprintln!("Unknown command: {cmd}\n{USAGE}");
            std::process::exit(1);
        }
    }
}
