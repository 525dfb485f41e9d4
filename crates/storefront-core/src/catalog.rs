//! Building a [`Catalog`] outside the browser.
//!
//! Two layouts are understood:
//! - a JSON file: `{"categories": [{"title": .., "products": [{"name": .., "description": ..}]}]}`
//! - a directory: `<root>/<category>/<product>.txt`, where the first non-empty
//!   line is the product name and the remaining text is the description
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Catalog;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    title: String,
    #[serde(default)]
    products: Vec<ProductEntry>,
}

#[derive(Debug, Deserialize)]
struct ProductEntry {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

/// Load from a `.json` file or a category directory tree.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        load_directory(path)
    } else {
        let text = fs::read_to_string(path)?;
        parse_json(&text)
    }
}

pub fn parse_json(text: &str) -> Result<Catalog> {
    let file: CatalogFile = serde_json::from_str(text)?;
    let mut catalog = Catalog::new();
    for entry in file.categories {
        let category = catalog.push_category(entry.title);
        for product in entry.products {
            push_checked(&mut catalog, category, product.name, product.description)?;
        }
    }
    info!(
        categories = catalog.categories().len(),
        products = catalog.products().len(),
        "catalog parsed"
    );
    Ok(catalog)
}

pub fn load_directory(root: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    for dir in list_category_dirs(root)? {
        let title = dir.file_name().map_or_else(String::new, |n| n.to_string_lossy().to_string());
        let category = catalog.push_category(title);
        for file in list_txt_files(&dir) {
            let content = read_file_content(&file)?;
            let (name, description) = split_product_text(&content);
            debug!(path = %file.display(), name = %name, "product file");
            push_checked(&mut catalog, category, name, description).map_err(|e| {
                Error::Catalog(format!("{}: {e}", file.display()))
            })?;
        }
    }
    info!(
        root = %root.display(),
        categories = catalog.categories().len(),
        products = catalog.products().len(),
        "catalog loaded from directory"
    );
    Ok(catalog)
}

fn push_checked(
    catalog: &mut Catalog,
    category: crate::types::CategoryId,
    name: String,
    description: Option<String>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Catalog("product without a name".into()));
    }
    catalog.push_product(category, name, description)?;
    Ok(())
}

/// First non-empty line is the name; the trimmed rest, if any, the description.
fn split_product_text(content: &str) -> (String, Option<String>) {
    let content = content.trim_start();
    let (head, rest) = content.split_once('\n').unwrap_or((content, ""));
    let rest = rest.trim();
    let description = if rest.is_empty() { None } else { Some(rest.to_string()) };
    (head.trim().to_string(), description)
}

fn read_file_content(file_path: &Path) -> Result<String> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
    }
}

fn list_category_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn list_txt_files(dir: &Path) -> Vec<PathBuf> {
    let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    txt_files.sort();
    txt_files
}

#[cfg(test)]
mod tests {
    use super::split_product_text;

    #[test]
    fn name_and_description_split_on_first_line() {
        let (name, desc) = split_product_text("\n  Red Mug \nA sturdy mug.\nDishwasher safe.\n");
        assert_eq!(name, "Red Mug");
        assert_eq!(desc.as_deref(), Some("A sturdy mug.\nDishwasher safe."));
    }

    #[test]
    fn name_only_file_has_no_description() {
        let (name, desc) = split_product_text("Notebook\n\n");
        assert_eq!(name, "Notebook");
        assert!(desc.is_none());
    }
}
