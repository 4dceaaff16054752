//! In-memory product catalog backing the listing routes.
//!
//! The catalog is generated deterministically from its size, so tests and
//! the development server always see the same products in the same order.

use payloads::{Product, ProductId, ProductList, requests::ListProducts};
use rust_decimal::Decimal;

pub const CATEGORIES: [&str; 6] = [
    "beauty",
    "fragrances",
    "furniture",
    "groceries",
    "laptops",
    "smartphones",
];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Pages start at 1")]
    InvalidPage,
    #[error("Search text is too long")]
    SearchTooLong,
}

const SEARCH_MAX_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Products `1..=size`, cycling through [`CATEGORIES`].
    pub fn generate(size: u64) -> Self {
        let products = (1..=size)
            .map(|id| {
                let category = CATEGORIES[(id as usize - 1) % CATEGORIES.len()];
                Product {
                    id: ProductId(id),
                    title: format!("{category} item {id}"),
                    category: category.to_string(),
                    // 0.99 ..= 99.98, spread out over the catalog
                    price: Some(Decimal::new(((id * 137) % 9900 + 99) as i64, 2)),
                }
            })
            .collect();
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Filter the catalog and cut out the requested window.
pub fn list_products(
    query: &ListProducts,
    catalog: &Catalog,
) -> Result<ProductList, StoreError> {
    if query.page == Some(0) {
        return Err(StoreError::InvalidPage);
    }
    if query.q.as_ref().is_some_and(|q| q.len() > SEARCH_MAX_LEN) {
        return Err(StoreError::SearchTooLong);
    }

    let search = query.q.as_ref().map(|q| q.to_lowercase());
    let matching: Vec<&Product> = catalog
        .products
        .iter()
        .filter(|p| query.category.as_ref().is_none_or(|c| &p.category == c))
        .filter(|p| {
            search
                .as_ref()
                .is_none_or(|q| p.title.to_lowercase().contains(q))
        })
        .collect();

    let (skip, limit) = query.window();
    let products = matching
        .iter()
        .skip(usize::try_from(skip).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .map(|p| (*p).clone())
        .collect();

    Ok(ProductList {
        products,
        total: matching.len() as u64,
        skip,
        limit,
    })
}

/// Distinct categories present in the catalog, in catalog order.
pub fn list_categories(catalog: &Catalog) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in &catalog.products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}
