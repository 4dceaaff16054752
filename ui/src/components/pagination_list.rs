use paginator::{DataMapper, FetchConfig, PaginationType};
use payloads::Product;
use rust_decimal::Decimal;
use serde::Deserialize;
use yew::prelude::*;

use crate::components::PaginationControls;
use crate::get_api_client;
use crate::hooks::use_paginated_fetcher;

/// Listing payload shape; a payload without products is an empty page.
#[derive(Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Listing endpoint; defaults to the backend's products route
    #[prop_or_default]
    pub endpoint: Option<AttrValue>,
    /// Only list products in this category
    #[prop_or_default]
    pub category: Option<AttrValue>,
    #[prop_or_default]
    pub pagination_type: PaginationType,
    #[prop_or(paginator::config::DEFAULT_PER_PAGE)]
    pub per_page: u32,
    #[prop_or(1)]
    pub initial_page: u32,
}

#[function_component]
pub fn PaginationList(props: &Props) -> Html {
    let endpoint = props
        .endpoint
        .as_ref()
        .map(|e| e.to_string())
        .unwrap_or_else(|| get_api_client().products_endpoint());

    let mut config = FetchConfig::new(
        endpoint,
        DataMapper::from_response(|r: ProductsResponse| r.products),
    )
    .with_pagination_type(props.pagination_type)
    .with_per_page(props.per_page)
    .with_initial_page(props.initial_page);
    if let Some(category) = &props.category {
        config = config.with_query_param("category", category.as_str());
    }

    let listing = use_paginated_fetcher(config);
    let state = &listing.state;

    if state.initial_loading() {
        return html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Loading..."}
                </p>
            </div>
        };
    }

    html! {
        <div class="rounded-lg border border-neutral-300 p-4">
            if let Some(kind) = state.error() {
                <div class="mb-4 p-4 rounded-md bg-red-50 \
                            dark:bg-red-900/20 border border-red-200 \
                            dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">
                        {format!("Could not load products ({kind} error)")}
                    </p>
                </div>
            }

            <div class="mb-4">
                {
                    state.items.iter().map(|item| html! {
                        <ProductCard
                            key={item.id.to_string()}
                            product={item.clone()}
                        />
                    }).collect::<Html>()
                }
            </div>

            <PaginationControls
                item_count={state.items.len()}
                total_result={state.total_result}
                current_page={state.current_page}
                show_load_more={listing.show_load_more()}
                refreshing={state.refreshing()}
                on_load_more={listing.load_more.clone()}
                on_refresh={listing.refresh.clone()}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProductCardProps {
    pub product: Product,
}

#[function_component]
fn ProductCard(props: &ProductCardProps) -> Html {
    let product = &props.product;

    let category = if product.category.is_empty() {
        "Unknown".to_string()
    } else {
        product.category.to_uppercase()
    };

    let price = match product.price {
        Some(price) if price != Decimal::ZERO => format!("{price}$"),
        _ => "N/A".to_string(),
    };

    html! {
        <div class="mb-4 rounded-lg border border-neutral-300 p-4">
            <h3 class="uppercase">{category}</h3>
            <p>{product.title.clone()}</p>
            <p>{price}</p>
        </div>
    }
}
