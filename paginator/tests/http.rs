use std::cell::Cell;
use std::rc::Rc;

use paginator::{
    DataMapper, FetchConfig, FetchErrorKind, FetchStatus, MapperError,
    PaginatedFetcher, PaginationType,
};
use payloads::{APIClient, Product, ProductId, ProductList};
use serde::Deserialize;
use test_helpers::{spawn_app, spawn_app_with_catalog};

fn products(endpoint: String) -> FetchConfig<Product> {
    FetchConfig::new(
        endpoint,
        DataMapper::from_response(|list: ProductList| list.products),
    )
}

fn ids(fetcher: &PaginatedFetcher<Product, APIClient>) -> Vec<u64> {
    fetcher.with_state(|s| s.items.iter().map(|p| p.id.0).collect())
}

#[tokio::test]
async fn loads_all_pages_of_a_short_listing() -> anyhow::Result<()> {
    let app = spawn_app_with_catalog(23).await;
    let config = products(app.client.products_endpoint()).with_per_page(10);
    let fetcher = PaginatedFetcher::new(app.client.clone(), config);

    fetcher.initialize().await;
    let state = fetcher.state();
    assert_eq!(state.total_result, 23);
    assert_eq!(state.total_pages, 3);
    assert_eq!(ids(&fetcher), (1..=10).collect::<Vec<_>>());

    fetcher.load_more().await;
    fetcher.load_more().await;
    let state = fetcher.state();
    assert_eq!(state.current_page, 3);
    assert_eq!(ids(&fetcher), (1..=23).collect::<Vec<_>>());

    fetcher.load_more().await;
    assert_eq!(fetcher.state(), state);
    Ok(())
}

#[tokio::test]
async fn page_limit_style_starts_at_initial_page() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let config = products(app.client.products_endpoint())
        .with_pagination_type(PaginationType::PageLimit)
        .with_initial_page(3);
    let fetcher = PaginatedFetcher::new(app.client.clone(), config);

    fetcher.initialize().await;

    let state = fetcher.state();
    assert_eq!(state.current_page, 3);
    assert_eq!(state.total_pages, 20);
    assert_eq!(ids(&fetcher), (21..=30).collect::<Vec<_>>());
    assert!(state.show_load_more(fetcher.per_page()));
    Ok(())
}

#[tokio::test]
async fn static_params_filter_every_page() -> anyhow::Result<()> {
    let app = spawn_app_with_catalog(24).await;
    let config = products(app.client.products_endpoint())
        .with_query_param("category", "laptops")
        .with_per_page(2);
    let fetcher = PaginatedFetcher::new(app.client.clone(), config);

    fetcher.initialize().await;
    fetcher.load_more().await;

    let state = fetcher.state();
    assert_eq!(state.total_result, 4);
    assert_eq!(state.total_pages, 2);
    assert_eq!(ids(&fetcher), vec![5, 11, 17, 23]);
    assert!(!state.has_more());
    Ok(())
}

#[tokio::test]
async fn refresh_goes_back_to_the_first_page() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let config = products(app.client.products_endpoint()).with_initial_page(2);
    let fetcher = PaginatedFetcher::new(app.client.clone(), config);

    fetcher.initialize().await;
    fetcher.load_more().await;
    assert_eq!(ids(&fetcher), (11..=30).collect::<Vec<_>>());

    fetcher.refresh().await;
    let state = fetcher.state();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.status, FetchStatus::Idle);
    assert_eq!(ids(&fetcher), (1..=10).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn reconfigure_switches_listing() -> anyhow::Result<()> {
    let app = spawn_app_with_catalog(24).await;
    let endpoint = app.client.products_endpoint();
    let fetcher = PaginatedFetcher::new(
        app.client.clone(),
        products(endpoint.clone()).with_per_page(5),
    );

    fetcher.initialize().await;
    assert_eq!(fetcher.state().total_result, 24);

    fetcher
        .reconfigure(
            products(endpoint)
                .with_per_page(5)
                .with_query_param("category", "beauty"),
        )
        .await;

    let state = fetcher.state();
    assert_eq!(state.total_result, 4);
    assert_eq!(state.items[0].id, ProductId(1));
    assert!(state.items.iter().all(|p| p.category == "beauty"));
    Ok(())
}

#[tokio::test]
async fn missing_total_header_defaults_to_one_hundred() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let config = FetchConfig::new(
        app.url("products/categories"),
        DataMapper::from_response(|categories: Vec<String>| categories),
    );
    let fetcher = PaginatedFetcher::new(app.client.clone(), config);

    fetcher.initialize().await;

    let state = fetcher.state();
    assert_eq!(state.items.len(), 6);
    assert_eq!(state.total_result, 100);
    assert_eq!(state.total_pages, 10);
    Ok(())
}

async fn failure_kind(
    client: APIClient,
    endpoint: String,
) -> (Option<FetchErrorKind>, FetchStatus, usize) {
    let seen = Rc::new(Cell::new(None));
    let config = {
        let seen = seen.clone();
        products(endpoint).with_error_observer(move |e| seen.set(Some(e.kind())))
    };
    let fetcher = PaginatedFetcher::new(client, config);
    fetcher.initialize().await;
    let state = fetcher.state();
    (seen.get(), state.status, state.items.len())
}

#[tokio::test]
async fn non_json_body_is_reported_as_decode_error() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let (seen, status, items) =
        failure_kind(app.client.clone(), app.url("health_check")).await;

    assert_eq!(seen, Some(FetchErrorKind::Decode));
    assert_eq!(status, FetchStatus::Error(FetchErrorKind::Decode));
    assert_eq!(items, 0);
    Ok(())
}

#[tokio::test]
async fn missing_route_is_reported_as_status_error() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let (seen, status, _) =
        failure_kind(app.client.clone(), app.url("no_such_listing")).await;

    assert_eq!(seen, Some(FetchErrorKind::Status));
    assert_eq!(status, FetchStatus::Error(FetchErrorKind::Status));
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_reported_as_network_error() -> anyhow::Result<()> {
    let app = spawn_app().await;

    // nothing listens on port 1
    let (seen, status, _) = failure_kind(
        app.client.clone(),
        "http://127.0.0.1:1/api/products".to_string(),
    )
    .await;

    assert_eq!(seen, Some(FetchErrorKind::Network));
    assert_eq!(status, FetchStatus::Error(FetchErrorKind::Network));
    Ok(())
}

#[tokio::test]
async fn mapper_rejecting_payload_keeps_previous_items() -> anyhow::Result<()> {
    let app = spawn_app().await;
    // only the first page is readable
    let mapper = DataMapper::new(|body| {
        let list = ProductList::deserialize(body)?;
        if list.skip > 0 {
            return Err(MapperError::Rejected("unexpected page".into()));
        }
        Ok(list.products)
    });
    let config = FetchConfig::new(app.client.products_endpoint(), mapper);
    let fetcher = PaginatedFetcher::new(app.client.clone(), config);

    fetcher.initialize().await;
    let before = fetcher.state();
    fetcher.load_more().await;

    let after = fetcher.state();
    assert_eq!(after.items, before.items);
    assert_eq!(after.current_page, 1);
    assert_eq!(after.error(), Some(FetchErrorKind::Mapper));
    assert!(!after.initial_loading() && !after.refreshing());
    assert!(!after.loading_more());
    Ok(())
}
