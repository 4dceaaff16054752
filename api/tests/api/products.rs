use payloads::{ProductId, TOTAL_COUNT_HEADER, requests::ListProducts};
use reqwest::StatusCode;

use test_helpers::{assert_status_code, spawn_app, spawn_app_with_catalog};

#[tokio::test]
async fn offset_limit_window() -> anyhow::Result<()> {
    let app = spawn_app_with_catalog(23).await;

    let query = ListProducts {
        limit: Some(10),
        skip: Some(20),
        ..Default::default()
    };
    let list = app.client.get_products(&query).await?;

    assert_eq!(list.total, 23);
    assert_eq!(list.skip, 20);
    assert_eq!(list.limit, 10);
    let ids: Vec<ProductId> = list.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProductId(21), ProductId(22), ProductId(23)]);
    Ok(())
}

#[tokio::test]
async fn page_limit_window_matches_offset_limit() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let paged = ListProducts {
        page: Some(3),
        page_limit: Some(7),
        ..Default::default()
    };
    let offset = ListProducts {
        limit: Some(7),
        skip: Some(14),
        ..Default::default()
    };

    let paged = app.client.get_products(&paged).await?;
    let offset = app.client.get_products(&offset).await?;
    assert_eq!(paged, offset);
    assert_eq!(paged.products.len(), 7);
    Ok(())
}

#[tokio::test]
async fn total_count_header_matches_filtered_total() -> anyhow::Result<()> {
    let app = spawn_app_with_catalog(24).await;

    let response = app
        .client
        .inner_client
        .get(app.url("products"))
        .query(&[("category", "laptops"), ("limit", "2")])
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let total = response
        .headers()
        .get(TOTAL_COUNT_HEADER)
        .expect("total-count header should be present")
        .to_str()?
        .to_string();
    assert_eq!(total, "4");

    let list: payloads::ProductList = response.json().await?;
    assert_eq!(list.total, 4);
    assert_eq!(list.products.len(), 2);
    assert!(list.products.iter().all(|p| p.category == "laptops"));
    Ok(())
}

#[tokio::test]
async fn listing_page_reads_total_and_body() -> anyhow::Result<()> {
    let app = spawn_app_with_catalog(23).await;

    let query = vec![
        ("limit".to_string(), "10".to_string()),
        ("skip".to_string(), "0".to_string()),
    ];
    let page = app
        .client
        .get_listing_page(&app.client.products_endpoint(), &query)
        .await?;

    assert_eq!(page.total_count, Some(23));
    assert_eq!(page.body["products"].as_array().map(Vec::len), Some(10));
    Ok(())
}

#[tokio::test]
async fn page_zero_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let query = ListProducts {
        page: Some(0),
        ..Default::default()
    };
    let result = app.client.get_products(&query).await;

    assert_status_code(result, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn huge_page_number_is_an_empty_page() -> anyhow::Result<()> {
    let app = spawn_app_with_catalog(23).await;

    let query = ListProducts {
        page: Some(9_223_372_036_854_775_807),
        page_limit: Some(30),
        ..Default::default()
    };
    let list = app.client.get_products(&query).await?;

    assert!(list.products.is_empty());
    assert_eq!(list.total, 23);
    assert_eq!(list.limit, 30);
    Ok(())
}

#[tokio::test]
async fn long_search_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let query = ListProducts {
        q: Some((0..300).map(|_| "X").collect::<String>()),
        ..Default::default()
    };
    let result = app.client.get_products(&query).await;

    assert_status_code(result, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn categories_listed() -> anyhow::Result<()> {
    let app = spawn_app_with_catalog(3).await;

    let categories = app.client.get_categories().await?;

    assert_eq!(categories, vec!["beauty", "fragrances", "furniture"]);
    Ok(())
}

#[tokio::test]
async fn total_count_header_is_exposed_to_browsers() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let response = app
        .client
        .inner_client
        .get(app.url("products"))
        .header("Origin", "http://localhost:8080")
        .send()
        .await?;

    let exposed = response
        .headers()
        .get("access-control-expose-headers")
        .expect("CORS expose header should be present")
        .to_str()?
        .to_lowercase();
    assert!(exposed.contains("x-total-count"));
    Ok(())
}
