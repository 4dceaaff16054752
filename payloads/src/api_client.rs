use crate::{
    ProductList, RawPage, TOTAL_COUNT_HEADER, requests, responses,
};
use reqwest::StatusCode;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for listing endpoints.
///
/// `get_listing_page` works against any listing endpoint given as an
/// absolute URL. The typed methods talk to the bundled listing server
/// rooted at `address`.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn get_with_query(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> ReqwestResult {
        self.inner_client.get(url).query(query).send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.inner_client.get(self.format_url(path)).send().await
    }
}

/// Methods on the listing API
impl APIClient {
    /// Absolute URL of the products listing, usable as a fetch endpoint.
    pub fn products_endpoint(&self) -> String {
        self.format_url("products")
    }

    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    /// Fetch one page of products.
    pub async fn get_products(
        &self,
        details: &requests::ListProducts,
    ) -> Result<ProductList, ClientError> {
        let response = self
            .inner_client
            .get(self.products_endpoint())
            .query(details)
            .send()
            .await?;
        ok_body(response).await
    }

    /// List the distinct product categories.
    pub async fn get_categories(&self) -> Result<Vec<String>, ClientError> {
        let response = self.empty_get("products/categories").await?;
        ok_body(response).await
    }

    /// Fetch one page from an arbitrary listing endpoint without decoding
    /// it into a concrete type.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_listing_page(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<RawPage, ClientError> {
        let response = self.get_with_query(endpoint, query).await?;
        if !response.status().is_success() {
            return Err(ClientError::APIError(
                response.status(),
                response.text().await?,
            ));
        }
        let total_count = responses::parse_total_count(
            response
                .headers()
                .get(TOTAL_COUNT_HEADER)
                .and_then(|v| v.to_str().ok()),
        );
        let text = response.text().await?;
        let body = serde_json::from_str(&text).map_err(ClientError::Decode)?;
        Ok(RawPage { body, total_count })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Response body is not valid JSON")]
    Decode(#[source] serde_json::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
