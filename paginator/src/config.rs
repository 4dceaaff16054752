use std::rc::Rc;

use payloads::{PageRequest, PaginationType, QueryParams, QueryValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FetchError, MapperError};

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_INITIAL_PAGE: u32 = 1;
/// Total count assumed when a response carries no usable total-count
/// header.
pub const DEFAULT_TOTAL_COUNT: u64 = 100;

/// Called with every fetch failure, in addition to the error log.
pub type ErrorObserver = Rc<dyn Fn(&FetchError)>;

/// Turns a raw listing payload into a flat sequence of items.
pub struct DataMapper<T>(Rc<dyn Fn(&Value) -> Result<Vec<T>, MapperError>>);

impl<T> Clone for DataMapper<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: 'static> DataMapper<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Vec<T>, MapperError> + 'static,
    {
        Self(Rc::new(f))
    }

    /// Deserialize the payload into `R`, then pull the items out of it.
    ///
    /// ```ignore
    /// let mapper = DataMapper::from_response(|list: ProductList| list.products);
    /// ```
    pub fn from_response<R, F>(extract: F) -> Self
    where
        R: DeserializeOwned,
        F: Fn(R) -> Vec<T> + 'static,
    {
        Self::new(move |body| {
            let response = R::deserialize(body)?;
            Ok(extract(response))
        })
    }
}

impl<T> DataMapper<T> {
    pub fn map(&self, body: &Value) -> Result<Vec<T>, MapperError> {
        (self.0)(body)
    }
}

/// The parts of a configuration whose change forces a full reload.
///
/// Everything that shapes the requested pages is part of the key; the
/// mapper, observer and default total are not.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigKey {
    pub endpoint: String,
    pub query_params: QueryParams,
    pub pagination_type: PaginationType,
    pub per_page: u32,
    pub initial_page: u32,
}

/// Configuration of a paginated fetch.
///
/// Built with [`FetchConfig::new`] and the `with_*` methods; page size and
/// initial page are clamped to at least one.
pub struct FetchConfig<T> {
    pub endpoint: String,
    pub query_params: QueryParams,
    pub pagination_type: PaginationType,
    pub per_page: u32,
    pub initial_page: u32,
    pub default_total_count: u64,
    pub data_mapper: DataMapper<T>,
    pub on_error: Option<ErrorObserver>,
}

impl<T> Clone for FetchConfig<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            query_params: self.query_params.clone(),
            pagination_type: self.pagination_type,
            per_page: self.per_page,
            initial_page: self.initial_page,
            default_total_count: self.default_total_count,
            data_mapper: self.data_mapper.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> FetchConfig<T> {
    pub fn new(endpoint: impl Into<String>, data_mapper: DataMapper<T>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query_params: QueryParams::new(),
            pagination_type: PaginationType::default(),
            per_page: DEFAULT_PER_PAGE,
            initial_page: DEFAULT_INITIAL_PAGE,
            default_total_count: DEFAULT_TOTAL_COUNT,
            data_mapper,
            on_error: None,
        }
    }

    pub fn with_query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn with_query_params(mut self, params: QueryParams) -> Self {
        self.query_params = params;
        self
    }

    pub fn with_pagination_type(mut self, pagination_type: PaginationType) -> Self {
        self.pagination_type = pagination_type;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn with_initial_page(mut self, initial_page: u32) -> Self {
        self.initial_page = initial_page.max(1);
        self
    }

    pub fn with_default_total_count(mut self, total: u64) -> Self {
        self.default_total_count = total;
        self
    }

    pub fn with_error_observer(
        mut self,
        observer: impl Fn(&FetchError) + 'static,
    ) -> Self {
        self.on_error = Some(Rc::new(observer));
        self
    }

    pub fn key(&self) -> ConfigKey {
        ConfigKey {
            endpoint: self.endpoint.clone(),
            query_params: self.query_params.clone(),
            pagination_type: self.pagination_type,
            per_page: self.per_page,
            initial_page: self.initial_page,
        }
    }

    /// Query string pairs for the given page.
    pub fn query_for(&self, page: u32) -> Vec<(String, String)> {
        PageRequest::new(page, self.per_page)
            .query(&self.query_params, self.pagination_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Listing {
        #[serde(default)]
        rows: Vec<u32>,
    }

    #[test]
    fn mapper_from_response() {
        let mapper = DataMapper::from_response(|l: Listing| l.rows);
        assert_eq!(mapper.map(&json!({"rows": [1, 2, 3]})).unwrap(), vec![1, 2, 3]);
        assert!(mapper.map(&json!({})).unwrap().is_empty());
        assert!(matches!(
            mapper.map(&json!({"rows": "nope"})),
            Err(MapperError::Shape(_))
        ));
    }

    #[test]
    fn builder_clamps_pages() {
        let config = FetchConfig::new("http://x", DataMapper::<u32>::new(|_| Ok(vec![])))
            .with_per_page(0)
            .with_initial_page(0);
        assert_eq!(config.per_page, 1);
        assert_eq!(config.initial_page, 1);
    }

    #[test]
    fn query_merges_static_params() {
        let config = FetchConfig::new("http://x", DataMapper::<u32>::new(|_| Ok(vec![])))
            .with_query_param("category", "laptops")
            .with_pagination_type(PaginationType::PageLimit)
            .with_per_page(5);
        let query = config.query_for(3);
        assert_eq!(
            query,
            vec![
                ("category".to_string(), "laptops".to_string()),
                ("_page".to_string(), "3".to_string()),
                ("_limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn key_tracks_request_shape() {
        let a = FetchConfig::new("http://x", DataMapper::<u32>::new(|_| Ok(vec![])))
            .with_query_param("category", "laptops");
        assert_eq!(
            a.key(),
            a.clone().with_default_total_count(7).with_error_observer(|_| {}).key()
        );
        assert_ne!(a.key(), a.clone().with_query_param("category", "phones").key());
        assert_ne!(a.key(), a.clone().with_per_page(50).key());
        assert_ne!(a.key(), a.clone().with_initial_page(3).key());
        assert_ne!(
            a.key(),
            a.clone().with_pagination_type(PaginationType::PageLimit).key()
        );
    }
}
