//! Paginated fetching of listing endpoints.
//!
//! A [`PaginatedFetcher`] loads pages of a remote listing one at a time,
//! accumulating mapped items, and exposes `load_more`/`refresh` controls
//! plus a [`FetchState`] read model for a presentation layer.
//!
//! ```ignore
//! let config = FetchConfig::new(
//!     client.products_endpoint(),
//!     DataMapper::from_response(|list: ProductList| list.products),
//! )
//! .with_per_page(10);
//!
//! let fetcher = PaginatedFetcher::new(client, config);
//! fetcher.initialize().await;
//! fetcher.load_more().await;
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod paginator;
pub mod source;
pub mod state;

pub use config::{ConfigKey, DataMapper, ErrorObserver, FetchConfig};
pub use error::{FetchError, FetchErrorKind, MapperError};
pub use fetcher::{PaginatedFetcher, Subscription};
pub use paginator::{Paginator, Settlement, Ticket};
pub use payloads::{PaginationType, QueryParams, QueryValue};
pub use source::PageSource;
pub use state::{FetchMode, FetchState, FetchStatus, PageResult, total_pages};
