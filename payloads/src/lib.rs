pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use requests::{PageRequest, PaginationType, QueryParams, QueryValue};
pub use responses::{Product, ProductList, RawPage};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Response header carrying the total number of items in a listing.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);
