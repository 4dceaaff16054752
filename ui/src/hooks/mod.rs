pub mod use_paginated_fetcher;

pub use use_paginated_fetcher::{
    PaginatedFetcherHookReturn, use_paginated_fetcher,
};
