use paginator::{FetchConfig, FetchState, PaginatedFetcher};
use payloads::APIClient;
use yew::prelude::*;

use crate::get_api_client;

/// Paginated fetch hook return type
pub struct PaginatedFetcherHookReturn<T> {
    /// Snapshot of the listing as of this render
    pub state: FetchState<T>,
    pub per_page: u32,
    /// Append the next page; ignored while a fetch is in flight or on the
    /// last page
    pub load_more: Callback<()>,
    /// Reload from the first page, replacing everything shown
    pub refresh: Callback<()>,
}

impl<T> PaginatedFetcherHookReturn<T> {
    /// Whether to offer a "load more" control: nothing is being loaded
    /// more and at least one full page is shown.
    pub fn show_load_more(&self) -> bool {
        self.state.show_load_more(self.per_page)
    }
}

/// Paginated listing hook.
///
/// Loads the configured initial page on mount and re-renders whenever the
/// listing state changes. When the endpoint or static query params of
/// `config` change between renders, the listing is reset and reloaded. On
/// unmount the fetcher is discarded so responses still in flight are
/// dropped.
///
/// # Example
///
/// ```ignore
/// #[function_component]
/// fn Listing() -> Html {
///     let config = FetchConfig::new(
///         get_api_client().products_endpoint(),
///         DataMapper::from_response(|list: ProductList| list.products),
///     );
///     let listing = use_paginated_fetcher(config);
///     html! { <p>{listing.state.items.len()}</p> }
/// }
/// ```
#[hook]
pub fn use_paginated_fetcher<T>(
    config: FetchConfig<T>,
) -> PaginatedFetcherHookReturn<T>
where
    T: Clone + 'static,
{
    let fetcher = {
        let config = config.clone();
        use_memo((), move |_| PaginatedFetcher::new(get_api_client(), config))
    };
    let update = use_force_update();

    // Subscribe and load on mount, tear down on unmount
    {
        let fetcher = fetcher.clone();
        use_effect_with((), move |_| {
            let subscription = fetcher.subscribe(move || update.force_update());
            spawn(&*fetcher, |f| async move { f.initialize().await });

            move || {
                drop(subscription);
                fetcher.discard();
            }
        });
    }

    // Reload when the listing identity changes. The first run sees the
    // same identity the fetcher was built with and does nothing.
    {
        let fetcher = fetcher.clone();
        use_effect_with(config.key(), move |_| {
            spawn(&*fetcher, move |f| async move { f.reconfigure(config).await });
        });
    }

    let load_more = {
        let fetcher = fetcher.clone();
        Callback::from(move |_| {
            spawn(&*fetcher, |f| async move { f.load_more().await })
        })
    };

    let refresh = {
        let fetcher = fetcher.clone();
        Callback::from(move |_| {
            spawn(&*fetcher, |f| async move { f.refresh().await })
        })
    };

    PaginatedFetcherHookReturn {
        state: fetcher.state(),
        per_page: fetcher.per_page(),
        load_more,
        refresh,
    }
}

/// Run an operation on a clone of the fetcher in the background.
fn spawn<T, F, Fut>(fetcher: &PaginatedFetcher<T, APIClient>, op: F)
where
    T: 'static,
    F: FnOnce(PaginatedFetcher<T, APIClient>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    yew::platform::spawn_local(op(fetcher.clone()));
}
