use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Number of items currently shown
    pub item_count: usize,
    /// Total number of items reported by the listing
    pub total_result: u64,
    /// Last page loaded
    pub current_page: u32,
    /// Whether to offer loading the next page
    pub show_load_more: bool,
    /// Whether a refresh is in progress (to disable the refresh button)
    #[prop_or(false)]
    pub refreshing: bool,
    pub on_load_more: Callback<()>,
    pub on_refresh: Callback<()>,
}

#[function_component]
pub fn PaginationControls(props: &Props) -> Html {
    let Props {
        item_count,
        total_result,
        current_page,
        show_load_more,
        refreshing,
        ..
    } = *props;

    let on_load_more = {
        let on_load_more = props.on_load_more.clone();
        Callback::from(move |_: MouseEvent| on_load_more.emit(()))
    };

    let on_refresh = {
        let on_refresh = props.on_refresh.clone();
        Callback::from(move |_: MouseEvent| on_refresh.emit(()))
    };

    let refresh_class = if refreshing {
        "px-4 py-2 rounded-md text-sm font-medium text-white \
         bg-neutral-400 cursor-not-allowed"
    } else {
        "px-4 py-2 rounded-md text-sm font-medium text-white \
         bg-green-500 hover:bg-green-600 transition-colors duration-200"
    };

    html! {
        <div class="flex items-center justify-between mt-4 pt-4 \
                    border-t border-neutral-200 dark:border-neutral-700">
            <span class="mr-4 text-sm text-yellow-500">
                {format!(
                    "{} of {} items Page: {}",
                    item_count, total_result, current_page
                )}
            </span>

            <div class="flex space-x-4">
                if show_load_more {
                    <button
                        onclick={on_load_more}
                        class="px-4 py-2 rounded-md text-sm font-medium \
                               text-white bg-blue-500 hover:bg-blue-600 \
                               transition-colors duration-200"
                    >
                        {"Load More"}
                    </button>
                }

                <button
                    onclick={on_refresh}
                    disabled={refreshing}
                    class={refresh_class}
                >
                    {if refreshing { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>
        </div>
    }
}
