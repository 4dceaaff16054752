use crate::error::FetchErrorKind;

/// What the fetcher is currently doing. Exactly one variant holds at a
/// time; a failed fetch leaves `Error` until the next fetch starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    InitialLoading,
    Refreshing,
    LoadingMore,
    Error(FetchErrorKind),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::InitialLoading | Self::Refreshing | Self::LoadingMore
        )
    }
}

/// The operation that triggered a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Initial,
    Refresh,
    LoadMore,
}

impl FetchMode {
    /// Whether the fetched page replaces the accumulated items.
    pub fn resets(&self) -> bool {
        !matches!(self, Self::LoadMore)
    }

    pub fn status(&self) -> FetchStatus {
        match self {
            Self::Initial => FetchStatus::InitialLoading,
            Self::Refresh => FetchStatus::Refreshing,
            Self::LoadMore => FetchStatus::LoadingMore,
        }
    }
}

/// `ceil(total / per_page)`
pub fn total_pages(total: u64, per_page: u32) -> u64 {
    total.div_ceil(u64::from(per_page.max(1)))
}

/// One successfully fetched and mapped page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_result: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total_result: u64, per_page: u32) -> Self {
        Self {
            items,
            total_result,
            total_pages: total_pages(total_result, per_page),
        }
    }
}

/// Read model of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Items of every page loaded since the last initial load or refresh
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_result: u64,
    pub total_pages: u64,
    pub status: FetchStatus,
}

impl<T> FetchState<T> {
    pub fn new(initial_page: u32) -> Self {
        Self {
            items: Vec::new(),
            current_page: initial_page,
            total_result: 0,
            total_pages: 1,
            status: FetchStatus::Idle,
        }
    }

    pub fn initial_loading(&self) -> bool {
        self.status == FetchStatus::InitialLoading
    }

    pub fn refreshing(&self) -> bool {
        self.status == FetchStatus::Refreshing
    }

    pub fn loading_more(&self) -> bool {
        self.status == FetchStatus::LoadingMore
    }

    pub fn error(&self) -> Option<FetchErrorKind> {
        match self.status {
            FetchStatus::Error(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether pages past the current one exist.
    pub fn has_more(&self) -> bool {
        u64::from(self.current_page) < self.total_pages
    }

    /// Whether a "load more" affordance should be offered: nothing is
    /// being loaded more and at least one full page is present.
    pub fn show_load_more(&self, per_page: u32) -> bool {
        !self.loading_more() && self.items.len() >= per_page as usize
    }

    /// Record a successful fetch of `page`.
    pub(crate) fn apply(&mut self, page: u32, result: PageResult<T>, reset: bool) {
        if reset {
            self.items = result.items;
        } else {
            self.items.extend(result.items);
        }
        self.current_page = page;
        self.total_result = result.total_result;
        self.total_pages = result.total_pages;
        self.status = FetchStatus::Idle;
    }
}
