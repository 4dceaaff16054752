//! Synchronous core of the paginated fetch.
//!
//! Every operation is split in two halves: a `begin_*` call that updates
//! the status and hands out a [`Ticket`], and [`Paginator::settle`], which
//! applies the outcome of the request made for that ticket. Tickets carry
//! the epoch they were issued in. Starting an initial load or a refresh
//! opens a new epoch, so a response to an older ticket is discarded
//! instead of overwriting newer data.

use payloads::{ClientError, RawPage};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::state::{FetchMode, FetchState, FetchStatus, PageResult};

/// Permission to run one request and settle its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    pub page: u32,
    pub mode: FetchMode,
}

/// Result of settling a ticket.
#[derive(Debug)]
pub enum Settlement {
    /// The page was applied to the state.
    Applied,
    /// The fetch failed; state data is unchanged and the error still has
    /// to be reported.
    Failed(FetchError),
    /// A newer request superseded this one; nothing changed.
    Stale,
}

pub struct Paginator<T> {
    config: FetchConfig<T>,
    state: FetchState<T>,
    epoch: u64,
    discarded: bool,
}

impl<T> Paginator<T> {
    pub fn new(config: FetchConfig<T>) -> Self {
        let state = FetchState::new(config.initial_page);
        Self {
            config,
            state,
            epoch: 0,
            discarded: false,
        }
    }

    pub fn config(&self) -> &FetchConfig<T> {
        &self.config
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Start loading the configured initial page, replacing all items.
    pub fn begin_initial(&mut self) -> Option<Ticket> {
        let page = self.config.initial_page;
        self.issue(page, FetchMode::Initial)
    }

    /// Start reloading page 1, replacing all items. Supersedes any request
    /// in flight.
    pub fn begin_refresh(&mut self) -> Option<Ticket> {
        self.issue(1, FetchMode::Refresh)
    }

    /// Start loading the page after the current one. Refused while any
    /// request is in flight or when the last page is already loaded.
    pub fn begin_load_more(&mut self) -> Option<Ticket> {
        if self.state.status.is_loading() || !self.state.has_more() {
            tracing::debug!(
                status = ?self.state.status,
                current_page = self.state.current_page,
                total_pages = self.state.total_pages,
                "Ignoring load more"
            );
            return None;
        }
        let Some(page) = self.state.current_page.checked_add(1) else {
            tracing::debug!(
                current_page = self.state.current_page,
                "Ignoring load more past the last addressable page"
            );
            return None;
        };
        self.issue(page, FetchMode::LoadMore)
    }

    /// Swap in a new configuration. When its [`ConfigKey`] differs from
    /// the current one, the state is reset and an initial load starts.
    /// Otherwise the new mapper, observer and default total apply to the
    /// next response and the loaded items are kept.
    ///
    /// [`ConfigKey`]: crate::config::ConfigKey
    pub fn reconfigure(&mut self, config: FetchConfig<T>) -> Option<Ticket> {
        let reload = config.key() != self.config.key();
        if reload {
            self.state = FetchState::new(config.initial_page);
        }
        self.config = config;
        if !reload {
            return None;
        }
        self.begin_initial()
    }

    /// Stop accepting results. Every outstanding ticket becomes stale and
    /// no new ones are issued.
    pub fn discard(&mut self) {
        self.discarded = true;
        self.epoch += 1;
        self.state.status = FetchStatus::Idle;
    }

    /// Endpoint and query string pairs to request for a ticket.
    pub fn request(&self, ticket: &Ticket) -> (String, Vec<(String, String)>) {
        (self.config.endpoint.clone(), self.config.query_for(ticket.page))
    }

    /// Apply the outcome of the request made for `ticket`.
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: Result<RawPage, ClientError>,
    ) -> Settlement {
        if ticket.epoch != self.epoch {
            tracing::debug!(page = ticket.page, "Discarding stale response");
            return Settlement::Stale;
        }

        let result = outcome
            .map_err(FetchError::from)
            .and_then(|raw| self.page_result(raw));

        match result {
            Ok(page) => {
                self.state.apply(ticket.page, page, ticket.mode.resets());
                Settlement::Applied
            }
            Err(e) => {
                self.state.status = FetchStatus::Error(e.kind());
                Settlement::Failed(e)
            }
        }
    }

    fn issue(&mut self, page: u32, mode: FetchMode) -> Option<Ticket> {
        if self.discarded {
            return None;
        }
        if mode.resets() {
            self.epoch += 1;
        }
        self.state.status = mode.status();
        Some(Ticket {
            epoch: self.epoch,
            page,
            mode,
        })
    }

    fn page_result(&self, raw: RawPage) -> Result<PageResult<T>, FetchError> {
        let items = self.config.data_mapper.map(&raw.body)?;
        let total = raw.total_count.unwrap_or(self.config.default_total_count);
        Ok(PageResult::new(items, total, self.config.per_page))
    }
}
