use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::{ErrorObserver, FetchConfig};
use crate::error::FetchError;
use crate::paginator::{Paginator, Settlement, Ticket};
use crate::source::PageSource;
use crate::state::FetchState;

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Keeps a state-change listener registered until dropped.
pub struct Subscription {
    listeners: Weak<RefCell<Listeners>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

struct Inner<T, S> {
    source: S,
    paginator: RefCell<Paginator<T>>,
    listeners: Rc<RefCell<Listeners>>,
}

/// Drives a [`Paginator`] against a [`PageSource`].
///
/// Cloning is cheap and every clone controls the same listing. Operations
/// are async and never fail: errors are logged, passed to the configured
/// observer and reflected in [`FetchState::status`]. Listeners registered
/// with [`PaginatedFetcher::subscribe`] are called whenever the state
/// changes, both when a request starts and when it settles.
pub struct PaginatedFetcher<T, S> {
    inner: Rc<Inner<T, S>>,
}

impl<T, S> Clone for PaginatedFetcher<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, S: PageSource> PaginatedFetcher<T, S> {
    /// Create a fetcher. Nothing is requested until
    /// [`PaginatedFetcher::initialize`] is awaited.
    pub fn new(source: S, config: FetchConfig<T>) -> Self {
        Self {
            inner: Rc::new(Inner {
                source,
                paginator: RefCell::new(Paginator::new(config)),
                listeners: Rc::default(),
            }),
        }
    }

    /// Load the configured initial page, replacing all items.
    pub async fn initialize(&self) {
        let ticket = self.inner.paginator.borrow_mut().begin_initial();
        self.run(ticket).await;
    }

    /// Append the next page, unless a request is already in flight or the
    /// last page is loaded.
    pub async fn load_more(&self) {
        let ticket = self.inner.paginator.borrow_mut().begin_load_more();
        self.run(ticket).await;
    }

    /// Reload from page 1, replacing all items.
    pub async fn refresh(&self) {
        let ticket = self.inner.paginator.borrow_mut().begin_refresh();
        self.run(ticket).await;
    }

    /// Switch to a new configuration, reloading from scratch if its
    /// endpoint or static query params differ from the current ones.
    pub async fn reconfigure(&self, config: FetchConfig<T>) {
        let ticket = self.inner.paginator.borrow_mut().reconfigure(config);
        self.run(ticket).await;
    }

    /// Tear down: results of requests still in flight are ignored and no
    /// further requests are made.
    pub fn discard(&self) {
        self.inner.paginator.borrow_mut().discard();
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let mut listeners = self.inner.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));
        Subscription {
            listeners: Rc::downgrade(&self.inner.listeners),
            id,
        }
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&FetchState<T>) -> R) -> R {
        f(self.inner.paginator.borrow().state())
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.with_state(FetchState::clone)
    }

    pub fn per_page(&self) -> u32 {
        self.inner.paginator.borrow().config().per_page
    }

    async fn run(&self, ticket: Option<Ticket>) {
        let Some(ticket) = ticket else {
            return;
        };
        self.notify();

        let (endpoint, query) = self.inner.paginator.borrow().request(&ticket);
        tracing::debug!(
            %endpoint,
            page = ticket.page,
            mode = ?ticket.mode,
            "Fetching listing page"
        );
        let outcome = self.inner.source.fetch_page(&endpoint, &query).await;

        let (settlement, observer) = {
            let mut paginator = self.inner.paginator.borrow_mut();
            let settlement = paginator.settle(ticket, outcome);
            (settlement, paginator.config().on_error.clone())
        };
        match settlement {
            Settlement::Stale => return,
            Settlement::Applied => {}
            Settlement::Failed(e) => report(ticket.page, observer.as_ref(), e),
        }
        self.notify();
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

/// Hand a fetch failure to the observer, then log it with its error chain.
fn report(page: u32, observer: Option<&ErrorObserver>, e: FetchError) {
    if let Some(observer) = observer {
        observer(&e);
    }
    let e = anyhow::Error::from(e);
    tracing::error!(page, "Error fetching listing page: {e:#}");
}
