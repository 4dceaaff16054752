use std::future::Future;
use std::rc::Rc;

use payloads::{APIClient, ClientError, RawPage};

/// Something that can fetch one raw page of a listing.
///
/// The returned future does not need to be `Send`; fetchers run on a
/// single thread.
pub trait PageSource {
    fn fetch_page(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<RawPage, ClientError>>;
}

impl PageSource for APIClient {
    async fn fetch_page(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<RawPage, ClientError> {
        self.get_listing_page(endpoint, query).await
    }
}

impl<S: PageSource> PageSource for Rc<S> {
    fn fetch_page(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<RawPage, ClientError>> {
        (**self).fetch_page(endpoint, query)
    }
}
