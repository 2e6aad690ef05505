//! `nextLink` pagination.
//!
//! List operations return a [`Page`] holding one page of items plus the
//! opaque link to the next one. [`list_complete`] and [`Page::into_stream`]
//! walk the remaining pages.

use super::client::ArmClient;
use super::request::{RawResponse, RequestOptions};
use crate::error::{Error, Result};
use futures::{Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Deserialize)]
struct PageBody<T> {
    value: Option<Vec<T>>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

/// One page of a list operation
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub http_response: RawResponse,
    pub model: Option<Vec<T>>,
    pub next_link: Option<String>,
    request: RequestOptions,
}

/// Every item of a list operation, plus the last raw response
#[derive(Debug, Clone)]
pub struct CompleteResult<T> {
    pub http_response: RawResponse,
    pub items: Vec<T>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a page from the response to `request`
    pub fn from_response(request: RequestOptions, http_response: RawResponse) -> Result<Self> {
        let body = http_response.json::<PageBody<T>>(request.operation)?;
        let (model, next_link) = match body {
            Some(body) => (body.value, body.next_link.filter(|link| !link.is_empty())),
            None => (None, None),
        };

        Ok(Self {
            http_response,
            model,
            next_link,
            request,
        })
    }

    pub fn has_more(&self) -> bool {
        self.next_link.is_some()
    }

    pub fn items(&self) -> &[T] {
        self.model.as_deref().unwrap_or_default()
    }

    /// Fetch the next page with the original method
    pub async fn load_more(&self, client: &ArmClient) -> Result<Page<T>> {
        let Some(link) = &self.next_link else {
            return Err(Error::NoMorePages);
        };

        let mut request = self.request.clone();
        request.path = link.clone();
        request.query.clear();

        tracing::debug!("{}: loading next page", request.operation);
        let response = client.execute(&request).await?;
        Page::from_response(request, response)
    }

    /// The items of this and every following page, as a stream
    pub fn into_stream(self, client: ArmClient) -> impl Stream<Item = Result<T>> {
        futures::stream::try_unfold(Some(self), move |state| {
            let client = client.clone();
            async move {
                let Some(page) = state else {
                    return Ok::<_, Error>(None);
                };
                let next = if page.has_more() {
                    Some(page.load_more(&client).await?)
                } else {
                    None
                };
                Ok(Some((page.model.unwrap_or_default(), next)))
            }
        })
        .map_ok(|items| futures::stream::iter(items.into_iter().map(Ok)))
        .try_flatten()
    }
}

/// Walk every page starting at `first`, keeping the items `predicate`
/// accepts in the order the service returned them
pub async fn list_complete<T, F>(first: Page<T>, client: &ArmClient, predicate: F) -> Result<CompleteResult<T>>
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool,
{
    let mut items = Vec::new();
    let mut page = first;

    loop {
        let next = if page.has_more() {
            Some(page.load_more(client).await?)
        } else {
            None
        };

        let Page {
            http_response,
            model,
            ..
        } = page;
        items.extend(model.unwrap_or_default().into_iter().filter(|item| predicate(item)));

        match next {
            Some(next) => page = next,
            None => {
                return Ok(CompleteResult {
                    http_response,
                    items,
                })
            }
        }
    }
}
