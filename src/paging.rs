//! Paged listings.
//!
//! List endpoints return `{"value": [...], "@odata.nextLink": "..."}`. The
//! next-link is an absolute URL carrying an opaque `$skiptoken`; an absent
//! link means the listing is exhausted.

use std::collections::HashSet;

use futures::stream::{self, Stream, TryStreamExt};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::client::Client;
use crate::errors::{MediaError, Result};

/// One page of a listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    /// Absolute URL of the next page. `None` means no more results.
    #[serde(
        rename = "@odata.nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    /// `true` if `next_link` is `Some`.
    pub fn has_more(&self) -> bool {
        self.next_link.is_some()
    }

    /// The `$skiptoken` embedded in the next-link, for callers that resume a
    /// listing later through [`ListOptions::skip_token`].
    pub fn continuation_token(&self) -> Option<String> {
        let link = Url::parse(self.next_link.as_deref()?).ok()?;
        link.query_pairs()
            .find(|(k, _)| k.eq_ignore_ascii_case("$skiptoken"))
            .map(|(_, v)| v.into_owned())
    }
}

/// OData query options accepted by list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// `$filter`, e.g. `properties.created gt 2024-01-01T00:00:00Z`.
    pub filter: Option<String>,
    /// `$top`; must be at least 1.
    pub top: Option<u32>,
    /// `$orderby`, e.g. `properties.created desc`.
    pub orderby: Option<String>,
    /// `$skiptoken` from [`Page::continuation_token`].
    pub skip_token: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    pub fn skip_token(mut self, token: impl Into<String>) -> Self {
        self.skip_token = Some(token.into());
        self
    }

    /// Append the set options to `url` as OData query parameters.
    pub(crate) fn apply(&self, url: &mut Url) -> Result<()> {
        if self.top == Some(0) {
            return Err(MediaError::validation("$top", "must be at least 1"));
        }

        let mut query = url.query_pairs_mut();
        if let Some(ref f) = self.filter {
            query.append_pair("$filter", f);
        }
        if let Some(t) = self.top {
            query.append_pair("$top", &t.to_string());
        }
        if let Some(ref o) = self.orderby {
            query.append_pair("$orderby", o);
        }
        if let Some(ref s) = self.skip_token {
            query.append_pair("$skiptoken", s);
        }
        Ok(())
    }
}

enum Cursor<T> {
    First(Page<T>),
    Next(String),
    Done,
}

impl Client {
    /// Fetch the page behind `page.next_link`, or `None` when `page` was the last one.
    pub async fn next_page<T: DeserializeOwned>(&self, page: &Page<T>) -> Result<Option<Page<T>>> {
        match page.next_link {
            Some(ref link) => Ok(Some(self.fetch_page(link).await?)),
            None => Ok(None),
        }
    }

    /// Follow next-links from `first` until the listing is exhausted and
    /// return every item.
    ///
    /// # Errors
    ///
    /// [`MediaError::InvalidResponse`] if the service hands out a next-link
    /// that was already visited.
    pub async fn collect_all<T: DeserializeOwned>(&self, first: Page<T>) -> Result<Vec<T>> {
        let mut items = first.value;
        let mut next = first.next_link;
        let mut seen = HashSet::new();

        while let Some(link) = next {
            if !seen.insert(link.clone()) {
                return Err(MediaError::InvalidResponse(format!(
                    "next-link repeats: {link}"
                )));
            }
            let page: Page<T> = self.fetch_page(&link).await?;
            items.extend(page.value);
            next = page.next_link;
        }

        Ok(items)
    }

    /// Stream pages lazily, starting with `first`. The next page is only
    /// requested once the previous one has been consumed.
    ///
    /// Following a next-link that was already visited yields
    /// [`MediaError::InvalidResponse`] and ends the stream.
    pub fn pages<T>(&self, first: Page<T>) -> impl Stream<Item = Result<Page<T>>> + '_
    where
        T: DeserializeOwned + 'static,
    {
        let start = (Cursor::First(first), HashSet::new());
        stream::try_unfold(start, move |(cursor, mut seen)| async move {
            let page = match cursor {
                Cursor::First(page) => page,
                Cursor::Next(link) => {
                    if !seen.insert(link.clone()) {
                        return Err(MediaError::InvalidResponse(format!(
                            "next-link repeats: {link}"
                        )));
                    }
                    self.fetch_page(&link).await?
                }
                Cursor::Done => return Ok(None),
            };
            let next = match page.next_link {
                Some(ref link) => Cursor::Next(link.clone()),
                None => Cursor::Done,
            };
            Ok::<_, MediaError>(Some((page, (next, seen))))
        })
    }

    /// Stream individual items across all pages, starting with `first`.
    pub fn items<T>(&self, first: Page<T>) -> impl Stream<Item = Result<T>> + '_
    where
        T: DeserializeOwned + 'static,
    {
        self.pages(first)
            .map_ok(|page| stream::iter(page.value.into_iter().map(Ok)))
            .try_flatten()
    }

    pub(crate) async fn fetch_page<T: DeserializeOwned>(&self, link: &str) -> Result<Page<T>> {
        let url = self.service_url(link)?;
        debug!(url = %url, "following next-link");
        self.execute(Method::GET, url, None).await?.decode()
    }

    /// GET the first page of a collection with optional OData options.
    pub(crate) async fn list_page<T: DeserializeOwned>(
        &self,
        mut url: Url,
        options: Option<&ListOptions>,
    ) -> Result<Page<T>> {
        if let Some(opts) = options {
            opts.apply(&mut url)?;
        }
        self.get(url).await
    }
}
