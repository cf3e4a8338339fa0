//! Paginated listing source
//!
//! [`ListingApi`] is the seam to the storage backend: one call returns one page.
//! [`Listing`] turns the page/continuation-token protocol into a lazy, forward-only
//! iterator over every entry under a prefix. A page is only requested once the
//! previous page has been fully consumed.

mod filter;

use std::collections::VecDeque;

use tracing::debug;

use crate::entry::{Entry, ListingPage, PageRequest};
use crate::error::ListingError;

pub use filter::EntryFilter;

/// A delimiter-grouped, paginated listing operation.
pub trait ListingApi {
    /// Fetch a single page.
    fn list_page(&self, request: &PageRequest<'_>) -> Result<ListingPage, ListingError>;
}

#[derive(Debug)]
enum Cursor {
    Start,
    Continue(String),
    Done,
}

/// Lazy sequence of every entry under one prefix, across all pages.
///
/// Yields `Err` at most once, at the point the failing page would have started,
/// and then ends.
pub struct Listing<'a, A: ListingApi + ?Sized> {
    api: &'a A,
    container: String,
    prefix: String,
    delimiter: char,
    cursor: Cursor,
    buffered: VecDeque<Entry>,
    pages_fetched: usize,
}

/// List every entry under `prefix` in `container`.
pub fn list<'a, A: ListingApi + ?Sized>(
    api: &'a A,
    container: &str,
    prefix: &str,
    delimiter: char,
) -> Listing<'a, A> {
    Listing {
        api,
        container: container.to_string(),
        prefix: prefix.to_string(),
        delimiter,
        cursor: Cursor::Start,
        buffered: VecDeque::new(),
        pages_fetched: 0,
    }
}

impl<A: ListingApi + ?Sized> Listing<'_, A> {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of pages requested so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch_page(&mut self) -> Result<(), ListingError> {
        let result = {
            let continuation_token = match &self.cursor {
                Cursor::Continue(token) => Some(token.as_str()),
                _ => None,
            };
            self.api.list_page(&PageRequest {
                container: &self.container,
                prefix: &self.prefix,
                delimiter: self.delimiter,
                continuation_token,
                page: self.pages_fetched + 1,
            })
        };

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.cursor = Cursor::Done;
                return Err(e);
            }
        };

        self.pages_fetched += 1;
        debug!(
            container = %self.container,
            prefix = %self.prefix,
            page = self.pages_fetched,
            entries = page.entries.len(),
            has_more = page.next_continuation_token.is_some(),
            "Fetched listing page"
        );

        self.cursor = match page.next_continuation_token {
            Some(token) => Cursor::Continue(token),
            None => Cursor::Done,
        };
        self.buffered.extend(page.entries);
        Ok(())
    }
}

impl<A: ListingApi + ?Sized> Iterator for Listing<'_, A> {
    type Item = Result<Entry, ListingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.buffered.pop_front() {
                return Some(Ok(entry));
            }
            if matches!(self.cursor, Cursor::Done) {
                return None;
            }
            // Empty pages with a continuation token are skipped over
            if let Err(e) = self.fetch_page() {
                return Some(Err(e));
            }
        }
    }
}

impl<A: ListingApi + ?Sized> std::iter::FusedIterator for Listing<'_, A> {}
