//! In-memory listing doubles for tests and benchmarks.
//!
//! This module is only compiled for tests and the `test-utils` feature.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::entry::{Entry, ListingPage, PageRequest};
use crate::error::{ListingError, MetricError};
use crate::listing::ListingApi;
use crate::metrics::{Metric, MetricsProvider};

/// An owned copy of a [`PageRequest`], kept for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub container: String,
    pub prefix: String,
    pub delimiter: char,
    pub continuation_token: Option<String>,
    pub page: usize,
}

impl From<&PageRequest<'_>> for RecordedRequest {
    fn from(request: &PageRequest<'_>) -> Self {
        Self {
            container: request.container.to_string(),
            prefix: request.prefix.to_string(),
            delimiter: request.delimiter,
            continuation_token: request.continuation_token.map(str::to_string),
            page: request.page,
        }
    }
}

fn request_failed(request: &PageRequest<'_>, message: &str) -> ListingError {
    ListingError::Request {
        container: request.container.to_string(),
        prefix: request.prefix.to_string(),
        page: request.page,
        message: message.to_string(),
    }
}

/// A flat key namespace that groups keys by delimiter the way S3 does.
///
/// Keys are listed in byte order, groups and objects interleaved. Each level is
/// split into pages of `page_size` entries.
pub struct FakeBucket {
    objects: BTreeMap<String, u64>,
    page_size: usize,
    failures: Vec<(String, usize)>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeBucket {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            page_size: 1000,
            failures: Vec::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Add an object.
    pub fn with_object(mut self, key: &str, size: u64) -> Self {
        self.objects.insert(key.to_string(), size);
        self
    }

    /// Set the maximum number of entries per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fail the request for the given 1-based page of `prefix`.
    pub fn failing_on_page(mut self, prefix: &str, page: usize) -> Self {
        self.failures.push((prefix.to_string(), page));
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Prefixes listed so far, in order, one per page request.
    pub fn listed_prefixes(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.prefix.clone())
            .collect()
    }

    /// Every entry directly under `prefix`, in key order.
    fn level(&self, prefix: &str, delimiter: char) -> Vec<Entry> {
        let mut entries: Vec<Entry> = Vec::new();
        for (key, size) in self.objects.range(prefix.to_string()..) {
            let Some(rest) = key.strip_prefix(prefix) else {
                break;
            };
            match rest.find(delimiter) {
                Some(idx) => {
                    let group = &key[..prefix.len() + idx + delimiter.len_utf8()];
                    // Keys sharing a group prefix are contiguous in byte order
                    if entries.last().map(Entry::key) != Some(group) {
                        entries.push(Entry::group(group));
                    }
                }
                None => entries.push(Entry::leaf(key.as_str(), *size)),
            }
        }
        entries
    }
}

impl Default for FakeBucket {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingApi for FakeBucket {
    fn list_page(&self, request: &PageRequest<'_>) -> Result<ListingPage, ListingError> {
        self.requests.borrow_mut().push(request.into());

        if self
            .failures
            .iter()
            .any(|(prefix, page)| prefix == request.prefix && *page == request.page)
        {
            return Err(request_failed(request, "injected failure"));
        }

        let start = match request.continuation_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| request_failed(request, "invalid continuation token"))?,
            None => 0,
        };

        let level = self.level(request.prefix, request.delimiter);
        let end = (start + self.page_size).min(level.len());
        let entries = level.get(start..end).map(<[Entry]>::to_vec).unwrap_or_default();
        let next = (end < level.len()).then(|| end.to_string());

        Ok(ListingPage::new(entries, next))
    }
}

/// Returns hand-written pages per prefix, verbatim and in the given order.
///
/// Prefixes without pages list as a single empty page. A page given as `Err`
/// fails with that message.
#[derive(Default)]
pub struct ScriptedListing {
    pages: HashMap<String, Vec<Result<Vec<Entry>, String>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl ScriptedListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the pages returned for `prefix`.
    pub fn with_pages(mut self, prefix: &str, pages: Vec<Vec<Entry>>) -> Self {
        self.pages
            .insert(prefix.to_string(), pages.into_iter().map(Ok).collect());
        self
    }

    /// Script pages for `prefix` where some pages fail.
    pub fn with_results(mut self, prefix: &str, pages: Vec<Result<Vec<Entry>, String>>) -> Self {
        self.pages.insert(prefix.to_string(), pages);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

impl ListingApi for ScriptedListing {
    fn list_page(&self, request: &PageRequest<'_>) -> Result<ListingPage, ListingError> {
        self.requests.borrow_mut().push(request.into());

        let Some(pages) = self.pages.get(request.prefix) else {
            return Ok(ListingPage::default());
        };
        let index = request.page - 1;
        let entries = match pages.get(index) {
            Some(Ok(entries)) => entries.clone(),
            Some(Err(message)) => return Err(request_failed(request, message)),
            None => Vec::new(),
        };
        let next = (index + 1 < pages.len()).then(|| format!("{}#{}", request.prefix, index + 1));

        Ok(ListingPage::new(entries, next))
    }
}

/// Metrics double with fixed answers; `None` makes that metric fail.
#[derive(Debug, Clone, Default)]
pub struct FixedMetrics {
    pub size: Option<Metric>,
    pub object_count: Option<Metric>,
}

impl MetricsProvider for FixedMetrics {
    fn aggregate_size(&self, _container: &str) -> Result<Metric, MetricError> {
        self.size
            .clone()
            .ok_or_else(|| MetricError::Request("size unavailable".to_string()))
    }

    fn object_count(&self, _container: &str) -> Result<Metric, MetricError> {
        self.object_count.clone().ok_or_else(|| MetricError::NoDatapoints {
            metric: "NumberOfObjects".to_string(),
        })
    }
}
