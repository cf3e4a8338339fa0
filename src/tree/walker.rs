//! TreeWalker - depth-first walk over a delimiter-grouped listing
//!
//! The walk keeps an explicit stack of open levels instead of recursing, so deep
//! namespaces cannot exhaust the native stack. Each level holds its lazy listing and
//! one entry of lookahead, which is all that last-sibling detection needs. Memory is
//! one page per open level.

use std::io;

use serde::Serialize;
use tracing::{debug, info};

use crate::entry::Entry;
use crate::error::{ListingError, Result};
use crate::listing::{EntryFilter, Listing, ListingApi, list};
use crate::output::next_indentation;

use super::config::WalkerConfig;

/// One entry as it is placed in the tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeLine<'a> {
    pub entry: &'a Entry,
    /// No displayed sibling follows this entry at its level
    pub is_last: bool,
    /// Accumulated ancestor tokens for this level
    pub indentation: &'a str,
    /// 1 for entries directly under the starting prefix
    pub depth: usize,
    pub delimiter: char,
}

/// Callback for tree output - receives each entry in display order.
pub trait TreeOutput {
    fn begin(&mut self, container: &str, prefix: &str) -> io::Result<()>;

    fn output_entry(&mut self, line: &TreeLine<'_>) -> io::Result<()>;

    fn finish(&mut self, _summary: &WalkSummary) -> io::Result<()> {
        Ok(())
    }
}

/// Counts gathered during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub prefixes: usize,
    pub objects: usize,
    pub total_bytes: u64,
}

impl WalkSummary {
    fn record(&mut self, entry: &Entry) {
        match entry {
            Entry::Group { .. } => self.prefixes += 1,
            Entry::Leaf { size, .. } => {
                self.objects += 1;
                self.total_bytes = self.total_bytes.saturating_add(*size);
            }
        }
    }
}

/// The sibling queue of one open level.
struct Level<'a, A: ListingApi + ?Sized> {
    entries: Listing<'a, A>,
    pending: Option<Entry>,
    indentation: String,
    depth: usize,
}

impl<A: ListingApi + ?Sized> Level<'_, A> {
    /// Next displayed entry of the listing.
    fn pull(&mut self, filter: &EntryFilter, delimiter: char) -> Result<Option<Entry>> {
        for item in self.entries.by_ref() {
            let entry = item?;
            if filter.accepts(&entry, delimiter) {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    /// Take the current entry and report whether it is the last one.
    fn next_sibling(
        &mut self,
        filter: &EntryFilter,
        delimiter: char,
    ) -> Result<Option<(Entry, bool)>> {
        let Some(current) = self.pending.take() else {
            return Ok(None);
        };
        self.pending = self.pull(filter, delimiter)?;
        let is_last = self.pending.is_none();
        Ok(Some((current, is_last)))
    }
}

/// Walks a bucket prefix depth-first, streaming each entry to a [`TreeOutput`].
pub struct TreeWalker<'a, A: ListingApi + ?Sized> {
    api: &'a A,
    config: WalkerConfig,
    filter: EntryFilter,
}

impl<'a, A: ListingApi + ?Sized> TreeWalker<'a, A> {
    pub fn new(api: &'a A, config: WalkerConfig) -> Result<Self> {
        let filter = EntryFilter::new(config.dirs_only, &config.ignore_patterns)?;
        Ok(Self {
            api,
            config,
            filter,
        })
    }

    /// Walk `prefix` in `container`, emitting every entry in display order.
    ///
    /// A listing failure at any level aborts the whole walk. Entries already passed
    /// to `output` stay emitted.
    pub fn walk<O: TreeOutput + ?Sized>(
        &self,
        container: &str,
        prefix: &str,
        output: &mut O,
    ) -> Result<WalkSummary> {
        let delimiter = self.config.delimiter;
        let mut summary = WalkSummary::default();

        output.begin(container, prefix)?;

        let mut stack = vec![self.open_level(container, prefix, String::new(), 1)?];

        loop {
            let Some(level) = stack.last_mut() else {
                break;
            };
            let Some((entry, is_last)) = level.next_sibling(&self.filter, delimiter)? else {
                stack.pop();
                continue;
            };

            output.output_entry(&TreeLine {
                entry: &entry,
                is_last,
                indentation: &level.indentation,
                depth: level.depth,
                delimiter,
            })?;
            summary.record(&entry);

            let Entry::Group { prefix: child } = &entry else {
                continue;
            };
            if !self.should_descend(level.depth) {
                continue;
            }
            let parent = level.entries.prefix();
            if !descends_from(child, parent) {
                return Err(ListingError::NonDescendingPrefix {
                    parent: parent.to_string(),
                    child: child.clone(),
                }
                .into());
            }

            let indentation = next_indentation(&level.indentation, is_last);
            let depth = level.depth + 1;
            stack.push(self.open_level(container, child, indentation, depth)?);
        }

        info!(
            container = container,
            prefix = prefix,
            prefixes = summary.prefixes,
            objects = summary.objects,
            total_bytes = summary.total_bytes,
            "Walk complete"
        );
        output.finish(&summary)?;
        Ok(summary)
    }

    fn open_level(
        &self,
        container: &str,
        prefix: &str,
        indentation: String,
        depth: usize,
    ) -> Result<Level<'a, A>> {
        debug!(prefix = prefix, depth = depth, "Opening level");
        let mut level = Level {
            entries: list(self.api, container, prefix, self.config.delimiter),
            pending: None,
            indentation,
            depth,
        };
        level.pending = level.pull(&self.filter, self.config.delimiter)?;
        Ok(level)
    }

    fn should_descend(&self, depth: usize) -> bool {
        self.config.max_depth.is_none_or(|max| depth < max)
    }
}

/// True when `child` strictly extends `parent`.
fn descends_from(child: &str, parent: &str) -> bool {
    child.len() > parent.len() && child.starts_with(parent)
}
