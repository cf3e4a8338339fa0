//! Listing entries and page types

use serde::Serialize;

/// One result of a delimiter-grouped listing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    /// A common prefix ending in the delimiter (a "directory").
    Group { prefix: String },
    /// A stored object (a "file").
    Leaf { key: String, size: u64 },
}

impl Entry {
    pub fn group(prefix: impl Into<String>) -> Self {
        Entry::Group {
            prefix: prefix.into(),
        }
    }

    pub fn leaf(key: impl Into<String>, size: u64) -> Self {
        Entry::Leaf {
            key: key.into(),
            size,
        }
    }

    /// The full key or prefix this entry was listed under.
    pub fn key(&self) -> &str {
        match self {
            Entry::Group { prefix } => prefix,
            Entry::Leaf { key, .. } => key,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Entry::Group { .. })
    }

    /// The final path component shown in the tree.
    ///
    /// Groups drop their trailing delimiter first, so `a/b/` names `b`.
    /// Leaves use whatever follows the last delimiter, so `a/b/c.txt` names `c.txt`.
    pub fn name(&self, delimiter: char) -> &str {
        match self {
            Entry::Group { prefix } => {
                last_segment(prefix.strip_suffix(delimiter).unwrap_or(prefix), delimiter)
            }
            Entry::Leaf { key, .. } => last_segment(key, delimiter),
        }
    }
}

/// Return the component after the last `delimiter` in `path`.
pub fn last_segment(path: &str, delimiter: char) -> &str {
    path.rsplit(delimiter).next().unwrap_or(path)
}

/// Parameters of a single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub container: &'a str,
    pub prefix: &'a str,
    pub delimiter: char,
    pub continuation_token: Option<&'a str>,
    /// 1-based number of this page within the listing, for diagnostics
    pub page: usize,
}

/// One page of listing results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub entries: Vec<Entry>,
    /// Cursor for the next page; `None` on the final page.
    pub next_continuation_token: Option<String>,
}

impl ListingPage {
    pub fn new(entries: Vec<Entry>, next_continuation_token: Option<String>) -> Self {
        Self {
            entries,
            next_continuation_token,
        }
    }

    pub fn last(entries: Vec<Entry>) -> Self {
        Self::new(entries, None)
    }
}

/// Interleave the groups and leaves of one page by key.
///
/// Both inputs must already be in key order, as S3 returns them. On equal keys the
/// group comes first.
pub fn merge_by_key(groups: Vec<Entry>, leaves: Vec<Entry>) -> Vec<Entry> {
    let mut merged = Vec::with_capacity(groups.len() + leaves.len());
    let mut groups = groups.into_iter().peekable();
    let mut leaves = leaves.into_iter().peekable();

    loop {
        let take_group = match (groups.peek(), leaves.peek()) {
            (Some(g), Some(l)) => g.key() <= l.key(),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_group {
            groups.next()
        } else {
            leaves.next()
        };
        merged.extend(next);
    }

    merged
}
