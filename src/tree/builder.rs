//! TreeBuilder - collects walked entries into a nested tree for JSON output

use std::io;

use serde::Serialize;

use crate::entry::Entry;
use crate::metrics::BucketMetrics;

use super::walker::{TreeLine, TreeOutput, WalkSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Prefix {
        name: String,
        prefix: String,
        children: Vec<TreeNode>,
    },
    Object {
        name: String,
        key: String,
        size: u64,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Prefix { name, .. } => name,
            TreeNode::Object { name, .. } => name,
        }
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self, TreeNode::Prefix { .. })
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Prefix { children, .. } => children,
            TreeNode::Object { .. } => &[],
        }
    }
}

/// A fully materialized walk.
#[derive(Debug, Clone, Serialize)]
pub struct BucketTree {
    pub container: String,
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BucketMetrics>,
    pub summary: WalkSummary,
    pub children: Vec<TreeNode>,
}

/// Tree output that builds a [`BucketTree`] instead of printing.
///
/// Groups stay open on a stack until an entry at the same or a shallower depth
/// arrives, then move into their parent.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    container: String,
    prefix: String,
    roots: Vec<TreeNode>,
    open: Vec<TreeNode>,
    summary: WalkSummary,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_tree(mut self, metrics: Option<BucketMetrics>) -> BucketTree {
        self.close_to(0);
        BucketTree {
            container: self.container,
            prefix: self.prefix,
            metrics,
            summary: self.summary,
            children: self.roots,
        }
    }

    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            if let Some(node) = self.open.pop() {
                self.attach(node);
            }
        }
    }

    fn attach(&mut self, node: TreeNode) {
        match self.open.last_mut() {
            Some(TreeNode::Prefix { children, .. }) => children.push(node),
            _ => self.roots.push(node),
        }
    }
}

impl TreeOutput for TreeBuilder {
    fn begin(&mut self, container: &str, prefix: &str) -> io::Result<()> {
        self.container = container.to_string();
        self.prefix = prefix.to_string();
        Ok(())
    }

    fn output_entry(&mut self, line: &TreeLine<'_>) -> io::Result<()> {
        self.close_to(line.depth.saturating_sub(1));

        let name = line.entry.name(line.delimiter).to_string();
        match line.entry {
            Entry::Group { prefix } => self.open.push(TreeNode::Prefix {
                name,
                prefix: prefix.clone(),
                children: Vec::new(),
            }),
            Entry::Leaf { key, size } => self.attach(TreeNode::Object {
                name,
                key: key.clone(),
                size: *size,
            }),
        }
        Ok(())
    }

    fn finish(&mut self, summary: &WalkSummary) -> io::Result<()> {
        self.summary = *summary;
        self.close_to(0);
        Ok(())
    }
}
