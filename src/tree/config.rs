//! Configuration types for tree walkers

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Separator that synthesizes the hierarchy from flat keys
    pub delimiter: char,
    /// Deepest level whose groups are still listed; `None` = unlimited
    pub max_depth: Option<usize>,
    pub dirs_only: bool,
    /// Globs matched against entry names; matches are hidden
    pub ignore_patterns: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            delimiter: '/',
            max_depth: None,
            dirs_only: false,
            ignore_patterns: Vec::new(),
        }
    }
}
