//! Entry filtering for tree walking

use glob::Pattern;

use crate::entry::Entry;

/// Decides which listed entries are displayed.
///
/// Applied to a level's sequence before last-sibling detection, so a hidden entry
/// never leaves its predecessor without a corner connector.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    dirs_only: bool,
    ignore: Vec<Pattern>,
}

impl EntryFilter {
    /// Build a filter, compiling the ignore globs.
    pub fn new(dirs_only: bool, ignore_patterns: &[String]) -> Result<Self, glob::PatternError> {
        let ignore = ignore_patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { dirs_only, ignore })
    }

    /// Check if an entry should be shown.
    pub fn accepts(&self, entry: &Entry, delimiter: char) -> bool {
        if self.dirs_only && !entry.is_group() {
            return false;
        }

        let name = entry.name(delimiter);
        !self
            .ignore
            .iter()
            .any(|pattern| pattern.as_str() == name || pattern.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(dirs_only: bool, patterns: &[&str]) -> EntryFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        EntryFilter::new(dirs_only, &patterns).unwrap()
    }

    #[test]
    fn test_default_accepts_everything() {
        let f = EntryFilter::default();
        assert!(f.accepts(&Entry::group("a/"), '/'));
        assert!(f.accepts(&Entry::leaf("a/b.txt", 1), '/'));
    }

    #[test]
    fn test_dirs_only_rejects_leaves() {
        let f = filter(true, &[]);
        assert!(f.accepts(&Entry::group("logs/"), '/'));
        assert!(!f.accepts(&Entry::leaf("logs/app.log", 10), '/'));
    }

    #[test]
    fn test_ignore_matches_display_name() {
        let f = filter(false, &["*.tmp", "cache"]);
        assert!(!f.accepts(&Entry::leaf("data/x.tmp", 1), '/'));
        assert!(!f.accepts(&Entry::group("data/cache/"), '/'));
        assert!(f.accepts(&Entry::leaf("data/x.csv", 1), '/'));
        // Patterns apply to the last segment only, not the full key
        assert!(f.accepts(&Entry::leaf("cache.d/x.csv", 1), '/'));
    }

    #[test]
    fn test_ignore_character_classes() {
        let f = filter(false, &["part-[0-9]*"]);
        assert!(!f.accepts(&Entry::leaf("t/part-0001.parquet", 1), '/'));
        assert!(f.accepts(&Entry::leaf("t/part-x.parquet", 1), '/'));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let patterns = vec!["[".to_string()];
        assert!(EntryFilter::new(false, &patterns).is_err());
    }
}
