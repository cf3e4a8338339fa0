//! Connector and indentation rendering
//!
//! A line is `indentation + connector + label`. Indentation grows by one fixed-width
//! token per level: a pipe while the ancestor still has siblings below, blanks once
//! the ancestor was the last of its level.

use crate::entry::Entry;

pub const TEE: &str = "├── ";
pub const ELBOW: &str = "└── ";
pub const PIPE: &str = "│   ";
pub const SPACE: &str = "    ";

/// Connector glyph for an entry.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { ELBOW } else { TEE }
}

/// Indentation handed to the children of an entry.
pub fn next_indentation(indentation: &str, is_last: bool) -> String {
    let token = if is_last { SPACE } else { PIPE };
    let mut next = String::with_capacity(indentation.len() + token.len());
    next.push_str(indentation);
    next.push_str(token);
    next
}

/// Label text: `PREFIX - name/` for groups, `<bytes> - name` for objects.
pub fn label(entry: &Entry, delimiter: char) -> String {
    match entry {
        Entry::Group { .. } => format!("PREFIX - {}{}", entry.name(delimiter), delimiter),
        Entry::Leaf { size, .. } => format!("{} - {}", size, entry.name(delimiter)),
    }
}

/// A complete tree line.
pub fn render_line(entry: &Entry, is_last: bool, indentation: &str, delimiter: char) -> String {
    format!("{}{}{}", indentation, connector(is_last), label(entry, delimiter))
}

/// The line printed above the tree.
pub fn root_line(container: &str, prefix: &str) -> String {
    format!("< {}/{} >", container, prefix)
}
