//! Tree formatting and display
//!
//! - `render` - connector glyphs, labels and indentation growth
//! - `streaming` - line-by-line console output during the walk
//! - `json` - JSON output of a materialized tree
//! - `preamble` - metrics block and cost warning printed before the tree

mod config;
mod json;
mod preamble;
mod render;
mod streaming;

pub use config::OutputConfig;
pub use json::{print_json, write_json};
pub use preamble::{ABORT_MESSAGE, CONFIRM_QUESTION, write_cost_warning, write_metrics};
pub use render::{
    ELBOW, PIPE, SPACE, TEE, connector, label, next_indentation, render_line, root_line,
};
pub use streaming::StreamingFormatter;
