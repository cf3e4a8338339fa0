//! Streaming output formatter
//!
//! This module provides `StreamingFormatter` which writes each tree line as soon
//! as the walker reaches it, for use with `TreeWalker`.

use std::io;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::entry::Entry;
use crate::tree::{TreeLine, TreeOutput, WalkSummary};

use super::config::OutputConfig;
use super::render::{connector, label, root_line};

/// Streaming output formatter - writes lines directly without buffering the tree.
/// Implements the TreeOutput trait for use with TreeWalker.
pub struct StreamingFormatter<W: WriteColor = StandardStream> {
    out: W,
}

impl StreamingFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn new(config: OutputConfig) -> Self {
        Self::with_writer(StandardStream::stdout(config.color_choice()))
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: WriteColor> TreeOutput for StreamingFormatter<W> {
    fn begin(&mut self, container: &str, prefix: &str) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(self.out, "{}", root_line(container, prefix))?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn output_entry(&mut self, line: &TreeLine<'_>) -> io::Result<()> {
        write!(self.out, "{}{}", line.indentation, connector(line.is_last))?;

        if let Entry::Group { .. } = line.entry {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        }
        write!(self.out, "{}", label(line.entry, line.delimiter))?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn finish(&mut self, _summary: &WalkSummary) -> io::Result<()> {
        self.out.flush()
    }
}
