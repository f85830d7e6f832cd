//! Markup sink — writes scopes as start/end tags.
//!
//! ```text
//! open(member) open(Polygon) text("..") close() close()
//!   → <member><Polygon>..</Polygon></member>
//! ```
//!
//! Only element structure, generated IDs and escaped text are written. Step
//! names must render as XML names; anything else is rejected before writing.
//! Attributes, namespaces and declarations belong to the caller.

use std::fmt::Display;
use std::io::Write;

use crate::config::MarkupConfig;
use crate::model::PathElement;
use crate::{Error, Result};
use super::{OpenOptions, ScopeSink};

/// Tag writer over any `std::io::Write`.
pub struct MarkupSink<W: Write> {
    writer: W,
    config: MarkupConfig,
    /// Rendered names of the open elements, outermost first.
    open: Vec<String>,
    next_id: u64,
    /// Anything has been written yet.
    started: bool,
    /// Whether the innermost open element already has text content.
    has_text: bool,
}

impl<W: Write> MarkupSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, MarkupConfig::default())
    }

    pub fn with_config(writer: W, config: MarkupConfig) -> Self {
        Self {
            writer,
            config,
            open: Vec::new(),
            next_id: 1,
            started: false,
            has_text: false,
        }
    }

    /// Write escaped character data into the innermost open element.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        if self.open.is_empty() {
            return Err(Error::Misuse("text written outside of any element".into()));
        }
        write!(self.writer, "{}", escape_text(text))?;
        self.has_text = true;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Recover the underlying writer. Open elements are left unterminated.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Line break plus indentation for the given nesting level.
    fn newline(&mut self, level: usize) -> Result<()> {
        if let Some(spaces) = self.config.indent {
            if self.started {
                writeln!(self.writer)?;
            }
            write!(self.writer, "{:width$}", "", width = spaces * level)?;
        }
        Ok(())
    }
}

impl<N: Display, W: Write> ScopeSink<N> for MarkupSink<W> {
    fn open(&mut self, step: &PathElement<N>, options: OpenOptions) -> Result<()> {
        let name = step.name.to_string();
        if !is_xml_name(&name) {
            return Err(Error::SinkError(format!("'{}' is not a valid element name", name)));
        }
        let level = self.open.len();
        self.newline(level)?;
        write!(self.writer, "<{}", name)?;
        if options.generate_id && step.requires_id {
            write!(self.writer, " id=\"{}{}\"", self.config.id_prefix, self.next_id)?;
            self.next_id += 1;
        }
        write!(self.writer, ">")?;
        self.started = true;
        self.open.push(name);
        self.has_text = false;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(name) = self.open.pop() else {
            return Err(Error::Misuse("close called with no open element".into()));
        };
        if !self.has_text {
            let level = self.open.len();
            self.newline(level)?;
        }
        write!(self.writer, "</{}>", name)?;
        self.has_text = false;
        Ok(())
    }

    fn depth(&self) -> usize {
        self.open.len()
    }
}

/// Letters, digits and `- . _ :`, not starting with a digit, `-` or `.`.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
