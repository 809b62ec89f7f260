//! # Outline
//!
//! Derives a table of contents from markdown text. Every heading becomes a
//! [`TocEntry`](toc::TocEntry) carrying its level, display text, a unique
//! [`Slug`](slug::Slug) and three ranges:
//!
//! ```text
//! ## Install ##        <- header range covers the whole line
//!    ^^^^^^^           <- header text range drops the markers
//! ## Install ##   ─┐
//! body             │   <- section range runs to the line before the
//! ### Details      │      next heading at the same or a shallower level
//! more body       ─┘
//! # Next
//! ```
//!
//! The outline is a projection: it is recomputed from the text on every call
//! and never stored. [`symbols`] turns it into the flat list and tree an
//! editor's symbol provider hands out.

use serde::Serialize;

pub mod slug;
pub mod symbols;
pub mod toc;

pub use slug::{slugify, Slug};
pub use symbols::{DocumentSymbol, SymbolInformation, SymbolKind};
pub use toc::{TableOfContents, TocEntry};

/// Zero-based line and character offset. Characters are Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range on a single line.
    pub fn on_line(line: usize, start: usize, end: usize) -> Self {
        Self::new(Position::new(line, start), Position::new(line, end))
    }
}
