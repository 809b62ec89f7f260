use super::slug::{slugify, Slug};
use super::{Position, Range};
use pulldown_cmark::{Event, Options, Parser, Tag};
use serde::Serialize;
use std::collections::HashMap;

/// One heading of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub slug: Slug,
    pub text: String,
    pub level: usize,
    pub line: usize,
    /// The full heading line.
    pub header_range: Range,
    /// The heading line without its `#` markers and surrounding whitespace.
    pub header_text_range: Range,
    /// From the heading to the end of its section.
    pub section_range: Range,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TableOfContents {
    pub entries: Vec<TocEntry>,
}

impl TableOfContents {
    pub fn build(text: &str) -> Self {
        let doc = DocumentLines::new(text);
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut entries = Vec::new();

        for (offset, level) in heading_starts(text) {
            let line = doc.line_of(offset);
            let line_text = doc.text(line);
            let line_len = line_text.chars().count();

            let mut slug = slugify(line_text);
            match seen.get_mut(slug.as_str()) {
                Some(count) => {
                    *count += 1;
                    slug = slugify(&format!("{}-{}", slug, count));
                }
                None => {
                    seen.insert(slug.as_str().to_string(), 0);
                }
            }

            let text_start = leading_marker_len(line_text);
            let text_end = line_len
                .saturating_sub(trailing_marker_len(line_text))
                .max(text_start);
            let header_range = Range::on_line(line, 0, line_len);

            entries.push(TocEntry {
                slug,
                text: header_text(line_text),
                level,
                line,
                header_range,
                header_text_range: Range::on_line(line, text_start, text_end),
                section_range: header_range,
            });
        }

        // Sections close on the line before the next heading at the same or a shallower level.
        // Walking backwards, `following` holds (level, line) of later headings that can
        // still close an earlier section, nearest on top.
        let mut ends = vec![doc.last_line(); entries.len()];
        let mut following: Vec<(usize, usize)> = Vec::new();
        for (i, entry) in entries.iter().enumerate().rev() {
            while following.last().is_some_and(|&(level, _)| level > entry.level) {
                following.pop();
            }
            if let Some(&(_, line)) = following.last() {
                ends[i] = line.saturating_sub(1);
            }
            following.push((entry.level, entry.line));
        }

        for (entry, end_line) in entries.iter_mut().zip(ends) {
            let end = Position::new(end_line, doc.text(end_line).chars().count());
            entry.section_range = Range::new(entry.header_range.start, end);
        }

        Self { entries }
    }

    /// Find the entry a `#fragment` link points to.
    pub fn lookup(&self, fragment: &str) -> Option<&TocEntry> {
        let slug = slugify(fragment.strip_prefix('#').unwrap_or(fragment));
        self.entries.iter().find(|entry| entry.slug == slug)
    }

    /// Nested markdown link list, indented relative to the shallowest heading kept.
    pub fn render_markdown(&self, max_level: usize) -> String {
        let kept: Vec<&TocEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.level <= max_level)
            .collect();
        let Some(base) = kept.iter().map(|entry| entry.level).min() else {
            return String::new();
        };

        kept.iter()
            .map(|entry| {
                format!(
                    "{}- [{}](#{})\n",
                    "  ".repeat(entry.level - base),
                    escape_link_text(&entry.text),
                    entry.slug
                )
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn escape_link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Byte offset of each heading start with its level, in document order.
fn heading_starts(text: &str) -> Vec<(usize, usize)> {
    Parser::new_ext(text, Options::empty())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::Heading { level, .. }) => Some((range.start, level as usize)),
            _ => None,
        })
        .collect()
}

/// Line table over the document. A trailing newline yields a final empty line.
struct DocumentLines<'a> {
    lines: Vec<&'a str>,
    starts: Vec<usize>,
}

impl<'a> DocumentLines<'a> {
    fn new(text: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut starts = Vec::new();
        let mut offset = 0;
        for raw in text.split('\n') {
            starts.push(offset);
            offset += raw.len() + 1;
            lines.push(raw.strip_suffix('\r').unwrap_or(raw));
        }
        Self { lines, starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset).saturating_sub(1)
    }

    fn text(&self, line: usize) -> &'a str {
        self.lines.get(line).copied().unwrap_or_default()
    }

    fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

/// Characters matched by `^\s*#+\s*`, zero when the line has no `#` run.
fn leading_marker_len(line: &str) -> usize {
    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    let hashes = line.chars().skip(indent).take_while(|&c| c == '#').count();
    if hashes == 0 {
        return 0;
    }
    let gap = line
        .chars()
        .skip(indent + hashes)
        .take_while(|c| c.is_whitespace())
        .count();
    indent + hashes + gap
}

/// Characters of the closing `#` run and the whitespace around it.
fn trailing_marker_len(line: &str) -> usize {
    let kept = line.trim_end().trim_end_matches('#').trim_end();
    line[kept.len()..].chars().count()
}

/// Heading text with the opening `#` run and an optional closing run removed.
fn header_text(line: &str) -> String {
    let trimmed = line.trim_start();
    let rest = trimmed.trim_start_matches('#');
    if rest.len() == trimmed.len() {
        return line.trim().to_string();
    }
    let rest = rest.trim();
    let without_closing = rest.trim_end_matches('#');
    let body = if without_closing.len() < rest.len() && without_closing.ends_with(char::is_whitespace)
    {
        without_closing
    } else {
        rest
    };
    body.trim().to_string()
}
