//! Symbol provider shapes: a flat list for quick pick style lookups and a
//! nested tree for outline views. Both are built from the same
//! [`TableOfContents`] and use the section range as the symbol range.

use super::toc::{TableOfContents, TocEntry};
use super::Range;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    /// Headings are reported as string symbols.
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolInformation {
    pub name: String,
    pub kind: SymbolKind,
    pub container_name: String,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSymbol {
    pub name: String,
    pub detail: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub selection_range: Range,
    pub children: Vec<DocumentSymbol>,
}

impl DocumentSymbol {
    /// Number of symbols in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DocumentSymbol::count).sum::<usize>()
    }
}

/// `## Heading` style display name.
pub fn symbol_name(entry: &TocEntry) -> String {
    format!("{} {}", "#".repeat(entry.level), entry.text)
}

pub fn document_symbol_information(text: &str) -> Vec<SymbolInformation> {
    TableOfContents::build(text)
        .entries
        .iter()
        .map(|entry| SymbolInformation {
            name: symbol_name(entry),
            kind: SymbolKind::String,
            container_name: String::new(),
            range: entry.section_range,
        })
        .collect()
}

pub fn document_symbols(text: &str) -> Vec<DocumentSymbol> {
    build_tree(&TableOfContents::build(text))
}

/// Nest each entry under the closest preceding entry with a strictly smaller level.
pub fn build_tree(toc: &TableOfContents) -> Vec<DocumentSymbol> {
    let mut roots = Vec::new();
    let mut open: Vec<(usize, DocumentSymbol)> = Vec::new();

    for entry in &toc.entries {
        while open.last().is_some_and(|(level, _)| *level >= entry.level) {
            close_top(&mut open, &mut roots);
        }
        open.push((
            entry.level,
            DocumentSymbol {
                name: symbol_name(entry),
                detail: String::new(),
                kind: SymbolKind::String,
                range: entry.section_range,
                selection_range: entry.section_range,
                children: Vec::new(),
            },
        ));
    }
    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }

    roots
}

fn close_top(open: &mut Vec<(usize, DocumentSymbol)>, roots: &mut Vec<DocumentSymbol>) {
    if let Some((_, done)) = open.pop() {
        match open.last_mut() {
            Some((_, parent)) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(symbols: &[DocumentSymbol]) -> Vec<&str> {
        symbols.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn flat_list_keeps_document_order() {
        let flat = document_symbol_information("# A\n### B\n## C\n");
        let got: Vec<&str> = flat.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(got, vec!["# A", "### B", "## C"]);
        assert!(flat.iter().all(|s| s.container_name.is_empty()));
    }

    #[test]
    fn equal_levels_are_siblings() {
        let tree = document_symbols("## A\n## B\n## C\n");
        assert_eq!(names(&tree), vec!["## A", "## B", "## C"]);
        assert!(tree.iter().all(|s| s.children.is_empty()));
    }

    #[test]
    fn deeper_headings_nest_and_shallower_ones_climb_back() {
        let tree = document_symbols("# A\n## B\n### C\n## D\n# E\n");
        assert_eq!(names(&tree), vec!["# A", "# E"]);
        assert_eq!(names(&tree[0].children), vec!["## B", "## D"]);
        assert_eq!(names(&tree[0].children[0].children), vec!["### C"]);
        assert_eq!(tree[0].count(), 4);
    }

    #[test]
    fn skipped_levels_nest_under_nearest_shallower() {
        let tree = document_symbols("# A\n#### B\n## C\n");
        assert_eq!(names(&tree[0].children), vec!["#### B", "## C"]);
    }

    #[test]
    fn leading_deep_heading_becomes_root() {
        let tree = document_symbols("### Deep\n# Top\n## Child\n");
        assert_eq!(names(&tree), vec!["### Deep", "# Top"]);
        assert_eq!(names(&tree[1].children), vec!["## Child"]);
    }

    #[test]
    fn symbol_range_is_section_range() {
        let tree = document_symbols("# A\ntext\n# B\n");
        assert_eq!(tree[0].range.end.line, 1);
        assert_eq!(tree[0].range, tree[0].selection_range);
    }
}
