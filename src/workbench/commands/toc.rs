use crate::commands::{read_document, CmdMessage, CmdResult};
use crate::error::Result;
use crate::outline::TableOfContents;
use std::path::Path;

/// Markdown table of contents for a file, limited to `depth` levels.
pub fn run(path: &Path, depth: usize) -> Result<CmdResult> {
    let text = read_document(path)?;
    Ok(render(&text, depth))
}

pub fn render(text: &str, depth: usize) -> CmdResult {
    let toc = TableOfContents::build(text);
    let rendered = toc.render_markdown(depth);

    let mut result = CmdResult::default();
    if rendered.is_empty() {
        result.add_message(CmdMessage::info("No headings found."));
        return result;
    }
    result.with_rendered(rendered).with_toc_entries(toc.entries)
}

/// Resolve a `#fragment` against a file's headings.
pub fn lookup(path: &Path, fragment: &str) -> Result<CmdResult> {
    let text = read_document(path)?;
    Ok(lookup_in(&text, fragment))
}

pub fn lookup_in(text: &str, fragment: &str) -> CmdResult {
    let toc = TableOfContents::build(text);
    let mut result = CmdResult::default();
    match toc.lookup(fragment) {
        Some(entry) => result.toc_entries.push(entry.clone()),
        None => result.add_message(CmdMessage::warning(format!(
            "No heading matches '{}'",
            fragment
        ))),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_and_returns_entries() {
        let result = render("# A\n## B\n", 6);
        assert_eq!(result.rendered.as_deref(), Some("- [A](#a)\n  - [B](#b)\n"));
        assert_eq!(result.toc_entries.len(), 2);
    }

    #[test]
    fn depth_filter_can_leave_nothing() {
        let result = render("### Only deep\n", 2);
        assert!(result.rendered.is_none());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn lookup_finds_duplicate_slug() {
        let result = lookup_in("# Q\n# Q\n", "#q-1");
        assert_eq!(result.toc_entries[0].line, 1);
    }

    #[test]
    fn lookup_miss_warns() {
        let result = lookup_in("# Q\n", "nope");
        assert!(result.toc_entries.is_empty());
        assert!(matches!(
            result.messages[0].level,
            crate::commands::MessageLevel::Warning
        ));
    }
}
