use crate::commands::{read_document, CmdMessage, CmdResult};
use crate::error::Result;
use crate::outline::symbols::{document_symbol_information, document_symbols};
use std::path::Path;

/// Symbols of a markdown file, as a tree or as a flat list.
pub fn run(path: &Path, flat: bool) -> Result<CmdResult> {
    let text = read_document(path)?;
    from_text(&text, flat)
}

pub fn from_text(text: &str, flat: bool) -> Result<CmdResult> {
    let mut result = if flat {
        CmdResult::default().with_symbol_information(document_symbol_information(text))
    } else {
        CmdResult::default().with_symbols(document_symbols(text))
    };

    if result.symbols.is_empty() && result.symbol_information.is_empty() {
        result.add_message(CmdMessage::info("No headings found."));
    }
    Ok(result)
}
