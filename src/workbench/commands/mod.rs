use crate::config::WorkbenchConfig;
use crate::error::{Result, WorkbenchError};
use crate::outline::{DocumentSymbol, SymbolInformation, TocEntry};
use crate::profiles::{Profile, WorkspaceId};
use std::fs;
use std::path::{Path, PathBuf};

pub mod config;
pub mod outline;
pub mod profile;
pub mod toc;

#[derive(Debug, Clone)]
pub struct WorkbenchPaths {
    /// Holds `state.json`, `config.json` and the default profile's resources.
    pub data_root: PathBuf,
}

impl WorkbenchPaths {
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A profile together with the workspaces that use it.
#[derive(Debug, Clone)]
pub struct ProfileListing {
    pub profile: Profile,
    pub workspaces: Vec<WorkspaceId>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub symbols: Vec<DocumentSymbol>,
    pub symbol_information: Vec<SymbolInformation>,
    pub toc_entries: Vec<TocEntry>,
    pub rendered: Option<String>,
    pub profiles: Vec<ProfileListing>,
    pub config: Option<WorkbenchConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_symbols(mut self, symbols: Vec<DocumentSymbol>) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_symbol_information(mut self, symbols: Vec<SymbolInformation>) -> Self {
        self.symbol_information = symbols;
        self
    }

    pub fn with_toc_entries(mut self, entries: Vec<TocEntry>) -> Self {
        self.toc_entries = entries;
        self
    }

    pub fn with_rendered(mut self, rendered: String) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_profiles(mut self, profiles: Vec<ProfileListing>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_config(mut self, config: WorkbenchConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Read a markdown document for the outline commands.
pub(crate) fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        WorkbenchError::Api(format!("Cannot read {}: {}", path.display(), e))
    })
}
