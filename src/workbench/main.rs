use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;
use workbench::api::{
    CmdMessage, ConfigAction, MessageLevel, ProfileListing, WorkbenchApi, WorkbenchPaths,
};
use workbench::config::{ConfigKey, WorkbenchConfig};
use workbench::error::{Result, WorkbenchError};
use workbench::outline::{DocumentSymbol, Range, SymbolInformation, TocEntry};
use workbench::store::fs_backend::FsBackend;

mod args;
use args::{Cli, Commands, ProfileCommand};

const HOME_ENV: &str = "WORKBENCH_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let api = init_api(&cli)?;

    match cli.command {
        Commands::Outline { file, flat, json } => handle_outline(&api, file, flat, json),
        Commands::Toc { file, depth } => handle_toc(&api, file, depth),
        Commands::Lookup { file, fragment } => handle_lookup(&api, file, &fragment),
        Commands::Profile(cmd) => handle_profile(&api, cmd),
        Commands::Config { key, value } => handle_config(&api, key, value),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn data_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "workbench", "workbench")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| WorkbenchError::Config("Could not determine data dir".into()))
}

fn init_api(cli: &Cli) -> Result<WorkbenchApi<FsBackend>> {
    let root = data_root(cli)?;
    log::debug!("data root: {}", root.display());
    let config = WorkbenchConfig::load(&root)?;
    let backend = FsBackend::new(root.clone());
    Ok(WorkbenchApi::new(backend, WorkbenchPaths::new(root), config))
}

fn handle_outline(api: &WorkbenchApi<FsBackend>, file: PathBuf, flat: bool, json: bool) -> Result<()> {
    let result = api.outline(&file, flat)?;
    if json {
        let out = if flat {
            serde_json::to_string_pretty(&result.symbol_information)?
        } else {
            serde_json::to_string_pretty(&result.symbols)?
        };
        println!("{}", out);
        return Ok(());
    }

    if flat {
        print_flat_symbols(&result.symbol_information);
    } else {
        print_symbol_tree(&result.symbols, "");
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_toc(api: &WorkbenchApi<FsBackend>, file: PathBuf, depth: Option<u8>) -> Result<()> {
    let result = api.toc(&file, depth.map(usize::from))?;
    if let Some(rendered) = &result.rendered {
        print!("{}", rendered);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_lookup(api: &WorkbenchApi<FsBackend>, file: PathBuf, fragment: &str) -> Result<()> {
    let result = api.lookup(&file, fragment)?;
    for entry in &result.toc_entries {
        print_entry(entry);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_profile(api: &WorkbenchApi<FsBackend>, cmd: ProfileCommand) -> Result<()> {
    let result = match cmd {
        ProfileCommand::List => api.list_profiles()?,
        ProfileCommand::Create {
            name,
            use_default,
            workspace,
        } => api.create_profile(&name, use_default.as_deref(), workspace.as_deref())?,
        ProfileCommand::Remove { name } => api.remove_profile(&name)?,
        ProfileCommand::Rename { name, new_name } => api.rename_profile(&name, &new_name)?,
        ProfileCommand::Flags { name, list } => api.set_profile_flags(&name, &list)?,
        ProfileCommand::Use { name, workspace } => api.use_profile(&name, &workspace)?,
        ProfileCommand::Unset { workspace } => api.unset_workspace(&workspace)?,
        ProfileCommand::Reset => api.reset_workspaces()?,
        ProfileCommand::Show { workspace } => api.show_workspace(&workspace)?,
    };
    print_profiles(&result.profiles);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &WorkbenchApi<FsBackend>, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.as_deref(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(raw), value) => {
            let Some(key) = ConfigKey::parse(raw) else {
                println!("Unknown config key: {}", raw);
                return Ok(());
            };
            match value {
                Some(v) => ConfigAction::Set(key, v),
                None => ConfigAction::ShowKey(key),
            }
        }
    };

    let is_show_all = matches!(action, ConfigAction::ShowAll);
    let result = api.config(action)?;
    if is_show_all {
        if let Some(config) = &result.config {
            for key in ConfigKey::ALL {
                println!("{} = {}", key.name(), config.get(key));
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn format_lines(range: &Range) -> String {
    if range.start.line == range.end.line {
        format!("L{}", range.start.line + 1)
    } else {
        format!("L{}-{}", range.start.line + 1, range.end.line + 1)
    }
}

fn print_symbol_tree(symbols: &[DocumentSymbol], prefix: &str) {
    for (i, symbol) in symbols.iter().enumerate() {
        let last = i + 1 == symbols.len();
        let branch = if last { "└─ " } else { "├─ " };
        println!(
            "{}{}{} {}",
            prefix.dimmed(),
            branch.dimmed(),
            symbol.name.bold(),
            format_lines(&symbol.range).dimmed()
        );
        let child_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
        print_symbol_tree(&symbol.children, &child_prefix);
    }
}

const NAME_WIDTH: usize = 48;

fn print_flat_symbols(symbols: &[SymbolInformation]) {
    for symbol in symbols {
        let padding = NAME_WIDTH.saturating_sub(symbol.name.width());
        println!(
            "{}{}{}",
            symbol.name,
            " ".repeat(padding),
            format_lines(&symbol.range).dimmed()
        );
    }
}

fn print_entry(entry: &TocEntry) {
    println!(
        "{} {} {}",
        format!("#{}", entry.slug).yellow(),
        entry.text.bold(),
        format_lines(&entry.section_range).dimmed()
    );
}

fn print_profiles(profiles: &[ProfileListing]) {
    for listing in profiles {
        let profile = &listing.profile;
        let marker = if profile.is_default { "*" } else { " " };
        let name_pad = 24usize.saturating_sub(profile.name.width());
        println!(
            "{} {}{}{}",
            marker.yellow(),
            profile.name.bold(),
            " ".repeat(name_pad),
            profile.location.display().to_string().dimmed()
        );
        if let Some(flags) = profile.use_default_flags {
            println!("    shares: {}", flags.enabled().join(", "));
        }
        for workspace in &listing.workspaces {
            println!("    workspace: {}", workspace.to_string().cyan());
        }
    }
}
