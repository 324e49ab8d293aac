use std::path::PathBuf;

use codenotes_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => run_config_show(),
        ConfigCommands::Set { store_path, editor } => run_config_set(store_path, editor),
    }
}

pub fn run_config_show() -> Result<(), CliError> {
    let config = CliConfig::load().map_err(CliError::Config)?;
    if let Some(path) = default_config_path() {
        println!("# {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn run_config_set(store_path: Option<PathBuf>, editor: Option<String>) -> Result<(), CliError> {
    let mut config = CliConfig::load().map_err(CliError::Config)?;
    if !apply_config_update(&mut config, store_path, editor) {
        return Err(CliError::Config(
            "nothing to set; pass --store-path and/or --editor".to_string(),
        ));
    }

    let path = config.save().map_err(CliError::Config)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// Merge explicit values into `config`; returns whether anything was given
pub fn apply_config_update(
    config: &mut CliConfig,
    store_path: Option<PathBuf>,
    editor: Option<String>,
) -> bool {
    let mut changed = false;
    if let Some(path) = store_path.filter(|path| !path.as_os_str().is_empty()) {
        config.store_path = Some(path);
        changed = true;
    }
    if let Some(editor) = normalize_text_option(editor) {
        config.editor = Some(editor);
        changed = true;
    }
    changed
}
