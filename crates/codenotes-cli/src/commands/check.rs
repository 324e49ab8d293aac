use std::path::Path;

use codenotes_core::panel::{InputField, PanelAction};

use crate::commands::common::resolve_text;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::session::Session;

pub async fn run_check(
    text_parts: &[String],
    config: &CliConfig,
    store_path: &Path,
) -> Result<(), CliError> {
    let text = resolve_text(text_parts, config)?;

    let mut session = Session::open(store_path)?;
    session.type_into(InputField::NewChecklistItem, text)?;
    session.dispatch(PanelAction::AddChecklistItem)?;

    if let Some(item) = session.snapshot()?.checklist.last() {
        println!("{}", item.id);
    }
    session.close().await
}
