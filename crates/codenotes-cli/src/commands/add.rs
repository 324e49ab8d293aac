use std::path::Path;

use codenotes_core::panel::{InputField, PanelAction};

use crate::commands::common::resolve_text;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::session::Session;

pub async fn run_add(
    text_parts: &[String],
    config: &CliConfig,
    store_path: &Path,
) -> Result<(), CliError> {
    let text = resolve_text(text_parts, config)?;

    let mut session = Session::open(store_path)?;
    session.type_into(InputField::NewPersonalNote, text)?;
    session.dispatch(PanelAction::AddPersonalNote)?;

    if let Some(note) = session.snapshot()?.notes.last() {
        println!("{}", note.id);
    }
    session.close().await
}
