use std::path::Path;

use codenotes_core::panel::{InputField, PanelAction};

use crate::commands::common::{
    capture_editor_input_with_initial, normalize_note_identifier, preferred_editor,
    resolve_target, target_text, text_from_args,
};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::session::Session;

pub async fn run_edit(
    id: &str,
    text_parts: &[String],
    config: &CliConfig,
    store_path: &Path,
) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let mut session = Session::open(store_path)?;
    let snapshot = session.snapshot()?;
    let target = resolve_target(&normalized_id, &snapshot)?;
    let current = target_text(&snapshot, target).unwrap_or_default();

    let edited = match text_from_args(text_parts) {
        Some(text) => text,
        None => capture_editor_input_with_initial(&preferred_editor(config), current)?
            .ok_or(CliError::EmptyEditedContent)?,
    };

    session.dispatch(PanelAction::StartEdit(target))?;
    session.type_into(InputField::Edit, edited)?;
    session.dispatch(PanelAction::SaveEdit)?;

    println!("{normalized_id}");
    session.close().await
}
