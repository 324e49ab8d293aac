use std::path::Path;

use codenotes_core::panel::{EditTarget, PanelAction};

use crate::commands::common::{normalize_note_identifier, resolve_target};
use crate::error::CliError;
use crate::session::Session;

pub async fn run_delete(id: &str, store_path: &Path) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let mut session = Session::open(store_path)?;
    let snapshot = session.snapshot()?;

    let deleted = match resolve_target(&normalized_id, &snapshot)? {
        EditTarget::Note(note_id) => {
            session.dispatch(PanelAction::DeleteNote(note_id))?;
            note_id.to_string()
        }
        EditTarget::ChecklistItem(item_id) => {
            session.dispatch(PanelAction::DeleteChecklistItem(item_id))?;
            item_id.to_string()
        }
    };

    println!("{deleted}");
    session.close().await
}
