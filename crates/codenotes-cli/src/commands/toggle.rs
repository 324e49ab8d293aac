use std::path::Path;

use codenotes_core::panel::{EditTarget, PanelAction};

use crate::commands::common::{normalize_note_identifier, resolve_target};
use crate::error::CliError;
use crate::session::Session;

pub async fn run_toggle(id: &str, store_path: &Path) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let mut session = Session::open(store_path)?;
    let snapshot = session.snapshot()?;

    let EditTarget::ChecklistItem(item_id) = resolve_target(&normalized_id, &snapshot)? else {
        return Err(CliError::NotAChecklistItem(normalized_id));
    };
    let checked = snapshot.item(item_id).is_some_and(|item| !item.checked);
    session.dispatch(PanelAction::SetChecked {
        id: item_id,
        checked,
    })?;

    let mark = if checked { "x" } else { " " };
    println!("[{mark}] {item_id}");
    session.close().await
}
