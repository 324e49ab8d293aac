use std::path::Path;

use crate::commands::common::text_from_args;
use crate::error::CliError;
use crate::session::Session;
use crate::terminal::{TerminalEditor, TerminalPrompts};

/// Add a note for `file:line` the way the editor command does, with that
/// location as the focused editor.
pub async fn run_note(
    file: &Path,
    line: u32,
    text_parts: &[String],
    store_path: &Path,
) -> Result<(), CliError> {
    let editor = TerminalEditor::new().with_active_file(file, line);
    let prompts = TerminalPrompts::new().answering(text_from_args(text_parts));

    let mut session = Session::open_with(store_path, editor, prompts)?;
    if let Some(id) = session.host_mut().add_file_note_from_editor()? {
        println!("{id}");
    }
    session.close().await
}
