use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use codenotes_core::panel::{EditTarget, PanelView};
use codenotes_core::util::normalize_text;
use codenotes_core::Snapshot;

use crate::config::CliConfig;
use crate::error::CliError;

const SHORT_ID_LEN: usize = 13;

pub fn resolve_store_path(
    cli_store_path: Option<PathBuf>,
    config: &CliConfig,
) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_store_path
        .or_else(|| env::var_os("CODENOTES_STORE").map(PathBuf::from))
        .or_else(|| config.store_path.clone())
    {
        return Ok(path);
    }
    default_store_path()
}

pub fn default_store_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("codenotes").join("notes.json"))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI data directory".to_string()))
}

pub fn preferred_editor(config: &CliConfig) -> String {
    config
        .editor()
        .or_else(|| env::var("VISUAL").ok())
        .or_else(|| env::var("EDITOR").ok())
        .unwrap_or_else(|| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

/// Text from arguments, then piped stdin, then the editor
pub fn resolve_text(parts: &[String], config: &CliConfig) -> Result<String, CliError> {
    if let Some(text) = text_from_args(parts) {
        return Ok(text);
    }

    if let Some(text) = read_piped_stdin()? {
        return Ok(text);
    }

    if let Some(text) = capture_editor_input_with_initial(&preferred_editor(config), "")? {
        return Ok(text);
    }

    Err(CliError::EmptyContent)
}

pub fn text_from_args(parts: &[String]) -> Option<String> {
    normalize_text(&parts.join(" "))
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_text(&buffer))
}

pub fn capture_editor_input_with_initial(
    editor: &str,
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(editor, &temp_file, None);
    let content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_text(&content))
}

/// Run `editor` on `file_path`, optionally at a 1-based line (`+N`).
///
/// An editor value with arguments (`code --wait`) is split on whitespace
/// when it does not name an executable as a whole.
pub fn launch_editor(editor: &str, file_path: &Path, line: Option<u32>) -> Result<(), CliError> {
    let line_arg = line.map(|line| format!("+{line}"));

    let status = match Command::new(editor)
        .args(line_arg.as_deref())
        .arg(file_path)
        .status()
    {
        Ok(status) => status,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            Command::new(program)
                .args(parts)
                .args(line_arg.as_deref())
                .arg(file_path)
                .status()?
        }
        Err(err) => return Err(CliError::Io(err)),
    };

    if status.success() {
        Ok(())
    } else {
        Err(CliError::EditorFailed(format!(
            "`{editor}` exited with status {status}"
        )))
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("codenotes-{}-{now}.md", std::process::id()))
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

/// Find the note or checklist item whose id is `query` or starts with it
pub fn resolve_target(query: &str, snapshot: &Snapshot) -> Result<EditTarget, CliError> {
    let candidates = snapshot
        .notes
        .iter()
        .map(|note| (note.id.to_string(), EditTarget::Note(note.id)))
        .chain(
            snapshot
                .checklist
                .iter()
                .map(|item| (item.id.to_string(), EditTarget::ChecklistItem(item.id))),
        )
        .collect::<Vec<_>>();

    if let Some((_, target)) = candidates.iter().find(|(id, _)| id == query) {
        return Ok(*target);
    }

    let matching = candidates
        .iter()
        .filter(|(id, _)| id.starts_with(query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::NoteNotFound(query.to_string())),
        [(_, target)] => Ok(*target),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|(id, _)| short_id(id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

/// Current text of the note or item `target` names
pub fn target_text(snapshot: &Snapshot, target: EditTarget) -> Option<&str> {
    match target {
        EditTarget::Note(id) => snapshot.note(id).map(|note| note.text.as_str()),
        EditTarget::ChecklistItem(id) => snapshot.item(id).map(|item| item.text.as_str()),
    }
}

pub fn format_view_lines(view: &PanelView) -> Vec<String> {
    let mut lines = vec!["My Notes".to_string()];
    if view.personal_notes.is_empty() {
        lines.push("  (none)".to_string());
    }
    for row in &view.personal_notes {
        lines.push(format!("  {:<13}  {}", short_id(&row.id.to_string()), row.text));
    }

    lines.push("File Notes".to_string());
    if view.file_groups.is_empty() {
        lines.push("  (none)".to_string());
    }
    for group in &view.file_groups {
        lines.push(format!("  {}", group.file));
        for row in &group.rows {
            let line = row.line.map_or_else(String::new, |line| format!("Line {line}"));
            lines.push(format!(
                "    {:<13}  {line:<10}  {}",
                short_id(&row.id.to_string()),
                row.text
            ));
        }
    }

    lines.push("Checklist".to_string());
    if view.checklist.is_empty() {
        lines.push("  (none)".to_string());
    }
    for row in &view.checklist {
        let mark = if row.checked { "x" } else { " " };
        lines.push(format!(
            "  {:<13}  [{mark}] {}",
            short_id(&row.id.to_string()),
            row.text
        ));
    }

    lines
}
