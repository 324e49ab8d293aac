//! Editor and prompt services backed by the terminal.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use codenotes_core::host::{
    ActiveContext, EditorService, Position, PromptService, Range, ViewColumn,
};
use codenotes_core::util::compact_text;
use codenotes_core::Error;

use crate::commands::common::launch_editor;

/// Where navigation left the caret, printed as `path:line:column`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    /// Zero-based caret position
    pub position: Position,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path.display(),
            self.position.line + 1,
            self.position.character + 1
        )
    }
}

#[derive(Debug)]
pub struct TerminalView {
    path: PathBuf,
    caret: Position,
}

/// Files on disk stand in for editor documents.
///
/// The active context is whatever the command line names. Revealing a range
/// records the location and, when an editor command is configured, opens the
/// file there.
#[derive(Debug, Default)]
pub struct TerminalEditor {
    active: Option<ActiveContext>,
    launch_with: Option<String>,
    last_location: Option<Location>,
    launch_error: Option<String>,
}

impl TerminalEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `path` at 1-based `line` as the focused editor.
    /// A path that does not exist on disk counts as an unsaved document.
    #[must_use]
    pub fn with_active_file(mut self, path: &Path, line: u32) -> Self {
        self.active = Some(ActiveContext {
            path: path.display().to_string(),
            line,
            is_untitled: !path.is_file(),
        });
        self
    }

    /// Open revealed files with `editor`
    #[must_use]
    pub fn launching(mut self, editor: String) -> Self {
        self.launch_with = Some(editor);
        self
    }

    pub const fn last_location(&self) -> Option<&Location> {
        self.last_location.as_ref()
    }

    pub fn launch_error(&self) -> Option<&str> {
        self.launch_error.as_deref()
    }
}

impl EditorService for TerminalEditor {
    type Document = PathBuf;
    type Editor = TerminalView;

    fn active_context(&self) -> Option<ActiveContext> {
        self.active.clone()
    }

    fn open_document(&mut self, path: &str) -> codenotes_core::Result<PathBuf> {
        let document = PathBuf::from(path);
        if document.is_file() {
            Ok(document)
        } else {
            Err(Error::NotFound(path.to_string()))
        }
    }

    fn show_document(
        &mut self,
        document: PathBuf,
        _column: ViewColumn,
    ) -> codenotes_core::Result<TerminalView> {
        Ok(TerminalView {
            path: document,
            caret: Position::new(0, 0),
        })
    }

    fn set_caret(&mut self, editor: &mut TerminalView, position: Position) {
        editor.caret = position;
    }

    fn reveal(&mut self, editor: &mut TerminalView, range: Range) {
        self.last_location = Some(Location {
            path: editor.path.clone(),
            position: editor.caret,
        });

        let Some(command) = self.launch_with.as_deref() else {
            return;
        };
        if let Err(error) = launch_editor(command, &editor.path, Some(range.start.line + 1)) {
            tracing::warn!("Failed to open {}: {error}", editor.path.display());
            self.launch_error = Some(error.to_string());
        }
    }
}

/// Info goes straight to stderr; errors are kept for the command to report.
#[derive(Debug, Default)]
pub struct TerminalPrompts {
    preset_input: Option<String>,
    errors: Vec<String>,
}

impl TerminalPrompts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next input box with `text` instead of reading stdin
    #[must_use]
    pub fn answering(mut self, text: Option<String>) -> Self {
        self.preset_input = text;
        self
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl PromptService for TerminalPrompts {
    fn show_info(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn show_error(&mut self, message: &str) {
        tracing::debug!("Host error prompt: {}", compact_text(message));
        self.errors.push(message.to_string());
    }

    fn show_input_box(&mut self, prompt: &str) -> Option<String> {
        if let Some(text) = self.preset_input.take() {
            return Some(text);
        }

        let stdin = io::stdin();
        if stdin.is_terminal() {
            eprint!("{prompt}: ");
            let _ = io::stderr().flush();
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(error) => {
                tracing::warn!("Failed to read input: {error}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_an_unsaved_context() {
        let dir = tempfile::tempdir().unwrap();
        let editor = TerminalEditor::new().with_active_file(&dir.path().join("draft.rs"), 3);
        let context = editor.active_context().unwrap();
        assert!(context.is_untitled);
        assert_eq!(context.line, 3);
    }

    #[test]
    fn existing_file_is_a_saved_context() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let editor = TerminalEditor::new().with_active_file(file.path(), 1);
        assert!(!editor.active_context().unwrap().is_untitled);
    }

    #[test]
    fn reveal_records_one_based_location() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().display().to_string();
        let mut editor = TerminalEditor::new();

        let document = editor.open_document(&path).unwrap();
        let mut view = editor.show_document(document, ViewColumn::One).unwrap();
        editor.set_caret(&mut view, Position::new(41, 0));
        editor.reveal(&mut view, Range::at(Position::new(41, 0)));

        let location = editor.last_location().unwrap();
        assert_eq!(location.to_string(), format!("{path}:42:1"));
    }

    #[test]
    fn open_missing_document_is_not_found() {
        let mut editor = TerminalEditor::new();
        let error = editor.open_document("/definitely/missing.ts").unwrap_err();
        assert!(matches!(error, Error::NotFound(path) if path == "/definitely/missing.ts"));
    }

    #[test]
    fn preset_input_answers_once() {
        let mut prompts = TerminalPrompts::new().answering(Some("fix bug".to_string()));
        assert_eq!(prompts.show_input_box("Note").as_deref(), Some("fix bug"));
        prompts.show_error("Could not open /missing.ts");
        assert_eq!(prompts.errors(), ["Could not open /missing.ts".to_string()]);
    }
}
