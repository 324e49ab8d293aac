//! Host controller: persisted state, the single panel, and host-side actions.

use serde_json::Value;

use crate::channel::{HostEndpoint, PanelEvent};
use crate::models::{Note, NoteId, Snapshot};
use crate::protocol::{HostMessage, PanelMessage};
use crate::store::{append_note, load_snapshot, save_snapshot, KeyValueStore};
use crate::util::{compact_text, normalize_text};
use crate::{Error, Result};

use super::commands::{CommandRegistry, HostCommand};
use super::services::{
    ActiveContext, EditorService, PanelService, PanelSpec, Position, PromptService, Range,
    ViewColumn,
};

pub const NO_ACTIVE_EDITOR_MESSAGE: &str = "Open a file to attach a note.";
pub const UNSAVED_DOCUMENT_MESSAGE: &str = "Save the file before adding a note to it.";

/// Whether the panel exists after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Open,
    Closed,
}

/// A `goToLine` request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub file: String,
    /// 1-based line as sent by the panel; may be zero or negative
    pub line: i64,
}

impl NavigationTarget {
    /// Validate the loosely typed fields of a `goToLine` message
    pub fn parse(file: Option<String>, line: Option<&Value>) -> Result<Self> {
        let file = file
            .filter(|file| !file.is_empty())
            .ok_or_else(|| Error::InvalidNavigation("missing file".to_string()))?;
        let line = line.ok_or_else(|| Error::InvalidNavigation("missing line".to_string()))?;
        let line = line.as_i64().ok_or_else(|| {
            Error::InvalidNavigation(format!("line must be a number, got {line}"))
        })?;
        Ok(Self { file, line })
    }

    /// Zero-based caret position at the start of the line
    #[must_use]
    pub fn caret(&self) -> Position {
        let zero_based = self.line.saturating_sub(1).max(0);
        Position::new(u32::try_from(zero_based).unwrap_or(u32::MAX), 0)
    }
}

struct PanelHandle {
    endpoint: HostEndpoint,
}

/// Owns the persisted snapshot and the one permitted panel.
///
/// The panel reference is a two-state machine: `None` (closed) or
/// `Some` (open). It is only created by [`toggle_notes_panel`] or a
/// host-initiated file note, and only cleared by a toggle or the panel's
/// dispose notification.
///
/// [`toggle_notes_panel`]: NotesHost::toggle_notes_panel
pub struct NotesHost<S, P, E, U> {
    store: S,
    panels: P,
    editor: E,
    prompts: U,
    commands: CommandRegistry,
    spec: PanelSpec,
    panel: Option<PanelHandle>,
}

impl<S, P, E, U> NotesHost<S, P, E, U>
where
    S: KeyValueStore,
    P: PanelService,
    E: EditorService,
    U: PromptService,
{
    pub fn new(store: S, panels: P, editor: E, prompts: U) -> Self {
        Self {
            store,
            panels,
            editor,
            prompts,
            commands: CommandRegistry::with_defaults(),
            spec: PanelSpec::default(),
            panel: None,
        }
    }

    #[must_use]
    pub fn with_panel_spec(mut self, spec: PanelSpec) -> Self {
        self.spec = spec;
        self
    }

    pub const fn is_panel_open(&self) -> bool {
        self.panel.is_some()
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn panels(&self) -> &P {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut P {
        &mut self.panels
    }

    pub const fn editor(&self) -> &E {
        &self.editor
    }

    pub const fn prompts(&self) -> &U {
        &self.prompts
    }

    pub const fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Run a registered command by id
    pub fn run_command(&mut self, id: &str) -> Result<()> {
        let command = self.commands.resolve(id)?;
        tracing::debug!("Running command {id}");
        self.execute(command)
    }

    pub fn execute(&mut self, command: HostCommand) -> Result<()> {
        match command {
            HostCommand::ToggleNotesPanel => self.toggle_notes_panel().map(|_| ()),
            HostCommand::AddFileNote => self.add_file_note_from_editor().map(|_| ()),
        }
    }

    /// Open the panel when closed, close it when open
    pub fn toggle_notes_panel(&mut self) -> Result<PanelState> {
        if self.panel.is_some() {
            // Messages the panel posted before closing still count.
            self.process_pending()?;
            self.panel = None;
            self.panels.dispose();
            tracing::info!("Notes panel closed");
            return Ok(PanelState::Closed);
        }

        let snapshot = self.load()?;
        self.open_panel(snapshot)?;
        Ok(PanelState::Open)
    }

    /// Read the cursor position from the editor, ask for the note text, and
    /// attach the note.
    pub fn add_file_note_from_editor(&mut self) -> Result<Option<NoteId>> {
        let context = self.editor.active_context();
        let Some(context) = self.usable_context(context) else {
            return Ok(None);
        };

        let prompt = format!("Note for line {}", context.line);
        let Some(text) = self.prompts.show_input_box(&prompt) else {
            tracing::debug!("File note input cancelled");
            return Ok(None);
        };
        self.add_file_note_from_active_context(Some(context), &text)
    }

    /// Append a file note for `context` to the persisted collection and make
    /// sure the panel shows it.
    ///
    /// Without a usable context the user gets an informational prompt; blank
    /// text is ignored. Returns the new note's id when one was added.
    pub fn add_file_note_from_active_context(
        &mut self,
        context: Option<ActiveContext>,
        text: &str,
    ) -> Result<Option<NoteId>> {
        let Some(context) = self.usable_context(context) else {
            return Ok(None);
        };
        let Some(text) = normalize_text(text) else {
            return Ok(None);
        };

        let note = Note::file_note(text, context.path, context.line.max(1));
        let id = note.id;
        let snapshot = self.persist("save notes", |store| append_note(store, note))?;
        tracing::info!("Added file note {id}");

        self.show_snapshot(snapshot)?;
        Ok(Some(id))
    }

    /// Handle one message from the panel.
    ///
    /// Navigation problems are reported to the user and are not errors; only
    /// store failures come back as `Err`.
    pub fn on_panel_message(&mut self, message: PanelMessage) -> Result<()> {
        tracing::debug!("Host received {}", message.command());
        match message {
            PanelMessage::SaveNotes { notes, checklist } => {
                let snapshot = Snapshot::new(notes, checklist);
                self.persist("save notes", |store| save_snapshot(store, &snapshot))
            }
            PanelMessage::GoToLine { file, line } => {
                self.go_to_line(file, line.as_ref());
                Ok(())
            }
            PanelMessage::AddFileNote { text, file, line } => {
                let Some(text) = normalize_text(&text) else {
                    return Ok(());
                };
                if file.is_empty() {
                    return Ok(());
                }
                let snapshot = self.persist("save notes", |store| {
                    append_note(store, Note::file_note(text, file, line))
                })?;
                self.post_update(&snapshot);
                Ok(())
            }
        }
    }

    pub fn handle_event(&mut self, event: PanelEvent) -> Result<()> {
        match event {
            PanelEvent::Message(message) => self.on_panel_message(message),
            PanelEvent::Disposed => {
                if self.panel.take().is_some() {
                    tracing::info!("Notes panel disposed");
                }
                Ok(())
            }
        }
    }

    /// Handle every event the panel has queued, without waiting.
    /// Returns how many were handled.
    pub fn process_pending(&mut self) -> Result<usize> {
        let mut handled = 0;
        while let Some(event) = self.panel.as_mut().and_then(|panel| panel.endpoint.try_next()) {
            self.handle_event(event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Handle panel events as they arrive until the panel goes away
    pub async fn run_until_closed(&mut self) -> Result<()> {
        while let Some(panel) = self.panel.as_mut() {
            let event = panel.endpoint.next().await;
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn go_to_line(&mut self, file: Option<String>, line: Option<&Value>) {
        let target = match NavigationTarget::parse(file, line) {
            Ok(target) => target,
            Err(error) => {
                tracing::warn!("Rejected goToLine: {error}");
                self.prompts.show_error(&format!("Cannot go to line: {error}"));
                return;
            }
        };

        if let Err(error) = self.reveal_target(&target) {
            tracing::warn!("Navigation to {}:{} failed: {error}", target.file, target.line);
            let message = match error {
                Error::NotFound(path) => format!(
                    "Could not open {}. The file may have been moved or deleted.",
                    compact_text(&path)
                ),
                other => format!("Could not open {}: {other}", compact_text(&target.file)),
            };
            self.prompts.show_error(&message);
        }
    }

    fn reveal_target(&mut self, target: &NavigationTarget) -> Result<()> {
        let document = self.editor.open_document(&target.file)?;
        let mut editor = self.editor.show_document(document, ViewColumn::One)?;
        let caret = target.caret();
        self.editor.set_caret(&mut editor, caret);
        self.editor.reveal(&mut editor, Range::at(caret));
        Ok(())
    }

    fn usable_context(&mut self, context: Option<ActiveContext>) -> Option<ActiveContext> {
        let Some(context) = context else {
            self.prompts.show_info(NO_ACTIVE_EDITOR_MESSAGE);
            return None;
        };
        if context.is_untitled {
            self.prompts.show_info(UNSAVED_DOCUMENT_MESSAGE);
            return None;
        }
        Some(context)
    }

    fn open_panel(&mut self, snapshot: Snapshot) -> Result<()> {
        let endpoint = self.panels.create(&self.spec, snapshot)?;
        self.panel = Some(PanelHandle { endpoint });
        tracing::info!("Notes panel opened");
        Ok(())
    }

    /// Bring the panel up to date with `snapshot`, opening it if needed
    fn show_snapshot(&mut self, snapshot: Snapshot) -> Result<()> {
        if self.panel.is_some() {
            self.panels.reveal();
            if self.post_update(&snapshot) {
                return Ok(());
            }
        }
        self.open_panel(snapshot)
    }

    /// Push `snapshot` to an open panel; returns whether it was delivered
    fn post_update(&mut self, snapshot: &Snapshot) -> bool {
        let Some(panel) = self.panel.as_ref() else {
            return false;
        };
        if panel.endpoint.post(HostMessage::update(snapshot)).is_ok() {
            return true;
        }
        tracing::warn!("Panel went away without a dispose notification");
        self.panel = None;
        false
    }

    fn load(&mut self) -> Result<Snapshot> {
        self.persist("load notes", |store| load_snapshot(store))
    }

    /// Run a store operation; a failure is logged and shown as
    /// "Failed to {action}: ..."
    fn persist<T>(
        &mut self,
        action: &str,
        operation: impl FnOnce(&mut S) -> Result<T>,
    ) -> Result<T> {
        operation(&mut self.store).map_err(|error| {
            tracing::error!("Failed to {action}: {error}");
            self.prompts.show_error(&format!(
                "Failed to {action}: {}",
                compact_text(&error.to_string())
            ));
            error
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::host::commands::{ADD_FILE_NOTE, OPEN_NOTES_PANEL};
    use crate::models::ChecklistItem;
    use crate::panel::{EditTarget, InputField, LocalPanelService, PanelAction};
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Default)]
    struct FakeEditor {
        files: HashSet<String>,
        active: Option<ActiveContext>,
        shown: Vec<String>,
        caret: Option<Position>,
        revealed: Option<Range>,
    }

    impl FakeEditor {
        fn with_files(files: &[&str]) -> Self {
            Self {
                files: files.iter().map(ToString::to_string).collect(),
                ..Self::default()
            }
        }
    }

    impl EditorService for FakeEditor {
        type Document = String;
        type Editor = String;

        fn active_context(&self) -> Option<ActiveContext> {
            self.active.clone()
        }

        fn open_document(&mut self, path: &str) -> Result<String> {
            if self.files.contains(path) {
                Ok(path.to_string())
            } else {
                Err(Error::NotFound(path.to_string()))
            }
        }

        fn show_document(&mut self, document: String, _column: ViewColumn) -> Result<String> {
            self.shown.push(document.clone());
            Ok(document)
        }

        fn set_caret(&mut self, _editor: &mut String, position: Position) {
            self.caret = Some(position);
        }

        fn reveal(&mut self, _editor: &mut String, range: Range) {
            self.revealed = Some(range);
        }
    }

    #[derive(Default)]
    struct RecordingPrompts {
        infos: Vec<String>,
        errors: Vec<String>,
        answers: Vec<Option<String>>,
    }

    impl PromptService for RecordingPrompts {
        fn show_info(&mut self, message: &str) {
            self.infos.push(message.to_string());
        }

        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn show_input_box(&mut self, _prompt: &str) -> Option<String> {
            if self.answers.is_empty() {
                None
            } else {
                self.answers.remove(0)
            }
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<Value>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: Value) -> Result<()> {
            Err(Error::Store("disk full".to_string()))
        }
    }

    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<Value>> {
            Err(Error::Store(format!("cannot read {key}")))
        }

        fn set(&mut self, _key: &str, _value: Value) -> Result<()> {
            Ok(())
        }
    }

    type TestHost = NotesHost<MemoryStore, LocalPanelService, FakeEditor, RecordingPrompts>;

    fn host_with(editor: FakeEditor) -> TestHost {
        NotesHost::new(
            MemoryStore::new(),
            LocalPanelService::new(),
            editor,
            RecordingPrompts::default(),
        )
    }

    fn context(path: &str, line: u32) -> Option<ActiveContext> {
        Some(ActiveContext {
            path: path.to_string(),
            line,
            is_untitled: false,
        })
    }

    fn stored(host: &mut TestHost) -> Snapshot {
        load_snapshot(&mut host.store).unwrap()
    }

    fn dispatch(host: &mut TestHost, action: PanelAction) {
        host.panels_mut()
            .runtime_mut()
            .expect("panel open")
            .dispatch(action)
            .unwrap();
        host.process_pending().unwrap();
    }

    fn type_into(host: &mut TestHost, field: InputField, text: &str) {
        dispatch(
            host,
            PanelAction::Input {
                field,
                text: text.to_string(),
            },
        );
    }

    #[test]
    fn toggle_opens_then_closes() {
        let mut host = host_with(FakeEditor::default());
        assert_eq!(host.toggle_notes_panel().unwrap(), PanelState::Open);
        assert!(host.is_panel_open());
        assert_eq!(host.panels().spec(), Some(&PanelSpec::default()));

        assert_eq!(host.toggle_notes_panel().unwrap(), PanelState::Closed);
        assert!(!host.is_panel_open());
        assert!(!host.panels().is_open());
    }

    #[test]
    fn panel_opens_with_persisted_snapshot() {
        let mut host = host_with(FakeEditor::default());
        let snapshot = Snapshot::new(vec![Note::personal("buy milk")], Vec::new());
        save_snapshot(&mut host.store, &snapshot).unwrap();

        host.run_command(OPEN_NOTES_PANEL).unwrap();
        let runtime = host.panels().runtime().unwrap();
        assert_eq!(runtime.engine().snapshot(), &snapshot);
    }

    #[test]
    fn user_dispose_clears_reference() {
        let mut host = host_with(FakeEditor::default());
        host.toggle_notes_panel().unwrap();

        assert!(host.panels_mut().close_by_user());
        host.process_pending().unwrap();
        assert!(!host.is_panel_open());

        assert_eq!(host.toggle_notes_panel().unwrap(), PanelState::Open);
    }

    #[test]
    fn panel_edits_persist_through_save_messages() {
        let mut host = host_with(FakeEditor::default());
        host.toggle_notes_panel().unwrap();

        type_into(&mut host, InputField::NewPersonalNote, "buy milk");
        dispatch(&mut host, PanelAction::AddPersonalNote);
        type_into(&mut host, InputField::NewChecklistItem, "write tests");
        dispatch(&mut host, PanelAction::AddChecklistItem);

        let snapshot = stored(&mut host);
        assert_eq!(snapshot.notes[0].text, "buy milk");
        assert_eq!(snapshot.checklist[0].text, "write tests");
        assert_eq!(
            &snapshot,
            host.panels().runtime().unwrap().engine().snapshot()
        );
    }

    #[test]
    fn add_file_note_without_context_shows_info() {
        let mut host = host_with(FakeEditor::default());
        assert_eq!(host.add_file_note_from_active_context(None, "fix bug").unwrap(), None);
        assert_eq!(host.prompts().infos, vec![NO_ACTIVE_EDITOR_MESSAGE]);
        assert!(!host.is_panel_open());
    }

    #[test]
    fn add_file_note_to_untitled_document_shows_info() {
        let mut host = host_with(FakeEditor::default());
        let untitled = Some(ActiveContext {
            path: "Untitled-1".to_string(),
            line: 1,
            is_untitled: true,
        });
        assert_eq!(host.add_file_note_from_active_context(untitled, "fix bug").unwrap(), None);
        assert_eq!(host.prompts().infos, vec![UNSAVED_DOCUMENT_MESSAGE]);
        assert!(stored(&mut host).notes.is_empty());
    }

    #[test]
    fn add_file_note_opens_closed_panel_with_note() {
        let mut host = host_with(FakeEditor::default());
        let id = host
            .add_file_note_from_active_context(context("/a/b.ts", 42), " fix bug ")
            .unwrap()
            .unwrap();

        assert!(host.is_panel_open());
        let view = host.panels().runtime().unwrap().view();
        assert_eq!(view.file_groups.len(), 1);
        assert_eq!(view.file_groups[0].file, "/a/b.ts");
        assert_eq!(view.file_groups[0].rows[0].line, Some(42));
        assert_eq!(view.file_groups[0].rows[0].text, "fix bug");
        assert_eq!(stored(&mut host).notes[0].id, id);
    }

    #[test]
    fn add_file_note_updates_open_panel() {
        let mut host = host_with(FakeEditor::default());
        host.toggle_notes_panel().unwrap();

        host.add_file_note_from_active_context(context("/a/b.ts", 7), "fix bug")
            .unwrap();
        assert_eq!(host.panels().reveal_count(), 1);

        let runtime = host.panels_mut().runtime_mut().unwrap();
        runtime.sync_inbound();
        assert_eq!(runtime.engine().snapshot().notes[0].line, Some(7));
    }

    #[test]
    fn blank_file_note_text_is_ignored() {
        let mut host = host_with(FakeEditor::default());
        assert_eq!(
            host.add_file_note_from_active_context(context("/a/b.ts", 1), "   ")
                .unwrap(),
            None
        );
        assert!(host.prompts().infos.is_empty());
        assert!(!host.is_panel_open());
    }

    #[test]
    fn add_file_note_command_uses_editor_and_prompt() {
        let mut editor = FakeEditor::default();
        editor.active = context("/src/main.rs", 12);
        let mut host = host_with(editor);
        host.prompts.answers.push(Some("check this".to_string()));

        host.run_command(ADD_FILE_NOTE).unwrap();
        let note = &stored(&mut host).notes[0];
        assert_eq!(note.file.as_deref(), Some("/src/main.rs"));
        assert_eq!(note.line, Some(12));

        host.run_command(ADD_FILE_NOTE).unwrap();
        assert_eq!(stored(&mut host).notes.len(), 1);
    }

    #[test]
    fn go_to_line_moves_caret_to_zero_based_line() {
        let mut host = host_with(FakeEditor::with_files(&["/a/b.ts"]));
        host.on_panel_message(PanelMessage::go_to_line("/a/b.ts", 42))
            .unwrap();

        assert_eq!(host.editor().shown, vec!["/a/b.ts"]);
        assert_eq!(host.editor().caret, Some(Position::new(41, 0)));
        assert_eq!(host.editor().revealed, Some(Range::at(Position::new(41, 0))));
        assert!(host.prompts().errors.is_empty());
    }

    #[test]
    fn go_to_line_clamps_to_first_line() {
        let mut host = host_with(FakeEditor::with_files(&["/a.ts"]));
        host.on_panel_message(PanelMessage::GoToLine {
            file: Some("/a.ts".to_string()),
            line: Some(json!(0)),
        })
        .unwrap();
        assert_eq!(host.editor().caret, Some(Position::new(0, 0)));
    }

    #[test]
    fn go_to_missing_file_reports_error_without_state_change() {
        let mut host = host_with(FakeEditor::default());
        let snapshot = Snapshot::new(vec![Note::file_note("x", "/missing.ts", 1)], Vec::new());
        save_snapshot(&mut host.store, &snapshot).unwrap();

        host.on_panel_message(PanelMessage::go_to_line("/missing.ts", 1))
            .unwrap();
        assert_eq!(host.prompts().errors.len(), 1);
        assert!(host.prompts().errors[0].contains("/missing.ts"));
        assert_eq!(stored(&mut host), snapshot);
        assert_eq!(host.editor().caret, None);
    }

    #[test]
    fn malformed_go_to_line_reports_error() {
        let mut host = host_with(FakeEditor::with_files(&["/a.ts"]));
        host.on_panel_message(PanelMessage::GoToLine {
            file: Some("/a.ts".to_string()),
            line: Some(json!("ten")),
        })
        .unwrap();
        host.on_panel_message(PanelMessage::GoToLine {
            file: None,
            line: Some(json!(3)),
        })
        .unwrap();

        assert_eq!(host.prompts().errors.len(), 2);
        assert_eq!(host.editor().caret, None);
    }

    #[test]
    fn panel_requested_file_note_round_trips() {
        let mut host = host_with(FakeEditor::default());
        host.toggle_notes_panel().unwrap();

        dispatch(
            &mut host,
            PanelAction::RequestFileNote {
                text: "fix bug".to_string(),
                file: "/a/b.ts".to_string(),
                line: 42,
            },
        );

        assert_eq!(stored(&mut host).notes.len(), 1);
        let runtime = host.panels_mut().runtime_mut().unwrap();
        runtime.sync_inbound();
        assert_eq!(runtime.view().file_groups[0].rows[0].text, "fix bug");
    }

    #[test]
    fn store_failure_is_reported_and_returned() {
        let mut host = NotesHost::new(
            FailingStore,
            LocalPanelService::new(),
            FakeEditor::default(),
            RecordingPrompts::default(),
        );
        let error = host
            .on_panel_message(PanelMessage::save(&Snapshot::default()))
            .unwrap_err();

        assert!(matches!(error, Error::Store(_)));
        assert_eq!(host.prompts().errors.len(), 1);
        assert!(host.prompts().errors[0].starts_with("Failed to save notes:"));
    }

    #[test]
    fn scenario_personal_file_and_checklist() {
        let mut host = host_with(FakeEditor::default());
        host.toggle_notes_panel().unwrap();

        type_into(&mut host, InputField::NewPersonalNote, "buy milk");
        dispatch(&mut host, PanelAction::AddPersonalNote);
        host.add_file_note_from_active_context(context("/a/b.ts", 42), "fix bug")
            .unwrap();
        type_into(&mut host, InputField::NewChecklistItem, "write tests");
        dispatch(&mut host, PanelAction::AddChecklistItem);

        let view = host.panels().runtime().unwrap().view();
        assert_eq!(view.personal_notes.len(), 1);
        assert_eq!(view.personal_notes[0].text, "buy milk");
        assert_eq!(view.file_groups[0].file, "/a/b.ts");
        assert_eq!(view.file_groups[0].rows[0].line, Some(42));

        let item_id = view.checklist[0].id;
        dispatch(
            &mut host,
            PanelAction::SetChecked {
                id: item_id,
                checked: true,
            },
        );
        assert!(stored(&mut host).checklist[0].checked);
        dispatch(&mut host, PanelAction::ClearCompleted);
        assert_eq!(stored(&mut host).checklist, Vec::<ChecklistItem>::new());

        host.on_panel_message(PanelMessage::go_to_line("/missing.ts", 1))
            .unwrap();
        assert_eq!(host.prompts().errors.len(), 1);

        let milk_id = view.personal_notes[0].id;
        dispatch(&mut host, PanelAction::StartEdit(EditTarget::Note(milk_id)));
        type_into(&mut host, InputField::Edit, "");
        dispatch(&mut host, PanelAction::SaveEdit);
        assert_eq!(stored(&mut host).note(milk_id).unwrap().text, "buy milk");
        assert_eq!(stored(&mut host).notes.len(), 2);
    }

    #[test]
    fn malformed_stored_line_opens_as_personal_note() {
        let mut host = host_with(FakeEditor::default());
        host.store
            .set(
                crate::store::NOTES_KEY,
                json!([
                    { "text": "buy milk" },
                    { "text": "odd", "file": "/a.ts", "line": "12" }
                ]),
            )
            .unwrap();

        assert_eq!(host.toggle_notes_panel().unwrap(), PanelState::Open);
        let view = host.panels().runtime().unwrap().view();
        let personal = view
            .personal_notes
            .iter()
            .map(|row| row.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(personal, vec!["buy milk", "odd"]);
        assert!(view.file_groups.is_empty());
        assert!(host.prompts().errors.is_empty());
    }

    #[test]
    fn toggle_close_handles_messages_already_posted() {
        let mut host = host_with(FakeEditor::default());
        host.toggle_notes_panel().unwrap();

        let runtime = host.panels_mut().runtime_mut().unwrap();
        runtime
            .dispatch(PanelAction::Input {
                field: InputField::NewPersonalNote,
                text: "buy milk".to_string(),
            })
            .unwrap();
        runtime.dispatch(PanelAction::AddPersonalNote).unwrap();

        assert_eq!(host.toggle_notes_panel().unwrap(), PanelState::Closed);
        assert!(!host.is_panel_open());
        assert_eq!(stored(&mut host).notes[0].text, "buy milk");
    }

    #[test]
    fn store_read_failure_is_reported_as_load_error() {
        let mut host = NotesHost::new(
            UnreadableStore,
            LocalPanelService::new(),
            FakeEditor::default(),
            RecordingPrompts::default(),
        );
        let error = host.toggle_notes_panel().unwrap_err();

        assert!(matches!(error, Error::Store(_)));
        assert!(!host.is_panel_open());
        assert_eq!(host.prompts().errors.len(), 1);
        assert!(host.prompts().errors[0].starts_with("Failed to load notes:"));
    }

    #[tokio::test]
    async fn run_until_closed_handles_events_until_dispose() {
        let mut host = host_with(FakeEditor::default());
        host.toggle_notes_panel().unwrap();

        let panels = host.panels_mut();
        let runtime = panels.runtime_mut().unwrap();
        runtime
            .dispatch(PanelAction::Input {
                field: InputField::NewPersonalNote,
                text: "buy milk".to_string(),
            })
            .unwrap();
        runtime.dispatch(PanelAction::AddPersonalNote).unwrap();
        panels.close_by_user();

        host.run_until_closed().await.unwrap();
        assert!(!host.is_panel_open());
        assert_eq!(stored(&mut host).notes[0].text, "buy milk");
    }
}
