//! Services the editor host provides to the controller.

use crate::channel::HostEndpoint;
use crate::models::Snapshot;
use crate::Result;

/// Where a panel or document is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewColumn {
    /// The editor column that currently has focus
    Active,
    /// Next to the active column
    #[default]
    Beside,
    /// The first column
    One,
}

/// Panel creation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub title: String,
    pub column: ViewColumn,
    pub enable_scripts: bool,
    /// Keep the panel's state while it is hidden behind other tabs
    pub retain_context_when_hidden: bool,
}

impl Default for PanelSpec {
    fn default() -> Self {
        Self {
            title: "Code Notes".to_string(),
            column: ViewColumn::Beside,
            enable_scripts: true,
            retain_context_when_hidden: true,
        }
    }
}

/// Panel lifecycle operations.
///
/// `create` returns the host's end of the message channel. The panel's
/// messages and its dispose notification arrive on that endpoint.
pub trait PanelService {
    /// Create the panel, its content seeded with `initial`
    fn create(&mut self, spec: &PanelSpec, initial: Snapshot) -> Result<HostEndpoint>;

    /// Bring the panel to the front
    fn reveal(&mut self);

    /// Tear the panel down from the host side
    fn dispose(&mut self);
}

/// The focused editor, as seen when a command runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveContext {
    pub path: String,
    /// 1-based cursor line
    pub line: u32,
    /// The document has never been saved to disk
    pub is_untitled: bool,
}

/// Zero-based caret position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }
}

/// Document opening and caret navigation
pub trait EditorService {
    type Document;
    type Editor;

    /// The focused editable document, if any
    fn active_context(&self) -> Option<ActiveContext>;

    /// Open a document by path; [`Error::NotFound`](crate::Error::NotFound)
    /// when the file is gone
    fn open_document(&mut self, path: &str) -> Result<Self::Document>;

    fn show_document(&mut self, document: Self::Document, column: ViewColumn)
        -> Result<Self::Editor>;

    fn set_caret(&mut self, editor: &mut Self::Editor, position: Position);

    /// Scroll `range` into view
    fn reveal(&mut self, editor: &mut Self::Editor, range: Range);
}

/// User-facing prompts
pub trait PromptService {
    fn show_info(&mut self, message: &str);

    fn show_error(&mut self, message: &str);

    /// Ask for a line of text; `None` when cancelled
    fn show_input_box(&mut self, prompt: &str) -> Option<String>;
}
