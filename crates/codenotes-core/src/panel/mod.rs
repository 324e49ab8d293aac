//! Notes panel: view state engine, rendering, and the in-process runtime.

mod engine;
mod local;
mod markup;
mod runtime;
mod view;

pub use engine::{Applied, EditTarget, InputField, PanelAction, PanelEngine};
pub use local::LocalPanelService;
pub use markup::{render_document, render_region};
pub use runtime::PanelRuntime;
pub use view::{ChecklistRow, FileGroupView, NoteRow, PanelView, Region};
