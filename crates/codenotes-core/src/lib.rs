//! codenotes-core - Core library for Code Notes
//!
//! This crate contains the note models, the host/panel message protocol, the
//! persisted key/value layer, the host controller, and the panel view engine
//! used by every Code Notes front end.

pub mod channel;
pub mod error;
pub mod host;
pub mod models;
pub mod panel;
pub mod protocol;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use host::{NotesHost, PanelState};
pub use models::{ChecklistItem, ItemId, Note, NoteId, Snapshot};
pub use protocol::{HostMessage, PanelMessage};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
