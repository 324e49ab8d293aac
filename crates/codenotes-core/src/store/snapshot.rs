//! Loading and saving the notes snapshot through a key/value store

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::KeyValueStore;
use crate::models::{Note, Snapshot};
use crate::Result;

/// Store key holding the notes collection
pub const NOTES_KEY: &str = "notes";
/// Store key holding the checklist collection
pub const CHECKLIST_KEY: &str = "checklist";

/// Load both collections, empty when never written.
///
/// Records stored without an id are given one, and the collection is written
/// back so the ids stay stable across loads.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Snapshot> {
    let (notes, notes_missing_ids) = load_collection::<Note, S>(&*store, NOTES_KEY)?;
    let (checklist, checklist_missing_ids) = load_collection(&*store, CHECKLIST_KEY)?;
    let snapshot = Snapshot::new(notes, checklist);

    if notes_missing_ids || checklist_missing_ids {
        tracing::info!("Assigning ids to stored records written without them");
        save_snapshot(store, &snapshot)?;
    }

    Ok(snapshot)
}

/// Overwrite both collections in one store write.
pub fn save_snapshot<S: KeyValueStore + ?Sized>(store: &mut S, snapshot: &Snapshot) -> Result<()> {
    store.set_many(vec![
        (NOTES_KEY, serde_json::to_value(&snapshot.notes)?),
        (CHECKLIST_KEY, serde_json::to_value(&snapshot.checklist)?),
    ])
}

/// Append one note to the stored collection and return the updated snapshot.
pub fn append_note<S: KeyValueStore + ?Sized>(store: &mut S, note: Note) -> Result<Snapshot> {
    let mut snapshot = load_snapshot(store)?;
    snapshot.notes.push(note);
    store.set(NOTES_KEY, serde_json::to_value(&snapshot.notes)?)?;
    Ok(snapshot)
}

fn load_collection<T, S>(store: &S, key: &str) -> Result<(Vec<T>, bool)>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(value) = store.get(key)? else {
        return Ok((Vec::new(), false));
    };

    let missing_ids = value
        .as_array()
        .is_some_and(|records| records.iter().any(|record| record.get("id").is_none()));
    let records = match value {
        Value::Null => Vec::new(),
        value => serde_json::from_value(value)?,
    };
    Ok((records, missing_ids))
}
