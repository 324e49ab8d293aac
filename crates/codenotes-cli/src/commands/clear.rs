use std::path::Path;

use codenotes_core::panel::PanelAction;

use crate::error::CliError;
use crate::session::Session;

pub async fn run_clear_completed(store_path: &Path) -> Result<(), CliError> {
    let mut session = Session::open(store_path)?;
    let before = session.snapshot()?.checklist.len();
    session.dispatch(PanelAction::ClearCompleted)?;
    let removed = before - session.snapshot()?.checklist.len();

    println!("Cleared {removed} completed item(s)");
    session.close().await
}
