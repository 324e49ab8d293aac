use std::path::Path;

use crate::commands::common::format_view_lines;
use crate::error::CliError;
use crate::session::Session;

pub async fn run_list(as_json: bool, store_path: &Path) -> Result<(), CliError> {
    let mut session = Session::open(store_path)?;
    let view = session.view()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for line in format_view_lines(&view) {
            println!("{line}");
        }
    }

    session.close().await
}
