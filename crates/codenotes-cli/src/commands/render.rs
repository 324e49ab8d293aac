use std::path::Path;

use crate::error::CliError;
use crate::session::Session;

pub async fn run_render(output_path: Option<&Path>, store_path: &Path) -> Result<(), CliError> {
    let mut session = Session::open(store_path)?;
    let document = session.markup()?;

    if let Some(path) = output_path {
        std::fs::write(path, document)?;
        println!("{}", path.display());
    } else {
        println!("{document}");
    }

    session.close().await
}
