//! Config schemas, one module per file under `data/config/`.

use std::path::{Path, PathBuf};

pub mod ownership;
pub mod telemetry;

/// Workspace `data/` directory, or the crate-local one when the crate is
/// built outside the workspace.
pub(crate) fn data_root() -> PathBuf {
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}
