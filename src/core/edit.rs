//! External editor invocation.
//!
//! Used for the check-in comment prompt and the auto-sync control file.
//! Honors `$EDITOR`, falling back to `vi`.

use std::path::Path;
use std::process::Command;

use crate::core::error::{ClearNavError, Result};

const DEFAULT_EDITOR: &str = "vi";

/// The editor command to invoke, from `$EDITOR` or the fallback.
pub fn editor() -> String {
    std::env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string())
}

/// Open `file` in the user's editor and wait for it to close.
pub fn edit_file(file: &Path) -> Result<()> {
    run_editor(&editor(), file)
}

fn run_editor(editor: &str, file: &Path) -> Result<()> {
    log::debug!("EDITING: {editor} {}", file.display());
    let status = Command::new(editor)
        .arg(file)
        .status()
        .map_err(|e| ClearNavError::tool_spawn(editor, e))?;
    if !status.success() {
        return Err(ClearNavError::editor_failed(editor));
    }
    Ok(())
}
