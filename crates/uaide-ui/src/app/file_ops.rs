use std::path::{Path, PathBuf};

use uaide_core::files::{self, SOURCE_EXTENSION};

/// Asks for a destination and writes `text` there as a `.ua` source.
///
/// Returns `Ok(None)` if the dialog was cancelled.
pub async fn save_as_dialog(text: String, suggested_name: String) -> Result<Option<PathBuf>, String> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Зберегти файл")
        .add_filter("Українські python-скрипти", &[SOURCE_EXTENSION])
        .set_file_name(&suggested_name)
        .save_file()
        .await;

    let Some(file) = handle else {
        tracing::debug!("save dialog cancelled");
        return Ok(None);
    };

    files::save_source(file.path(), &text)
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Reads the file given on the command line.
pub fn load_startup_file(path: &Path) -> Result<String, String> {
    files::load_source(path).map_err(|e| e.to_string())
}
