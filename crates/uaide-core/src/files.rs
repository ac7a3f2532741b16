//! Reading and writing `.ua` source files.

use std::path::{Path, PathBuf};

use uaide_buffer::TextBuffer;

use crate::CoreResult;

/// Extension given to saved sources.
pub const SOURCE_EXTENSION: &str = "ua";

/// Appends `.ua` unless the path already ends in it.
///
/// An existing different extension is kept: `prog.txt` becomes `prog.txt.ua`.
pub fn with_source_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some_and(|e| e == SOURCE_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(SOURCE_EXTENSION);
    PathBuf::from(name)
}

/// Writes `text` byte-for-byte to `path` (with the source extension) and
/// returns the path actually written.
pub fn save_source(path: impl AsRef<Path>, text: &str) -> CoreResult<PathBuf> {
    let path = with_source_extension(path);
    TextBuffer::from(text).save_as(&path)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "source saved");
    Ok(path)
}

/// Reads a UTF-8 source file.
pub fn load_source(path: impl AsRef<Path>) -> CoreResult<String> {
    Ok(std::fs::read_to_string(path)?)
}
