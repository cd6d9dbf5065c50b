//! Temporary output paths and atomic replacement of originals

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::BatchError;

/// Sibling path the encoder writes to before the original is replaced
///
/// `kits/default/kick.wav` with prefix `temp_` becomes `kits/default/temp_kick.wav`.
pub fn temp_path_for(original: &Path, temp_prefix: &str) -> PathBuf {
    let mut temp_name = OsString::from(temp_prefix);
    if let Some(file_name) = original.file_name() {
        temp_name.push(file_name);
    }
    original.with_file_name(temp_name)
}

/// Move `staged` over `original` with a single rename
///
/// Both paths are in the same directory, so the rename never crosses a
/// filesystem and the original is never observed missing.
pub fn replace_original(staged: &Path, original: &Path) -> Result<(), BatchError> {
    fs::rename(staged, original).map_err(|source| BatchError::Replace {
        from: staged.to_path_buf(),
        to: original.to_path_buf(),
        source,
    })
}
