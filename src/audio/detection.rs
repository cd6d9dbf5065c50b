use std::path::Path;

/// Check if a file name ends with `.<extension>` (ASCII case-insensitive)
pub fn has_target_extension(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    name.len() >= suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix))
}

/// Check if a file is one of our own temporary outputs
pub fn is_temp_file(path: &Path, temp_prefix: &str) -> bool {
    !temp_prefix.is_empty()
        && path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with(temp_prefix))
}

/// Check if a file should be handed to the encoder
pub fn is_reencode_target(path: &Path, extension: &str, temp_prefix: &str) -> bool {
    has_target_extension(path, extension) && !is_temp_file(path, temp_prefix)
}
