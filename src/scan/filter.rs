use std::path::Path;

/// Case-insensitive match of the final suffix against the allow-list.
///
/// Files with no suffix never match, and neither do bare dot-files such as
/// `.py`, whose whole name is the stem.
pub fn is_source_file(path: &Path, extensions: &[String]) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext,
        None => return false,
    };
    let suffix = format!(".{}", ext.to_lowercase());
    extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&suffix))
}
