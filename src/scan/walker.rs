use log::{debug, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{DocgenError, Result};
use crate::types::{SkippedFile, SourceBlob, SourceFile};

use super::filter::is_source_file;

/// Collect every allowed, non-blank text file under `root`.
///
/// Entries are visited sorted by file name so repeated runs see the same
/// order. Line endings are normalised to `\n`. Files that fail to read as
/// UTF-8 are skipped with a warning; only a failure to open `root` itself is
/// fatal.
pub fn collect_sources(root: &Path, extensions: &[String]) -> Result<SourceBlob> {
    let mut blob = SourceBlob::default();

    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(DocgenError::Walk(e)),
            Err(e) => {
                warn!("skip {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !is_source_file(path, extensions) {
            continue;
        }
        // Symlinked files are followed; symlinked directories are not descended.
        let is_file = if entry.path_is_symlink() {
            path.is_file()
        } else {
            entry.file_type().is_file()
        };
        if !is_file {
            continue;
        }

        let content = match read_text(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("skip {}: {}", path.display(), e);
                blob.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if content.trim().is_empty() {
            debug!("empty file {}", path.display());
            continue;
        }

        blob.files.push(SourceFile::new(relative_path(root, path), content));
    }

    Ok(blob)
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| DocgenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| DocgenError::Read {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e.utf8_error()),
    })?;
    Ok(normalize_newlines(text))
}

/// `\r\n` and lone `\r` become `\n`.
fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
