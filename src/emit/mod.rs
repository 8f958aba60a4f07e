use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DocgenError, Result};

/// Replace `path` with exactly `content`.
///
/// Writes a uniquely named temp file next to the target and renames it into
/// place, so an interrupted write never leaves a truncated document behind.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let to_err = |source: std::io::Error| DocgenError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(to_err)?;
            parent
        }
        None => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(to_err)?;
    temp.write_all(content.as_bytes()).map_err(to_err)?;
    temp.persist(path).map_err(|e| to_err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FINAL_DOC.md");

        write_output(&path, "FINAL").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "FINAL");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FINAL_DOC.md");
        fs::write(&path, "a much longer previous document").unwrap();

        write_output(&path, "FINAL").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "FINAL");
    }

    #[test]
    fn test_leaves_neighbouring_tmp_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let neighbour = dir.path().join("FINAL_DOC.tmp");
        fs::write(&neighbour, "user notes").unwrap();

        write_output(&dir.path().join("FINAL_DOC.md"), "FINAL").unwrap();
        assert_eq!(fs::read_to_string(&neighbour).unwrap(), "user notes");
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs/out/FINAL_DOC.md");

        write_output(&path, "").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_write_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = write_output(&blocker.join("FINAL_DOC.md"), "FINAL").unwrap_err();
        assert!(matches!(err, DocgenError::Write { .. }));
    }
}
