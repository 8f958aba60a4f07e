use std::path::PathBuf;

/// A collected source file. `relative_path` always uses `/` separators.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub relative_path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }

    /// Header plus body, as it appears in the rendered blob.
    pub fn render(&self) -> String {
        format!("\n\n=== {} ===\n{}", self.relative_path, self.content)
    }
}

/// A file matched by the allow-list but not readable as UTF-8 text.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Every collected file in traversal order.
#[derive(Debug, Clone, Default)]
pub struct SourceBlob {
    pub files: Vec<SourceFile>,
    pub skipped: Vec<SkippedFile>,
}

impl SourceBlob {
    pub fn render(&self) -> String {
        self.files.iter().map(SourceFile::render).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
