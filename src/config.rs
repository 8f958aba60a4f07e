//! Run configuration.
//!
//! Built once at startup from defaults, an optional TOML file and the
//! environment/CLI layer, then passed by reference into every stage.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocgenError, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat:free";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_INPUT_TOKEN_LIMIT: usize = 5000;
pub const DEFAULT_MAX_RESPONSE_TOKENS: u32 = 5000;
pub const DEFAULT_OUTPUT_PATH: &str = "FINAL_DOC.md";
pub const DEFAULT_APP_TITLE: &str = "docgen";

/// File suffixes treated as source.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".cpp", ".c", ".h", ".java", ".rb", ".go", ".rs", ".cs", ".xml", ".md",
    ".swift", ".vb", ".php", ".css", ".html", ".txt", ".json", ".yaml", ".sh", ".yml",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub project_dir: PathBuf,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub input_token_limit: usize,
    pub max_response_tokens: u32,
    pub output_path: PathBuf,
    pub app_title: String,
    pub extensions: Vec<String>,
    /// Request timeout; `None` keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            project_dir: PathBuf::from("."),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            input_token_limit: DEFAULT_INPUT_TOKEN_LIMIT,
            max_response_tokens: DEFAULT_MAX_RESPONSE_TOKENS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            app_title: DEFAULT_APP_TITLE.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            timeout_secs: None,
        }
    }
}

/// On-disk configuration. Every key is optional and overrides the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub project_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub input_token_limit: Option<usize>,
    pub max_response_tokens: Option<u32>,
    pub output_path: Option<PathBuf>,
    pub app_title: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| DocgenError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&raw).map_err(|message| DocgenError::ConfigFile {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }
}

impl Config {
    /// Overlay the values present in `file` onto `self`.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(dir) = file.project_dir {
            self.project_dir = dir;
        }
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(t) = file.temperature {
            self.temperature = t;
        }
        if let Some(limit) = file.input_token_limit {
            self.input_token_limit = limit;
        }
        if let Some(limit) = file.max_response_tokens {
            self.max_response_tokens = limit;
        }
        if let Some(path) = file.output_path {
            self.output_path = path;
        }
        if let Some(title) = file.app_title {
            self.app_title = title;
        }
        if let Some(exts) = file.extensions {
            self.extensions = exts.into_iter().map(normalize_extension).collect();
        }
        if file.timeout_secs.is_some() {
            self.timeout_secs = file.timeout_secs;
        }
        self
    }

    /// Check limits. `require_key` is false for dry runs, which never call out.
    pub fn validate(&self, require_key: bool) -> Result<()> {
        if self.input_token_limit == 0 {
            return Err(DocgenError::InvalidConfig(
                "input token limit must be greater than zero".to_string(),
            ));
        }
        if self.max_response_tokens == 0 {
            return Err(DocgenError::InvalidConfig(
                "max response tokens must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(DocgenError::InvalidConfig(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        if self.extensions.is_empty() {
            return Err(DocgenError::InvalidConfig(
                "extension allow-list is empty".to_string(),
            ));
        }
        if require_key && self.api_key().is_none() {
            return Err(DocgenError::MissingApiKey);
        }
        Ok(())
    }

    /// API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// `rs`, `.RS` and `.rs` all become `.rs`.
pub fn normalize_extension(ext: String) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.input_token_limit, 5000);
        assert_eq!(config.max_response_tokens, 5000);
        assert_eq!(config.output_path, PathBuf::from("FINAL_DOC.md"));
        assert_eq!(config.extensions.len(), 23);
        assert!(config.extensions.contains(&".yml".to_string()));
    }

    #[test]
    fn test_merge_file_overrides_only_present_keys() {
        let file = FileConfig::parse(
            r#"
model = "openai/gpt-4o-mini"
input_token_limit = 1200
extensions = ["RS", ".toml"]
"#,
        )
        .unwrap();

        let config = Config::default().merge_file(file);
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.input_token_limit, 1200);
        assert_eq!(config.extensions, vec![".rs", ".toml"]);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_response_tokens, DEFAULT_MAX_RESPONSE_TOKENS);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(FileConfig::parse("modle = \"x\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = FileConfig::load(Path::new("/nonexistent/docgen.toml")).unwrap_err();
        assert!(matches!(err, DocgenError::ConfigFile { .. }));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate(false).is_ok());
        assert!(matches!(
            config.validate(true),
            Err(DocgenError::MissingApiKey)
        ));

        config.api_key = Some("   ".to_string());
        assert!(matches!(
            config.validate(true),
            Err(DocgenError::MissingApiKey)
        ));

        config.api_key = Some("sk-test".to_string());
        assert!(config.validate(true).is_ok());

        config.input_token_limit = 0;
        assert!(matches!(
            config.validate(true),
            Err(DocgenError::InvalidConfig(_))
        ));

        config.input_token_limit = 10;
        config.temperature = 3.5;
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("rs".to_string()), ".rs");
        assert_eq!(normalize_extension(".PY".to_string()), ".py");
        assert_eq!(normalize_extension(" .md ".to_string()), ".md");
    }
}
