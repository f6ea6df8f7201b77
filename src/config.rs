use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AskdocConfig {
    pub log_level: String,
    pub embedding: EmbeddingConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub cache_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub api_base: String,
    pub api_key_env: String,
}

impl Default for AskdocConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            embedding: EmbeddingConfig::default(),
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        let cache_dir = default_askdoc_dir()
            .join("models")
            .to_string_lossy()
            .into_owned();
        Self {
            provider: "local".into(),
            model: "all-MiniLM-L6-v2".into(),
            cache_dir,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key_env: "GOOGLE_API_KEY".into(),
        }
    }
}

/// Returns `~/.askdoc/`
pub fn default_askdoc_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".askdoc")
}

/// Returns the default config file path: `~/.askdoc/config.toml`
pub fn default_config_path() -> PathBuf {
    default_askdoc_dir().join("config.toml")
}

impl AskdocConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            AskdocConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (ASKDOC_LOG_LEVEL, ASKDOC_TOP_K, ASKDOC_LLM_MODEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ASKDOC_LOG_LEVEL") {
            self.log_level = val;
        }
        if let Ok(val) = std::env::var("ASKDOC_TOP_K") {
            if let Ok(k) = val.parse::<usize>() {
                self.retrieval.top_k = k;
            }
        }
        if let Ok(val) = std::env::var("ASKDOC_LLM_MODEL") {
            self.llm.model = val;
        }
    }

    /// Resolve the model cache directory, expanding `~` if needed.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        expand_tilde(&self.embedding.cache_dir)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AskdocConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.embedding.provider, "local");
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.retrieval.top_k, 5);
        assert!(config.embedding.cache_dir.ends_with("models"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
log_level = "debug"

[chunking]
chunk_size = 500

[retrieval]
top_k = 3

[llm]
model = "gemini-1.5-pro"
"#;
        let config: AskdocConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.llm.model, "gemini-1.5-pro");
        // defaults still apply for unset fields
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.embedding.model, "all-MiniLM-L6-v2");
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AskdocConfig::default();
        std::env::set_var("ASKDOC_LOG_LEVEL", "trace");
        std::env::set_var("ASKDOC_TOP_K", "8");
        std::env::set_var("ASKDOC_LLM_MODEL", "gemini-2.0-flash");

        config.apply_env_overrides();

        assert_eq!(config.log_level, "trace");
        assert_eq!(config.retrieval.top_k, 8);
        assert_eq!(config.llm.model, "gemini-2.0-flash");

        // A non-numeric top_k is ignored, keeping the previous value
        std::env::set_var("ASKDOC_TOP_K", "not-a-number");
        config.apply_env_overrides();
        assert_eq!(config.retrieval.top_k, 8);

        // Clean up
        std::env::remove_var("ASKDOC_LOG_LEVEL");
        std::env::remove_var("ASKDOC_TOP_K");
        std::env::remove_var("ASKDOC_LLM_MODEL");
    }
}
