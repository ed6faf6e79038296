use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub output_dir: Option<String>,

    // Feature configs
    pub embedding: Option<EmbeddingConfig>,
    pub sentiment: Option<SentimentConfig>,
    pub analysis: Option<AnalysisConfig>,
    pub synthesis: Option<SynthesisConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding backend to use: "hashing", "ollama"
    pub backend: Option<String>,
    pub url: Option<String>,
    pub model: Option<String>,
    pub dimensions: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SentimentConfig {
    /// Sentiment backend to use: "lexicon", "huggingface"
    pub backend: Option<String>,
    pub url: Option<String>,
    pub model: Option<String>,
    pub api_token: Option<String>,
    pub max_input_chars: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Backend failure policy: "fail_fast", "default"
    pub degradation: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Synthesis backend to use: "silent", "http"
    pub backend: Option<String>,
    pub url: Option<String>,
    pub sample_rate: Option<u32>,
    pub duration_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
output_dir = "/tmp"

[embedding]
backend = "ollama"
url = "http://localhost:11434"
model = "all-minilm"

[sentiment]
backend = "huggingface"
api_token = "hf_xxx"
max_input_chars = 256

[analysis]
degradation = "default"
timeout_secs = 10

[synthesis]
backend = "silent"
sample_rate = 22050
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.output_dir.as_deref(), Some("/tmp"));
        let embedding = config.embedding.unwrap();
        assert_eq!(embedding.backend.as_deref(), Some("ollama"));
        assert_eq!(embedding.model.as_deref(), Some("all-minilm"));
        assert!(embedding.dimensions.is_none());
        let sentiment = config.sentiment.unwrap();
        assert_eq!(sentiment.max_input_chars, Some(256));
        assert_eq!(config.analysis.unwrap().timeout_secs, Some(10));
        assert_eq!(config.synthesis.unwrap().sample_rate, Some(22050));
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.embedding.is_none());
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is = = not toml").unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FileConfig::load(Path::new("/nonexistent/mood.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
