mod file_config;

pub use file_config::{
    AnalysisConfig, EmbeddingConfig, FileConfig, SentimentConfig, SynthesisConfig,
};

use crate::models::{huggingface, DEFAULT_DIMENSIONS};
use crate::mood::{DegradationPolicy, DEFAULT_MAX_INPUT_CHARS};
use crate::synthesis::{DEFAULT_SAMPLE_RATE, MAX_DURATION_SECS};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_DURATION_SECS: u64 = 15;
pub const DEFAULT_SYNTHESIS_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EmbeddingBackend {
    #[default]
    Hashing,
    Ollama,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SentimentBackend {
    #[default]
    Lexicon,
    #[value(name = "huggingface")]
    HuggingFace,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SynthesisBackend {
    #[default]
    Silent,
    Http,
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub output_dir: Option<PathBuf>,
    pub embedding_backend: EmbeddingBackend,
    pub embedding_url: Option<String>,
    pub embedding_model: Option<String>,
    pub sentiment_backend: SentimentBackend,
    pub sentiment_url: Option<String>,
    pub sentiment_model: Option<String>,
    pub degrade_on_model_failure: bool,
    pub analysis_timeout_secs: Option<u64>,
    pub synthesis_backend: SynthesisBackend,
    pub synthesis_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub embedding: EmbeddingSettings,
    pub sentiment: SentimentSettings,
    pub analysis: AnalysisSettings,
    pub synthesis: SynthesisSettings,
}

#[derive(Debug, Clone)]
pub struct EmbeddingSettings {
    pub backend: EmbeddingBackend,
    pub url: String,
    pub model: String,
    pub dimensions: usize,
    pub timeout: Duration,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Hashing,
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: DEFAULT_DIMENSIONS,
            timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentimentSettings {
    pub backend: SentimentBackend,
    pub url: String,
    pub model: String,
    pub api_token: Option<String>,
    pub max_input_chars: usize,
    pub timeout: Duration,
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self {
            backend: SentimentBackend::Lexicon,
            url: huggingface::DEFAULT_INFERENCE_URL.to_string(),
            model: huggingface::DEFAULT_SENTIMENT_MODEL.to_string(),
            api_token: None,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub degradation: DegradationPolicy,
    /// Caller-side deadline around one whole analysis.
    pub timeout: Duration,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            degradation: DegradationPolicy::FailFast,
            timeout: Duration::from_secs(DEFAULT_ANALYSIS_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SynthesisSettings {
    pub backend: SynthesisBackend,
    pub url: Option<String>,
    pub sample_rate: u32,
    pub duration: Duration,
    pub timeout: Duration,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            backend: SynthesisBackend::Silent,
            url: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: Duration::from_secs(DEFAULT_DURATION_SECS),
            timeout: Duration::from_secs(DEFAULT_SYNTHESIS_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let output_dir = file
            .output_dir
            .map(PathBuf::from)
            .or_else(|| cli.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        if !output_dir.exists() {
            bail!("Output directory does not exist: {:?}", output_dir);
        }
        if !output_dir.is_dir() {
            bail!("output_dir is not a directory: {:?}", output_dir);
        }

        // Embedding settings - merge file config with CLI and defaults
        let emb_file = file.embedding.unwrap_or_default();
        let embedding_defaults = EmbeddingSettings::default();
        let embedding_backend = match emb_file.backend {
            Some(s) => parse_backend::<EmbeddingBackend>("embedding", &s)?,
            None => cli.embedding_backend,
        };
        let embedding = EmbeddingSettings {
            backend: embedding_backend,
            url: emb_file
                .url
                .or_else(|| cli.embedding_url.clone())
                .unwrap_or(embedding_defaults.url),
            model: emb_file
                .model
                .or_else(|| cli.embedding_model.clone())
                .unwrap_or(embedding_defaults.model),
            dimensions: emb_file
                .dimensions
                .unwrap_or(embedding_defaults.dimensions),
            timeout: emb_file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(embedding_defaults.timeout),
        };
        if embedding.dimensions == 0 {
            bail!("embedding.dimensions must be greater than zero");
        }
        if embedding.backend == EmbeddingBackend::Ollama && embedding.model.trim().is_empty() {
            bail!("An embedding model must be specified for the ollama backend");
        }

        // Sentiment settings
        let sent_file = file.sentiment.unwrap_or_default();
        let sentiment_defaults = SentimentSettings::default();
        let sentiment_backend = match sent_file.backend {
            Some(s) => parse_backend::<SentimentBackend>("sentiment", &s)?,
            None => cli.sentiment_backend,
        };
        let sentiment = SentimentSettings {
            backend: sentiment_backend,
            url: sent_file
                .url
                .or_else(|| cli.sentiment_url.clone())
                .unwrap_or(sentiment_defaults.url),
            model: sent_file
                .model
                .or_else(|| cli.sentiment_model.clone())
                .unwrap_or(sentiment_defaults.model),
            api_token: sent_file.api_token,
            max_input_chars: sent_file
                .max_input_chars
                .unwrap_or(sentiment_defaults.max_input_chars),
            timeout: sent_file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(sentiment_defaults.timeout),
        };
        if sentiment.max_input_chars == 0 {
            bail!("sentiment.max_input_chars must be greater than zero");
        }

        // Analysis settings
        let analysis_file = file.analysis.unwrap_or_default();
        let degradation = match analysis_file.degradation {
            Some(s) => match DegradationPolicy::parse(&s) {
                Some(policy) => policy,
                None => bail!(
                    "Unknown degradation policy '{}', expected 'fail_fast' or 'default'",
                    s
                ),
            },
            None if cli.degrade_on_model_failure => DegradationPolicy::Default,
            None => DegradationPolicy::FailFast,
        };
        let analysis = AnalysisSettings {
            degradation,
            timeout: Duration::from_secs(
                analysis_file
                    .timeout_secs
                    .or(cli.analysis_timeout_secs)
                    .unwrap_or(DEFAULT_ANALYSIS_TIMEOUT_SECS),
            ),
        };
        if analysis.timeout.is_zero() {
            bail!("analysis.timeout_secs must be greater than zero");
        }

        // Synthesis settings
        let synth_file = file.synthesis.unwrap_or_default();
        let synthesis_defaults = SynthesisSettings::default();
        let synthesis_backend = match synth_file.backend {
            Some(s) => parse_backend::<SynthesisBackend>("synthesis", &s)?,
            None => cli.synthesis_backend,
        };
        let synthesis = SynthesisSettings {
            backend: synthesis_backend,
            url: synth_file.url.or_else(|| cli.synthesis_url.clone()),
            sample_rate: synth_file
                .sample_rate
                .unwrap_or(synthesis_defaults.sample_rate),
            duration: synth_file
                .duration_secs
                .map(Duration::from_secs)
                .unwrap_or(synthesis_defaults.duration),
            timeout: synth_file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(synthesis_defaults.timeout),
        };
        if synthesis.backend == SynthesisBackend::Http && synthesis.url.is_none() {
            bail!("synthesis.url must be specified for the http synthesis backend");
        }
        if synthesis.sample_rate == 0 {
            bail!("synthesis.sample_rate must be greater than zero");
        }
        if synthesis.duration > Duration::from_secs(MAX_DURATION_SECS) {
            bail!(
                "synthesis.duration_secs must be at most {}",
                MAX_DURATION_SECS
            );
        }

        Ok(Self {
            output_dir,
            embedding,
            sentiment,
            analysis,
            synthesis,
        })
    }
}

/// Parses a backend name from the config file.
/// Uses clap's ValueEnum trait for parsing.
fn parse_backend<T: ValueEnum>(section: &str, s: &str) -> Result<T> {
    match T::from_str(s, true) {
        Ok(backend) => Ok(backend),
        Err(_) => bail!("Unknown {} backend: '{}'", section, s),
    }
}
