use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mood_composer::cli_style::{
    get_styles, print_key_value, print_key_value_highlight, print_score_bar,
    print_section_footer, print_section_header, print_success,
};
use mood_composer::config::{self, EmbeddingBackend, SentimentBackend, SynthesisBackend};
use mood_composer::mood::{AnalysisResult, MoodAnalysisPipeline, MAX_ENERGY};
use mood_composer::music::{map_parameters, MusicalParameters};
use mood_composer::synthesis::{
    build_prompt, create_synthesizer, output_file_name, MAX_DURATION_SECS,
};
use mood_composer::{create_pipeline, AnalysisError};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(path_buf))
}

fn parse_dir(s: &str) -> Result<PathBuf, String> {
    let path = parse_path(s)?;
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", s));
    }
    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", s));
    }
    Ok(path)
}

#[derive(Parser, Debug)]
#[command(
    name = "mood-composer",
    version = concat!(env!("APP_VERSION"), "-", env!("GIT_HASH")),
    styles = get_styles()
)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, global = true, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory where composed audio files are written.
    #[clap(long, global = true, value_parser = parse_dir)]
    pub output_dir: Option<PathBuf>,

    /// Backend used to embed text for mood classification.
    #[clap(long, global = true, default_value = "hashing")]
    pub embedding_backend: EmbeddingBackend,

    /// Base URL of the embedding server (ollama backend).
    #[clap(long, global = true)]
    pub embedding_url: Option<String>,

    /// Embedding model name (ollama backend).
    #[clap(long, global = true)]
    pub embedding_model: Option<String>,

    /// Backend used to score sentiment.
    #[clap(long, global = true, default_value = "lexicon")]
    pub sentiment_backend: SentimentBackend,

    /// Base URL of the hosted inference API (huggingface backend).
    #[clap(long, global = true)]
    pub sentiment_url: Option<String>,

    /// Sentiment model name (huggingface backend).
    #[clap(long, global = true)]
    pub sentiment_model: Option<String>,

    /// Answer with calm/neutral defaults instead of failing when a model
    /// backend is unavailable.
    #[clap(long, global = true)]
    pub degrade_on_model_failure: bool,

    /// Deadline in seconds for a whole analysis.
    #[clap(long, global = true)]
    pub analysis_timeout_sec: Option<u64>,

    /// Backend used to render audio for `compose`.
    #[clap(long, global = true, default_value = "silent")]
    pub synthesis_backend: SynthesisBackend,

    /// Endpoint of the text-to-audio service (http backend).
    #[clap(long, global = true)]
    pub synthesis_url: Option<String>,

    /// Print results as JSON instead of styled text.
    #[clap(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze text into mood, sentiment and energy.
    Analyze { text: String },

    /// Map a mood, sentiment and energy level to musical parameters.
    Map {
        #[clap(long)]
        mood: String,
        #[clap(long)]
        sentiment: String,
        #[clap(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        energy: u8,
    },

    /// Analyze text, map it to parameters and render audio.
    Compose {
        text: String,

        /// Title of the composition, used to name the output file.
        #[clap(long, default_value = "composition")]
        title: String,

        /// Length of the rendered audio in seconds.
        #[clap(long, value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_SECS))]
        duration: Option<u64>,

        /// Explicit output file, overriding the output directory.
        #[clap(long, value_parser = parse_path)]
        output: Option<PathBuf>,
    },
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            output_dir: args.output_dir.clone(),
            embedding_backend: args.embedding_backend,
            embedding_url: args.embedding_url.clone(),
            embedding_model: args.embedding_model.clone(),
            sentiment_backend: args.sentiment_backend,
            sentiment_url: args.sentiment_url.clone(),
            sentiment_model: args.sentiment_model.clone(),
            degrade_on_model_failure: args.degrade_on_model_failure,
            analysis_timeout_secs: args.analysis_timeout_sec,
            synthesis_backend: args.synthesis_backend,
            synthesis_url: args.synthesis_url.clone(),
        }
    }
}

/// Runs one analysis on a private runtime so the deadline can be enforced
/// around blocking model calls.
fn analyze_within_deadline(
    pipeline: Arc<MoodAnalysisPipeline>,
    text: String,
    deadline: Duration,
) -> Result<AnalysisResult> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(pipeline.analyze_with_timeout(text, deadline));
    // A timed out worker may still be blocked on a model call
    runtime.shutdown_background();

    result.map_err(|e| {
        if let AnalysisError::TimedOut(_) = e {
            error!("Analysis did not finish within {:?}", deadline);
        }
        e.into()
    })
}

fn print_analysis(analysis: &AnalysisResult) {
    print_section_header("Analysis");
    print_key_value_highlight("Mood", analysis.mood.as_str());
    print_score_bar(
        "similarity",
        analysis.mood_similarity,
        &format!("{:.3}", analysis.mood_similarity),
    );
    print_key_value("Sentiment", analysis.sentiment.as_str());
    print_score_bar(
        "confidence",
        analysis.sentiment_confidence,
        &format!("{:.3}", analysis.sentiment_confidence),
    );
    print_score_bar(
        "energy",
        f32::from(analysis.energy_level) / f32::from(MAX_ENERGY),
        &format!("{}/{}", analysis.energy_level, MAX_ENERGY),
    );
    print_section_footer();
}

fn print_parameters(parameters: &MusicalParameters) {
    print_section_header("Musical Parameters");
    print_key_value_highlight("Tempo", &format!("{} BPM", parameters.tempo));
    print_key_value("Key", &parameters.key.to_string());
    print_key_value("Mood", &parameters.mood.to_string());
    print_key_value("Energy", &parameters.energy.to_string());
    print_key_value("Instruments", &parameters.instruments.join(", "));
    print_section_footer();
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    match cli_args.command {
        Command::Analyze { text } => {
            let pipeline = Arc::new(create_pipeline(&app_config)?);
            let analysis = analyze_within_deadline(pipeline, text, app_config.analysis.timeout)?;

            if cli_args.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }
        Command::Map {
            mood,
            sentiment,
            energy,
        } => {
            let parameters = map_parameters(mood, sentiment, energy);

            if cli_args.json {
                println!("{}", serde_json::to_string_pretty(&parameters)?);
            } else {
                print_parameters(&parameters);
            }
        }
        Command::Compose {
            text,
            title,
            duration,
            output,
        } => {
            let pipeline = Arc::new(create_pipeline(&app_config)?);
            let analysis = analyze_within_deadline(pipeline, text, app_config.analysis.timeout)?;
            let parameters =
                map_parameters(analysis.mood, analysis.sentiment, analysis.energy_level);

            let duration = duration
                .map(Duration::from_secs)
                .unwrap_or(app_config.synthesis.duration);
            let synthesizer = create_synthesizer(&app_config.synthesis)?;
            info!("Composing: {}", build_prompt(&parameters));
            let audio = synthesizer
                .synthesize(&parameters, duration)
                .with_context(|| format!("{} synthesizer failed", synthesizer.name()))?;

            let output_path =
                output.unwrap_or_else(|| app_config.output_dir.join(output_file_name(&title)));
            std::fs::write(&output_path, &audio)
                .with_context(|| format!("Failed to write audio to {:?}", output_path))?;

            if cli_args.json {
                let report = serde_json::json!({
                    "analysis": analysis,
                    "parameters": parameters,
                    "output": output_path,
                    "bytes": audio.len(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_analysis(&analysis);
                print_parameters(&parameters);
                print_success(&format!(
                    "Wrote {} bytes to {}",
                    audio.len(),
                    output_path.display()
                ));
            }
        }
    }

    Ok(())
}
