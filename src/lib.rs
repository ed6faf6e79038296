//! Mood Composer Library
//!
//! Turns free-text descriptions of a mood into bounded musical parameters:
//! text is analyzed into a mood category, a sentiment label and an energy
//! level, which are then mapped to tempo, key and instrumentation.

pub mod cli_style;
pub mod config;
pub mod models;
pub mod mood;
pub mod music;
pub mod synthesis;
pub mod text;

// Re-export commonly used types for convenience
pub use models::create_pipeline;
pub use mood::{
    AnalysisError, AnalysisResult, MoodAnalysisPipeline, MoodCategory, SentimentLabel,
};
pub use music::{map_parameters, Key, MusicalParameters};
pub use synthesis::{create_synthesizer, Synthesizer};
