//! Shared constants for integration tests
//!
//! Sample texts paired with what the offline default backends (hashing
//! embedder and lexicon sentiment) are expected to make of them.

// ============================================================================
// Sample Texts
// ============================================================================

/// Clearly happy, clearly positive, two high-energy keywords.
pub const HAPPY_TEXT: &str = "I'm so happy and joyful, what a wonderful sunny day";

/// Clearly sad, clearly negative, one low-energy keyword.
pub const SAD_TEXT: &str = "lonely and heartbroken tonight, sad tears again";

/// Calm scene without sentiment words in the lexicon.
pub const CALM_TEXT: &str = "a quiet gentle evening, still and tranquil";

/// Romantic and positive.
pub const ROMANTIC_TEXT: &str = "date night with my sweetheart, so much love";

// ============================================================================
// Timing
// ============================================================================

/// How long the slow fake backends take per call.
pub const SLOW_BACKEND_MILLIS: u64 = 1500;

/// Deadline comfortably shorter than a slow backend call.
pub const SHORT_DEADLINE_MILLIS: u64 = 100;
