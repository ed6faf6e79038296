//! Keyword and sentiment heuristic for energy estimation.

use super::types::SentimentLabel;
use crate::text::words;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

pub const MIN_ENERGY: u8 = 1;
pub const MAX_ENERGY: u8 = 10;

const BASE_SCORE: i32 = 5;
const POSITIVE_BONUS: i32 = 2;
const NEGATIVE_PENALTY: i32 = 2;
const KEYWORD_WEIGHT: i32 = 1;

const HIGH_ENERGY_WORDS: &[&str] = &[
    "energetic",
    "upbeat",
    "fast",
    "powerful",
    "excited",
    "happy",
    "joyful",
    "party",
];

const LOW_ENERGY_WORDS: &[&str] = &[
    "calm", "slow", "peaceful", "sad", "sleepy", "down", "quiet", "serene",
];

/// Every term that went into one energy estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnergyBreakdown {
    pub base: i32,
    pub sentiment_adjustment: i32,
    /// Distinct high-energy keywords found, in keyword-list order.
    pub high_energy_matches: Vec<&'static str>,
    /// Distinct low-energy keywords found, in keyword-list order.
    pub low_energy_matches: Vec<&'static str>,
    /// Sum of all terms before clamping.
    pub raw_score: i32,
    pub energy: u8,
}

/// Deterministic energy scorer. Makes no model calls.
#[derive(Debug, Clone)]
pub struct EnergyEstimator {
    high_energy: &'static [&'static str],
    low_energy: &'static [&'static str],
}

impl Default for EnergyEstimator {
    fn default() -> Self {
        Self {
            high_energy: HIGH_ENERGY_WORDS,
            low_energy: LOW_ENERGY_WORDS,
        }
    }
}

impl EnergyEstimator {
    /// Energy level in [1, 10] for `text` given its resolved sentiment.
    pub fn estimate(&self, text: &str, sentiment: SentimentLabel) -> u8 {
        let breakdown = self.breakdown(text, sentiment);
        debug!(
            energy = breakdown.energy,
            raw = breakdown.raw_score,
            high = ?breakdown.high_energy_matches,
            low = ?breakdown.low_energy_matches,
            "Calculated energy level"
        );
        breakdown.energy
    }

    pub fn breakdown(&self, text: &str, sentiment: SentimentLabel) -> EnergyBreakdown {
        let sentiment_adjustment = match sentiment {
            SentimentLabel::Positive => POSITIVE_BONUS,
            SentimentLabel::Negative => -NEGATIVE_PENALTY,
            SentimentLabel::Neutral => 0,
        };

        let seen: HashSet<String> = words(text).collect();
        let high_energy_matches: Vec<&'static str> = self
            .high_energy
            .iter()
            .copied()
            .filter(|k| seen.contains(*k))
            .collect();
        let low_energy_matches: Vec<&'static str> = self
            .low_energy
            .iter()
            .copied()
            .filter(|k| seen.contains(*k))
            .collect();

        let keyword_adjustment = KEYWORD_WEIGHT * high_energy_matches.len() as i32
            - KEYWORD_WEIGHT * low_energy_matches.len() as i32;
        let raw_score = BASE_SCORE + sentiment_adjustment + keyword_adjustment;
        let energy = raw_score.clamp(MIN_ENERGY as i32, MAX_ENERGY as i32) as u8;

        EnergyBreakdown {
            base: BASE_SCORE,
            sentiment_adjustment,
            high_energy_matches,
            low_energy_matches,
            raw_score,
            energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text_is_base() {
        let estimator = EnergyEstimator::default();
        assert_eq!(estimator.estimate("it is tuesday", SentimentLabel::Neutral), 5);
    }

    #[test]
    fn test_sentiment_adjustments() {
        let estimator = EnergyEstimator::default();
        assert_eq!(estimator.estimate("it is tuesday", SentimentLabel::Positive), 7);
        assert_eq!(estimator.estimate("it is tuesday", SentimentLabel::Negative), 3);
    }

    #[test]
    fn test_keywords_adjust_score() {
        let estimator = EnergyEstimator::default();
        assert_eq!(
            estimator.estimate("an upbeat party", SentimentLabel::Neutral),
            7
        );
        assert_eq!(
            estimator.estimate("slow and sleepy", SentimentLabel::Neutral),
            3
        );
        assert_eq!(
            estimator.estimate("fast but quiet", SentimentLabel::Neutral),
            5
        );
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let estimator = EnergyEstimator::default();
        assert_eq!(
            estimator.estimate("energetic energetic ENERGETIC", SentimentLabel::Neutral),
            6
        );
    }

    #[test]
    fn test_whole_words_only() {
        let estimator = EnergyEstimator::default();
        // "unhappy" and "download" do not contain keyword matches
        assert_eq!(
            estimator.estimate("unhappy about the download", SentimentLabel::Neutral),
            5
        );
    }

    #[test]
    fn test_clamped_to_range() {
        let estimator = EnergyEstimator::default();
        let hyped = "energetic upbeat fast powerful excited happy joyful party";
        assert_eq!(estimator.estimate(hyped, SentimentLabel::Positive), 10);
        let breakdown = estimator.breakdown(hyped, SentimentLabel::Positive);
        assert_eq!(breakdown.raw_score, 15);

        let drained = "calm slow peaceful sad sleepy down quiet serene";
        assert_eq!(estimator.estimate(drained, SentimentLabel::Negative), 1);
        let breakdown = estimator.breakdown(drained, SentimentLabel::Negative);
        assert_eq!(breakdown.raw_score, -5);
    }

    #[test]
    fn test_monotonic_in_keyword_matches() {
        let estimator = EnergyEstimator::default();
        let high = ["energetic", "upbeat", "fast", "powerful", "excited"];
        let mut previous = 0;
        for n in 0..=high.len() {
            let text = format!("today {}", high[..n].join(" "));
            let energy = estimator.estimate(&text, SentimentLabel::Neutral);
            assert!(energy >= previous);
            previous = energy;
        }

        let low = ["calm", "slow", "peaceful", "sad", "sleepy"];
        let mut previous = u8::MAX;
        for n in 0..=low.len() {
            let text = format!("today {}", low[..n].join(" "));
            let energy = estimator.estimate(&text, SentimentLabel::Neutral);
            assert!(energy <= previous);
            previous = energy;
        }
    }

    #[test]
    fn test_breakdown_lists_matches_in_keyword_order() {
        let estimator = EnergyEstimator::default();
        let breakdown = estimator.breakdown("Party time, so happy! A bit sleepy", SentimentLabel::Positive);
        assert_eq!(breakdown.base, 5);
        assert_eq!(breakdown.sentiment_adjustment, 2);
        assert_eq!(breakdown.high_energy_matches, vec!["happy", "party"]);
        assert_eq!(breakdown.low_energy_matches, vec!["sleepy"]);
        assert_eq!(breakdown.raw_score, 8);
        assert_eq!(breakdown.energy, 8);
    }
}
