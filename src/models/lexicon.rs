//! Lexicon-based sentiment model.
//!
//! Used when no hosted classifier is configured. Counts distinct positive
//! and negative words and emits them as raw class scores, with a constant
//! neutral score so that text without any sentiment words (or with
//! balanced ones) lands on `neutral`.

use super::provider::{ModelError, SentimentModel};
use crate::text::words;
use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "love",
    "loving",
    "amazing",
    "wonderful",
    "happy",
    "joyful",
    "fantastic",
    "awesome",
    "best",
    "excited",
    "glad",
    "beautiful",
    "delighted",
    "peaceful",
    "relaxed",
    "fun",
    "grateful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "horrible",
    "worst",
    "sad",
    "angry",
    "disappointed",
    "poor",
    "lonely",
    "tired",
    "miserable",
    "upset",
    "depressed",
    "anxious",
    "stressed",
    "heartbroken",
    "cry",
    "crying",
];

/// Score assigned to the neutral class regardless of input.
const NEUTRAL_SCORE: f32 = 0.5;

pub struct LexiconSentimentModel {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl LexiconSentimentModel {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
        }
    }
}

impl Default for LexiconSentimentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentModel for LexiconSentimentModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn class_scores(&self, text: &str) -> Result<[f32; 3], ModelError> {
        let seen: HashSet<String> = words(text).collect();
        let positive_hits = seen
            .iter()
            .filter(|w| self.positive.contains(w.as_str()))
            .count() as f32;
        let negative_hits = seen
            .iter()
            .filter(|w| self.negative.contains(w.as_str()))
            .count() as f32;

        let balanced = (positive_hits - negative_hits).abs() < f32::EPSILON;
        let neutral = if balanced {
            NEUTRAL_SCORE + positive_hits
        } else {
            NEUTRAL_SCORE
        };

        Ok([negative_hits, neutral, positive_hits])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argmax(scores: [f32; 3]) -> usize {
        let mut best = 0;
        for i in 1..3 {
            if scores[i] > scores[best] {
                best = i;
            }
        }
        best
    }

    #[test]
    fn test_positive_text() {
        let model = LexiconSentimentModel::new();
        let scores = model.class_scores("What a great and wonderful day").unwrap();
        assert_eq!(argmax(scores), 2);
    }

    #[test]
    fn test_negative_text() {
        let model = LexiconSentimentModel::new();
        let scores = model.class_scores("I feel lonely and sad").unwrap();
        assert_eq!(argmax(scores), 0);
    }

    #[test]
    fn test_no_sentiment_words_is_neutral() {
        let model = LexiconSentimentModel::new();
        let scores = model.class_scores("The train leaves at nine").unwrap();
        assert_eq!(scores, [0.0, NEUTRAL_SCORE, 0.0]);
    }

    #[test]
    fn test_balanced_text_is_neutral() {
        let model = LexiconSentimentModel::new();
        let scores = model.class_scores("good news and bad news").unwrap();
        assert_eq!(argmax(scores), 1);
    }

    #[test]
    fn test_repeated_word_counts_once() {
        let model = LexiconSentimentModel::new();
        let once = model.class_scores("happy").unwrap();
        let thrice = model.class_scores("happy happy happy").unwrap();
        assert_eq!(once, thrice);
    }
}
