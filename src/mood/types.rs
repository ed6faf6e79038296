//! Core mood analysis types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of mood categories a text can be classified into.
///
/// Declaration order matters: it is the tie-break order used when two
/// categories score exactly the same similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Happy,
    Sad,
    Calm,
    Energetic,
    Mysterious,
    Romantic,
}

impl MoodCategory {
    /// All categories, in declaration order.
    pub const ALL: [MoodCategory; 6] = [
        MoodCategory::Happy,
        MoodCategory::Sad,
        MoodCategory::Calm,
        MoodCategory::Energetic,
        MoodCategory::Mysterious,
        MoodCategory::Romantic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Happy => "happy",
            MoodCategory::Sad => "sad",
            MoodCategory::Calm => "calm",
            MoodCategory::Energetic => "energetic",
            MoodCategory::Mysterious => "mysterious",
            MoodCategory::Romantic => "romantic",
        }
    }

    /// Exemplar phrase whose embedding represents this category.
    ///
    /// Each description leads with the category name itself, followed by
    /// words people commonly use to describe that state.
    pub fn reference_description(&self) -> &'static str {
        match self {
            MoodCategory::Happy => {
                "happy joyful cheerful glad delighted smiling sunny bright good day"
            }
            MoodCategory::Sad => {
                "sad unhappy sorrow grief lonely heartbroken tears melancholy blue down"
            }
            MoodCategory::Calm => {
                "calm peaceful relaxed serene quiet gentle tranquil still soothing rest"
            }
            MoodCategory::Energetic => {
                "energetic excited pumped powerful fast hyped party dance workout adrenaline"
            }
            MoodCategory::Mysterious => {
                "mysterious dark strange secret curious enigmatic shadow night unknown eerie"
            }
            MoodCategory::Romantic => {
                "romantic love loving tender passion date sweetheart affection kiss intimate"
            }
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        MoodCategory::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| format!("Unknown mood category: {}", s))
    }
}

/// Discrete sentiment classes, in the order sentiment models emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// All labels, in model output order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        SentimentLabel::ALL
            .into_iter()
            .find(|l| l.as_str() == needle)
            .ok_or_else(|| format!("Unknown sentiment label: {}", s))
    }
}

/// A mood as handed to the parameter mapper.
///
/// Callers may pass labels that are not part of [`MoodCategory`]; those are
/// carried verbatim so they survive the mapping unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MoodTag {
    Known(MoodCategory),
    Unrecognized(String),
}

impl MoodTag {
    pub fn category(&self) -> Option<MoodCategory> {
        match self {
            MoodTag::Known(category) => Some(*category),
            MoodTag::Unrecognized(_) => None,
        }
    }
}

impl From<MoodCategory> for MoodTag {
    fn from(category: MoodCategory) -> Self {
        MoodTag::Known(category)
    }
}

impl From<&str> for MoodTag {
    fn from(s: &str) -> Self {
        match s.parse::<MoodCategory>() {
            Ok(category) => MoodTag::Known(category),
            Err(_) => MoodTag::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for MoodTag {
    fn from(s: String) -> Self {
        match s.parse::<MoodCategory>() {
            Ok(category) => MoodTag::Known(category),
            Err(_) => MoodTag::Unrecognized(s),
        }
    }
}

impl From<MoodTag> for String {
    fn from(tag: MoodTag) -> Self {
        tag.to_string()
    }
}

impl fmt::Display for MoodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoodTag::Known(category) => write!(f, "{}", category),
            MoodTag::Unrecognized(label) => f.write_str(label),
        }
    }
}

/// A sentiment as handed to the parameter mapper. See [`MoodTag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentTag {
    Known(SentimentLabel),
    Unrecognized(String),
}

impl SentimentTag {
    pub fn label(&self) -> Option<SentimentLabel> {
        match self {
            SentimentTag::Known(label) => Some(*label),
            SentimentTag::Unrecognized(_) => None,
        }
    }
}

impl From<SentimentLabel> for SentimentTag {
    fn from(label: SentimentLabel) -> Self {
        SentimentTag::Known(label)
    }
}

impl From<&str> for SentimentTag {
    fn from(s: &str) -> Self {
        match s.parse::<SentimentLabel>() {
            Ok(label) => SentimentTag::Known(label),
            Err(_) => SentimentTag::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for SentimentTag {
    fn from(s: String) -> Self {
        match s.parse::<SentimentLabel>() {
            Ok(label) => SentimentTag::Known(label),
            Err(_) => SentimentTag::Unrecognized(s),
        }
    }
}

impl From<SentimentTag> for String {
    fn from(tag: SentimentTag) -> Self {
        tag.to_string()
    }
}

impl fmt::Display for SentimentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentTag::Known(label) => write!(f, "{}", label),
            SentimentTag::Unrecognized(label) => f.write_str(label),
        }
    }
}

/// Structured analysis of one piece of user text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub mood: MoodCategory,
    /// Cosine similarity between the text and the chosen mood, in [-1, 1].
    pub mood_similarity: f32,
    pub sentiment: SentimentLabel,
    /// Probability of the chosen sentiment class, in [0, 1].
    pub sentiment_confidence: f32,
    /// Heuristic energy score, in [1, 10].
    pub energy_level: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_category_parse_is_case_insensitive() {
        assert_eq!("Happy".parse::<MoodCategory>(), Ok(MoodCategory::Happy));
        assert_eq!(" romantic ".parse::<MoodCategory>(), Ok(MoodCategory::Romantic));
        assert!("angry".parse::<MoodCategory>().is_err());
    }

    #[test]
    fn test_mood_category_declaration_order() {
        let names: Vec<&str> = MoodCategory::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(
            names,
            vec!["happy", "sad", "calm", "energetic", "mysterious", "romantic"]
        );
    }

    #[test]
    fn test_reference_description_leads_with_name() {
        for mood in MoodCategory::ALL {
            assert!(mood.reference_description().starts_with(mood.as_str()));
        }
    }

    #[test]
    fn test_sentiment_label_roundtrip_through_str() {
        for label in SentimentLabel::ALL {
            assert_eq!(label.to_string().parse::<SentimentLabel>(), Ok(label));
        }
    }

    #[test]
    fn test_mood_tag_keeps_unrecognized_label_verbatim() {
        let tag = MoodTag::from("unknown_mood");
        assert_eq!(tag, MoodTag::Unrecognized("unknown_mood".to_string()));
        assert_eq!(tag.to_string(), "unknown_mood");
        assert!(tag.category().is_none());

        let tag = MoodTag::from("SAD");
        assert_eq!(tag.category(), Some(MoodCategory::Sad));
    }

    #[test]
    fn test_tags_serialize_as_plain_strings() {
        let json = serde_json::to_string(&MoodTag::from(MoodCategory::Calm)).unwrap();
        assert_eq!(json, "\"calm\"");

        let tag: SentimentTag = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(tag, SentimentTag::Known(SentimentLabel::Positive));

        let tag: SentimentTag = serde_json::from_str("\"ecstatic\"").unwrap();
        assert_eq!(tag, SentimentTag::Unrecognized("ecstatic".to_string()));
    }

    #[test]
    fn test_analysis_result_serialization() {
        let result = AnalysisResult {
            mood: MoodCategory::Energetic,
            mood_similarity: 0.5,
            sentiment: SentimentLabel::Positive,
            sentiment_confidence: 0.75,
            energy_level: 9,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mood"], "energetic");
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["energy_level"], 9);
    }
}
