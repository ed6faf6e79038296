use crate::mood::{MoodCategory, MoodTag, SentimentLabel, SentimentTag};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_TEMPO: u16 = 40;
pub const MAX_TEMPO: u16 = 200;

/// Base tempo for moods outside [`MoodCategory`].
pub const DEFAULT_TEMPO: u16 = 100;
pub const DEFAULT_KEY: Key = Key::Major;
pub const DEFAULT_INSTRUMENTS: &[&str] = &["piano", "strings"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Major,
    Minor,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Major => f.write_str("major"),
            Key::Minor => f.write_str("minor"),
        }
    }
}

/// Parameter bundle handed to the synthesis collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicalParameters {
    /// Beats per minute, always within [`MIN_TEMPO`, `MAX_TEMPO`].
    pub tempo: u16,
    pub key: Key,
    /// The mood exactly as it was passed in.
    pub mood: MoodTag,
    /// The energy exactly as it was passed in.
    pub energy: u8,
    /// Never empty.
    pub instruments: Vec<String>,
}

pub fn base_tempo(mood: &MoodTag) -> u16 {
    match mood {
        MoodTag::Known(MoodCategory::Happy) => 120,
        MoodTag::Known(MoodCategory::Energetic) => 140,
        MoodTag::Known(MoodCategory::Calm) => 80,
        MoodTag::Known(MoodCategory::Sad) => 60,
        MoodTag::Known(MoodCategory::Mysterious) => 90,
        MoodTag::Known(MoodCategory::Romantic) => 75,
        MoodTag::Unrecognized(_) => DEFAULT_TEMPO,
    }
}

pub fn key_for(sentiment: &SentimentTag) -> Key {
    match sentiment {
        SentimentTag::Known(SentimentLabel::Positive) => Key::Major,
        SentimentTag::Known(SentimentLabel::Negative) => Key::Minor,
        SentimentTag::Known(SentimentLabel::Neutral) => Key::Major,
        SentimentTag::Unrecognized(_) => DEFAULT_KEY,
    }
}

pub fn instruments_for(mood: &MoodTag) -> &'static [&'static str] {
    match mood {
        MoodTag::Known(MoodCategory::Happy) => &["piano", "guitar", "drums", "strings"],
        MoodTag::Known(MoodCategory::Energetic) => &["drums", "synth", "electric guitar", "bass"],
        MoodTag::Known(MoodCategory::Calm) => &["piano", "flute", "strings", "acoustic guitar"],
        MoodTag::Known(MoodCategory::Sad) => &["cello", "strings", "piano", "oboe"],
        MoodTag::Known(MoodCategory::Mysterious) => &[
            "strings (pizzicato)",
            "low brass",
            "synthesizer pads",
            "percussion",
        ],
        MoodTag::Known(MoodCategory::Romantic) => &["piano", "strings", "saxophone", "harp"],
        MoodTag::Unrecognized(_) => DEFAULT_INSTRUMENTS,
    }
}

/// Scale `base` by `1 + (energy - 5.5) / 20`, rounding half up, then clamp.
///
/// Evaluated as `base * (29 + 2 * energy) / 40` in integers so .5 results
/// round the same way on every platform.
fn scaled_tempo(base: u16, energy: u8) -> u16 {
    let numerator = u64::from(base) * (29 + 2 * u64::from(energy));
    let rounded = (2 * numerator + 40) / 80;
    rounded.clamp(u64::from(MIN_TEMPO), u64::from(MAX_TEMPO)) as u16
}

/// Map a mood, sentiment and energy level to musical parameters.
///
/// Pure: identical inputs always produce identical output. Labels outside
/// the known sets fall back to a 100 BPM base, a major key and
/// piano with strings.
pub fn map_parameters(
    mood: impl Into<MoodTag>,
    sentiment: impl Into<SentimentTag>,
    energy: u8,
) -> MusicalParameters {
    let mood = mood.into();
    let sentiment = sentiment.into();

    MusicalParameters {
        tempo: scaled_tempo(base_tempo(&mood), energy),
        key: key_for(&sentiment),
        instruments: instruments_for(&mood)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        mood,
        energy,
    }
}
