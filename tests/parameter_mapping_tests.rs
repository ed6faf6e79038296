//! Table-driven tests for the parameter mapper
//!
//! Run with: cargo test --test parameter_mapping_tests

use mood_composer::mood::{MoodCategory, MoodTag, SentimentLabel, MAX_ENERGY, MIN_ENERGY};
use mood_composer::music::{map_parameters, Key, MusicalParameters, MAX_TEMPO, MIN_TEMPO};

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn test_worked_scenarios() {
    let cases: &[(&str, &str, u8, u16, Key, &[&str])] = &[
        (
            "happy",
            "positive",
            10,
            147,
            Key::Major,
            &["piano", "guitar", "drums", "strings"],
        ),
        (
            "sad",
            "negative",
            1,
            47,
            Key::Minor,
            &["cello", "strings", "piano", "oboe"],
        ),
        ("unknown_mood", "neutral", 5, 98, Key::Major, &["piano", "strings"]),
    ];

    for (mood, sentiment, energy, tempo, key, instruments) in cases {
        let params = map_parameters(*mood, *sentiment, *energy);
        assert_eq!(params.tempo, *tempo, "tempo for {} at {}", mood, energy);
        assert_eq!(params.key, *key, "key for {}", sentiment);
        assert_eq!(params.instruments, *instruments, "instruments for {}", mood);
        assert_eq!(params.mood.to_string(), *mood);
        assert_eq!(params.energy, *energy);
    }
}

#[test]
fn test_base_tempo_per_mood() {
    // Energy 5 and 6 sit either side of the midpoint: base * 0.975 and base * 1.025
    let cases = [
        (MoodCategory::Happy, 117, 123),
        (MoodCategory::Energetic, 137, 144),
        (MoodCategory::Calm, 78, 82),
        (MoodCategory::Sad, 59, 62),
        (MoodCategory::Mysterious, 88, 92),
        (MoodCategory::Romantic, 73, 77),
    ];
    for (mood, at_five, at_six) in cases {
        assert_eq!(map_parameters(mood, SentimentLabel::Neutral, 5).tempo, at_five, "{}", mood);
        assert_eq!(map_parameters(mood, SentimentLabel::Neutral, 6).tempo, at_six, "{}", mood);
    }
}

// ============================================================================
// Properties over the whole input space
// ============================================================================

#[test]
fn test_every_combination_is_well_formed() {
    let sentiments = ["positive", "negative", "neutral", "ambivalent"];
    let mut moods: Vec<String> = MoodCategory::ALL.iter().map(|m| m.to_string()).collect();
    moods.push("nostalgic".to_string());

    for mood in &moods {
        for sentiment in sentiments {
            for energy in MIN_ENERGY..=MAX_ENERGY {
                let params = map_parameters(mood.as_str(), sentiment, energy);
                assert!((MIN_TEMPO..=MAX_TEMPO).contains(&params.tempo));
                assert!(!params.instruments.is_empty());
                assert_eq!(params.mood.to_string(), *mood);
                assert_eq!(params.energy, energy);

                let expected_key = if sentiment == "negative" {
                    Key::Minor
                } else {
                    Key::Major
                };
                assert_eq!(params.key, expected_key);
            }
        }
    }
}

#[test]
fn test_unknown_mood_behaves_like_base_100() {
    for energy in MIN_ENERGY..=MAX_ENERGY {
        let params = map_parameters("bittersweet", SentimentLabel::Positive, energy);
        assert_eq!(params.instruments, vec!["piano", "strings"]);
        assert_eq!(params.mood, MoodTag::Unrecognized("bittersweet".to_string()));
        // 100 * (29 + 2e) / 40, rounded half up
        let expected = (2 * 100 * (29 + 2 * u32::from(energy)) + 40) / 80;
        assert_eq!(u32::from(params.tempo), expected);
    }
}

#[test]
fn test_labels_are_case_insensitive() {
    assert_eq!(
        map_parameters("Happy", "POSITIVE", 7),
        map_parameters(MoodCategory::Happy, SentimentLabel::Positive, 7)
    );
}

#[test]
fn test_json_shape() {
    let params = map_parameters("mysterious", "negative", 8);
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "tempo": 101,
            "key": "minor",
            "mood": "mysterious",
            "energy": 8,
            "instruments": ["strings (pizzicato)", "low brass", "synthesizer pads", "percussion"]
        })
    );

    let back: MusicalParameters = serde_json::from_value(json).unwrap();
    assert_eq!(back, params);
}
