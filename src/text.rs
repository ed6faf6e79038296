//! Text normalization helpers shared by the heuristic scorers.

use unicode_segmentation::UnicodeSegmentation;

/// Split text into lowercased Unicode words, dropping punctuation.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.unicode_words().map(|w| w.to_lowercase())
}

/// Cut `text` to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_lowercases_and_strips_punctuation() {
        let w: Vec<String> = words("I'm SO excited, let's party!!").collect();
        assert_eq!(w, vec!["i'm", "so", "excited", "let's", "party"]);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 0), "");
        // Multi-byte characters are never split
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("🎵🎶🎵", 2), "🎵🎶");
    }
}
