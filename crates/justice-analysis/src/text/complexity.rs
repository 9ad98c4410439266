//! Readability and complexity metrics for a document.

use serde::{Deserialize, Serialize};

use super::sentences::tokenize_sentences;

/// Readability metrics. All values are rounded for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Flesch reading ease, clamped to `0..=100`.
    pub flesch_reading_ease: f64,
    /// Share of words with three or more syllables.
    pub complex_word_density: f64,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Characters per word.
    pub avg_word_length: f64,
}

/// Compute readability metrics. Empty text yields all zeros.
pub fn document_complexity(text: &str) -> ComplexityMetrics {
    let sentences = tokenize_sentences(text);
    let words = words(text);

    if words.is_empty() || sentences.is_empty() {
        return ComplexityMetrics::default();
    }

    let word_count = words.len() as f64;
    let syllables: Vec<usize> = words.iter().map(|w| count_syllables(w)).collect();
    let total_syllables: usize = syllables.iter().sum();
    let complex_words = syllables.iter().filter(|&&s| s >= 3).count();

    let avg_sentence_length = word_count / sentences.len() as f64;
    let avg_word_length =
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count;
    let flesch = 206.835
        - 1.015 * avg_sentence_length
        - 84.6 * (total_syllables as f64 / word_count);

    ComplexityMetrics {
        flesch_reading_ease: round_to(flesch.clamp(0.0, 100.0), 2),
        complex_word_density: round_to(complex_words as f64 / word_count, 3),
        avg_sentence_length: round_to(avg_sentence_length, 2),
        avg_word_length: round_to(avg_word_length, 2),
    }
}

/// Lowercased words with surrounding punctuation trimmed; pure punctuation is dropped.
fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Vowel-group syllable estimate. Words of three characters or fewer count as one.
fn count_syllables(word: &str) -> usize {
    if word.chars().count() <= 3 {
        return 1;
    }
    let mut count = 0;
    let mut prev_is_vowel = false;
    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_is_vowel {
            count += 1;
        }
        prev_is_vowel = is_vowel;
    }
    count.max(1)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
