//! Extractive, frequency-based summarization.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use justice_core::config::DEFAULT_SUMMARIZATION_RATIO;
use justice_core::text::{collapse_whitespace, normalize};

use crate::text::split_sentences;

/// Returned for empty or whitespace-only input.
pub const NO_TEXT_SUMMARY: &str = "No text available to summarize.";

/// Texts with this many sentences or fewer are returned unchanged.
const MIN_SENTENCES: usize = 3;

/// Sentences need more than this many whitespace-separated tokens to be scored.
const MIN_SCORED_WORDS: usize = 3;

/// Select the highest-scoring sentences and return them in document order.
///
/// A sentence scores the sum of its words' frequencies (relative to the most
/// frequent word in the document) divided by the square root of its length.
/// The summary keeps `max(3, floor(n * ratio))` sentences; equal scores favour
/// the earlier sentence. Ratios outside `0..=1` are clamped and a non-finite
/// ratio falls back to the default.
pub fn summarize(text: &str, ratio: f64) -> String {
    if text.trim().is_empty() {
        return NO_TEXT_SUMMARY.to_string();
    }

    let collapsed = collapse_whitespace(text);
    let sentences = split_sentences(&collapsed);
    if sentences.len() <= MIN_SENTENCES {
        return text.to_string();
    }

    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        DEFAULT_SUMMARIZATION_RATIO
    };
    let target = MIN_SENTENCES.max((sentences.len() as f64 * ratio).floor() as usize);

    let words: Vec<Vec<String>> = sentences
        .iter()
        .map(|s| normalize(s).split_whitespace().map(str::to_string).collect())
        .collect();

    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    for word in words.iter().flatten() {
        *frequencies.entry(word.as_str()).or_insert(0) += 1;
    }
    let max_frequency = frequencies.values().copied().max().unwrap_or(0);
    if max_frequency == 0 {
        return text.to_string();
    }

    let mut seen = HashSet::new();
    let mut scored: Vec<(usize, f64)> = Vec::new();
    for (index, (sentence, sentence_words)) in sentences.iter().zip(&words).enumerate() {
        if sentence.split_whitespace().count() <= MIN_SCORED_WORDS || !seen.insert(*sentence) {
            continue;
        }
        let total: f64 = sentence_words
            .iter()
            .map(|w| frequencies[w.as_str()] as f64 / max_frequency as f64)
            .sum();
        let length = sentence_words.len().max(1) as f64;
        scored.push((index, total / length.sqrt()));
    }

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    let mut selected: Vec<usize> = scored.into_iter().take(target).map(|(i, _)| i).collect();
    selected.sort_unstable();

    debug!(
        "Summarized {} sentences down to {} (target {})",
        sentences.len(),
        selected.len(),
        target
    );

    selected
        .into_iter()
        .map(|i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ")
}
