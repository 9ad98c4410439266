//! Supplementary text metrics: sentence tokenization, key phrases,
//! pairwise similarity and readability.

pub mod complexity;
pub mod keyphrases;
pub mod lemmatize;
pub mod sentences;
pub mod similarity;

pub use complexity::{document_complexity, ComplexityMetrics};
pub use keyphrases::extract_key_phrases;
pub use lemmatize::lemmatize;
pub use sentences::{split_sentences, tokenize_sentences};
pub use similarity::{preprocess_text, text_similarity};
