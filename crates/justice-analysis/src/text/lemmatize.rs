//! Suffix-based noun lemmatization.
//!
//! Folds regular English plurals onto their singular so that "tenants" and
//! "tenant" compare equal. Only inflection is undone; derivational suffixes
//! ("-ment", "-tion") are left alone.

/// Plural suffix rules: (suffix, replacement). Longer suffixes first.
const PLURAL_SUFFIXES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("ies", "y"),
    ("xes", "x"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
];

/// Reduce a lowercased word to its singular form.
pub fn lemmatize(word: &str) -> String {
    if word.chars().count() <= 3 {
        return word.to_string();
    }

    for &(suffix, replacement) in PLURAL_SUFFIXES {
        if word.len() > suffix.len() + 1 && word.ends_with(suffix) {
            let stem = &word[..word.len() - suffix.len()];
            return format!("{}{}", stem, replacement);
        }
    }

    word.to_string()
}
