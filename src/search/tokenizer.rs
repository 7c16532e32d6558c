use regex::Regex;
use std::collections::HashSet;

/// Words dropped during normalization. Trimmed-down English stopword list in
/// the spirit of the NLTK set; callers can inject their own (or an empty one)
/// through [`Tokenizer::new`].
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "an", "and", "any", "are", "as", "at", "be", "been", "but",
    "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have", "he", "her",
    "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "me", "my", "no", "not",
    "of", "on", "or", "our", "she", "so", "some", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "to", "up", "was", "we", "were", "what", "when",
    "which", "who", "will", "with", "would", "you", "your",
];

/// Turns raw document text into normalized index terms.
///
/// Normalization rules, in order:
/// 1. Lowercase the whole input (Unicode-aware `str::to_lowercase`).
/// 2. Segment into ASCII-alphanumeric runs (`[a-z0-9]+`); everything else is
///    a boundary, so punctuation-only "words" never survive. Non-ASCII
///    letters act as boundaries too, same as the upstream indexer.
/// 3. Drop words that appear in the configured stopword set.
///
/// The output is an ordered sequence and may contain duplicates; callers
/// wanting set semantics collect it themselves. Identical input and stopword
/// configuration always produce identical output.
pub struct Tokenizer {
    word_re: Regex,
    stopwords: HashSet<String>,
}

impl Tokenizer {
    pub fn new(stopwords: impl IntoIterator<Item = String>) -> Self {
        Self {
            word_re: Regex::new(r"[a-z0-9]+").unwrap(),
            stopwords: stopwords.into_iter().collect(),
        }
    }

    pub fn with_default_stopwords() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().map(|s| s.to_string()))
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word_re
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .filter(|word| !self.stopwords.contains(word))
            .collect()
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}
