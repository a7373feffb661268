use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    // Deliberately short: "this" and other content-bearing words are kept.
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a", "an", "and", "are", "as", "at", "be", "by", "for", "in", "is", "it",
            "of", "on", "or", "the", "to", "was", "were", "with", "you",
        ];
        words.iter().copied().collect()
    };
}

/// Whether `token` (already normalized) carries no indexing value.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}
