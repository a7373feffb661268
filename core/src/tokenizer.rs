use crate::normalize::normalize;
use crate::stemmer::stem;
use crate::stopwords::is_stopword;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Combining marks stay attached so decomposed accents do not split a word.
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}][\p{L}\p{M}\p{N}]*").expect("valid regex");
}

/// Split text into maximal runs of letters and digits, left to right.
///
/// The iterator is lazy and borrows `text`; call again to restart.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> + '_ {
    RE.find_iter(text).map(|m| m.as_str())
}

/// Full analysis chain: tokenize, normalize, drop stopwords, stem.
pub fn analyze(text: &str) -> impl Iterator<Item = String> + '_ {
    tokens(text)
        .map(normalize)
        .filter(|token| !is_stopword(token))
        .map(|token| stem(&token))
}
