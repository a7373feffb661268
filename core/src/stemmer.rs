//! English suffix stripping (Snowball Porter2).

use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Reduce a lowercase, accent-free token to its root form.
pub fn stem(token: &str) -> String {
    STEMMER.stem(token).into_owned()
}
