use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Precomposed Latin letters with no canonical decomposition.
fn fold_ligature(c: char) -> Option<char> {
    match c {
        'æ' => Some('a'),
        'œ' => Some('o'),
        _ => None,
    }
}

/// Strip diacritical marks, keeping the base letter ("Mémoires" -> "Memoires").
pub fn remove_accents(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| fold_ligature(c).unwrap_or(c))
        .collect()
}

/// Lowercase and strip accents.
pub fn normalize(text: &str) -> String {
    remove_accents(&text.to_lowercase())
}
