//! In-memory full-text index over plain-text and HTML documents.
//!
//! Every text stream goes through the same analysis chain
//! (tokenize, normalize, drop stopwords, stem) before postings are recorded
//! against the document it came from.

pub mod error;
pub mod html;
pub mod index;
pub mod normalize;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use error::{Error, Result};
pub use html::{extract, Page};
pub use index::{DocId, Document, Index, Posting};
pub use normalize::{normalize, remove_accents};
pub use tokenizer::{analyze, tokens};
