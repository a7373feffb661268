use crate::error::{Error, Result};
use crate::html;
use crate::tokenizer::analyze;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;

/// Position of a document in [`Index::docs`].
pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub url: String,
    pub title: String,
    /// Stored verbatim, never parsed.
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    /// Occurrences of the stem in the document.
    pub tf: u32,
}

/// Append-only document store plus inverted index from stem to postings.
///
/// Postings reference documents by [`DocId`]; each stem has at most one
/// posting per document, in ascending `doc_id` order.
#[derive(Debug, Default)]
pub struct Index {
    docs: Vec<Document>,
    words: HashMap<String, Vec<Posting>>,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    /// Index a plain-text stream under the given metadata.
    ///
    /// The stream is read to the end before anything is recorded, so a read
    /// error leaves the index untouched.
    pub fn add_text<R: Read>(&mut self, url: &str, title: &str, date: &str, content: R) -> Result<DocId> {
        let text = read_all(content, url)?;
        let doc = Document { url: url.to_string(), title: title.to_string(), date: date.to_string() };
        self.commit(doc, &text)
    }

    /// Index an HTML page; title and date come from the markup.
    pub fn add_html<R: Read>(&mut self, url: &str, content: R) -> Result<DocId> {
        let markup = read_all(content, url)?;
        let page = html::extract(&markup, url);
        let doc = Document { url: url.to_string(), title: page.title, date: page.date };
        self.commit(doc, &page.text)
    }

    pub fn docs(&self) -> &[Document] { &self.docs }

    pub fn words(&self) -> &HashMap<String, Vec<Posting>> { &self.words }

    pub fn doc(&self, id: DocId) -> Option<&Document> { self.docs.get(id as usize) }

    /// Postings for an already stemmed term.
    pub fn postings(&self, stem: &str) -> &[Posting] {
        self.words.get(stem).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn num_terms(&self) -> usize { self.words.len() }

    /// Documents containing every stem `word` analyzes to, in `DocId` order.
    ///
    /// Stopwords and words without tokens match nothing.
    pub fn lookup(&self, word: &str) -> Vec<&Document> {
        let stems: Vec<String> = analyze(word).collect();
        let Some((first, rest)) = stems.split_first() else { return Vec::new() };
        self.postings(first)
            .iter()
            .map(|p| p.doc_id)
            .filter(|id| rest.iter().all(|s| self.postings(s).binary_search_by_key(id, |p| p.doc_id).is_ok()))
            .filter_map(|id| self.doc(id))
            .collect()
    }

    fn commit(&mut self, doc: Document, text: &str) -> Result<DocId> {
        let doc_id = next_doc_id(self.docs.len())?;
        let mut tf_counts: HashMap<String, u32> = HashMap::new();
        for stem in analyze(text) {
            *tf_counts.entry(stem).or_insert(0) += 1;
        }
        let num_stems = tf_counts.len();
        for (stem, tf) in tf_counts {
            self.words.entry(stem).or_default().push(Posting { doc_id, tf });
        }
        tracing::debug!(doc_id, url = %doc.url, num_stems, "indexed document");
        self.docs.push(doc);
        Ok(doc_id)
    }
}

/// Id for the document appended after `len` existing ones.
fn next_doc_id(len: usize) -> Result<DocId> {
    DocId::try_from(len).map_err(|_| Error::Full)
}

fn read_all<R: Read>(mut content: R, url: &str) -> Result<String> {
    let mut buf = Vec::new();
    if let Err(err) = content.read_to_end(&mut buf) {
        tracing::warn!(url, error = %err, "failed to read document");
        return Err(err.into());
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
