use static_search_core::Index;
use std::collections::BTreeSet;
use std::io::{self, Read};

const HTML_TEST: &str = r#"<!doctype html>
<html>
<script>alert(1)</script>
<head>
  <title>Hello world</title>
  <meta name="description" content="offspring">
  <meta name="keywords" content="green day, yoohie">
  <meta itemprop="datePublished" content="2023-07-20T21:40:41+10:00" />
</head>
<body>
 <div>
   <img src="/some/image.png" alt="masterpiece">
   <a href="naive">link</a>
   <p>This is a test.</p>
   <noscript>
     <a href="rock">roll</a>
   </noscript>
 </div>
</body>
</html>"#;

/// Yields `data` then fails.
struct FailingReader<'a> {
    data: &'a [u8],
}

impl Read for FailingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream dropped"));
        }
        let n = self.data.read(buf)?;
        Ok(n)
    }
}

fn assert_words(index: &Index, expected: &[&str]) {
    let got: BTreeSet<&str> = index.words().keys().map(String::as_str).collect();
    let want: BTreeSet<&str> = expected.iter().copied().collect();
    assert_eq!(got, want);
}

#[test]
fn add_text_indexes_stems() {
    let mut index = Index::new();
    let url = "http://www.codingrobots.com";
    let id = index
        .add_text(url, "Message", "2023-01-01", "HEY you! Try Mémoires.\nTry?".as_bytes())
        .unwrap();
    assert_eq!(id, 0);
    assert_eq!(index.docs().len(), 1);
    let doc = &index.docs()[0];
    assert_eq!(doc.url, url);
    assert_eq!(doc.title, "Message");
    assert_eq!(doc.date, "2023-01-01");
    assert_words(&index, &["hey", "tri", "memoir"]);
}

#[test]
fn add_html_extracts_and_indexes() {
    let mut index = Index::new();
    let url = "http://www.codingrobots.com/memoires/";
    index.add_html(url, HTML_TEST.as_bytes()).unwrap();
    assert_eq!(index.docs().len(), 1);
    let doc = &index.docs()[0];
    assert_eq!(doc.title, "Hello world");
    assert_eq!(doc.url, url);
    assert_eq!(doc.date, "2023-07-20T21:40:41+10:00");
    assert_words(
        &index,
        &[
            "this", "test", "hello", "world", "offspr", "green", "day", "yoohi", "masterpiec",
            "link", "roll", "codingrobot", "com", "memoir",
        ],
    );
}

#[test]
fn script_text_is_never_indexed() {
    let mut index = Index::new();
    index.add_html("", HTML_TEST.as_bytes()).unwrap();
    assert!(!index.words().contains_key("alert"));
    assert!(!index.words().contains_key("1"));
}

#[test]
fn stopwords_never_become_stems() {
    let mut index = Index::new();
    index.add_text("u", "", "", "a is this".as_bytes()).unwrap();
    assert_words(&index, &["this"]);
}

#[test]
fn failed_read_commits_nothing() {
    let mut index = Index::new();
    index.add_text("ok", "", "", "hello world".as_bytes()).unwrap();

    let err = index
        .add_text("bad", "", "", FailingReader { data: b"green day" })
        .unwrap_err();
    assert!(matches!(err, static_search_core::Error::Io(_)));
    assert!(index.add_html("bad", FailingReader { data: b"<p>green</p>" }).is_err());

    assert_eq!(index.docs().len(), 1);
    assert_words(&index, &["hello", "world"]);
}

#[test]
fn html_and_text_share_stem_entries() {
    let mut index = Index::new();
    index.add_text("a", "", "", "hello".as_bytes()).unwrap();
    index.add_html("b", "<title>Hello</title>".as_bytes()).unwrap();
    let ids: Vec<u32> = index.postings("hello").iter().map(|p| p.doc_id).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(index.docs()[1].title, "Hello");
}
