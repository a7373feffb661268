use scraper::node::Node;
use scraper::{ElementRef, Html};
use url::Url;

/// Meta keys (`itemprop`, `property` or `name`) that carry a publish date.
const DATE_KEYS: &[&str] = &["datepublished", "article:published_time", "date", "dc.date"];

/// Meta `name`s whose `content` is indexed as text.
const TEXT_META: &[&str] = &["description", "keywords"];

/// Elements whose payload is never indexed.
const SKIPPED: &[&str] = &["script", "style", "template"];

/// What the index needs from an HTML page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub date: String,
    /// Flattened indexable text, pieces separated by whitespace.
    pub text: String,
}

/// Extract title, publish date and indexable text from `html`.
///
/// Parsing never fails: broken markup yields whatever html5ever recovers.
/// The page `url` is appended to the text so documents can be found by
/// fragments of their own address.
pub fn extract(html: &str, url: &str) -> Page {
    let doc = Html::parse_document(html);
    let mut ex = Extractor::default();
    let mut noscript = Vec::new();
    ex.walk(doc.root_element(), &mut noscript);
    // With scripting enabled the parser keeps noscript bodies as raw text;
    // parse that text again so it is indexed like ordinary markup.
    while let Some(markup) = noscript.pop() {
        let fragment = Html::parse_fragment(&markup);
        ex.walk(fragment.root_element(), &mut noscript);
    }
    ex.push_url(url);
    tracing::trace!(title = ?ex.title, date = ?ex.date, "extracted html metadata");
    Page {
        title: ex.title.unwrap_or_default(),
        date: ex.date.unwrap_or_default(),
        text: ex.text,
    }
}

enum Item<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

#[derive(Default)]
struct Extractor {
    title: Option<String>,
    date: Option<String>,
    text: String,
}

impl Extractor {
    fn push(&mut self, s: &str) {
        if s.trim().is_empty() { return; }
        if !self.text.is_empty() { self.text.push(' '); }
        self.text.push_str(s);
    }

    /// Depth-first walk in document order with an explicit stack, so nesting
    /// depth is bounded by the heap rather than the call stack. Raw noscript
    /// text is handed back through `noscript` instead of being visited.
    fn walk(&mut self, root: ElementRef<'_>, noscript: &mut Vec<String>) {
        let mut stack = vec![Item::Element(root)];
        while let Some(item) = stack.pop() {
            let el = match item {
                Item::Text(text) => {
                    self.push(text);
                    continue;
                }
                Item::Element(el) => el,
            };
            let name = el.value().name();
            if SKIPPED.contains(&name) { continue; }

            if let Some(alt) = el.value().attr("alt") {
                self.push(alt);
            }
            match name {
                "title" if self.title.is_none() => {
                    self.title = Some(el.text().collect::<String>().trim().to_string());
                }
                "meta" => self.visit_meta(el),
                _ => {}
            }

            let in_noscript = name == "noscript";
            for child in el.children().rev() {
                match child.value() {
                    Node::Text(text) if in_noscript => noscript.push(text.to_string()),
                    Node::Text(text) => stack.push(Item::Text(&**text)),
                    Node::Element(_) => {
                        if let Some(child) = ElementRef::wrap(child) { stack.push(Item::Element(child)); }
                    }
                    _ => {}
                }
            }
        }
    }

    fn visit_meta(&mut self, el: ElementRef<'_>) {
        let meta = el.value();
        let Some(content) = meta.attr("content") else { return };
        if self.date.is_none() {
            let is_date = ["itemprop", "property", "name"]
                .iter()
                .filter_map(|attr| meta.attr(attr))
                .any(|key| DATE_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k)));
            if is_date {
                self.date = Some(content.trim().to_string());
                return;
            }
        }
        if let Some(name) = meta.attr("name") {
            if TEXT_META.iter().any(|k| name.eq_ignore_ascii_case(k)) {
                self.push(content);
            }
        }
    }

    fn push_url(&mut self, url: &str) {
        let Ok(parsed) = Url::parse(url) else {
            self.push(url);
            return;
        };
        if let Some(host) = parsed.host_str() {
            let host = host.strip_prefix("www.").unwrap_or(host);
            self.push(host);
        }
        self.push(parsed.path());
    }
}
