//! Splits message text into plain runs and clickable links.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"https?://\S+").expect("valid url regex");
    static ref TRAILING_PUNCT_RE: Regex = Regex::new(r"[),.!?]+$").expect("valid punctuation regex");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// `trailing` is sentence punctuation that followed the URL, kept as text.
    Link { url: &'a str, trailing: &'a str },
}

pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for found in URL_RE.find_iter(text) {
        if found.start() > cursor {
            out.push(Segment::Text(&text[cursor..found.start()]));
        }
        let raw = found.as_str();
        let split = TRAILING_PUNCT_RE
            .find(raw)
            .map(|m| m.start())
            .unwrap_or(raw.len());
        out.push(Segment::Link {
            url: &raw[..split],
            trailing: &raw[split..],
        });
        cursor = found.end();
    }

    if cursor < text.len() {
        out.push(Segment::Text(&text[cursor..]));
    }
    out
}
