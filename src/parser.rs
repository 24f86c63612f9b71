use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::element::{BulletMarker, Element, MAX_BULLET_DEPTH, TextMarkdown};

const QUOTE_PREFIX: &str = "> ";
const CODE_DELIMITER: char = '`';

/// A whole quote paragraph, line break included.
static QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^> [^\n]*\n?").expect("Pattern tested!"));

/// A whole bullet paragraph, or a single code delimiter.
static BULLET_OR_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[*+] [^\n]*\n?|`").expect("Pattern tested!"));

/// Used past the bullet depth limit, where markers stay text.
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new("`").expect("Pattern tested!"));

/// Parse markdown text into a tree of elements
pub fn parse(input: &str) -> TextMarkdown {
    let mut elements = Vec::new();
    let mut last = 0;

    for quote in QUOTE.find_iter(input) {
        if last < quote.start() {
            parse_bullets_and_code(&input[last..quote.start()], 0, &mut elements);
        }
        trace!(start = quote.start(), end = quote.end(), "quote");
        let text = &quote.as_str()[QUOTE_PREFIX.len()..];
        elements.push(Element::Quote(text.to_string()));
        last = quote.end();
    }

    if last < input.len() {
        parse_bullets_and_code(&input[last..], 0, &mut elements);
    }

    TextMarkdown::new(elements)
}

/// Split a quote-free segment into text, bullet points and code blocks.
/// `depth` counts the bullet points enclosing the segment.
fn parse_bullets_and_code(segment: &str, depth: usize, elements: &mut Vec<Element>) {
    let pattern = if depth < MAX_BULLET_DEPTH {
        &*BULLET_OR_CODE
    } else {
        &*CODE
    };
    let mut last = 0;

    // find_at keeps the preceding text as context, so `^` only matches at
    // real line starts after a code span ends mid-line.
    while let Some(found) = pattern.find_at(segment, last) {
        if last < found.start() {
            elements.push(Element::Text(segment[last..found.start()].to_string()));
        }

        if found.as_str() == "`" {
            let body_start = found.end();
            match segment[body_start..].find(CODE_DELIMITER) {
                Some(len) => {
                    trace!(start = found.start(), len, "code block");
                    let body = &segment[body_start..body_start + len];
                    elements.push(Element::CodeBlock(body.to_string()));
                    last = body_start + len + CODE_DELIMITER.len_utf8();
                }
                None => {
                    trace!(start = found.start(), "unterminated code block");
                    elements.push(Element::Text(segment[found.start()..].to_string()));
                    last = segment.len();
                }
            }
        } else {
            let paragraph = found.as_str();
            let marker = paragraph
                .chars()
                .next()
                .and_then(BulletMarker::from_char)
                .unwrap_or(BulletMarker::Star);
            let text = &paragraph[marker.as_str().len()..];
            trace!(start = found.start(), end = found.end(), "bullet point");

            let mut children = Vec::new();
            parse_bullets_and_code(text, depth + 1, &mut children);
            elements.push(Element::BulletPoint { marker, children });
            last = found.end();
        }

        if last >= segment.len() {
            break;
        }
    }

    if last < segment.len() {
        elements.push(Element::Text(segment[last..].to_string()));
    }
}
