//! Rich text as a plain string plus range-based style annotations.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::bullet::BulletGlyph;

/// An RGBA colour written as `#rrggbb` or `#rrggbbaa`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected #rrggbb or #rrggbbaa, got '{0}'")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 0xff },
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Visual attribute attached to a range of text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Style {
    Italic,
    /// Font size as a multiple of the body size
    RelativeSize(f32),
    /// Indentation before each line of the paragraph
    LeadingMargin(f32),
    Font(String),
    Background(Color),
    Bullet(BulletGlyph),
}

impl Style {
    /// Styles that lay out their range as a paragraph of its own.
    pub fn is_block(&self) -> bool {
        matches!(self, Style::LeadingMargin(_) | Style::Bullet(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    /// Byte offsets into [`StyledText::text`]
    pub range: Range<usize>,
    pub style: Style,
}

/// Handle to a span opened with [`StyledText::open`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanId(usize);

/// Text with style spans layered on top.
///
/// Spans are kept in pre-order: a span comes before every span nested inside
/// it. Spans either nest or are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyledText {
    text: String,
    spans: Vec<Span>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append `text` with every style in `styles` covering it, outermost first.
    pub fn push_styled(&mut self, text: &str, styles: impl IntoIterator<Item = Style>) {
        let start = self.text.len();
        let end = start + text.len();
        self.text.push_str(text);
        self.spans.extend(styles.into_iter().map(|style| Span {
            range: start..end,
            style,
        }));
    }

    /// Start a span at the current end of the text. It grows with everything
    /// appended until [`close`](Self::close) is called.
    pub fn open(&mut self, style: Style) -> SpanId {
        let at = self.text.len();
        self.spans.push(Span {
            range: at..at,
            style,
        });
        SpanId(self.spans.len() - 1)
    }

    pub fn close(&mut self, id: SpanId) {
        let end = self.text.len();
        if let Some(span) = self.spans.get_mut(id.0) {
            span.range.end = end;
        }
    }

    /// Spans covering the byte at `offset`.
    pub fn spans_at(&self, offset: usize) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |span| span.range.contains(&offset))
    }

    /// Convert a byte range into UTF-16 code unit offsets.
    pub fn utf16_range(&self, range: Range<usize>) -> Range<usize> {
        let units = |end: usize| -> usize {
            self.text[..end.min(self.text.len())]
                .chars()
                .map(char::len_utf16)
                .sum()
        };
        units(range.start)..units(range.end)
    }
}
