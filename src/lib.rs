mod builder;
mod bullet;
mod config;
mod element;
mod error;
mod parser;
mod styled;
mod typst;

pub use builder::MarkdownBuilder;
pub use bullet::{BulletGlyph, Canvas, Circle, Direction, LineExtent};
pub use config::{BulletConfig, CodeConfig, Config, PageConfig, QuoteConfig};
pub use element::{BulletMarker, Element, ElementKind, Leaves, MAX_BULLET_DEPTH, TextMarkdown};
pub use error::{Error, Result};
pub use styled::{Color, ParseColorError, Span, SpanId, Style, StyledText};
pub use typst::styled_to_typst;

use tracing::debug;
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Parse markdown text into a tree of elements.
pub fn parse(markdown: &str) -> TextMarkdown {
    let parsed = parser::parse(markdown);
    debug!(elements = parsed.elements().len(), "parsed markdown");
    parsed
}

/// Render a parsed document with the given config.
pub fn render(markdown: &TextMarkdown, config: &Config) -> StyledText {
    MarkdownBuilder::from_config(config).render(markdown)
}

/// Parse and style markdown in one step.
pub fn markdown_to_styled(markdown: &str, config: &Config) -> StyledText {
    render(&parse(markdown), config)
}

/// Convert markdown to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> String {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> String {
    let styled = markdown_to_styled(markdown, config);
    typst::styled_to_typst(&styled, config)
}

/// Convert markdown to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Compile markdown to a Typst document.
fn compile_document(markdown: &str, config: &Config) -> Result<PagedDocument> {
    let typst_content = markdown_to_typst_with_config(markdown, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;
    debug!(pages = doc.pages.len(), "compiled document");
    Ok(doc)
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>> {
    let doc = compile_document(markdown, config)?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Export(format!("{:?}", e)))
}

/// One page rendered to SVG, with its size in points.
#[derive(Debug, Clone)]
pub struct SvgPage {
    pub markup: String,
    pub width_pt: f64,
    pub height_pt: f64,
}

/// Pages of a compiled document rendered to SVG.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    pub pages: Vec<SvgPage>,
}

/// Convert markdown to SVG pages using default config.
pub fn markdown_to_svg(markdown: &str) -> Result<SvgDocument> {
    markdown_to_svg_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to SVG pages with custom config. Page sizes are read
/// per page, so mixed sizes survive.
pub fn markdown_to_svg_with_config(markdown: &str, config: &Config) -> Result<SvgDocument> {
    let doc = compile_document(markdown, config)?;

    let pages = doc
        .pages
        .iter()
        .map(|page| {
            let size = page.frame.size();
            SvgPage {
                markup: typst_svg::svg(page),
                width_pt: size.x.to_pt(),
                height_pt: size.y.to_pt(),
            }
        })
        .collect();

    Ok(SvgDocument { pages })
}
