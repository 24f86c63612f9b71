use tracing::debug;

use crate::bullet::BulletGlyph;
use crate::config::Config;
use crate::element::{Element, TextMarkdown};
use crate::styled::{Color, Style, StyledText};

/// Turns a parsed document into styled text
#[derive(Debug, Clone)]
pub struct MarkdownBuilder {
    pub bullet: BulletGlyph,
    pub code_background: Color,
    pub code_font: String,
    pub quote_margin: f32,
    pub quote_size: f32,
}

impl MarkdownBuilder {
    pub fn from_config(config: &Config) -> Self {
        Self {
            bullet: config.bullet.glyph(),
            code_background: config.code.background,
            code_font: config.code.font.clone(),
            quote_margin: config.quote.margin,
            quote_size: config.quote.size,
        }
    }

    pub fn render(&self, markdown: &TextMarkdown) -> StyledText {
        let mut styled = StyledText::new();
        for element in markdown.elements() {
            self.build_element(element, &mut styled);
        }
        debug!(
            bytes = styled.len(),
            spans = styled.spans().len(),
            "rendered styled text"
        );
        styled
    }

    fn build_element(&self, element: &Element, styled: &mut StyledText) {
        match element {
            Element::Text(text) => styled.push_str(text),
            Element::Quote(text) => styled.push_styled(
                text,
                [
                    Style::LeadingMargin(self.quote_margin),
                    Style::Italic,
                    Style::RelativeSize(self.quote_size),
                ],
            ),
            Element::CodeBlock(text) => styled.push_styled(
                text,
                [
                    Style::Background(self.code_background),
                    Style::Font(self.code_font.clone()),
                ],
            ),
            Element::BulletPoint { children, .. } => {
                let id = styled.open(Style::Bullet(self.bullet));
                for child in children {
                    self.build_element(child, styled);
                }
                styled.close(id);
            }
        }
    }
}

impl Default for MarkdownBuilder {
    fn default() -> Self {
        Self::from_config(&Config::compiled_default())
    }
}
