use std::ops::Range;

use crate::config::Config;
use crate::styled::{Span, Style, StyledText};

/// Convert styled text to Typst markup
pub fn styled_to_typst(styled: &StyledText, config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    out.push('\n');

    // Outer spans first; ties keep the builder's pre-order
    let mut spans: Vec<&Span> = styled.spans().iter().collect();
    spans.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });

    emit_range(styled.text(), &spans, 0..styled.len(), &mut out);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Emit `text[range]`, wrapping the parts covered by `spans`.
fn emit_range(text: &str, spans: &[&Span], range: Range<usize>, out: &mut String) {
    let mut cursor = range.start;
    let mut i = 0;

    while i < spans.len() {
        let span = spans[i];
        let start = span.range.start.clamp(cursor, range.end);
        let end = span.range.end.clamp(start, range.end);

        // Spans nested inside this one follow it directly
        let nested = spans[i + 1..]
            .iter()
            .take_while(|s| s.range.start >= span.range.start && s.range.end <= span.range.end)
            .count();

        escape_text(&text[cursor..start], out);

        let body_end = if span.style.is_block() && text[start..end].ends_with('\n') {
            end - 1
        } else {
            end
        };

        if span.style.is_block() && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        open_style(&span.style, out);
        emit_range(text, &spans[i + 1..i + 1 + nested], start..body_end, out);
        out.push(']');
        if span.style.is_block() {
            out.push('\n');
        }

        cursor = end;
        i += 1 + nested;
    }

    escape_text(&text[cursor..range.end], out);
}

fn open_style(style: &Style, out: &mut String) {
    match style {
        Style::Italic => out.push_str("#text(style: \"italic\")["),
        Style::RelativeSize(size) => out.push_str(&format!("#text(size: {size}em)[")),
        Style::LeadingMargin(margin) => out.push_str(&format!("#pad(left: {margin}pt)[")),
        Style::Font(font) => {
            out.push_str("#text(font: \"");
            out.push_str(&escape_string(font));
            out.push_str("\")[");
        }
        Style::Background(color) => out.push_str(&format!(
            "#box(fill: rgb(\"{color}\"), inset: (x: 2pt), outset: (y: 2pt))["
        )),
        Style::Bullet(glyph) => {
            let fill = match glyph.color {
                Some(color) => format!("rgb(\"{color}\")"),
                None => "black".to_string(),
            };
            out.push_str(&format!(
                "#list(marker: circle(radius: {}pt, fill: {fill}), body-indent: {}pt)[",
                glyph.radius, glyph.gap_width
            ));
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    // Digits then `.` at the start of a line would open a numbered list
    let mut line_start = out.is_empty() || out.ends_with('\n') || out.ends_with('[');
    let mut leading_digits = false;

    for ch in text.chars() {
        match ch {
            '.' if leading_digits => out.push_str("\\."),
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '-' | '+'
            | '/' | '~' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str(" \\\n"),
            '\r' => {}
            _ => out.push(ch),
        }

        match ch {
            '\n' => {
                line_start = true;
                leading_digits = false;
            }
            ' ' | '\t' if line_start => {}
            c if c.is_ascii_digit() && (line_start || leading_digits) => {
                line_start = false;
                leading_digits = true;
            }
            _ => {
                line_start = false;
                leading_digits = false;
            }
        }
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use crate::markdown_to_typst;
    use crate::{Config, markdown_to_typst_with_config};

    const PREAMBLE: &str = "#set par(linebreaks: \"optimized\")\n\n";

    #[test]
    fn paragraph() {
        assert_eq!(markdown_to_typst("Hello world"), format!("{PREAMBLE}Hello world\n"));
    }

    #[test]
    fn line_breaks() {
        assert_eq!(
            markdown_to_typst("one\ntwo"),
            format!("{PREAMBLE}one \\\ntwo\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(markdown_to_typst("a # b"), format!("{PREAMBLE}a \\# b\n"));
        assert_eq!(markdown_to_typst("a_b"), format!("{PREAMBLE}a\\_b\n"));
        assert_eq!(markdown_to_typst("x * y"), format!("{PREAMBLE}x \\* y\n"));
    }

    #[test]
    fn numbered_line_stays_text() {
        assert_eq!(
            markdown_to_typst("1. first\n"),
            format!("{PREAMBLE}1\\. first \\\n")
        );
        assert_eq!(
            markdown_to_typst("a\n  23. b"),
            format!("{PREAMBLE}a \\\n  23\\. b\n")
        );
        assert_eq!(markdown_to_typst("v1. x"), format!("{PREAMBLE}v1. x\n"));
        assert_eq!(markdown_to_typst("12 x. y"), format!("{PREAMBLE}12 x. y\n"));
    }

    #[test]
    fn numbered_bullet_body_stays_text() {
        let typst = markdown_to_typst("* 2. two\n");
        assert!(typst.contains("body-indent: 8pt)[2\\. two]"));
    }

    #[test]
    fn inline_code() {
        assert_eq!(
            markdown_to_typst("`code`"),
            format!(
                "{PREAMBLE}#box(fill: rgb(\"#eeeeee\"), inset: (x: 2pt), outset: (y: 2pt))[#text(font: \"DejaVu Sans Mono\")[code]]\n"
            )
        );
    }

    #[test]
    fn quote() {
        assert_eq!(
            markdown_to_typst("> hi\n"),
            format!(
                "{PREAMBLE}#pad(left: 16pt)[#text(style: \"italic\")[#text(size: 1.1em)[hi]]]\n"
            )
        );
    }

    #[test]
    fn bullet_list() {
        assert_eq!(
            markdown_to_typst("* one\n* two\n"),
            format!(
                "{PREAMBLE}#list(marker: circle(radius: 3pt, fill: rgb(\"#e91e63\")), body-indent: 8pt)[one]\n\
                 #list(marker: circle(radius: 3pt, fill: rgb(\"#e91e63\")), body-indent: 8pt)[two]\n"
            )
        );
    }

    #[test]
    fn bullet_after_text_starts_new_line() {
        let typst = markdown_to_typst("intro\n* item");
        assert!(typst.contains("intro \\\n#list("));
    }

    #[test]
    fn bullet_without_color_uses_black() {
        let mut config = Config::compiled_default();
        config.bullet.color = None;
        let typst = markdown_to_typst_with_config("* a", &config);
        assert!(typst.contains("fill: black"));
    }

    #[test]
    fn page_numbers() {
        let mut config = Config::compiled_default();
        config.page.numbers = true;
        let typst = markdown_to_typst_with_config("x", &config);
        assert!(typst.starts_with("#set par(linebreaks: \"optimized\")\n#set page(numbering: \"1\")\n\n"));
    }

    #[test]
    fn code_inside_bullet() {
        let typst = markdown_to_typst("* run `ls` now\n");
        assert!(typst.contains(
            "body-indent: 8pt)[run #box(fill: rgb(\"#eeeeee\"), inset: (x: 2pt), outset: (y: 2pt))[#text(font: \"DejaVu Sans Mono\")[ls]] now]\n"
        ));
    }
}
