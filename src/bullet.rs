//! Bullet glyph geometry.
//!
//! A bullet point reserves a leading margin of `2 * radius + gap_width` and
//! draws a filled circle in it, vertically centred on the first line of the
//! paragraph.

use serde::Serialize;

use crate::styled::Color;

/// Paragraph direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::LeftToRight => 1.0,
            Direction::RightToLeft => -1.0,
        }
    }
}

/// Vertical extent of a laid-out line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineExtent {
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub fill: Color,
}

/// Drawing surface a glyph paints onto
pub trait Canvas {
    fn fill_circle(&mut self, circle: Circle);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BulletGlyph {
    pub gap_width: f32,
    pub radius: f32,
    /// Falls back to the surface's text colour when unset
    pub color: Option<Color>,
}

impl BulletGlyph {
    pub fn leading_margin(&self) -> f32 {
        2.0 * self.radius + self.gap_width
    }

    /// Circle for a line whose margin starts at `x`.
    pub fn circle(
        &self,
        x: f32,
        direction: Direction,
        line: LineExtent,
        default_fill: Color,
    ) -> Circle {
        Circle {
            cx: x + direction.sign() * (self.gap_width + self.radius),
            cy: (line.top + line.bottom) / 2.0,
            radius: self.radius,
            fill: self.color.unwrap_or(default_fill),
        }
    }

    /// Paint the glyph. Only the first line of a bullet paragraph gets one.
    pub fn paint(
        &self,
        canvas: &mut dyn Canvas,
        x: f32,
        direction: Direction,
        line: LineExtent,
        first_line: bool,
        default_fill: Color,
    ) {
        if first_line {
            canvas.fill_circle(self.circle(x, direction, line, default_fill));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<Circle>);

    impl Canvas for Recorder {
        fn fill_circle(&mut self, circle: Circle) {
            self.0.push(circle);
        }
    }

    const LINE: LineExtent = LineExtent {
        top: 10.0,
        bottom: 30.0,
    };

    fn glyph(color: Option<Color>) -> BulletGlyph {
        BulletGlyph {
            gap_width: 8.0,
            radius: 3.0,
            color,
        }
    }

    #[test]
    fn margin_covers_glyph_and_gap() {
        assert_eq!(glyph(None).leading_margin(), 14.0);
    }

    #[test]
    fn left_to_right_circle() {
        let circle = glyph(None).circle(5.0, Direction::LeftToRight, LINE, Color::BLACK);
        assert_eq!(circle.cx, 16.0);
        assert_eq!(circle.cy, 20.0);
        assert_eq!(circle.radius, 3.0);
        assert_eq!(circle.fill, Color::BLACK);
    }

    #[test]
    fn right_to_left_mirrors_offset() {
        let circle = glyph(None).circle(100.0, Direction::RightToLeft, LINE, Color::BLACK);
        assert_eq!(circle.cx, 89.0);
    }

    #[test]
    fn custom_color_wins() {
        let red = Color::rgb(0xff, 0, 0);
        let circle = glyph(Some(red)).circle(0.0, Direction::LeftToRight, LINE, Color::BLACK);
        assert_eq!(circle.fill, red);
    }

    #[test]
    fn paints_only_first_line() {
        let mut canvas = Recorder::default();
        let bullet = glyph(None);
        bullet.paint(&mut canvas, 0.0, Direction::LeftToRight, LINE, true, Color::BLACK);
        bullet.paint(&mut canvas, 0.0, Direction::LeftToRight, LINE, false, Color::BLACK);
        assert_eq!(canvas.0.len(), 1);
    }
}
